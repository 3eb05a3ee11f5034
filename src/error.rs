//! Error handling for sitemap parsing and export
use super::{StrSpan, StringSpan};
use std::path::PathBuf;

/// A result type for the XML tree parser.
pub type XmlResult<T> = std::result::Result<T, XmlError>;

/// A result type for the sitemap pipeline.
pub type SitemapResult<T> = std::result::Result<T, SitemapError>;

/// Everything that can go wrong between raw input and a list of records.
///
/// Every variant renders as a single human-readable message, suitable to show a user as-is,
/// so none of them report an underlying `source`.
#[derive(Debug, thiserror::Error)]
pub enum SitemapError {
    /// Neither a file nor pasted text was supplied
    #[error("No sitemap provided: supply a file or paste the XML text")]
    EmptyInput,

    /// The sanitized text is not well-formed XML
    #[error("Invalid XML:\n{0}")]
    InvalidXml(XmlError),

    /// The document parsed, but contains neither `<url>` nor `<sitemap>` entries
    #[error("No URLs found: the document has no <url> or <sitemap> entries")]
    NoUrlsFound,

    /// Reading the input failed
    #[error("IO error: {0}")]
    Io(std::io::Error),
}
impl From<XmlError> for SitemapError {
    fn from(err: XmlError) -> Self {
        Self::InvalidXml(err)
    }
}
impl From<std::io::Error> for SitemapError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
impl SitemapError {
    /// Attaches a file path to the location of an XML error.
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn with_path(self, path: PathBuf) -> Self {
        match self {
            Self::InvalidXml(e) => Self::InvalidXml(e.with_path(path)),
            other => other,
        }
    }
}

/// An error that occurred while parsing a document.
#[derive(Debug)]
pub struct XmlError {
    /// Where in the source the error occurred
    pub context: Box<ErrorContext>,

    /// The kind of error that occurred while parsing a document
    pub kind: XmlErrorKind,
}
impl XmlError {
    /// Creates a new `XmlError`
    #[must_use]
    pub fn new(kind: XmlErrorKind, context: ErrorContext) -> Self {
        Self {
            context: Box::new(context),
            kind,
        }
    }

    /// Adds a path to the error context.
    #[must_use]
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.context.path = Some(path);
        self
    }
}
impl std::fmt::Display for XmlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.context)?;

        for line in self.kind.to_string().lines() {
            writeln!(f, "= {line}")?;
        }
        Ok(())
    }
}
impl std::error::Error for XmlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

/// The kind of error that occurred while parsing a document.
#[derive(Debug, thiserror::Error)]
pub enum XmlErrorKind {
    /// Another error occurred while parsing the document
    #[error("{0}")]
    Custom(String),

    /// The XML declaration was not first
    #[error("The <?xml> declaration must appear at the start of the document")]
    DeclarationNotFirst,

    /// A tag in the document was never closed
    #[error("Unclosed tag: {0}")]
    UnclosedTag(String),

    /// A closing tag does not match the element it closes
    #[error("Mismatched closing tag: expected </{expected}>, found </{found}>")]
    MismatchedTag {
        /// Name of the element that is open
        expected: String,

        /// Name in the closing tag
        found: String,
    },

    /// Input ended before a root element was complete
    #[error("End of input reached unexpectedly")]
    UnexpectedEof,

    /// An entity reference is malformed or not one XML predefines
    #[error("Undefined or malformed entity reference `{0}`")]
    Entity(String),

    /// An attribute name appears twice on the same element
    #[error("Duplicate attribute: {0}")]
    DuplicateAttribute(String),

    /// The tokenizer rejected the input
    #[error("XML parser error: {0}")]
    Xml(#[from] xmlparser::Error),
}

/// Context describing the error location in the source text.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The path to the file that was parsed, if available.
    pub path: Option<PathBuf>,

    /// The source line containing the error.
    pub line: String,

    /// Position of the error in the source text.
    pub span: StringSpan,

    /// 1-based row and column of `span`.
    pub position: (usize, usize),
}
impl ErrorContext {
    /// Creates a new `ErrorContext` for the given span of `source`.
    #[must_use]
    pub fn new(source: &str, span: StrSpan) -> Self {
        let position = span.position(source);
        Self {
            path: None,
            line: nth_line(source, position.0),
            span: span.into(),
            position,
        }
    }

    /// Creates a new `ErrorContext` from a 1-based row and column reported by the tokenizer.
    #[must_use]
    pub fn at(source: &str, row: usize, col: usize) -> Self {
        Self {
            path: None,
            line: nth_line(source, row),
            span: StringSpan::default(),
            position: (row, col),
        }
    }
}
impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = self.path.as_ref().map(|p| p.display());
        let line = self.line.trim_end();

        if !line.is_empty() {
            writeln!(f, "| {line}")?;
        }

        let (row, col) = self.position;
        write!(f, "= At ")?;
        if let Some(path) = path {
            write!(f, "{path}:")?;
        }
        writeln!(f, "{row}:{col}")
    }
}

fn nth_line(source: &str, row: usize) -> String {
    source
        .lines()
        .nth(row.saturating_sub(1))
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_display() {
        let src = "<urlset>\n  <url></loc>\n</urlset>";
        let span = StrSpan {
            text: "</loc>",
            start: 16,
        };
        let context = ErrorContext::new(src, span);
        assert_eq!(context.position, (2, 8));

        let error = XmlError::new(
            XmlErrorKind::MismatchedTag {
                expected: "url".to_string(),
                found: "loc".to_string(),
            },
            context,
        )
        .with_path(PathBuf::from("sitemap.xml"));

        assert_eq!(
            error.to_string(),
            "|   <url></loc>\n= At sitemap.xml:2:8\n= Mismatched closing tag: expected </url>, found </loc>\n"
        );
    }

    #[test]
    fn test_with_path_only_touches_xml_errors() {
        let error = SitemapError::NoUrlsFound.with_path(PathBuf::from("a.xml"));
        assert!(matches!(error, SitemapError::NoUrlsFound));
    }
}
