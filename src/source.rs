use crate::{Record, SitemapError, SitemapResult, extract, sanitize};
use std::path::PathBuf;

/// Where the raw sitemap text comes from: a file on disk, or text pasted by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapSource {
    /// A sitemap file
    File(PathBuf),

    /// Pasted sitemap text
    Text(String),
}
impl SitemapSource {
    /// Returns the raw text of the source.
    ///
    /// # Errors
    /// Returns [`SitemapError::Io`] if the file cannot be read.
    pub fn read(&self) -> SitemapResult<String> {
        match self {
            Self::File(path) => Ok(std::fs::read_to_string(path)?),
            Self::Text(text) => Ok(text.clone()),
        }
    }
}

/// Sanitizes and extracts raw sitemap text.
///
/// # Errors
/// - [`SitemapError::EmptyInput`] if the text is blank
/// - Any error of [`extract`]
pub fn parse_input(raw: &str) -> SitemapResult<Vec<Record>> {
    if raw.trim().is_empty() {
        return Err(SitemapError::EmptyInput);
    }

    extract(&sanitize(raw))
}

/// Reads, sanitizes and extracts a sitemap source. XML errors from a file carry its path.
///
/// # Errors
/// - [`SitemapError::EmptyInput`] if there is no source, or it is blank
/// - [`SitemapError::Io`] if the file cannot be read
/// - Any error of [`extract`]
pub fn parse_source(source: Option<&SitemapSource>) -> SitemapResult<Vec<Record>> {
    let Some(source) = source else {
        return Err(SitemapError::EmptyInput);
    };

    let raw = source.read()?;
    match source {
        SitemapSource::File(path) => parse_input(&raw).map_err(|e| e.with_path(path.clone())),
        SitemapSource::Text(_) => parse_input(&raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input() {
        assert!(matches!(parse_input(""), Err(SitemapError::EmptyInput)));
        assert!(matches!(parse_input(" \n\t "), Err(SitemapError::EmptyInput)));
        assert!(matches!(parse_source(None), Err(SitemapError::EmptyInput)));

        let source = SitemapSource::Text(String::new());
        assert!(matches!(parse_source(Some(&source)), Err(SitemapError::EmptyInput)));
    }

    #[test]
    fn test_pasted_text() {
        let text = "The document tree is shown below.\n<urlset><url><loc>https://a.com/</loc></url></urlset>";
        let source = SitemapSource::Text(text.to_string());
        let records = parse_source(Some(&source)).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let source = SitemapSource::File(PathBuf::from("this/file/does/not/exist.xml"));
        assert!(matches!(parse_source(Some(&source)), Err(SitemapError::Io(_))));
    }

    #[test]
    fn test_file_errors_carry_path() {
        let name = format!("sitemap-csv-broken-{}.xml", std::process::id());
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, "<urlset>\n<url>\n</urlset>").unwrap();

        let result = parse_source(Some(&SitemapSource::File(path.clone())));
        std::fs::remove_file(&path).unwrap();

        let e = match result {
            Err(SitemapError::InvalidXml(e)) => e,
            other => panic!("expected an XML error, got {other:?}"),
        };
        assert_eq!(e.context.path.as_deref(), Some(path.as_path()));
        assert!(e.to_string().contains(&format!("{}:3:1", path.display())), "{e}");
    }
}
