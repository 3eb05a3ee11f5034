/// A slice of the sanitized sitemap text, remembering where it started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StrSpan<'a> {
    /// The string slice.
    pub text: &'a str,

    /// Byte offset of the slice in the source text.
    pub start: usize,
}
impl<'a> StrSpan<'a> {
    /// Create a span pointing just past the last byte of `src`.
    #[must_use]
    pub fn end(src: &'a str) -> Self {
        StrSpan {
            text: "",
            start: src.len(),
        }
    }

    /// Extend the range of this span to include the other span.
    pub fn extend(&mut self, other: &StrSpan<'a>, src: &'a str) {
        let start = self.start.min(other.start);
        let end = (self.start + self.len()).max(other.start + other.len());

        self.text = &src[start..end];
        self.start = start;
    }

    /// Returns the length of the span.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Return true if len == 0
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the start position of the span in the source text.
    #[inline]
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns this span as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Calculates the 1-based row and column of the span in the source text.
    ///
    /// Warning: This walks the source up to the span, and should be used for error reporting only.
    #[must_use]
    pub fn position(&self, source: &str) -> (usize, usize) {
        position_in_text(self.start, source)
    }
}

pub(crate) fn position_in_text(start: usize, source: &str) -> (usize, usize) {
    let mut row = 1;
    let mut col = 1;
    for (i, c) in source.char_indices() {
        if i >= start {
            break;
        }
        if c == '\n' {
            row += 1;
            col = 1;
        } else {
            col += 1;
        }
    }

    (row, col)
}

//
// xmlparser's span does not expose its fields
impl<'a> From<xmlparser::StrSpan<'a>> for StrSpan<'a> {
    #[inline]
    fn from(span: xmlparser::StrSpan<'a>) -> StrSpan<'a> {
        StrSpan {
            text: span.as_str(),
            start: span.start(),
        }
    }
}

impl<'a> From<&'a str> for StrSpan<'a> {
    #[inline]
    fn from(text: &'a str) -> Self {
        StrSpan { text, start: 0 }
    }
}

impl AsRef<str> for StrSpan<'_> {
    #[inline]
    fn as_ref(&self) -> &str {
        self.text
    }
}
impl std::fmt::Display for StrSpan<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
impl PartialEq<str> for StrSpan<'_> {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}
impl PartialEq<&str> for StrSpan<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

/// Owned variant of `StrSpan`, kept by errors that outlive the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StringSpan {
    /// The text of the span.
    pub text: String,

    /// Byte offset of the span in the source text.
    pub start: usize,
}
impl StringSpan {
    /// Returns this span as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}
impl From<StrSpan<'_>> for StringSpan {
    #[inline]
    fn from(span: StrSpan<'_>) -> StringSpan {
        StringSpan {
            text: span.text.to_string(),
            start: span.start,
        }
    }
}
impl std::fmt::Display for StringSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strspan_end() {
        let span = StrSpan::end("<urlset/>");
        assert_eq!(span.as_str(), "");
        assert_eq!(span.start(), 9);
    }

    #[test]
    fn test_strspan_extend() {
        let src = "<loc>https://a.com/</loc>";
        let mut open = StrSpan {
            text: &src[0..5],
            start: 0,
        };
        let close = StrSpan {
            text: &src[19..25],
            start: 19,
        };
        open.extend(&close, src);
        assert_eq!(open.as_str(), src);
        assert_eq!(open.start(), 0);
    }

    #[test]
    fn test_strspan_position() {
        let source = "<urlset>\n  <url>\n  </url>\n</urlset>";
        let span = StrSpan {
            text: "<url>",
            start: 11,
        };
        assert_eq!(span.position(source), (2, 3));
    }

    #[test]
    fn test_position_at_end_of_source() {
        let source = "<a>\n<b>";
        let span = StrSpan::end(source);
        assert_eq!(span.position(source), (2, 4));
    }

    #[test]
    fn test_strspan_partial_eq() {
        let span = StrSpan::from("lastmod");
        assert_eq!(span, "lastmod");
        assert!(!span.is_empty());
        assert!(StrSpan::default().is_empty());
    }

    #[test]
    fn test_string_span_from_strspan() {
        let span = StrSpan {
            text: "priority",
            start: 42,
        };
        let owned = StringSpan::from(span);
        assert_eq!(owned.as_str(), "priority");
        assert_eq!(owned.start, 42);
    }
}
