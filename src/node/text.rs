use crate::StrSpan;
use std::borrow::Cow;

/// A run of text inside an element that is not only whitespace.
///
/// Entity references are already decoded; text without any `&` stays borrowed from the source.
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode<'src> {
    /// The span of the text node in the source.
    span: StrSpan<'src>,

    /// The decoded text of the node
    text: Cow<'src, str>,
}
impl<'src> TextNode<'src> {
    /// Create a new text node.
    pub(crate) fn new(span: impl Into<StrSpan<'src>>, text: Cow<'src, str>) -> Self {
        Self {
            span: span.into(),
            text,
        }
    }

    /// Returns the span of the node in the source text.
    #[must_use]
    pub fn span(&self) -> &StrSpan<'src> {
        &self.span
    }

    /// Returns the text of the node, surrounding whitespace included.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}
