use crate::StrSpan;

/// A CDATA node:
/// `<![CDATA[content]]>`
///
/// Some generators wrap `<loc>` values in CDATA; the content is used verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct CdataNode<'src> {
    span: StrSpan<'src>,
    content: StrSpan<'src>,
}
impl<'src> CdataNode<'src> {
    /// Create a new CDATA node.
    pub(crate) fn new<T: Into<StrSpan<'src>>>(span: T, content: T) -> Self {
        Self {
            span: span.into(),
            content: content.into(),
        }
    }

    /// Returns the span of the node in the source text.
    #[must_use]
    pub fn span(&self) -> &StrSpan<'src> {
        &self.span
    }

    /// Returns the content of the CDATA node.
    #[must_use]
    pub fn content(&self) -> &StrSpan<'src> {
        &self.content
    }
}
