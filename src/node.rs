//! The types of nodes that make up a parsed sitemap document.
//!
//! Comments, processing instructions and DTDs carry nothing a sitemap needs,
//! so the tree only keeps elements, text and CDATA.
use super::StrSpan;

mod name;
pub use name::*;

mod text;
pub use text::*;

mod tag;
pub use tag::*;

mod cdata;
pub use cdata::*;

/// A node in the document tree. Can be any of:
/// - `Element` - a tag node
/// - `Text` - a text node
/// - `Cdata` - a CDATA node
#[derive(Debug, Clone, PartialEq)]
pub enum Node<'src> {
    /// A tag node.
    Element(TagNode<'src>),

    /// A text node.
    Text(TextNode<'src>),

    /// A CDATA node.
    Cdata(CdataNode<'src>),
}
impl<'src> Node<'src> {
    /// Returns the source span of the node.
    #[must_use]
    pub fn span(&self) -> &StrSpan<'src> {
        match self {
            Self::Element(node) => node.span(),
            Self::Text(node) => node.span(),
            Self::Cdata(node) => node.span(),
        }
    }

    /// Returns the node as an element, if it is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&TagNode<'src>> {
        match self {
            Self::Element(node) => Some(node),
            _ => None,
        }
    }
}
