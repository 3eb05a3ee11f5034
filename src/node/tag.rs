use super::{Node, NodeName};
use crate::StrSpan;
use std::borrow::Cow;

/// An element in the document tree, with a name, attributes, and children:
/// `<name attr="value">...</name>`
///
/// Attribute names are unique within an element.
#[derive(Debug, Clone, PartialEq)]
pub struct TagNode<'src> {
    span: StrSpan<'src>,
    name: NodeName<'src>,
    attributes: Vec<NodeAttribute<'src>>,
    children: Vec<Node<'src>>,
}
impl<'src> TagNode<'src> {
    pub(crate) fn new(span: impl Into<StrSpan<'src>>, name: NodeName<'src>) -> Self {
        Self {
            span: span.into(),
            name,
            attributes: vec![],
            children: vec![],
        }
    }

    pub(crate) fn push_child(&mut self, child: Node<'src>) {
        self.children.push(child);
    }

    pub(crate) fn push_attribute(&mut self, attribute: NodeAttribute<'src>) {
        self.attributes.push(attribute);
    }

    pub(crate) fn extend_span(&mut self, span: &StrSpan<'src>, src: &'src str) {
        self.span.extend(span, src);
    }

    /// Get an attribute by name.
    #[must_use]
    pub fn get_attribute(&self, prefix: Option<&str>, name: &str) -> Option<&NodeAttribute<'src>> {
        self.attributes.iter().find(|a| a.name.equals(prefix, name))
    }

    /// Get the span of the node in the source text.
    #[must_use]
    pub fn span(&self) -> &StrSpan<'src> {
        &self.span
    }

    /// Get the name of the node.
    #[must_use]
    pub fn name(&self) -> &NodeName<'src> {
        &self.name
    }

    /// Get the attributes of the node.
    #[must_use]
    pub fn attributes(&self) -> &[NodeAttribute<'src>] {
        &self.attributes
    }

    /// Get the children of the node.
    #[must_use]
    pub fn children(&self) -> &[Node<'src>] {
        &self.children
    }

    /// Iterate over every element below this one, in document order.
    ///
    /// The walk keeps its own stack, so arbitrarily deep documents are fine.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_, 'src> {
        Descendants {
            stack: vec![self.children.iter()],
        }
    }

    /// The first element below this one with the given local name, ignoring any namespace prefix.
    #[must_use]
    pub fn find(&self, local: &str) -> Option<&TagNode<'src>> {
        self.descendants().find(|node| node.name.is_local(local))
    }

    /// Every element below this one with the given local name, ignoring any namespace prefix.
    pub fn find_all<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a TagNode<'src>> + 'a {
        self.descendants().filter(move |node| node.name.is_local(local))
    }

    /// All text and CDATA below this element, concatenated in document order and trimmed.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        let mut stack = vec![self.children.iter()];
        while let Some(iter) = stack.last_mut() {
            match iter.next() {
                Some(Node::Element(node)) => stack.push(node.children.iter()),
                Some(Node::Text(node)) => text.push_str(node.text()),
                Some(Node::Cdata(node)) => text.push_str(node.content().as_str()),
                None => {
                    stack.pop();
                }
            }
        }

        text.trim().to_string()
    }
}

/// Depth-first, document-order iterator over the elements below a [`TagNode`].
pub struct Descendants<'a, 'src> {
    stack: Vec<std::slice::Iter<'a, Node<'src>>>,
}
impl<'a, 'src> Iterator for Descendants<'a, 'src> {
    type Item = &'a TagNode<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let iter = self.stack.last_mut()?;
            let Some(node) = iter.next() else {
                self.stack.pop();
                continue;
            };

            if let Some(element) = node.as_element() {
                self.stack.push(element.children.iter());
                return Some(element);
            }
        }
    }
}

/// An attribute set on a node, with a name and value:
/// `name="value"`
#[derive(Debug, Clone, PartialEq)]
pub struct NodeAttribute<'src> {
    span: StrSpan<'src>,
    name: NodeName<'src>,
    value: Cow<'src, str>,
}
impl<'src> NodeAttribute<'src> {
    pub(crate) fn new(
        span: impl Into<StrSpan<'src>>,
        name: NodeName<'src>,
        value: Cow<'src, str>,
    ) -> Self {
        Self {
            span: span.into(),
            name,
            value,
        }
    }

    /// Returns the name of the attribute.
    #[must_use]
    pub fn name(&self) -> &NodeName<'src> {
        &self.name
    }

    /// Returns the entity-decoded value of the attribute.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the span of the attribute in the source text
    #[must_use]
    pub fn span(&self) -> &StrSpan<'src> {
        &self.span
    }
}
