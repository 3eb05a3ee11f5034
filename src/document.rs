use crate::{
    StrSpan,
    error::{ErrorContext, XmlError, XmlErrorKind, XmlResult},
    node::{CdataNode, Node, NodeAttribute, NodeName, TagNode, TextNode},
};
use htmlentity::entity::Entity;
use std::borrow::Cow;
use xmlparser::{ElementEnd, Token};

/// A sitemap document parsed into a tree.
/// All names and undecoded strings in the tree are references into the source string.
///
/// The tree contains:
/// - The XML declaration node, if present
/// - The root element, which is a tree of nodes
///
/// Other things to note:
/// - Names of nodes and attributes keep their namespace prefix, but nothing is resolved against `xmlns`
/// - Comments, processing instructions and DTDs are checked for well-formedness, then dropped
/// - Only the predefined XML entities and character references are decoded; others are errors
/// - The parser will not attempt to recover from invalid closing tags, or unclosed tags.
#[derive(Debug, Clone, PartialEq)]
pub struct Document<'src> {
    /// The <?xml declaration node.
    pub declaration: Option<DeclarationNode<'src>>,

    /// The root of the tree.
    pub root: TagNode<'src>,
}
impl<'src> Document<'src> {
    /// Parses a document from the given source string.
    ///
    /// # Errors
    /// Returns errors if the XML is not well-formed
    ///
    /// # Example
    /// ```rust
    /// use sitemap_csv::Document;
    /// let src = "<urlset><url><loc>https://a.com/</loc></url></urlset>";
    ///
    /// let doc = Document::parse_str(src).unwrap();
    /// assert_eq!(*doc.root.name(), "urlset");
    /// ```
    pub fn parse_str(src: &'src str) -> XmlResult<Self> {
        Self::parse(src)
    }

    /// Iterate over every element in the document, root included, in document order.
    pub fn elements(&self) -> impl Iterator<Item = &TagNode<'src>> {
        std::iter::once(&self.root).chain(self.root.descendants())
    }

    /// Every element in the document with the given local name, ignoring any namespace prefix.
    pub fn find_all<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a TagNode<'src>> + 'a {
        self.elements().filter(move |node| node.name().is_local(local))
    }

    #[expect(clippy::too_many_lines, reason = "State machine; what did you expect")]
    fn parse(src: &'src str) -> XmlResult<Self> {
        let tokenizer = xmlparser::Tokenizer::from(src);

        let mut state = ParserState::Prolog;
        let mut stack: Vec<TagNode<'src>> = vec![];

        let mut declaration = None;
        let mut root = None;
        let mut seen_prolog_item = false;

        for next in tokenizer {
            let next = match next {
                Ok(token) => token,
                Err(e) => {
                    let pos = e.pos();
                    let context = ErrorContext::at(src, pos.row as usize, pos.col as usize);
                    return Err(XmlError::new(XmlErrorKind::Xml(e), context));
                }
            };

            //
            // At this point, next is significant.
            match state {
                ParserState::Prolog => match next {
                    Token::ElementStart {
                        prefix,
                        local,
                        span,
                    } => {
                        stack.push(TagNode::new(span, NodeName::from_tokens(prefix, local)));
                        state = ParserState::TagAttributes;
                    }

                    Token::Declaration {
                        version,
                        encoding,
                        standalone,
                        span,
                    } => {
                        if seen_prolog_item {
                            bail!(src, span, XmlErrorKind::DeclarationNotFirst);
                        }

                        declaration = Some(DeclarationNode {
                            span: span.into(),
                            version: version.into(),
                            encoding: encoding.map(Into::into),
                            standalone,
                        });
                        seen_prolog_item = true;
                    }

                    Token::Comment { .. }
                    | Token::ProcessingInstruction { .. }
                    | Token::DtdStart { .. }
                    | Token::EmptyDtd { .. }
                    | Token::EntityDeclaration { .. }
                    | Token::DtdEnd { .. } => seen_prolog_item = true,

                    _ => {
                        bail!(
                            src,
                            token_span(&next),
                            msg = "Unexpected {} in prolog section",
                            token_name(&next)
                        );
                    }
                },

                ParserState::TagAttributes => match next {
                    Token::Attribute {
                        prefix,
                        local,
                        value,
                        span,
                        ..
                    } => {
                        let name = NodeName::from_tokens(prefix, local);
                        let Some(node) = stack.last_mut() else {
                            bail!(src, span, msg = "Bug; Cannot apply attribute; stack is empty!");
                        };

                        if node.attributes().iter().any(|a| *a.name() == name) {
                            bail!(
                                src,
                                span,
                                XmlErrorKind::DuplicateAttribute(name.to_string())
                            );
                        }

                        let value = decode_entities(src, value.into())?;
                        node.push_attribute(NodeAttribute::new(span, name, value));
                    }

                    Token::ElementEnd {
                        end: ElementEnd::Open,
                        ..
                    } => {
                        state = ParserState::TagChildren;
                    }

                    Token::ElementEnd {
                        end: ElementEnd::Empty,
                        span,
                    } => {
                        let Some(mut node) = stack.pop() else {
                            bail!(src, span, msg = "Bug; Cannot close tag; stack is empty!");
                        };

                        node.extend_span(&span.into(), src);

                        if let Some(parent) = stack.last_mut() {
                            parent.push_child(Node::Element(node));
                            state = ParserState::TagChildren;
                        } else {
                            root = Some(node);
                            state = ParserState::Epilog;
                        }
                    }

                    _ => {
                        bail!(
                            src,
                            token_span(&next),
                            msg = "Unexpected {} in tag attributes",
                            token_name(&next)
                        );
                    }
                },

                ParserState::TagChildren => match next {
                    Token::ElementStart {
                        prefix,
                        local,
                        span,
                    } => {
                        stack.push(TagNode::new(span, NodeName::from_tokens(prefix, local)));
                        state = ParserState::TagAttributes;
                    }

                    Token::Text { text, .. } => {
                        // Indentation between elements
                        if text.as_str().trim().is_empty() {
                            continue;
                        }

                        let decoded = decode_entities(src, text.into())?;
                        let Some(node) = stack.last_mut() else {
                            bail!(src, text, msg = "Bug; Cannot apply text; stack is empty!");
                        };
                        node.push_child(Node::Text(TextNode::new(text, decoded)));
                    }

                    Token::Cdata { text, span } => {
                        let Some(node) = stack.last_mut() else {
                            bail!(src, span, msg = "Bug; Cannot apply cdata; stack is empty!");
                        };

                        node.push_child(Node::Cdata(CdataNode::new(span, text)));
                    }

                    Token::Comment { .. } | Token::ProcessingInstruction { .. } => {}

                    Token::ElementEnd {
                        end: ElementEnd::Close(prefix, local),
                        span,
                    } => {
                        let Some(mut node) = stack.pop() else {
                            bail!(src, span, msg = "Bug; Cannot close tag; stack is empty!");
                        };

                        let name = NodeName::from_tokens(prefix, local);
                        if *node.name() != name {
                            bail!(
                                src,
                                span,
                                XmlErrorKind::MismatchedTag {
                                    expected: node.name().to_string(),
                                    found: name.to_string(),
                                }
                            );
                        }

                        node.extend_span(&span.into(), src);

                        if let Some(parent) = stack.last_mut() {
                            parent.push_child(Node::Element(node));
                        } else {
                            root = Some(node);
                            state = ParserState::Epilog;
                        }
                    }

                    _ => {
                        bail!(
                            src,
                            token_span(&next),
                            msg = "Unexpected {} inside tag",
                            token_name(&next)
                        );
                    }
                },

                ParserState::Epilog => match next {
                    Token::Comment { .. } | Token::ProcessingInstruction { .. } => {}

                    Token::Text { text, .. } if text.as_str().trim().is_empty() => {}

                    _ => {
                        bail!(
                            src,
                            token_span(&next),
                            msg = "Unexpected {} after the root element",
                            token_name(&next)
                        );
                    }
                },
            }
        }

        if let Some(root) = root {
            return Ok(Self { declaration, root });
        }

        match stack.pop() {
            Some(last) => bail!(
                src,
                *last.span(),
                XmlErrorKind::UnclosedTag(last.name().to_string())
            ),
            None => bail!(src, XmlErrorKind::UnexpectedEof),
        }
    }
}

#[derive(PartialEq, Debug)]
enum ParserState {
    Prolog,
    TagAttributes,
    TagChildren,
    Epilog,
}

/// The XML declaration node.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationNode<'src> {
    /// The span of the declaration node in the input XML.
    pub span: StrSpan<'src>,

    /// The version of the XML declaration.
    pub version: StrSpan<'src>,

    /// The encoding of the XML declaration.
    pub encoding: Option<StrSpan<'src>>,

    /// The standalone attribute of the XML declaration.
    pub standalone: Option<bool>,
}

/// Entities XML defines without a DTD.
const PREDEFINED_ENTITIES: [&str; 5] = ["amp", "lt", "gt", "quot", "apos"];

/// Decodes entity references, borrowing from the source when there are none.
///
/// Only the predefined entities and character references are understood. Anything else
/// starting with `&`, including HTML names like `&nbsp;` and a bare `&`, is an error.
fn decode_entities<'src>(src: &'src str, span: StrSpan<'src>) -> XmlResult<Cow<'src, str>> {
    let text = span.as_str();
    if !text.contains('&') {
        return Ok(Cow::Borrowed(text));
    }

    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        decoded.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let end = rest.find(';').map_or(rest.len(), |i| i + 1);
        let reference = &rest[..end];
        let Some(ch) = decode_reference(reference) else {
            let at = StrSpan {
                text: reference,
                start: span.start() + (text.len() - rest.len()),
            };
            bail!(src, at, XmlErrorKind::Entity(reference.to_string()));
        };

        decoded.push(ch);
        rest = &rest[end..];
    }
    decoded.push_str(rest);

    Ok(Cow::Owned(decoded))
}

/// Decodes a single `&...;` reference.
fn decode_reference(reference: &str) -> Option<char> {
    let name = reference.strip_prefix('&')?.strip_suffix(';')?;
    if !name.starts_with('#') && !PREDEFINED_ENTITIES.contains(&name) {
        return None;
    }

    Entity::decode(name.as_bytes())
        .ok()
        .filter(|&ch| ch != '\0')
}

fn token_span<'a>(token: &Token<'a>) -> xmlparser::StrSpan<'a> {
    match *token {
        Token::Text { text, .. } => text,
        Token::Declaration { span, .. }
        | Token::ProcessingInstruction { span, .. }
        | Token::Comment { span, .. }
        | Token::DtdStart { span, .. }
        | Token::EmptyDtd { span, .. }
        | Token::EntityDeclaration { span, .. }
        | Token::DtdEnd { span, .. }
        | Token::ElementStart { span, .. }
        | Token::Attribute { span, .. }
        | Token::ElementEnd { span, .. }
        | Token::Cdata { span, .. } => span,
    }
}

fn token_name(token: &Token) -> &'static str {
    match token {
        Token::Declaration { .. } => "declaration",
        Token::ProcessingInstruction { .. } => "processing instruction",
        Token::Comment { .. } => "comment",
        Token::DtdStart { .. } | Token::EmptyDtd { .. } | Token::DtdEnd { .. } => "DTD",
        Token::EntityDeclaration { .. } => "entity declaration",
        Token::ElementStart { .. } => "element",
        Token::Attribute { .. } => "attribute",
        Token::ElementEnd { .. } => "tag end",
        Token::Text { .. } => "text",
        Token::Cdata { .. } => "CDATA",
    }
}
