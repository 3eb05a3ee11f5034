use crate::StrSpan;

/// The name of a node, with an optional prefix:
/// `prefix:local`
#[derive(Debug, Clone, Copy)]
pub struct NodeName<'src> {
    prefix: Option<StrSpan<'src>>,
    local: StrSpan<'src>,
}
impl<'src> NodeName<'src> {
    pub(crate) fn new<T: Into<StrSpan<'src>>>(prefix: Option<T>, local: T) -> Self {
        Self {
            prefix: prefix.map(Into::into),
            local: local.into(),
        }
    }

    /// Builds a name from tokenizer spans, where a missing prefix is an empty span.
    pub(crate) fn from_tokens(
        prefix: xmlparser::StrSpan<'src>,
        local: xmlparser::StrSpan<'src>,
    ) -> Self {
        let prefix = (!prefix.as_str().is_empty()).then_some(prefix);
        Self::new(prefix, local)
    }

    /// Compare the name with a prefix and local name.
    #[must_use]
    pub fn equals(&self, prefix: Option<&str>, local: &str) -> bool {
        self.prefix.map(|s| s.as_str()) == prefix && self.local.as_str() == local
    }

    /// Compare only the local portion of the name, whatever the prefix.
    /// `xhtml:link` and `link` both match `"link"`.
    #[must_use]
    pub fn is_local(&self, local: &str) -> bool {
        self.local.as_str() == local
    }

    /// Returns the prefix of the node name.
    #[must_use]
    pub fn prefix(&self) -> Option<&StrSpan<'src>> {
        self.prefix.as_ref()
    }

    /// Returns the local portion of the node name.
    #[must_use]
    pub fn local(&self) -> &StrSpan<'src> {
        &self.local
    }
}
impl std::fmt::Display for NodeName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(prefix) = self.prefix {
            write!(f, "{prefix}:{local}", local = self.local)
        } else {
            write!(f, "{local}", local = self.local)
        }
    }
}
impl PartialEq for NodeName<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.prefix.map(|s| s.as_str()) == other.prefix.map(|s| s.as_str())
            && self.local.as_str() == other.local.as_str()
    }
}
impl PartialEq<&str> for NodeName<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.to_string().as_str() == *other
    }
}
impl PartialEq<str> for NodeName<'_> {
    fn eq(&self, other: &str) -> bool {
        self.to_string().as_str() == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_name() {
        let name = NodeName::new(Some("xhtml"), "link");
        assert_eq!(name, "xhtml:link");
        assert!(name.equals(Some("xhtml"), "link"));
        assert!(!name.equals(None, "link"));
        assert!(name.is_local("link"));
    }

    #[test]
    fn test_unprefixed_name() {
        let name = NodeName::new(None, "url");
        assert_eq!(name, "url");
        assert!(name.equals(None, "url"));
        assert!(name.is_local("url"));
        assert!(!name.is_local("urlset"));
    }
}
