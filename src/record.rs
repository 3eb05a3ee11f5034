/// `change_frequency` of every record taken from a sitemap index, so index entries
/// can be told apart from page entries once flattened.
pub const SITEMAP_INDEX_MARKER: &str = "sitemap-index";

/// One row of output: a `<url>` entry, or a `<sitemap>` entry of a sitemap index.
///
/// `url` is never empty; entries without a location are dropped before a record is built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    /// Text of `<loc>`
    pub url: String,

    /// Text of `<lastmod>`, or empty
    pub last_modified: String,

    /// Text of `<changefreq>`, empty, or [`SITEMAP_INDEX_MARKER`]
    pub change_frequency: String,

    /// Text of `<priority>`, or empty
    pub priority: String,

    /// Localized alternates as `"{hreflang}: {href}"` pairs joined by `"; "`
    pub alternates: Option<String>,
}
impl Record {
    /// True when this record came from a sitemap index rather than a urlset.
    #[must_use]
    pub fn is_index_entry(&self) -> bool {
        self.change_frequency == SITEMAP_INDEX_MARKER
    }

    /// The five CSV columns, in header order.
    #[must_use]
    pub fn fields(&self) -> [&str; 5] {
        [
            self.url.as_str(),
            self.last_modified.as_str(),
            self.change_frequency.as_str(),
            self.priority.as_str(),
            self.alternates.as_deref().unwrap_or_default(),
        ]
    }
}
