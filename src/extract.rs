use crate::{Document, Record, SITEMAP_INDEX_MARKER, SitemapError, SitemapResult, TagNode};

/// Parses sitemap markup and flattens its entries into records, in document order.
///
/// `<url>` entries are tried first; only when there are none is the document read as a
/// sitemap index, one record per `<sitemap>`. Tag names match on their local part, so
/// prefixed documents work too. Entries without a `<loc>` are skipped.
///
/// # Errors
/// - [`SitemapError::InvalidXml`] if the text is not well-formed
/// - [`SitemapError::NoUrlsFound`] if neither kind of entry yields a record
pub fn extract(xml: &str) -> SitemapResult<Vec<Record>> {
    let document = Document::parse_str(xml)?;

    let mut records: Vec<Record> = document.find_all("url").filter_map(url_record).collect();
    if records.is_empty() {
        records = document
            .find_all("sitemap")
            .filter_map(index_record)
            .collect();

        if !records.is_empty() {
            tracing::debug!(entries = records.len(), "read document as a sitemap index");
        }
    }

    if records.is_empty() {
        return Err(SitemapError::NoUrlsFound);
    }

    tracing::debug!(
        records = records.len(),
        root = %document.root.name(),
        "extracted sitemap records"
    );
    Ok(records)
}

fn url_record(entry: &TagNode) -> Option<Record> {
    let url = location(entry)?;

    let alternates: Vec<String> = entry
        .find_all("link")
        .filter_map(|link| {
            let lang = link.get_attribute(None, "hreflang")?;
            let href = link.get_attribute(None, "href")?;
            Some(format!("{}: {}", lang.value(), href.value()))
        })
        .collect();

    Some(Record {
        url,
        last_modified: child_text(entry, "lastmod"),
        change_frequency: child_text(entry, "changefreq"),
        priority: child_text(entry, "priority"),
        alternates: (!alternates.is_empty()).then(|| alternates.join("; ")),
    })
}

fn index_record(entry: &TagNode) -> Option<Record> {
    Some(Record {
        url: location(entry)?,
        last_modified: child_text(entry, "lastmod"),
        change_frequency: SITEMAP_INDEX_MARKER.to_string(),
        ..Record::default()
    })
}

/// Text of the entry's `<loc>`, if it has a non-empty one.
fn location(entry: &TagNode) -> Option<String> {
    let url = child_text(entry, "loc");
    if url.is_empty() {
        tracing::trace!(
            offset = entry.span().start(),
            entry = %entry.name(),
            "skipping entry without <loc>"
        );
        return None;
    }
    Some(url)
}

fn child_text(entry: &TagNode, local: &str) -> String {
    entry
        .find(local)
        .map(TagNode::text_content)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_entries_in_order() {
        let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
            <url><loc>https://a.com/1</loc><lastmod>2024-01-01</lastmod><changefreq>daily</changefreq><priority>1.0</priority></url>
            <url><loc>https://a.com/2</loc></url>
            <url><loc>https://a.com/3</loc><priority>0.3</priority></url>
        </urlset>"#;

        let records = extract(xml).unwrap();
        let urls: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, ["https://a.com/1", "https://a.com/2", "https://a.com/3"]);

        assert_eq!(
            records[0],
            Record {
                url: "https://a.com/1".to_string(),
                last_modified: "2024-01-01".to_string(),
                change_frequency: "daily".to_string(),
                priority: "1.0".to_string(),
                alternates: None,
            }
        );
        assert_eq!(records[1].last_modified, "");
        assert_eq!(records[2].priority, "0.3");
    }

    #[test]
    fn test_url_without_loc_is_skipped() {
        let xml = "<urlset><url><lastmod>2024-01-01</lastmod></url><url><loc>  </loc></url><url><loc>https://a.com/</loc></url></urlset>";
        let records = extract(xml).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url, "https://a.com/");
    }

    #[test]
    fn test_alternates() {
        let xml = r#"<urlset xmlns:xhtml="http://www.w3.org/1999/xhtml"><url>
            <loc>https://x/</loc>
            <xhtml:link rel="alternate" hreflang="en" href="https://x/en"/>
            <link rel="alternate" hreflang="fr" href="https://x/fr"/>
            <xhtml:link rel="alternate" href="https://x/missing-lang"/>
        </url></urlset>"#;

        let records = extract(xml).unwrap();
        assert_eq!(
            records[0].alternates.as_deref(),
            Some("en: https://x/en; fr: https://x/fr")
        );
    }

    #[test]
    fn test_sitemap_index() {
        let xml = "<sitemapindex>
            <sitemap><loc>https://a.com/s1.xml</loc><lastmod>2024-02-02</lastmod></sitemap>
            <sitemap><loc>https://a.com/s2.xml</loc></sitemap>
            <sitemap><lastmod>2024-02-02</lastmod></sitemap>
        </sitemapindex>";

        let records = extract(xml).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(Record::is_index_entry));
        assert!(records.iter().all(|r| r.priority.is_empty() && r.alternates.is_none()));
        assert_eq!(records[0].last_modified, "2024-02-02");
        assert_eq!(records[1].url, "https://a.com/s2.xml");
    }

    #[test]
    fn test_url_entries_take_precedence() {
        let xml = "<root><sitemap><loc>https://a.com/s.xml</loc></sitemap><url><loc>https://a.com/</loc></url></root>";
        let records = extract(xml).unwrap();
        assert_eq!(records.len(), 1);
        assert!(!records[0].is_index_entry());
    }

    #[test]
    fn test_prefixed_tags() {
        let xml = r#"<sm:urlset xmlns:sm="http://www.sitemaps.org/schemas/sitemap/0.9"><sm:url><sm:loc>https://a.com/</sm:loc></sm:url></sm:urlset>"#;
        assert_eq!(extract(xml).unwrap()[0].url, "https://a.com/");
    }

    #[test]
    fn test_no_urls_found() {
        let err = extract("<rss><channel><title>feed</title></channel></rss>").unwrap_err();
        assert!(matches!(err, SitemapError::NoUrlsFound));

        let err = extract("<urlset><url><lastmod>2024</lastmod></url></urlset>").unwrap_err();
        assert!(matches!(err, SitemapError::NoUrlsFound));
    }

    #[test]
    fn test_invalid_xml() {
        let err = extract("<urlset><url><loc>https://a.com/</url></urlset>").unwrap_err();
        assert!(matches!(err, SitemapError::InvalidXml(_)), "{err}");

        let err = extract("not xml at all").unwrap_err();
        assert!(matches!(err, SitemapError::InvalidXml(_)), "{err}");

        // Balanced trees with malformed content
        for xml in [
            "<urlset><url><loc>https://a.com/?a=1&b=2</loc></url></urlset>",
            "<urlset><url><loc>https://a.com/&bogus;</loc></url></urlset>",
            "<urlset><url><loc>https://a.com/&nbsp;x</loc></url></urlset>",
            r#"<urlset a="1" a="2"><url><loc>https://a.com/</loc></url></urlset>"#,
            r#"<urlset><url><loc>https://a.com/</loc><link hreflang="en" href="https://a.com/?a&b"/></url></urlset>"#,
        ] {
            let err = extract(xml).unwrap_err();
            assert!(matches!(err, SitemapError::InvalidXml(_)), "{xml}: {err}");
        }
    }

    #[test]
    fn test_loc_with_entities_and_cdata() {
        let xml = "<urlset><url><loc>https://a.com/?a=1&amp;b=2</loc></url>\
                   <url><loc>https://a.com/a <![CDATA[b]]></loc></url></urlset>";
        let records = extract(xml).unwrap();
        assert_eq!(records[0].url, "https://a.com/?a=1&b=2");
        assert_eq!(records[1].url, "https://a.com/a b");
    }
}
