use regex::Regex;
use std::sync::LazyLock;

/// Notices browsers print above an unstyled or broken XML document.
/// Copying a sitemap out of the browser's XML viewer drags them along.
static BROWSER_NOTICES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)this xml file does not appear to have any style information associated with it\.?",
        r"|the document tree is shown below\.?",
        r"|this page contains the following errors:?",
        r"|below is a rendering of the page up to the first error\.?",
    ))
    .expect("Failed to compile browser notice regex")
});

/// Tags that open a document worth parsing. Searched case-insensitively.
const DOCUMENT_STARTS: [&str; 5] = ["<?xml", "<urlset", "<sitemapindex", "<rss", "<feed"];

/// Strips browser-injected notices and any other text in front of the markup.
///
/// Text without any recognizable document start passes through trimmed, so a later parse fails on it
/// instead of silently producing nothing. The result is a fixpoint: `sanitize(&sanitize(x)) == sanitize(x)`.
#[must_use]
pub fn sanitize(raw: &str) -> String {
    let mut text = raw.to_string();

    // Removing one notice can splice the halves of another together
    while BROWSER_NOTICES.is_match(&text) {
        text = BROWSER_NOTICES.replace_all(&text, "").into_owned();
    }

    let mut text = text.trim();
    if let Some(start) = document_start(text) {
        text = &text[start..];
    }

    let text = skip_leading_noise(text);
    tracing::trace!(
        raw = raw.len(),
        sanitized = text.len(),
        "sanitized sitemap input"
    );
    text.to_string()
}

/// Byte offset of the earliest document start tag, if any.
fn document_start(text: &str) -> Option<usize> {
    // ASCII lowercasing keeps byte offsets intact
    let lower = text.to_ascii_lowercase();
    DOCUMENT_STARTS
        .iter()
        .filter_map(|tag| lower.find(tag))
        .min()
}

/// Drops lines before the first blank or markup line, until the text starts with markup
/// or no such line is left.
fn skip_leading_noise(text: &str) -> &str {
    let mut text = text.trim();
    loop {
        let first_markup = text
            .split('\n')
            .map(str::trim)
            .position(|line| line.is_empty() || line.starts_with('<'));

        let skip = match first_markup {
            Some(skip) if skip > 0 => skip,
            _ => return text,
        };

        let offset: usize = text.split('\n').take(skip).map(|line| line.len() + 1).sum();
        text = text[offset..].trim();
    }
}
