//! Clean, parse and export XML sitemaps as CSV.
//!
//! The pipeline is three pure functions:
//! - [`sanitize`] strips the notices a browser prints above raw XML, and anything else before the markup
//! - [`extract`] parses the markup and flattens `<url>` (or, failing that, `<sitemap>`) entries into [`Record`]s
//! - [`to_csv`] writes the records as quoted CSV
//!
//! [`parse_input`] and [`parse_source`] chain the first two and reject empty input.
//!
//! ```rust
//! let raw = "This XML file does not appear to have any style information associated with it.
//! <urlset><url><loc>https://a.com/</loc><priority>0.5</priority></url></urlset>";
//!
//! let records = sitemap_csv::parse_input(raw).unwrap();
//! let csv = sitemap_csv::to_csv(&records);
//! assert_eq!(csv.lines().nth(1), Some(r#""https://a.com/","","","0.5","""#));
//! ```
#![warn(missing_docs)]

macro_rules! bail {
    ($src:expr, $span:expr, msg = $($fmt:tt)+) => {
        return Err($crate::error::XmlError::new(
            $crate::error::XmlErrorKind::Custom(format!($($fmt)+)),
            $crate::error::ErrorContext::new($src, $crate::StrSpan::from($span)),
        ))
    };

    ($src:expr, $span:expr, $kind:expr) => {
        return Err($crate::error::XmlError::new(
            $kind,
            $crate::error::ErrorContext::new($src, $crate::StrSpan::from($span)),
        ))
    };

    ($src:expr, $kind:expr) => {
        return Err($crate::error::XmlError::new(
            $kind,
            $crate::error::ErrorContext::new($src, $crate::StrSpan::end($src)),
        ))
    };
}

pub mod error;
pub use error::{SitemapError, SitemapResult, XmlError, XmlErrorKind, XmlResult};

mod strspan;
pub use strspan::{StrSpan, StringSpan};

pub mod node;
pub use node::{Node, NodeAttribute, NodeName, TagNode};

mod document;
pub use document::{DeclarationNode, Document};

mod record;
pub use record::{Record, SITEMAP_INDEX_MARKER};

mod sanitize;
pub use sanitize::sanitize;

mod extract;
pub use extract::extract;

pub mod csv;
pub use csv::{to_csv, write_csv};

mod source;
pub use source::{SitemapSource, parse_input, parse_source};

pub mod export;
pub use export::{CSV_MIME_TYPE, PREVIEW_ROWS, export_file_name, preview, render_preview};
