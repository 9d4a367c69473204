//! Table-of-contents extraction.
//!
//! Two extractors share one set of slug rules: [`extract_table_of_contents`]
//! scans the HTML string with a pattern, and
//! [`extract_table_of_contents_dom`] queries a parsed document. For
//! well-formed input both return the same entries, and the IDs match those
//! given to headings without an explicit `id` by anchor injection.

mod dom;

use quill_slug::{SlugOptions, UsedIds, create_slug_id, ensure_unique_id, extract_clean_text};

use crate::level::HeadingLevel;
use crate::scan::scan_headings;

pub use dom::{DomParser, TocError, dom_parser, extract_table_of_contents_dom, extract_table_of_contents_with};
#[cfg(feature = "dom")]
pub use dom::ScraperParser;

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TocItem {
    /// Anchor ID.
    pub id: String,
    /// Plain heading text.
    pub text: String,
    /// Heading level.
    pub level: HeadingLevel,
}

/// Extract `h2`-`h4` headings from an HTML string.
///
/// Existing `id` attributes are not consulted; every entry gets the derived
/// ID.
///
/// # Examples
///
/// ```
/// use quill_headings::{HeadingLevel, extract_table_of_contents};
/// use quill_slug::SlugOptions;
///
/// let toc = extract_table_of_contents("<h2>Setup</h2><h3>Setup</h3>", &SlugOptions::default());
/// assert_eq!(toc[1].id, "setup-1");
/// assert_eq!(toc[1].level, HeadingLevel::H3);
/// ```
#[must_use]
pub fn extract_table_of_contents(html: &str, options: &SlugOptions) -> Vec<TocItem> {
    build_toc(scan_headings(html).into_iter().map(|h| (h.level, h.inner)), options)
}

/// Derive entries from `(level, inner HTML)` pairs in document order.
fn build_toc<S: AsRef<str>>(
    headings: impl IntoIterator<Item = (HeadingLevel, S)>,
    options: &SlugOptions,
) -> Vec<TocItem> {
    let mut used = UsedIds::new();
    headings
        .into_iter()
        .map(|(level, inner)| {
            let inner = inner.as_ref();
            TocItem {
                id: ensure_unique_id(&create_slug_id(inner, level.as_u8(), options), &mut used),
                text: extract_clean_text(inner),
                level,
            }
        })
        .collect()
}
