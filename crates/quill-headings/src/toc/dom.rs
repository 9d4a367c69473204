//! DOM-based table-of-contents extraction.

use quill_slug::SlugOptions;

use super::{TocItem, build_toc};
use crate::level::HeadingLevel;

/// Error extracting a table of contents from a parsed document.
#[derive(Debug, thiserror::Error)]
pub enum TocError {
    /// No HTML parser is compiled in.
    #[error("DOM parsing is unavailable; enable the `dom` feature or use the pattern-based extractor")]
    DomUnavailable,
}

/// Parses HTML and lists its headings.
pub trait DomParser {
    /// `h2`-`h4` elements in document order as `(level, inner HTML)`.
    fn headings(&self, html: &str) -> Vec<(HeadingLevel, String)>;
}

/// [`DomParser`] backed by `scraper`.
#[cfg(feature = "dom")]
#[derive(Clone, Copy, Debug, Default)]
pub struct ScraperParser;

#[cfg(feature = "dom")]
static HEADING_SELECTOR: std::sync::LazyLock<scraper::Selector> =
    std::sync::LazyLock::new(|| scraper::Selector::parse("h2, h3, h4").unwrap());

#[cfg(feature = "dom")]
impl DomParser for ScraperParser {
    fn headings(&self, html: &str) -> Vec<(HeadingLevel, String)> {
        let document = scraper::Html::parse_document(html);
        document
            .select(&HEADING_SELECTOR)
            .filter_map(|heading| {
                HeadingLevel::from_tag(heading.value().name()).map(|level| (level, heading.inner_html()))
            })
            .collect()
    }
}

/// The parser available in this build, if any.
#[must_use]
pub fn dom_parser() -> Option<&'static dyn DomParser> {
    #[cfg(feature = "dom")]
    {
        Some(&ScraperParser)
    }
    #[cfg(not(feature = "dom"))]
    {
        None
    }
}

/// Extract headings by parsing `html` into a document.
///
/// # Errors
///
/// Returns [`TocError::DomUnavailable`] when built without the `dom` feature.
pub fn extract_table_of_contents_dom(html: &str, options: &SlugOptions) -> Result<Vec<TocItem>, TocError> {
    let parser = dom_parser().ok_or(TocError::DomUnavailable)?;
    Ok(extract_table_of_contents_with(parser, html, options))
}

/// Extract headings with a specific parser.
#[must_use]
pub fn extract_table_of_contents_with(
    parser: &dyn DomParser,
    html: &str,
    options: &SlugOptions,
) -> Vec<TocItem> {
    build_toc(parser.headings(html), options)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::toc::extract_table_of_contents;

    struct FixedParser;

    impl DomParser for FixedParser {
        fn headings(&self, _html: &str) -> Vec<(HeadingLevel, String)> {
            vec![
                (HeadingLevel::H2, "A".to_owned()),
                (HeadingLevel::H2, "<em>A</em>".to_owned()),
            ]
        }
    }

    #[test]
    fn test_custom_parser() {
        let ids: Vec<String> = extract_table_of_contents_with(&FixedParser, "", &SlugOptions::default())
            .into_iter()
            .map(|item| item.id)
            .collect();
        assert_eq!(ids, ["a", "a-1"]);
    }

    #[cfg(feature = "dom")]
    #[test]
    fn test_matches_pattern_extractor() {
        let html = concat!(
            "<h1>Post</h1>",
            "<h2>Getting Started</h2>",
            "<p>Intro &amp; more</p>",
            "<h3 class=\"x\"><code>cargo</code> &amp; <em>rustup</em></h3>",
            "<h2>Getting Started</h2>",
            "<h4 id=\"keep\">Tom's&nbsp;Notes</h4>",
            "<h3></h3>",
            "<h2>Über Größe</h2>",
            "<h5>Too deep</h5>",
        );
        for options in [
            SlugOptions::default(),
            SlugOptions::default().with_locale("de"),
            SlugOptions::default().with_strict(true),
        ] {
            let server = extract_table_of_contents(html, &options);
            let client = extract_table_of_contents_dom(html, &options).unwrap();
            assert_eq!(server.len(), 6);
            assert_eq!(client, server);
        }
    }

    #[cfg(feature = "dom")]
    #[test]
    fn test_agrees_on_hidden_and_malformed_headings() {
        let cases = [
            ("<h2>A</h2><!-- <h2>Draft</h2> -->", 1),
            ("<!--><h2>A</h2><!-- <h3>never closed", 1),
            ("<h2>A<!-- </h2> -->B</h2>", 1),
            ("<script>document.write('<h2>Fake</h2>')</script><h2>Real</h2>", 1),
            ("<style>h2::after { content: '<h3>x</h3>' }</style><h3>Styled</h3>", 1),
            ("<textarea><h4>typed</h4></textarea><h4>Shown</h4>", 1),
            ("<h2>Bad</h3><h3>Next</h3><h4>Deep</h1>", 3),
        ];
        let options = SlugOptions::default();
        for (html, expected) in cases {
            let server = extract_table_of_contents(html, &options);
            let client = extract_table_of_contents_dom(html, &options).unwrap();
            assert_eq!(server.len(), expected, "{html}");
            assert_eq!(client, server, "{html}");
        }
    }

    #[cfg(not(feature = "dom"))]
    #[test]
    fn test_unavailable_without_parser() {
        assert!(matches!(
            extract_table_of_contents_dom("<h2>A</h2>", &SlugOptions::default()),
            Err(TocError::DomUnavailable)
        ));
    }
}
