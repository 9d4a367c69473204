//! Heading anchors and tables of contents for post HTML.
//!
//! [`add_heading_ids`] gives every `h2`-`h4` a collision-free ID and an
//! accessible anchor link. [`extract_table_of_contents`] and
//! [`extract_table_of_contents_dom`] list the same headings with the same
//! IDs, so navigation built from the table of contents lands on the
//! injected anchors.
//!
//! # Example
//!
//! ```
//! use quill_headings::{Catalog, add_heading_ids_with, builtin_messages, extract_table_of_contents};
//! use quill_slug::SlugOptions;
//!
//! let options = SlugOptions::default();
//! let catalog = Catalog::new("en", builtin_messages());
//! let html = add_heading_ids_with("<h2>Install</h2>", &options, &catalog).unwrap();
//! assert!(html.starts_with(r#"<h2 class="heading-with-anchor" id="install">"#));
//!
//! let toc = extract_table_of_contents(&html, &options);
//! assert_eq!(toc[0].id, "install");
//! ```

mod anchors;
mod i18n;
mod level;
mod scan;
mod toc;

pub use anchors::{ANCHOR_CLASS, AnchorError, add_heading_ids, add_heading_ids_with};
pub use i18n::{
    Catalog, DEFAULT_LOCALE, FsLoader, I18nError, StaticLoader, Translate, TranslationLoader,
    builtin_messages,
};
pub use level::HeadingLevel;
#[cfg(feature = "dom")]
pub use toc::ScraperParser;
pub use toc::{
    DomParser, TocError, TocItem, dom_parser, extract_table_of_contents,
    extract_table_of_contents_dom, extract_table_of_contents_with,
};

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quill_slug::SlugOptions;

    use super::*;

    static_assertions::assert_impl_all!(Catalog: Send, Sync);
    static_assertions::assert_impl_all!(StaticLoader: Send, Sync);
    static_assertions::assert_impl_all!(TocItem: Send, Sync);

    #[tokio::test]
    async fn test_anchors_and_toc_agree() {
        let source = "<h2>Core Principles</h2><p>x</p><h3>Core Principles</h3><h2><code>API</code> &amp; CLI</h2>";
        let options = SlugOptions::default();
        let html = add_heading_ids(source, &options, None, &StaticLoader::builtin())
            .await
            .unwrap();

        assert!(html.contains(r#"<h2 class="heading-with-anchor" id="core-principles">"#));
        assert!(html.contains(r#"<h3 class="heading-with-anchor" id="core-principles-1">"#));
        assert!(html.contains(r##"<a href="#api-and-cli" aria-label="Link to section: API &amp; CLI""##));

        let ids: Vec<String> = extract_table_of_contents(&html, &options)
            .into_iter()
            .map(|item| item.id)
            .collect();
        assert_eq!(ids, ["core-principles", "core-principles-1", "api-and-cli"]);

        let texts: Vec<String> = extract_table_of_contents(&html, &options)
            .into_iter()
            .map(|item| item.text)
            .collect();
        assert_eq!(texts, ["Core Principles", "Core Principles", "API & CLI"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_toc_item_serializes_numeric_level() {
        let item = TocItem {
            id: "a".to_owned(),
            text: "A".to_owned(),
            level: HeadingLevel::H3,
        };
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            serde_json::json!({"id": "a", "text": "A", "level": 3})
        );
    }
}
