//! Post rendering pipeline.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use quill_headings::{AnchorError, StaticLoader, TocItem, TranslationLoader, add_heading_ids, extract_table_of_contents};
use quill_renderer::{UiNode, render_unsanitized};
use quill_sanitize::sanitize;
use quill_slug::SlugOptions;

use crate::markdown::compile_markdown;

/// Format of a post source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// CommonMark with GFM extensions.
    #[default]
    #[serde(alias = "md")]
    Markdown,
    /// HTML fragment.
    Html,
}

impl SourceFormat {
    /// Guess the format from a file extension. Unknown extensions are markdown.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm") => Self::Html,
            _ => Self::Markdown,
        }
    }
}

impl FromStr for SourceFormat {
    type Err = PostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md" | "markdown" => Ok(Self::Markdown),
            "html" | "htm" => Ok(Self::Html),
            _ => Err(PostError::UnknownFormat(s.to_owned())),
        }
    }
}

/// Output of [`PostRenderer::render`].
#[derive(Clone, Debug, serde::Serialize)]
pub struct RenderedPost {
    /// Final HTML with heading anchors.
    pub html: String,
    /// Table of contents.
    pub toc: Vec<TocItem>,
    /// UI tree rendered from `html`.
    pub tree: Vec<UiNode>,
}

/// Error returned when rendering a post fails.
#[derive(Debug, thiserror::Error)]
pub enum PostError {
    /// Source file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Heading anchors could not be injected.
    #[error(transparent)]
    Anchors(#[from] AnchorError),
    /// Unrecognized source format name.
    #[error("Unknown source format `{0}` (expected md or html)")]
    UnknownFormat(String),
}

/// Options for [`PostRenderer`].
#[derive(Clone, Debug)]
pub struct PostOptions {
    /// Slug options shared by anchors and the table of contents.
    pub slug: SlugOptions,
    /// Inject heading anchors.
    pub anchors: bool,
    /// Sanitize HTML before rendering the tree.
    pub sanitize: bool,
    /// Enable GFM extensions for markdown sources.
    pub gfm: bool,
}

impl Default for PostOptions {
    fn default() -> Self {
        Self {
            slug: SlugOptions::default(),
            anchors: true,
            sanitize: true,
            gfm: true,
        }
    }
}

/// Renders posts: compile, inject anchors, extract the table of contents,
/// then sanitize and build the UI tree.
///
/// The table of contents is taken from the anchored HTML before
/// sanitization. Its IDs match the injected anchors except where an HTML
/// source already carries an `id`: the injector keeps that attribute while
/// the table of contents derives the slug.
#[derive(Debug, Default)]
pub struct PostRenderer<L = StaticLoader> {
    options: PostOptions,
    loader: L,
}

impl<L: TranslationLoader> PostRenderer<L> {
    /// Create a renderer that loads anchor labels from `loader`.
    #[must_use]
    pub fn new(loader: L) -> Self {
        Self {
            options: PostOptions::default(),
            loader,
        }
    }

    /// Replace the options.
    #[must_use]
    pub fn with_options(mut self, options: PostOptions) -> Self {
        self.options = options;
        self
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &PostOptions {
        &self.options
    }

    /// Render a post source.
    ///
    /// # Errors
    ///
    /// Returns [`PostError::Anchors`] if anchor labels cannot be translated.
    pub async fn render(&self, source: &str, format: SourceFormat) -> Result<RenderedPost, PostError> {
        let html = match format {
            SourceFormat::Markdown => compile_markdown(source, self.options.gfm),
            SourceFormat::Html => source.to_owned(),
        };

        let html = if self.options.anchors {
            add_heading_ids(&html, &self.options.slug, None, &self.loader).await?
        } else {
            html
        };

        let toc = extract_table_of_contents(&html, &self.options.slug);
        let html = if self.options.sanitize { sanitize(&html) } else { html };
        let tree = render_unsanitized(&html);

        tracing::debug!(?format, headings = toc.len(), nodes = tree.len(), "Rendered post");
        Ok(RenderedPost { html, toc, tree })
    }

    /// Read and render a post file, choosing the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`PostError::Io`] if the file cannot be read, or any error
    /// from [`render`](Self::render).
    pub async fn render_file(&self, path: &Path, format: Option<SourceFormat>) -> Result<RenderedPost, PostError> {
        let source = tokio::fs::read_to_string(path).await.map_err(|source| PostError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let format = format.unwrap_or_else(|| SourceFormat::from_path(path));
        self.render(&source, format).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quill_headings::HeadingLevel;

    use super::*;

    fn renderer() -> PostRenderer {
        PostRenderer::new(StaticLoader::builtin())
    }

    #[tokio::test]
    async fn test_markdown_end_to_end() {
        let post = renderer()
            .render("# Title\n\n## Setup\n\nText.\n\n### Setup\n", SourceFormat::Markdown)
            .await
            .unwrap();

        let ids: Vec<(&str, HeadingLevel)> = post.toc.iter().map(|i| (i.id.as_str(), i.level)).collect();
        assert_eq!(ids, [("setup", HeadingLevel::H2), ("setup-1", HeadingLevel::H3)]);

        let h2 = post
            .tree
            .iter()
            .filter_map(UiNode::as_element)
            .find(|e| e.tag == "h2")
            .unwrap();
        assert_eq!(h2.tag, "h2");
        assert_eq!(h2.prop("id"), Some("setup"));
        assert_eq!(h2.prop("className"), Some("heading-with-anchor"));
        let link = h2.child_elements().find(|child| child.tag == "a").unwrap();
        assert_eq!(link.prop("href"), Some("#setup"));
        assert_eq!(link.prop("aria-label"), Some("Link to section: Setup"));
    }

    #[tokio::test]
    async fn test_toc_links_resolve_with_attribute_syntax() {
        let post = renderer()
            .render("## Intro {#start}\n\nx\n", SourceFormat::Markdown)
            .await
            .unwrap();
        let h2 = post
            .tree
            .iter()
            .filter_map(UiNode::as_element)
            .find(|e| e.tag == "h2")
            .unwrap();
        assert_eq!(h2.prop("id"), Some(post.toc[0].id.as_str()));
        assert!(!post.html.contains(r#"id="start""#));
    }

    #[tokio::test]
    async fn test_html_source_is_sanitized() {
        let post = renderer()
            .render(r#"<h2 onclick="x()">Hi</h2><script>alert(1)</script>"#, SourceFormat::Html)
            .await
            .unwrap();
        assert!(!post.html.contains("script"));
        assert!(!post.html.contains("onclick"));
        assert_eq!(post.tree.len(), 1);
        assert_eq!(post.toc[0].id, "hi");
    }

    #[tokio::test]
    async fn test_without_anchors() {
        let options = PostOptions {
            anchors: false,
            ..PostOptions::default()
        };
        let post = PostRenderer::new(StaticLoader::new())
            .with_options(options)
            .render("## Plain\n", SourceFormat::Markdown)
            .await
            .unwrap();
        assert_eq!(post.html, "<h2>Plain</h2>\n");
        assert_eq!(post.toc[0].id, "plain");
    }

    #[tokio::test]
    async fn test_translation_failure_propagates() {
        let err = PostRenderer::new(StaticLoader::new())
            .render("## A\n", SourceFormat::Markdown)
            .await
            .unwrap_err();
        assert!(matches!(err, PostError::Anchors(_)));
    }

    #[tokio::test]
    async fn test_render_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("post.html");
        std::fs::write(&path, "<h2>From file</h2>").unwrap();

        let post = renderer().render_file(&path, None).await.unwrap();
        assert_eq!(post.toc[0].id, "from-file");

        let err = renderer().render_file(&dir.path().join("missing.md"), None).await.unwrap_err();
        assert!(matches!(err, PostError::Io { .. }));
    }

    #[test]
    fn test_source_format() {
        assert_eq!(SourceFormat::from_path(Path::new("a/post.HTML")), SourceFormat::Html);
        assert_eq!(SourceFormat::from_path(Path::new("post.md")), SourceFormat::Markdown);
        assert_eq!(SourceFormat::from_path(Path::new("README")), SourceFormat::Markdown);
        assert_eq!("md".parse::<SourceFormat>().unwrap(), SourceFormat::Markdown);
        assert!("docx".parse::<SourceFormat>().is_err());
    }

    #[test]
    fn test_rendered_post_serializes() {
        let post = RenderedPost {
            html: "<p>x</p>".to_owned(),
            toc: Vec::new(),
            tree: vec![UiNode::Text("x".to_owned())],
        };
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["tree"][0], "x");
        assert_eq!(value["toc"], serde_json::json!([]));
    }
}
