//! Tag and attribute allow-list for post content.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Declarative allow-list applied to post HTML.
///
/// Anything not listed is removed silently. The policy is static and shared
/// by every sanitization call.
#[derive(Debug)]
pub struct SanitizePolicy {
    /// Allowed tag names.
    pub tags: &'static [&'static str],
    /// Allowed attributes per tag.
    pub tag_attributes: &'static [(&'static str, &'static [&'static str])],
    /// Attribute name prefixes allowed on every tag.
    pub attribute_prefixes: &'static [&'static str],
    /// Per-tag restriction of `class` values.
    pub allowed_classes: &'static [(&'static str, &'static [&'static str])],
    /// URL schemes the sanitizer keeps in `href`/`src`.
    pub url_schemes: &'static [&'static str],
    /// Tags removed together with their content.
    pub clean_content_tags: &'static [&'static str],
}

const HEADING_ATTRS: &[&str] = &["id", "class"];
const CELL_ATTRS: &[&str] = &["colspan", "rowspan", "style"];
const SVG_PAINT_ATTRS: &[&str] = &[
    "fill",
    "stroke",
    "stroke-width",
    "stroke-linecap",
    "stroke-linejoin",
];

/// Policy for blog posts: a conservative baseline plus the markup produced
/// by syntax highlighting, heading anchors and floating images.
pub static BLOG_POLICY: SanitizePolicy = SanitizePolicy {
    tags: &[
        // Sections
        "address", "article", "aside", "footer", "header", "h1", "h2", "h3", "h4", "h5", "h6",
        "hgroup", "main", "nav", "section",
        // Block text
        "blockquote", "dd", "div", "dl", "dt", "figcaption", "figure", "hr", "li", "ol", "p",
        "pre", "ul", "details", "summary",
        // Inline text
        "a", "abbr", "b", "bdi", "bdo", "br", "cite", "code", "data", "del", "dfn", "em", "i",
        "ins", "kbd", "mark", "q", "rb", "rp", "rt", "rtc", "ruby", "s", "samp", "small",
        "span", "strong", "sub", "sup", "time", "u", "var", "wbr",
        // Tables
        "caption", "col", "colgroup", "table", "tbody", "td", "tfoot", "th", "thead", "tr",
        // Media
        "img", "svg", "path",
    ],
    tag_attributes: &[
        ("a", &["href", "name", "target", "rel", "title"]),
        ("img", &["src", "srcset", "alt", "title", "width", "height", "loading"]),
        ("h1", HEADING_ATTRS),
        ("h2", HEADING_ATTRS),
        ("h3", HEADING_ATTRS),
        ("h4", HEADING_ATTRS),
        ("h5", HEADING_ATTRS),
        ("h6", HEADING_ATTRS),
        ("pre", &["class", "data-language"]),
        ("code", &["class"]),
        ("span", &["class"]),
        ("td", CELL_ATTRS),
        ("th", CELL_ATTRS),
        ("col", &["span"]),
        ("colgroup", &["span"]),
        ("ol", &["start", "reversed", "type"]),
        ("time", &["datetime"]),
        (
            "svg",
            &[
                "viewBox",
                "width",
                "height",
                "xmlns",
                "focusable",
                "fill",
                "stroke",
                "stroke-width",
                "stroke-linecap",
                "stroke-linejoin",
            ],
        ),
        (
            "path",
            &[
                "d",
                "fill",
                "stroke",
                "stroke-width",
                "stroke-linecap",
                "stroke-linejoin",
                "fill-rule",
                "clip-rule",
            ],
        ),
    ],
    attribute_prefixes: &["data-", "aria-"],
    allowed_classes: &[("img", &["floating-image"])],
    url_schemes: &["http", "https", "mailto", "tel"],
    clean_content_tags: &["script", "style"],
};

impl SanitizePolicy {
    /// Compile the policy into an `ammonia` builder.
    ///
    /// `rel` is left untouched; link hardening happens when rendering.
    #[must_use]
    pub fn to_builder(&self) -> ammonia::Builder<'static> {
        let tag_attributes: HashMap<&'static str, HashSet<&'static str>> = self
            .tag_attributes
            .iter()
            .map(|(tag, attrs)| (*tag, attrs.iter().copied().collect()))
            .collect();
        let allowed_classes: HashMap<&'static str, HashSet<&'static str>> = self
            .allowed_classes
            .iter()
            .map(|(tag, classes)| (*tag, classes.iter().copied().collect()))
            .collect();

        let mut builder = ammonia::Builder::empty();
        builder
            .tags(self.tags.iter().copied().collect())
            .tag_attributes(tag_attributes)
            .generic_attributes(HashSet::new())
            .generic_attribute_prefixes(self.attribute_prefixes.iter().copied().collect())
            .allowed_classes(allowed_classes)
            .url_schemes(self.url_schemes.iter().copied().collect())
            .clean_content_tags(self.clean_content_tags.iter().copied().collect())
            .link_rel(None)
            .strip_comments(true);
        builder
    }

    /// Whether `tag` is allowed by this policy.
    #[must_use]
    pub fn allows_tag(&self, tag: &str) -> bool {
        self.tags.contains(&tag)
    }
}

static BLOG_SANITIZER: LazyLock<ammonia::Builder<'static>> =
    LazyLock::new(|| BLOG_POLICY.to_builder());

/// Sanitize post HTML with [`BLOG_POLICY`].
///
/// # Examples
///
/// ```
/// let clean = quill_sanitize::sanitize(r#"<script>alert(1)</script><p onclick="x()">hi</p>"#);
/// assert_eq!(clean, "<p>hi</p>");
/// ```
#[must_use]
pub fn sanitize(html: &str) -> String {
    let clean = BLOG_SANITIZER.clean(html).to_string();
    tracing::trace!(
        input_len = html.len(),
        output_len = clean.len(),
        "Sanitized HTML"
    );
    clean
}
