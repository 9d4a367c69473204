//! Pattern-based heading scanning shared by anchor injection and the server
//! table of contents.
//!
//! Comments and the content of raw-text elements (`<script>`, `<style>`,
//! `<textarea>` and friends) are blanked before matching, and any `</h1>` to
//! `</h6>` closes the open heading, so the scan sees the same headings an
//! HTML parser would. Headings are still assumed not to nest, and attribute
//! values must not contain a literal `>`. Both hold for compiled markdown.

use std::borrow::Cow;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::level::HeadingLevel;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h([2-4])(\s[^>]*)?>(.*?)</h[1-6]\s*>").unwrap());

/// Elements whose content the HTML parser reads as text.
const RAW_TEXT_TAGS: [&str; 9] = [
    "script", "style", "textarea", "title", "noscript", "iframe", "noembed", "noframes", "xmp",
];

/// Comments (including `<!-->` and unterminated ones) and raw-text elements.
/// An unclosed comment or raw-text element runs to the end of the input.
static OPAQUE: LazyLock<Regex> = LazyLock::new(|| {
    let raw_text = RAW_TEXT_TAGS
        .iter()
        .map(|tag| format!(r"<{tag}(?:[\s/][^>]*)?>(?:.*?</{tag}[\s/>]|.*)"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?is)<!--(?:-?>|.*?-->|.*)|{raw_text}")).unwrap()
});

/// One `h2`-`h4` element found in an HTML string.
#[derive(Debug)]
pub(crate) struct HeadingMatch<'a> {
    pub level: HeadingLevel,
    /// Byte range of the whole element in the source.
    pub span: Range<usize>,
    /// Raw attribute text including its leading whitespace, or `""`.
    pub attrs: &'a str,
    /// Raw inner HTML.
    pub inner: &'a str,
}

/// Headings in source order.
pub(crate) fn scan_headings(html: &str) -> Vec<HeadingMatch<'_>> {
    let masked = mask_opaque(html);
    HEADING
        .captures_iter(&masked)
        .filter_map(|caps| {
            let level = caps[1].parse().ok().and_then(HeadingLevel::from_number)?;
            let span = caps.get(0)?.range();
            Some(HeadingMatch {
                level,
                span,
                attrs: caps.get(2).map_or("", |m| &html[m.range()]),
                inner: caps.get(3).map_or("", |m| &html[m.range()]),
            })
        })
        .collect()
}

/// Copy of `html` with every opaque region replaced by spaces of the same
/// byte length, so match offsets index into the original.
fn mask_opaque(html: &str) -> Cow<'_, str> {
    if !OPAQUE.is_match(html) {
        return Cow::Borrowed(html);
    }
    let mut masked = String::with_capacity(html.len());
    let mut last = 0;
    for region in OPAQUE.find_iter(html) {
        masked.push_str(&html[last..region.start()]);
        masked.push_str(&" ".repeat(region.len()));
        last = region.end();
    }
    masked.push_str(&html[last..]);
    tracing::trace!(len = html.len(), "Masked comments and raw-text elements");
    Cow::Owned(masked)
}
