//! Heading anchor injection.

use std::sync::LazyLock;

use quill_slug::{SlugOptions, UsedIds, create_slug_id, ensure_unique_id, escape_html, extract_clean_text};
use regex::{Captures, Regex};

use crate::i18n::{DEFAULT_LOCALE, I18nError, TranslationLoader, Translate};
use crate::scan::{HeadingMatch, scan_headings};

/// Class marking headings that carry an anchor link.
pub const ANCHOR_CLASS: &str = "heading-with-anchor";

const ARIA_LABEL_KEY: &str = "accessibility.anchorLink.ariaLabel";
const TITLE_KEY: &str = "accessibility.anchorLink.title";

/// Octicon `link-16`.
const LINK_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 16 16" width="16" height="16" aria-hidden="true" focusable="false"><path d="M7.775 3.275a.75.75 0 0 0 1.06 1.06l1.25-1.25a2 2 0 1 1 2.83 2.83l-2.5 2.5a2 2 0 0 1-2.83 0 .75.75 0 0 0-1.06 1.06 3.5 3.5 0 0 0 4.95 0l2.5-2.5a3.5 3.5 0 0 0-4.95-4.95l-1.25 1.25Zm-4.69 9.64a2 2 0 0 1 0-2.83l2.5-2.5a2 2 0 0 1 2.83 0 .75.75 0 0 0 1.06-1.06 3.5 3.5 0 0 0-4.95 0l-2.5 2.5a3.5 3.5 0 0 0 4.95 4.95l1.25-1.25a.75.75 0 0 0-1.06-1.06l-1.25 1.25a2 2 0 0 1-2.83 0Z"></path></svg>"#;

// `(?:^|\s)` keeps `data-id` / `data-class` from matching.
static ID_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|\s)id\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#).unwrap()
});
static CLASS_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(^|\s)class\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#).unwrap()
});

/// Error injecting heading anchors.
#[derive(Debug, thiserror::Error)]
pub enum AnchorError {
    /// Anchor labels could not be translated.
    #[error("Failed to translate anchor labels: {0}")]
    Translation(#[from] I18nError),
}

/// Give every `h2`-`h4` a unique `id` and an accessible anchor link.
///
/// Uses `translator` when given; otherwise loads the catalog for
/// `options.locale` (default `en`) and namespace from `loader`. Nothing is
/// loaded when the HTML has no headings.
///
/// # Errors
///
/// Returns [`AnchorError::Translation`] if the catalog cannot be loaded or
/// lacks the anchor label keys.
pub async fn add_heading_ids<L: TranslationLoader>(
    html: &str,
    options: &SlugOptions,
    translator: Option<&dyn Translate>,
    loader: &L,
) -> Result<String, AnchorError> {
    if let Some(translator) = translator {
        return add_heading_ids_with(html, options, translator);
    }
    if scan_headings(html).is_empty() {
        return Ok(html.to_owned());
    }

    let locale = options.locale.as_deref().unwrap_or(DEFAULT_LOCALE);
    let catalog = loader.load(locale, options.namespace.as_deref()).await?;
    add_heading_ids_with(html, options, &catalog)
}

/// Synchronous core of [`add_heading_ids`].
///
/// Headings already carrying [`ANCHOR_CLASS`] are copied unchanged, so
/// running this twice yields the same HTML.
///
/// # Errors
///
/// Returns [`AnchorError::Translation`] if a label key is missing.
pub fn add_heading_ids_with(
    html: &str,
    options: &SlugOptions,
    translator: &dyn Translate,
) -> Result<String, AnchorError> {
    let mut used = UsedIds::new();
    let mut out = String::with_capacity(html.len() + html.len() / 2);
    let mut last = 0;
    let mut count = 0usize;

    for heading in scan_headings(html) {
        out.push_str(&html[last..heading.span.start]);
        let source = &html[heading.span.clone()];
        last = heading.span.end;

        let derived = ensure_unique_id(
            &create_slug_id(heading.inner, heading.level.as_u8(), options),
            &mut used,
        );
        let existing = attribute_value(&ID_ATTR, heading.attrs, 1);
        if let Some(id) = &existing {
            used.claim(id.as_str());
        }

        let anchored = attribute_value(&CLASS_ATTR, heading.attrs, 2)
            .is_some_and(|class| class.split_whitespace().any(|c| c == ANCHOR_CLASS));
        if anchored {
            out.push_str(source);
            continue;
        }

        let id = existing.unwrap_or(derived);
        out.push_str(&anchor_heading(&heading, &id, translator)?);
        count += 1;
    }

    out.push_str(&html[last..]);
    tracing::debug!(count, "Injected heading anchors");
    Ok(out)
}

fn anchor_heading(
    heading: &HeadingMatch<'_>,
    id: &str,
    translator: &dyn Translate,
) -> Result<String, I18nError> {
    let text = extract_clean_text(heading.inner);
    let args = [("heading", text.as_str())];
    let label = translator.translate(ARIA_LABEL_KEY, &args)?;
    let title = translator.translate(TITLE_KEY, &args)?;

    let mut attrs = merge_class(heading.attrs);
    if !ID_ATTR.is_match(heading.attrs) {
        attrs.push_str(&format!(r#" id="{}""#, escape_html(id)));
    }

    let level = heading.level.as_u8();
    Ok(format!(
        r##"<h{level}{attrs}>{inner}<a href="#{href}" aria-label="{label}" title="{title}">{LINK_ICON}</a></h{level}>"##,
        inner = heading.inner,
        href = escape_html(id),
        label = escape_html(&label),
        title = escape_html(&title),
    ))
}

/// Value of the first attribute matched by `pattern`, whose value groups
/// start at `first_group` (double-quoted, single-quoted, unquoted).
fn attribute_value(pattern: &Regex, attrs: &str, first_group: usize) -> Option<String> {
    let caps = pattern.captures(attrs)?;
    value_group(&caps, first_group).map(str::to_owned)
}

fn value_group<'a>(caps: &Captures<'a>, first_group: usize) -> Option<&'a str> {
    (first_group..first_group + 3).find_map(|group| caps.get(group).map(|m| m.as_str()))
}

/// Append [`ANCHOR_CLASS`] to the `class` attribute, adding one if absent.
fn merge_class(attrs: &str) -> String {
    if !CLASS_ATTR.is_match(attrs) {
        return format!(r#"{attrs} class="{ANCHOR_CLASS}""#);
    }
    CLASS_ATTR
        .replace(attrs, |caps: &Captures<'_>| {
            let existing = value_group(caps, 2).unwrap_or_default().trim();
            let merged = if existing.is_empty() {
                ANCHOR_CLASS.to_owned()
            } else {
                format!("{existing} {ANCHOR_CLASS}")
            };
            format!(r#"{}class="{}""#, &caps[1], merged.replace('"', "&quot;"))
        })
        .into_owned()
}
