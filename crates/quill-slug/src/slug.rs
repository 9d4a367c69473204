//! Slug generation for heading anchors.
//!
//! Slugs keep literal punctuation unless [`SlugOptions::strict`] is set, so
//! `"What's new?"` becomes `"what's-new?"`. Downstream anchor links depend on
//! this exact character set.

use unicode_normalization::UnicodeNormalization;

use crate::charmap;

/// Options controlling slug generation.
///
/// The same options value drives the injector and both table-of-contents
/// extractors, so identical options always yield identical IDs.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SlugOptions {
    /// Locale used for locale-specific transliteration (e.g. `de`: `ä` → `ae`).
    pub locale: Option<String>,
    /// Lowercase the result.
    pub lower: bool,
    /// Keep only ASCII alphanumerics (and the separators produced from whitespace).
    pub strict: bool,
    /// Trim surrounding whitespace before joining words.
    pub trim: bool,
    /// Translation namespace used for anchor labels.
    pub namespace: Option<String>,
}

impl Default for SlugOptions {
    fn default() -> Self {
        Self {
            locale: None,
            lower: true,
            strict: false,
            trim: true,
            namespace: None,
        }
    }
}

impl SlugOptions {
    /// Set the locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Enable or disable strict mode.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the translation namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

/// Convert text to a slug.
///
/// Never fails. Empty, whitespace-only and hyphen-only input yields `""`.
///
/// # Examples
///
/// ```
/// use quill_slug::{SlugOptions, create_slug};
///
/// let options = SlugOptions::default();
/// assert_eq!(create_slug("Core Principles", &options), "core-principles");
/// assert_eq!(create_slug("Café & Crème", &options), "cafe-and-creme");
/// assert_eq!(create_slug("---", &options), "");
/// ```
#[must_use]
pub fn create_slug(text: &str, options: &SlugOptions) -> String {
    let text = text.replace('&', "and");
    let locale = options.locale.as_deref().map(charmap::locale_base);

    let mut mapped = String::with_capacity(text.len());
    for c in text.nfc() {
        // The separator itself counts as whitespace so that input hyphens
        // are re-joined exactly like spaces.
        if c == '-' {
            mapped.push(' ');
            continue;
        }
        if let Some(replacement) = locale.and_then(|l| charmap::locale_char(l, c)) {
            mapped.push_str(replacement);
        } else if let Some(replacement) = charmap::base_char(c) {
            mapped.push_str(replacement);
        } else if let Some(base) = charmap::strip_diacritic(c) {
            mapped.push(base);
        } else {
            mapped.push(c);
        }
    }

    if options.strict {
        mapped.retain(|c| c.is_ascii_alphanumeric() || c.is_whitespace());
    }

    let body = if options.trim { mapped.trim() } else { &mapped };

    let mut slug = String::with_capacity(body.len());
    let mut in_whitespace = false;
    for c in body.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.push(c);
            in_whitespace = false;
        }
    }

    if options.lower {
        slug = slug.to_lowercase();
    }

    if slug.chars().all(|c| c == '-') {
        return String::new();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slug(text: &str) -> String {
        create_slug(text, &SlugOptions::default())
    }

    #[test]
    fn test_basic_slug() {
        assert_eq!(slug("Core Principles"), "core-principles");
        assert_eq!(slug("Hello   World"), "hello-world");
        assert_eq!(slug("  Spaces  "), "spaces");
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(slug(""), "");
        assert_eq!(slug("   "), "");
        assert_eq!(slug("---"), "");
        assert_eq!(slug(" - - "), "");
    }

    #[test]
    fn test_ampersand_becomes_and() {
        assert_eq!(slug("Tips & Tricks"), "tips-and-tricks");
        assert_eq!(slug("Q&A"), "qanda");
    }

    #[test]
    fn test_literal_punctuation_kept() {
        assert_eq!(slug("What's New?"), "what's-new?");
        assert_eq!(slug("100% $ales!"), "100%-$ales!");
        assert_eq!(slug("a*b"), "a*b");
    }

    #[test]
    fn test_hyphens_rejoined() {
        assert_eq!(slug("kebab-case"), "kebab-case");
        assert_eq!(slug("a -- b"), "a-b");
        assert_eq!(slug("-leading"), "leading");
    }

    #[test]
    fn test_diacritics_transliterated() {
        assert_eq!(slug("Café"), "cafe");
        assert_eq!(slug("Ñandú"), "nandu");
        assert_eq!(slug("Straße"), "strasse");
        assert_eq!(slug("Ærø"), "aero");
    }

    #[test]
    fn test_decomposed_input_is_normalized() {
        assert_eq!(slug("Cafe\u{301}"), "cafe");
    }

    #[test]
    fn test_unmapped_characters_pass_through() {
        assert_eq!(slug("日本語 ガイド"), "日本語-ガイド");
        assert_eq!(slug("Привет мир"), "привет-мир");
    }

    #[test]
    fn test_locale_specific_transliteration() {
        let de = SlugOptions::default().with_locale("de");
        assert_eq!(create_slug("Über Größe", &de), "ueber-groesse");
        assert_eq!(slug("Über Größe"), "uber-grosse");

        let de_at = SlugOptions::default().with_locale("de-AT");
        assert_eq!(create_slug("Äpfel", &de_at), "aepfel");
    }

    #[test]
    fn test_strict_mode() {
        let strict = SlugOptions::default().with_strict(true);
        assert_eq!(create_slug("What's New?", &strict), "whats-new");
        assert_eq!(create_slug("Café & Co.", &strict), "cafe-and-co");
        assert_eq!(create_slug("日本語", &strict), "");
    }

    #[test]
    fn test_no_lowercase() {
        let options = SlugOptions {
            lower: false,
            ..SlugOptions::default()
        };
        assert_eq!(create_slug("Core Principles", &options), "Core-Principles");
    }

    #[test]
    fn test_no_trim_keeps_edge_separators() {
        let options = SlugOptions {
            trim: false,
            ..SlugOptions::default()
        };
        assert_eq!(create_slug(" edge ", &options), "-edge-");
        assert_eq!(create_slug("   ", &options), "");
    }

    #[test]
    fn test_deterministic() {
        let options = SlugOptions::default().with_locale("de");
        let inputs = ["Über uns", "Tips & Tricks", "", "日本語", "A  b\tc"];
        for input in inputs {
            assert_eq!(create_slug(input, &options), create_slug(input, &options));
        }
    }
}
