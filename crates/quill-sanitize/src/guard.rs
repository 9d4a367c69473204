//! URL scheme guard for `href` and `src` attributes.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Schemes allowed in link targets.
pub const HREF_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Schemes allowed in media sources.
pub const SRC_SCHEMES: &[&str] = &["http", "https"];

/// Schemes rejected in every context, before any other check.
static DISALLOWED_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:javascript|vbscript|data):").unwrap());

/// Root-relative (but not protocol-relative), fragment or dot-relative.
///
/// `/\host` is treated like `//host` by browsers, so it is not relative-safe.
static RELATIVE_SAFE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:/(?:[^/\\]|$)|#|\.\.?/)").unwrap());

/// Tokens added to `rel` on links opening a new browsing context.
const BLANK_TARGET_REL: [&str; 2] = ["noopener", "noreferrer"];

/// Decide whether a URL attribute value may be kept.
///
/// Returns the trimmed value when it is relative-safe or an absolute URL
/// whose scheme is in `allowed_schemes`, `None` otherwise.
///
/// # Examples
///
/// ```
/// use quill_sanitize::{HREF_SCHEMES, SRC_SCHEMES, sanitize_url};
///
/// assert_eq!(sanitize_url("/about", HREF_SCHEMES).as_deref(), Some("/about"));
/// assert_eq!(sanitize_url("//evil.com/x", HREF_SCHEMES), None);
/// assert_eq!(sanitize_url("mailto:a@b.c", SRC_SCHEMES), None);
/// ```
#[must_use]
pub fn sanitize_url(raw: &str, allowed_schemes: &[&str]) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if DISALLOWED_SCHEME.is_match(value) {
        tracing::debug!(url = %value, "Rejected URL with disallowed scheme");
        return None;
    }

    if RELATIVE_SAFE.is_match(value) {
        return Some(value.to_owned());
    }

    match Url::parse(value) {
        Ok(parsed) if allowed_schemes.contains(&parsed.scheme()) => Some(value.to_owned()),
        Ok(parsed) => {
            tracing::debug!(url = %value, scheme = parsed.scheme(), "Rejected URL scheme");
            None
        }
        Err(e) => {
            tracing::debug!(url = %value, error = %e, "Rejected unparseable URL");
            None
        }
    }
}

/// Merge `noopener noreferrer` into an existing `rel` value.
///
/// Existing tokens keep their order; duplicates are removed.
///
/// # Examples
///
/// ```
/// use quill_sanitize::merge_rel;
///
/// assert_eq!(merge_rel(None), "noopener noreferrer");
/// assert_eq!(merge_rel(Some("nofollow noopener")), "nofollow noopener noreferrer");
/// ```
#[must_use]
pub fn merge_rel(existing: Option<&str>) -> String {
    let mut tokens: Vec<&str> = Vec::new();
    let existing_tokens = existing.unwrap_or_default().split_ascii_whitespace();
    for token in existing_tokens.chain(BLANK_TARGET_REL) {
        if !tokens.iter().any(|t| t.eq_ignore_ascii_case(token)) {
            tokens.push(token);
        }
    }
    tokens.join(" ")
}
