//! Plain-text extraction and escaping helpers.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Sanitizer that allows no tags at all, leaving only text content.
static TEXT_ONLY: LazyLock<ammonia::Builder<'static>> = LazyLock::new(|| {
    let mut builder = ammonia::Builder::empty();
    builder
        .strip_comments(true)
        .clean_content_tags(HashSet::from(["script", "style"]));
    builder
});

/// Extract the plain text of an HTML fragment.
///
/// All tags and attributes are stripped, the result is trimmed and a minimal
/// entity set is decoded. Numeric references that do not name a Unicode
/// scalar value stay as literal text.
///
/// # Examples
///
/// ```
/// use quill_slug::extract_clean_text;
///
/// assert_eq!(extract_clean_text("<em>Fish</em> &amp; Chips "), "Fish & Chips");
/// assert_eq!(extract_clean_text(""), "");
/// ```
#[must_use]
pub fn extract_clean_text(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }
    let stripped = TEXT_ONLY.clean(html).to_string();
    decode_entities(stripped.trim())
}

/// Decode named and numeric character references in a single pass.
///
/// Recognized names: `quot`, `lt`, `gt`, `amp`, `apos`, `nbsp`. Decoded
/// output is never re-scanned, so `&amp;lt;` becomes `&lt;`.
#[must_use]
pub fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        match decode_reference(rest) {
            Some((decoded, consumed)) => {
                out.push(decoded);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Decode one reference at the start of `s` (which begins with `&`).
///
/// Returns the decoded character and the number of bytes consumed.
fn decode_reference(s: &str) -> Option<(char, usize)> {
    let end = s.find(';')?;
    let body = &s[1..end];

    let decoded = match body {
        "quot" => '"',
        "lt" => '<',
        "gt" => '>',
        "amp" => '&',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        _ => {
            let digits = body.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) if !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()) => {
                    u32::from_str_radix(hex, 16).ok()?
                }
                Some(_) => return None,
                None if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) => {
                    digits.parse::<u32>().ok()?
                }
                None => return None,
            };
            // Rejects surrogates (0xD800-0xDFFF) and values above 0x10FFFF.
            char::from_u32(code)?
        }
    };

    Some((decoded, end + 1))
}

/// Escape HTML special characters for text and attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
