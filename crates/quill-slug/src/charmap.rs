//! Transliteration tables.

use unicode_normalization::char::{decompose_canonical, is_combining_mark};

/// Primary language subtag of a locale (`de-AT` → `de`).
pub(crate) fn locale_base(locale: &str) -> &str {
    locale.split(['-', '_']).next().unwrap_or(locale)
}

/// Locale-specific replacements, consulted before the base table.
pub(crate) fn locale_char(locale: &str, c: char) -> Option<&'static str> {
    let replacement = match (locale, c) {
        ("de", 'Ä') => "AE",
        ("de", 'ä') => "ae",
        ("de", 'Ö') => "OE",
        ("de", 'ö') => "oe",
        ("de", 'Ü') => "UE",
        ("de", 'ü') => "ue",
        ("da" | "nb" | "no", 'Å') => "AA",
        ("da" | "nb" | "no", 'å') => "aa",
        ("da" | "nb" | "no", 'Ø') => "OE",
        ("da" | "nb" | "no", 'ø') => "oe",
        ("sv", 'Å') => "AA",
        ("sv", 'å') => "aa",
        ("sv", 'Ä') => "AE",
        ("sv", 'ä') => "ae",
        ("sv", 'Ö') => "OE",
        ("sv", 'ö') => "oe",
        ("vi", 'Đ') => "D",
        ("vi", 'đ') => "d",
        ("fr" | "es", 'Œ') => "OE",
        ("fr" | "es", 'œ') => "oe",
        _ => return None,
    };
    Some(replacement)
}

/// Letters that have no canonical decomposition to an ASCII base.
pub(crate) fn base_char(c: char) -> Option<&'static str> {
    let replacement = match c {
        'ß' => "ss",
        'ẞ' => "SS",
        'Æ' => "AE",
        'æ' => "ae",
        'Œ' => "OE",
        'œ' => "oe",
        'Ø' => "O",
        'ø' => "o",
        'Đ' | 'Ð' => "D",
        'đ' | 'ð' => "d",
        'Ł' => "L",
        'ł' => "l",
        'Þ' => "TH",
        'þ' => "th",
        'ı' => "i",
        'Ħ' => "H",
        'ħ' => "h",
        _ => return None,
    };
    Some(replacement)
}

/// Reduce a Latin letter carrying combining diacritics to its ASCII base.
///
/// Characters from other scripts are left alone even when they decompose,
/// so vowel signs and voicing marks are never stripped.
pub(crate) fn strip_diacritic(c: char) -> Option<char> {
    if c.is_ascii() {
        return None;
    }

    let mut base = None;
    let mut only_marks = true;
    decompose_canonical(c, |part| {
        if base.is_none() {
            base = Some(part);
        } else if !is_combining_mark(part) {
            only_marks = false;
        }
    });

    base.filter(|b| only_marks && b.is_ascii_alphabetic())
}
