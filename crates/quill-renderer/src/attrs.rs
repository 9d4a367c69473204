//! HTML attribute names to UI prop names.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Attribute spellings that differ from their prop names.
///
/// Keys are lowercase HTML names. Names not listed fall back to
/// [`kebab_to_camel`].
static PROP_NAMES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("class", "className"),
        ("for", "htmlFor"),
        ("tabindex", "tabIndex"),
        ("readonly", "readOnly"),
        ("srcset", "srcSet"),
        ("colspan", "colSpan"),
        ("rowspan", "rowSpan"),
        ("crossorigin", "crossOrigin"),
        ("referrerpolicy", "referrerPolicy"),
        ("datetime", "dateTime"),
        ("maxlength", "maxLength"),
        ("minlength", "minLength"),
        ("contenteditable", "contentEditable"),
        ("accesskey", "accessKey"),
        ("autocomplete", "autoComplete"),
        ("autofocus", "autoFocus"),
        ("autoplay", "autoPlay"),
        ("allowfullscreen", "allowFullScreen"),
        ("cellpadding", "cellPadding"),
        ("cellspacing", "cellSpacing"),
        ("charset", "charSet"),
        ("enctype", "encType"),
        ("hreflang", "hrefLang"),
        ("inputmode", "inputMode"),
        ("itemprop", "itemProp"),
        ("novalidate", "noValidate"),
        ("playsinline", "playsInline"),
        ("spellcheck", "spellCheck"),
        ("srcdoc", "srcDoc"),
        ("srclang", "srcLang"),
        ("usemap", "useMap"),
        ("viewbox", "viewBox"),
        ("preserveaspectratio", "preserveAspectRatio"),
    ])
});

/// Translate an HTML attribute name to its prop name.
///
/// `data-*` and `aria-*` pass through unchanged.
#[must_use]
pub fn prop_name(attribute: &str) -> String {
    let lower = attribute.to_ascii_lowercase();
    if lower.starts_with("data-") || lower.starts_with("aria-") {
        return attribute.to_owned();
    }
    match PROP_NAMES.get(lower.as_str()) {
        Some(name) => (*name).to_owned(),
        None => kebab_to_camel(&lower),
    }
}

/// Whether an attribute is an inline event handler (`onclick`, `OnLoad`, ...).
#[must_use]
pub fn is_event_handler(attribute: &str) -> bool {
    attribute
        .get(..2)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("on"))
}

/// Convert `kebab-case` to `camelCase`.
///
/// A leading hyphen capitalizes the first word (`-webkit-box` → `WebkitBox`),
/// which is how vendor-prefixed style properties are spelled as props.
#[must_use]
pub fn kebab_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
