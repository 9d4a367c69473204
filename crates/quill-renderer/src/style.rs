//! Inline `style` attribute parsing.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::attrs::kebab_to_camel;

/// Legacy script-bearing CSS values: `expression(...)` and `url(javascript:...)`.
static DANGEROUS_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)expression\(|url\(.*javascript:").unwrap());

/// Parse a `style` attribute into camelCase property names and values.
///
/// Each declaration is split on its first `:`. Declarations with an empty
/// name or value, or a value matching a script-bearing pattern, are dropped.
#[must_use]
pub fn parse_style(style: &str) -> BTreeMap<String, String> {
    let mut properties = BTreeMap::new();

    for declaration in style.split(';') {
        let Some((name, value)) = declaration.split_once(':') else {
            continue;
        };
        let (name, value) = (name.trim(), value.trim());
        if name.is_empty() || value.is_empty() {
            continue;
        }
        if is_dangerous(value) {
            tracing::debug!(property = name, "Dropped unsafe style declaration");
            continue;
        }

        let property = if name.starts_with("--") {
            name.to_owned()
        } else {
            kebab_to_camel(&name.to_ascii_lowercase())
        };
        properties.insert(property, value.to_owned());
    }

    properties
}

/// Match against the value with whitespace and CSS escape backslashes removed,
/// so `expr\ession (` and `url( "java script:` are caught too.
fn is_dangerous(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\\')
        .collect();
    DANGEROUS_VALUE.is_match(&compact)
}
