//! Heading levels covered by anchors and the table of contents.

use std::fmt;

/// Heading level of a table-of-contents entry.
///
/// Only `h2`-`h4` take part; `h1` is the page title and deeper levels are
/// too fine-grained for navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeadingLevel {
    /// `<h2>`
    H2,
    /// `<h3>`
    H3,
    /// `<h4>`
    H4,
}

impl HeadingLevel {
    /// Level from a tag name (`"h3"`, `"H3"`).
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.as_bytes() {
            [b'h' | b'H', digit] => Self::from_number(digit.wrapping_sub(b'0')),
            _ => None,
        }
    }

    /// Level from its number.
    #[must_use]
    pub fn from_number(level: u8) -> Option<Self> {
        match level {
            2 => Some(Self::H2),
            3 => Some(Self::H3),
            4 => Some(Self::H4),
            _ => None,
        }
    }

    /// Numeric level (2-4).
    #[must_use]
    pub fn as_u8(self) -> u8 {
        match self {
            Self::H2 => 2,
            Self::H3 => 3,
            Self::H4 => 4,
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}", self.as_u8())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for HeadingLevel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag() {
        assert_eq!(HeadingLevel::from_tag("h2"), Some(HeadingLevel::H2));
        assert_eq!(HeadingLevel::from_tag("H4"), Some(HeadingLevel::H4));
        assert_eq!(HeadingLevel::from_tag("h1"), None);
        assert_eq!(HeadingLevel::from_tag("h5"), None);
        assert_eq!(HeadingLevel::from_tag("hr"), None);
        assert_eq!(HeadingLevel::from_tag("h"), None);
    }

    #[test]
    fn test_display_and_number() {
        assert_eq!(HeadingLevel::H3.to_string(), "h3");
        assert_eq!(HeadingLevel::H3.as_u8(), 3);
        assert!(HeadingLevel::H2 < HeadingLevel::H4);
    }
}
