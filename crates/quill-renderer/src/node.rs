//! UI element descriptors.

use std::collections::BTreeMap;

/// A node of the rendered UI forest.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum UiNode {
    /// Element with translated props and children.
    Element(UiElement),
    /// Text content, emitted verbatim.
    Text(String),
}

/// An element descriptor ready for the UI framework.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UiElement {
    /// Lowercase tag name.
    pub tag: String,
    /// Reconciliation key derived from the node's position (`"0.2.1"`).
    pub key: String,
    /// Props keyed by framework attribute name (`className`, `htmlFor`, ...).
    pub props: BTreeMap<String, PropValue>,
    /// Children in document order.
    pub children: Vec<UiNode>,
}

/// A prop value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum PropValue {
    /// Plain attribute value.
    Text(String),
    /// Parsed inline style, keyed by camelCase property name.
    Style(BTreeMap<String, String>),
}

impl UiNode {
    /// The element, if this node is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&UiElement> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl UiElement {
    /// A text prop by name.
    #[must_use]
    pub fn prop(&self, name: &str) -> Option<&str> {
        match self.props.get(name)? {
            PropValue::Text(value) => Some(value),
            PropValue::Style(_) => None,
        }
    }

    /// The parsed `style` prop.
    #[must_use]
    pub fn style(&self) -> Option<&BTreeMap<String, String>> {
        match self.props.get("style")? {
            PropValue::Style(style) => Some(style),
            PropValue::Text(_) => None,
        }
    }

    /// Child elements, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &UiElement> {
        self.children.iter().filter_map(UiNode::as_element)
    }
}
