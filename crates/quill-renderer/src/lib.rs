//! Renders post HTML as a tree of typed UI element descriptors.
//!
//! The output is a forest of [`UiNode`] values that a UI layer can turn into
//! elements directly, without injecting raw HTML. Rendering:
//!
//! - sanitizes the fragment with the blog allow-list,
//! - translates attribute names to prop names (`class` → `className`),
//! - guards `href`/`src` by URL scheme and parses inline styles,
//! - drops whitespace text that is not a valid child of table structure.
//!
//! # Example
//!
//! ```
//! use quill_renderer::render;
//!
//! let forest = render(r#"<p>See <a href="javascript:alert(1)">this</a></p>"#);
//! let p = forest[0].as_element().unwrap();
//! let a = p.child_elements().next().unwrap();
//! assert_eq!(a.prop("href"), None);
//! ```

mod attrs;
mod node;
mod render;
mod style;

pub use attrs::{is_event_handler, kebab_to_camel, prop_name};
pub use node::{PropValue, UiElement, UiNode};
pub use render::{render, render_unsanitized};
pub use style::parse_style;

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(UiNode: Send, Sync);
    static_assertions::assert_impl_all!(PropValue: Send, Sync);
}
