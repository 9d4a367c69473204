//! Slug engine shared by heading-anchor injection and table-of-contents
//! extraction.
//!
//! Everything here is pure and environment-independent: the same input and
//! [`SlugOptions`] always produce the same IDs, whichever extractor calls in.
//!
//! # Example
//!
//! ```
//! use quill_slug::{SlugOptions, UsedIds, create_slug_id, ensure_unique_id};
//!
//! let options = SlugOptions::default();
//! let mut used = UsedIds::new();
//! let first = ensure_unique_id(&create_slug_id("Setup", 2, &options), &mut used);
//! let second = ensure_unique_id(&create_slug_id("<em>Setup</em>", 3, &options), &mut used);
//! assert_eq!((first.as_str(), second.as_str()), ("setup", "setup-1"));
//! ```

mod charmap;
mod ids;
mod slug;
mod text;

pub use ids::{UsedIds, create_slug_id, ensure_unique_id, generate_fallback_id};
pub use slug::{SlugOptions, create_slug};
pub use text::{decode_entities, escape_html, extract_clean_text};
