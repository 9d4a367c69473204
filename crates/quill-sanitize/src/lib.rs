//! Sanitization for untrusted post content.
//!
//! Two independent layers:
//! - [`sanitize`] strips every tag and attribute outside [`BLOG_POLICY`].
//! - [`sanitize_url`] decides whether an individual `href`/`src` value is kept,
//!   with [`HREF_SCHEMES`] for links and the narrower [`SRC_SCHEMES`] for media.
//!
//! The renderer applies both: the policy to the whole fragment, the URL guard
//! to each attribute it emits.

mod guard;
mod policy;

pub use guard::{HREF_SCHEMES, SRC_SCHEMES, merge_rel, sanitize_url};
pub use policy::{BLOG_POLICY, SanitizePolicy, sanitize};
