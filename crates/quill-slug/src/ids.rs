//! Heading ID derivation and collision resolution.

use std::collections::{HashMap, HashSet};

use crate::slug::{SlugOptions, create_slug};
use crate::text::extract_clean_text;

/// IDs claimed during a single injection or extraction pass.
///
/// Create one per pass; never share between documents.
#[derive(Debug, Default)]
pub struct UsedIds {
    claimed: HashSet<String>,
    /// Next numeric suffix to try for each base ID.
    next_suffix: HashMap<String, usize>,
}

impl UsedIds {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` has been claimed.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.claimed.contains(id)
    }

    /// Claim `id`. Returns `false` if it was already claimed.
    pub fn claim(&mut self, id: impl Into<String>) -> bool {
        self.claimed.insert(id.into())
    }

    /// Number of claimed IDs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    /// Whether no ID has been claimed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}

/// Claim `base_id`, or the first free `base_id-N` (N = 1, 2, …).
///
/// Probing resumes from the last suffix handed out for `base_id`, so a long
/// run of identical headings does not rescan earlier candidates.
///
/// # Examples
///
/// ```
/// use quill_slug::{UsedIds, ensure_unique_id};
///
/// let mut used = UsedIds::new();
/// assert_eq!(ensure_unique_id("intro", &mut used), "intro");
/// assert_eq!(ensure_unique_id("intro", &mut used), "intro-1");
/// assert_eq!(ensure_unique_id("intro", &mut used), "intro-2");
/// ```
pub fn ensure_unique_id(base_id: &str, used: &mut UsedIds) -> String {
    if used.claim(base_id) {
        return base_id.to_owned();
    }

    let counter = used.next_suffix.entry(base_id.to_owned()).or_insert(1);
    loop {
        let candidate = format!("{base_id}-{counter}");
        *counter += 1;
        if used.claimed.insert(candidate.clone()) {
            return candidate;
        }
    }
}

/// Deterministic ID for headings whose text yields no slug.
///
/// Hashes `"{level}-{content}"` with djb2 and renders the hash in base 36,
/// producing `heading-{level}-{hash}`.
#[must_use]
pub fn generate_fallback_id(level: u8, content: &str) -> String {
    let mut hash: u32 = 5381;
    for c in format!("{level}-{content}").chars() {
        hash = hash.wrapping_mul(33).wrapping_add(u32::from(c));
    }
    format!("heading-{level}-{}", to_base36(hash))
}

/// Slug ID for a heading, falling back to [`generate_fallback_id`].
///
/// `text` may contain markup; it is reduced with [`extract_clean_text`] first.
/// The fallback hashes the cleaned text, so markup that serializes
/// differently but reads the same yields the same ID.
#[must_use]
pub fn create_slug_id(text: &str, level: u8, options: &SlugOptions) -> String {
    let clean = extract_clean_text(text);
    let slug = create_slug(&clean, options);
    if slug.is_empty() {
        generate_fallback_id(level, &clean)
    } else {
        slug
    }
}

fn to_base36(mut value: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_owned();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.iter().rev().map(|&d| char::from(d)).collect()
}
