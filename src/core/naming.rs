//! core::naming
//!
//! Slug generation for documents whose slug is sourced from another field.
//!
//! # Features
//!
//! - Generate slugs from titles
//! - Enforce the schema's slug length ceiling
//! - Detect slug collisions within a document type

use std::collections::HashSet;

use super::types::SLUG_MAX_LENGTH;

/// Generate a slug from a title.
///
/// Converts the first line of a title into a URL-safe slug:
/// - Lowercase
/// - Spaces and underscores become hyphens
/// - Remove other characters
/// - Truncate to [`SLUG_MAX_LENGTH`] without leaving a trailing hyphen
///
/// # Example
///
/// ```
/// use groundwork::core::naming::slugify;
///
/// assert_eq!(slugify("Kitchen & Bath Remodel"), "kitchen-bath-remodel");
/// assert_eq!(slugify("Project #12"), "project-12");
/// ```
pub fn slugify(title: &str) -> String {
    let first_line = title.lines().next().unwrap_or("");

    let slug = first_line
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() {
                Some(c.to_ascii_lowercase())
            } else if c == ' ' || c == '_' || c == '-' {
                Some('-')
            } else {
                None
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    let truncated: String = slug.chars().take(SLUG_MAX_LENGTH).collect();
    truncated.trim_end_matches('-').to_string()
}

/// Make `candidate` unique against `taken` by appending `-2`, `-3`, ...
///
/// The suffix is kept within [`SLUG_MAX_LENGTH`] by shortening the base.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use groundwork::core::naming::unique_slug;
///
/// let taken: HashSet<String> = ["deck-build".to_string()].into_iter().collect();
/// assert_eq!(unique_slug("deck-build", &taken), "deck-build-2");
/// assert_eq!(unique_slug("patio", &taken), "patio");
/// ```
pub fn unique_slug(candidate: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(candidate) {
        return candidate.to_string();
    }

    let mut n = 2usize;
    loop {
        let suffix = format!("-{n}");
        let base_len = SLUG_MAX_LENGTH.saturating_sub(suffix.len());
        let base: String = candidate.chars().take(base_len).collect();
        let attempt = format!("{}{}", base.trim_end_matches('-'), suffix);
        if !taken.contains(&attempt) {
            return attempt;
        }
        n += 1;
    }
}
