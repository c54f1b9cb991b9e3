//! Sanitizers for human-authored token and group names.
//!
//! Figma authors name variables freely ("Depth 100", "Brand / Accent"), so
//! every name passes through one of two normalizers before it is used:
//!
//! - [`sanitize_key`] produces the canonical merge key and path segment.
//!   Structurally different spellings of the same logical name ("Gray 100",
//!   "gray-100", "Gray.100") must collide to the same key so that mode files
//!   merge into one node instead of forking the tree.
//! - [`sanitize_name`] produces display-safe slugs used elsewhere in the
//!   toolchain (CSS variable stems, style names).
//!
//! Both are pure functions: deterministic, no external state, and empty
//! input yields empty output.

/// Canonicalize a token or group name into a merge key.
///
/// Splits on any run of non-alphanumeric characters, joins the pieces with
/// single hyphens, and lowercases. Idempotent: sanitizing an already
/// sanitized key returns it unchanged.
///
/// # Examples
/// ```
/// use tokenforge_core::naming::sanitize_key;
/// assert_eq!(sanitize_key("Depth 100"), "depth-100");
/// assert_eq!(sanitize_key("Brand / Accent"), "brand-accent");
/// assert_eq!(sanitize_key("depth-100"), "depth-100");
/// ```
pub fn sanitize_key(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// Normalize a name into a display-safe slug.
///
/// Strips everything outside letters, digits, and spaces, trims, collapses
/// internal whitespace runs into single underscores, and lowercases.
///
/// # Examples
/// ```
/// use tokenforge_core::naming::sanitize_name;
/// assert_eq!(sanitize_name("  Brand / Accent  "), "brand_accent");
/// assert_eq!(sanitize_name("Heading XL"), "heading_xl");
/// ```
pub fn sanitize_name(name: &str) -> String {
    let stripped: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();

    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_key() {
        assert_eq!(sanitize_key(""), "");
        assert_eq!(sanitize_key("Slate"), "slate");
        assert_eq!(sanitize_key("Depth 100"), "depth-100");
        assert_eq!(sanitize_key("Brand / Accent"), "brand-accent");
        assert_eq!(sanitize_key("font-weight.bold"), "font-weight-bold");
        assert_eq!(sanitize_key("  padded  "), "padded");
    }

    #[test]
    fn test_sanitize_key_idempotent() {
        for raw in ["Depth 100", "Brand / Accent", "SDS Light", "a__b--c"] {
            let once = sanitize_key(raw);
            assert_eq!(sanitize_key(&once), once);
        }
    }

    #[test]
    fn test_sanitize_key_collides_spellings() {
        // Different source spellings of one logical name map to one key.
        assert_eq!(sanitize_key("Gray 100"), sanitize_key("gray-100"));
        assert_eq!(sanitize_key("Gray.100"), sanitize_key("gray_100"));
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name(""), "");
        assert_eq!(sanitize_name("Heading XL"), "heading_xl");
        assert_eq!(sanitize_name("  Brand / Accent  "), "brand_accent");
        assert_eq!(sanitize_name("100% width"), "100_width");
        assert_eq!(sanitize_name("a   b"), "a_b");
    }
}
