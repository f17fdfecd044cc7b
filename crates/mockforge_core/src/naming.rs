//! Define Go naming helpers (policy + pure helpers).
//!
//! ## Notes
//! - [`sanitize`] is deliberately ASCII-only: the result is used as an import alias and as the default
//!   `mock_<pkg>` package name, both of which must survive any toolchain locale.
//! - [`is_identifier`] follows the Go specification and accepts Unicode letters.

/// Placeholder returned by [`sanitize`] when nothing usable survives.
pub const SANITIZED_PLACEHOLDER: &str = "x";

/// Clean up a string so it can be used as a Go package name.
///
/// ## Parameters
/// - `s`: arbitrary text, usually the last segment of an import path.
///
/// ## Returns
/// - (`String`): `s` with every character outside `[A-Za-z0-9_]` removed; a leading digit gets a `_` prefix, and an
///   empty or lone-underscore result collapses to [`SANITIZED_PLACEHOLDER`].
///
/// ## Examples
/// ```rust
/// use mockforge_core::naming::sanitize;
///
/// assert_eq!(sanitize("go-yaml"), "goyaml");
/// assert_eq!(sanitize("v2"), "v2");
/// assert_eq!(sanitize("2fa"), "_2fa");
/// assert_eq!(sanitize("..."), "x");
/// ```
pub fn sanitize(s: &str) -> String {
    let kept: String = s.chars().filter(|c| c.is_ascii_alphanumeric() || *c == '_').collect();
    if kept.is_empty() || kept == "_" {
        return SANITIZED_PLACEHOLDER.to_string();
    }
    if kept.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("_{kept}");
    }
    kept
}

/// Return the final `/`-separated segment of an import path.
pub fn last_segment(import_path: &str) -> &str {
    import_path.rsplit('/').next().unwrap_or(import_path)
}

/// Check whether `name` is a syntactically valid Go identifier.
///
/// Keywords are *not* rejected here; use [`crate::lang::keywords::is_keyword`] for that.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}
