//! Filename discipline.
//!
//! Artifact filenames derive from user-controlled titles, and the serving
//! path accepts user-controlled names, so both directions go through the same
//! sanitizer. Zero-width characters are stripped before the character filter
//! runs; they once survived into filenames and produced artifacts that could
//! be listed but not fetched.

use thiserror::Error;

/// Maximum length of a sanitized filename stem.
pub const MAX_STEM_LEN: usize = 64;

/// Stem used when sanitization leaves nothing.
const FALLBACK_STEM: &str = "diagram";

/// Zero-width and BOM code points stripped outright.
fn is_zero_width(c: char) -> bool {
    matches!(c, '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}' | '\u{2060}')
}

/// Sanitize a title into a filename stem.
///
/// Removes zero-width and non-printable characters, replaces anything outside
/// `[A-Za-z0-9._-]` with `_`, truncates to [`MAX_STEM_LEN`] and falls back to
/// `diagram` when nothing survives.
#[must_use]
pub fn sanitize_stem(title: &str) -> String {
    let mut stem: String = title
        .chars()
        .filter(|c| !is_zero_width(*c) && !c.is_control())
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_STEM_LEN)
        .collect();

    // A stem of only separators serves nobody.
    if stem.chars().all(|c| matches!(c, '.' | '_' | '-')) {
        stem = FALLBACK_STEM.to_string();
    }
    stem
}

/// Why a requested artifact name was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ServingNameError {
    /// Name attempts to escape the output directory
    #[error("path traversal attempt")]
    Traversal,

    /// Name contains characters outside the allowed set
    #[error("malformed artifact name")]
    Malformed,
}

/// Validate a client-supplied artifact name before any filesystem access.
///
/// Traversal attempts (`..`, absolute paths, separators) are distinguished
/// from merely malformed names so the server can answer 403 vs 400.
///
/// # Errors
///
/// [`ServingNameError::Traversal`] or [`ServingNameError::Malformed`].
pub fn validate_serving_name(name: &str) -> Result<(), ServingNameError> {
    if name.contains("..")
        || name.starts_with('/')
        || name.starts_with('\\')
        || name.contains('/')
        || name.contains('\\')
        || name.contains(':')
    {
        return Err(ServingNameError::Traversal);
    }
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(ServingNameError::Malformed);
    }
    Ok(())
}
