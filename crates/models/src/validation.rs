//! Input normalization shared by every entity constructor.

use crate::errors::ModelError;

/// Trim a display name and reject it when nothing is left.
pub fn required_name(field: &str, raw: &str) -> Result<String, ModelError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    Ok(trimmed.to_string())
}

/// Optional URLs are stored trimmed; blank input means "no URL".
pub fn optional_url(raw: Option<String>) -> Option<String> {
    raw.and_then(|url| {
        let trimmed = url.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

/// Case-insensitive comparison used for user names.
pub fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
