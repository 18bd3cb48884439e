//! Small text normalization helpers shared by the entity validators.

use crate::error::CoreError;

/// Maximum length for entity names (projects, tracks, users).
pub const MAX_NAME_LEN: usize = 255;

/// Trim a required name and reject it if nothing is left.
///
/// `empty_message` is returned verbatim so each call site can keep its own
/// wording ("Project name is required" vs. "Project name cannot be empty").
pub fn require_name(name: &str, empty_message: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation(empty_message));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Name too long: {} chars (max {MAX_NAME_LEN})",
            trimmed.chars().count()
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim optional free text; blank input becomes `None`.
pub fn optional_text(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Check that a float lies in `[min, max]` and is finite.
pub fn check_range(value: f64, min: f64, max: f64, message: &str) -> Result<(), CoreError> {
    if !value.is_finite() || value < min || value > max {
        return Err(CoreError::validation(message));
    }
    Ok(())
}
