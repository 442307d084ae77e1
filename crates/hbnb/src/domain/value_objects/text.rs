//! Bounded text checks shared by the entities

use crate::domain::errors::DomainError;

/// Require a non-blank value of at most `max_chars` characters.
///
/// `field` is the human-readable field name used in the error message,
/// e.g. "First name".
pub fn require_text(field: &str, value: &str, max_chars: usize) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    if value.chars().count() > max_chars {
        return Err(DomainError::validation(format!(
            "{field} must be {max_chars} characters or less"
        )));
    }
    Ok(())
}

/// Require a finite number inside `min..=max`.
pub fn require_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), DomainError> {
    if !value.is_finite() || value < min || value > max {
        return Err(DomainError::validation(format!(
            "{field} must be between {min} and {max}"
        )));
    }
    Ok(())
}
