//! Field-level validation for catalog and user payloads.

use crate::error::CoreError;

/// Maximum length for names and titles (matches `VARCHAR(255)` columns).
pub const MAX_NAME_LENGTH: usize = 255;

/// Upper bound for a movie's running time in minutes.
pub const MAX_DURATION_MINS: i32 = 1_000;

/// Upper bound for hall rows and seats per row.
pub const MAX_HALL_DIMENSION: i32 = 500;

/// Validate a required short text field: non-blank and within
/// [`MAX_NAME_LENGTH`] characters.
pub fn validate_name(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be blank")));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a movie duration in minutes.
pub fn validate_duration(duration: i32) -> Result<(), CoreError> {
    if !(1..=MAX_DURATION_MINS).contains(&duration) {
        return Err(CoreError::Validation(format!(
            "duration must be in range [1, {MAX_DURATION_MINS}] minutes, got {duration}"
        )));
    }
    Ok(())
}

/// Validate cinema hall dimensions.
pub fn validate_hall_dimensions(rows: i32, seats_in_row: i32) -> Result<(), CoreError> {
    for (field, value) in [("rows", rows), ("seats_in_row", seats_in_row)] {
        if !(1..=MAX_HALL_DIMENSION).contains(&value) {
            return Err(CoreError::Validation(format!(
                "{field} must be in range [1, {MAX_HALL_DIMENSION}], got {value}"
            )));
        }
    }
    Ok(())
}

/// Minimal structural email check: one `@` with a non-empty local part and a
/// dotted domain.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid || email.len() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(())
}

/// Normalize an email for storage and lookup (trimmed, lowercase).
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_rules() {
        assert!(validate_name("title", "Inception").is_ok());
        assert!(validate_name("title", "  ").is_err());
        assert!(validate_name("title", &"x".repeat(MAX_NAME_LENGTH)).is_ok());
        assert!(validate_name("title", &"x".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn duration_must_be_positive() {
        assert!(validate_duration(140).is_ok());
        assert!(validate_duration(0).is_err());
        assert!(validate_duration(-5).is_err());
        assert!(validate_duration(MAX_DURATION_MINS + 1).is_err());
    }

    #[test]
    fn hall_dimensions() {
        assert!(validate_hall_dimensions(10, 14).is_ok());
        assert!(validate_hall_dimensions(0, 14).is_err());
        assert!(validate_hall_dimensions(10, 0).is_err());
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("user@user.com").is_ok());
        assert!(validate_email("user.com").is_err());
        assert!(validate_email("@user.com").is_err());
        assert!(validate_email("user@com").is_err());
        assert!(validate_email("a@b@c.com").is_err());
    }

    #[test]
    fn email_is_normalized() {
        assert_eq!(normalize_email("  Admin@Email.COM "), "admin@email.com");
    }
}
