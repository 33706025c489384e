//! Input validation for the service layer.
//!
//! Validators return a `FieldError` naming the offending field so services
//! can collect every failure into a single 400 response instead of
//! reporting them one at a time.

use crate::error::{Error, FieldError, Result, ValidationErrors};

/// Turns a list of collected field errors into a validation failure,
/// or `Ok(())` when the list is empty.
pub fn collect(errors: Vec<FieldError>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(ValidationErrors::Fields(errors)))
    }
}

/// Validates that a required string field is non-empty after trimming.
pub fn validate_required(
    path: &str,
    label: &str,
    value: &str,
) -> std::result::Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::new(path, format!("{label} is required")));
    }

    Ok(())
}

/// Validates email format.
///
/// Deliberately looser than full RFC 5322: one `@` not at either end,
/// a dotted domain, no whitespace, bounded length.
pub fn validate_email(path: &str, email: &str) -> std::result::Result<(), FieldError> {
    let email = email.trim();
    let invalid = || FieldError::new(path, "Invalid email address");

    if email.is_empty() || email.len() > 254 {
        return Err(invalid());
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(invalid());
    }

    let (local_part, domain) = (parts[0], parts[1]);
    if local_part.is_empty() || local_part.len() > 64 {
        return Err(invalid());
    }

    if domain.is_empty() || !domain.contains('.') {
        return Err(invalid());
    }

    if email.contains("..") || email.chars().any(|c| c.is_whitespace()) {
        return Err(invalid());
    }

    Ok(())
}

/// Validates password strength for registration.
pub fn validate_password(path: &str, password: &str) -> std::result::Result<(), FieldError> {
    if password.len() < 8 {
        return Err(FieldError::new(
            path,
            "Password must be at least 8 characters",
        ));
    }

    if password.len() > 128 {
        return Err(FieldError::new(
            path,
            "Password is too long (max 128 characters)",
        ));
    }

    Ok(())
}

/// Validates that an optional numeric field, when present, is positive.
pub fn validate_positive(
    path: &str,
    label: &str,
    value: Option<f64>,
) -> std::result::Result<(), FieldError> {
    if let Some(value) = value
        && value <= 0.0
    {
        return Err(FieldError::new(
            path,
            format!("{label} must be greater than zero"),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_valid() {
        assert!(validate_email("email", "user@example.com").is_ok());
        assert!(validate_email("email", "test.email+tag@domain.co.uk").is_ok());
        assert!(validate_email("email", "user_name@sub.domain.com").is_ok());
    }

    #[test]
    fn test_validate_email_invalid() {
        assert!(validate_email("email", "").is_err());
        assert!(validate_email("email", "invalid-email").is_err());
        assert!(validate_email("email", "@domain.com").is_err());
        assert!(validate_email("email", "user@").is_err());
        assert!(validate_email("email", "user@@domain.com").is_err());
        assert!(validate_email("email", "user@domain").is_err());
        assert!(validate_email("email", "user name@domain.com").is_err());
        assert!(validate_email("email", "user@domain..com").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("password", "validpassword123").is_ok());
        assert!(validate_password("password", "eightchr").is_ok());
        assert!(validate_password("password", "short").is_err());
        assert!(validate_password("password", &"a".repeat(130)).is_err());
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("name", "Name", "Acme Corp").is_ok());
        assert!(validate_required("name", "Name", "").is_err());
        assert!(validate_required("name", "Name", "   ").is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("budget", "Budget", None).is_ok());
        assert!(validate_positive("budget", "Budget", Some(1500.0)).is_ok());
        assert!(validate_positive("budget", "Budget", Some(0.0)).is_err());
        assert!(validate_positive("budget", "Budget", Some(-3.0)).is_err());
    }

    #[test]
    fn test_collect_merges_errors() {
        let errors = vec![
            FieldError::new("name", "Name is required"),
            FieldError::new("email", "Invalid email address"),
        ];
        let result = collect(errors);
        assert!(result.is_err());
        assert!(collect(Vec::new()).is_ok());
    }
}
