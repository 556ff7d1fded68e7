//! Registration input rules.

use shopfront_core::Email;

use super::RegistrationError;

/// Longest accepted username, in characters.
pub const MAX_USERNAME_LENGTH: usize = 20;

/// Longest accepted display name, in characters.
pub const MAX_NAME_LENGTH: usize = 50;

/// Check registration input and return the first rule it breaks.
///
/// Rules run in this order: every field present, username length, email
/// shape, name length, matching passwords.
///
/// # Errors
///
/// Returns the [`RegistrationError`] for the first failing rule.
pub fn validate_registration(
    username: &str,
    email: &str,
    name: &str,
    password1: &str,
    password2: &str,
) -> Result<(), RegistrationError> {
    if [username, email, name, password1, password2]
        .iter()
        .any(|field| field.is_empty())
    {
        return Err(RegistrationError::MissingField);
    }

    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(RegistrationError::UsernameTooLong);
    }

    if Email::parse(email).is_err() {
        return Err(RegistrationError::InvalidEmail);
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(RegistrationError::NameTooLong);
    }

    if password1 != password2 {
        return Err(RegistrationError::PasswordMismatch);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(username: &str, email: &str, name: &str, p1: &str, p2: &str) -> Result<(), RegistrationError> {
        validate_registration(username, email, name, p1, p2)
    }

    #[test]
    fn test_accepts_valid_input() {
        assert_eq!(check("alice", "a@x.com", "Alice", "secret1", "secret1"), Ok(()));
    }

    #[test]
    fn test_each_rule_alone() {
        assert_eq!(
            check("", "a@x.com", "Alice", "pw", "pw"),
            Err(RegistrationError::MissingField)
        );
        assert_eq!(
            check("alice", "a@x.com", "Alice", "pw", ""),
            Err(RegistrationError::MissingField)
        );
        assert_eq!(
            check(&"u".repeat(21), "a@x.com", "Alice", "pw", "pw"),
            Err(RegistrationError::UsernameTooLong)
        );
        assert_eq!(
            check("alice", "not-an-email", "Alice", "pw", "pw"),
            Err(RegistrationError::InvalidEmail)
        );
        assert_eq!(
            check("alice", "a@x.com", &"n".repeat(51), "pw", "pw"),
            Err(RegistrationError::NameTooLong)
        );
        assert_eq!(
            check("alice", "a@x.com", "Alice", "pw1", "pw2"),
            Err(RegistrationError::PasswordMismatch)
        );
    }

    #[test]
    fn test_length_limits_are_inclusive() {
        assert_eq!(
            check(&"u".repeat(20), "a@x.com", &"n".repeat(50), "pw", "pw"),
            Ok(())
        );
    }

    #[test]
    fn test_long_email_matching_the_pattern_is_accepted() {
        let email = format!("{}@{}.com", "a".repeat(200), "b".repeat(100));
        assert_eq!(check("alice", &email, "Alice", "pw", "pw"), Ok(()));
    }

    #[test]
    fn test_first_violation_wins() {
        // Long username, bad email, long name and mismatched passwords
        assert_eq!(
            check(&"u".repeat(21), "bad", &"n".repeat(51), "a", "b"),
            Err(RegistrationError::UsernameTooLong)
        );
        // Bad email, long name and mismatched passwords
        assert_eq!(
            check("alice", "bad", &"n".repeat(51), "a", "b"),
            Err(RegistrationError::InvalidEmail)
        );
        // Long name and mismatched passwords
        assert_eq!(
            check("alice", "a@x.com", &"n".repeat(51), "a", "b"),
            Err(RegistrationError::NameTooLong)
        );
        // A missing field beats everything
        assert_eq!(
            check(&"u".repeat(21), "", "Alice", "a", "b"),
            Err(RegistrationError::MissingField)
        );
    }
}
