use thiserror::Error;

use crate::identity::validation::FieldErrors;

/// Message reported when registering an email that is already taken.
pub const EMAIL_EXISTS_MESSAGE: &str = "Email already exists";
/// Message reported when logging in with an unknown email.
pub const USER_NOT_FOUND_MESSAGE: &str = "User not Found";
/// Message reported when the password does not match.
pub const PASSWORD_INCORRECT_MESSAGE: &str = "Password Incorrect";

/// Error for IdentityId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all identity operations
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    #[error("Invalid input: {0}")]
    Validation(FieldErrors),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Identity not found with email: {0}")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::JwtError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl IdentityError {
    /// Field-to-message mapping reported to the caller, for the recoverable
    /// errors that carry one.
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            IdentityError::Validation(errors) => Some(errors.clone()),
            IdentityError::InvalidEmail(_) => Some(FieldErrors::single("email", "Email is invalid")),
            IdentityError::EmailAlreadyExists(_) => {
                Some(FieldErrors::single("email", EMAIL_EXISTS_MESSAGE))
            }
            IdentityError::NotFound(_) => Some(FieldErrors::single("email", USER_NOT_FOUND_MESSAGE)),
            IdentityError::InvalidCredentials => {
                Some(FieldErrors::single("password", PASSWORD_INCORRECT_MESSAGE))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_fixed_messages() {
        let duplicate = IdentityError::EmailAlreadyExists("ann@x.com".to_string());
        assert_eq!(
            duplicate.field_errors().unwrap().get("email"),
            Some("Email already exists")
        );

        let not_found = IdentityError::NotFound("ann@x.com".to_string());
        assert_eq!(
            not_found.field_errors().unwrap().get("email"),
            Some("User not Found")
        );

        let wrong_password = IdentityError::InvalidCredentials.field_errors().unwrap();
        assert_eq!(wrong_password.get("password"), Some("Password Incorrect"));
        assert_eq!(wrong_password.len(), 1);
    }

    #[test]
    fn test_infrastructure_errors_have_no_field_errors() {
        assert!(IdentityError::DatabaseError("down".to_string())
            .field_errors()
            .is_none());
        assert!(
            IdentityError::Password(auth::PasswordError::HashingFailed("x".to_string()))
                .field_errors()
                .is_none()
        );
    }
}
