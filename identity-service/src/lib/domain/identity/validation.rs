//! Structural input validation for the registration and login flows.
//!
//! Validators never fail; they report every offending field with a fixed,
//! caller-facing message and leave the decision to the flow.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::models::EmailAddress;
use super::models::LoginInput;
use super::models::RegistrationInput;

const NAME_MIN_LENGTH: usize = 2;
const NAME_MAX_LENGTH: usize = 30;
const PASSWORD_MIN_LENGTH: usize = 6;
const PASSWORD_MAX_LENGTH: usize = 30;

/// Field name to message mapping reported to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    /// Record a message for `field`, keeping the first one reported.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        f.write_str(&rendered.join(", "))
    }
}

/// Outcome of validating an input: `is_valid` holds exactly when `errors` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: FieldErrors,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Structural validation of untrusted input.
pub trait Validate {
    fn validate(&self) -> ValidationResult;
}

impl Validate for RegistrationInput {
    fn validate(&self) -> ValidationResult {
        let mut errors = FieldErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert("name", "Name field is required");
        } else if !within(name, NAME_MIN_LENGTH, NAME_MAX_LENGTH) {
            errors.insert("name", "Name must be between 2 and 30 characters");
        }

        check_email(&self.email, &mut errors);
        check_password(&self.password, &mut errors);

        if self.password2.trim().is_empty() {
            errors.insert("password2", "Confirm Password field is required");
        } else if self.password != self.password2 {
            errors.insert("password2", "Passwords must match");
        }

        ValidationResult { errors }
    }
}

impl Validate for LoginInput {
    fn validate(&self) -> ValidationResult {
        let mut errors = FieldErrors::new();

        check_email(&self.email, &mut errors);

        if self.password.trim().is_empty() {
            errors.insert("password", "Password field is required");
        }

        ValidationResult { errors }
    }
}

fn check_email(email: &str, errors: &mut FieldErrors) {
    let email = email.trim();
    if email.is_empty() {
        errors.insert("email", "Email field is required");
    } else if EmailAddress::new(email.to_string()).is_err() {
        errors.insert("email", "Email is invalid");
    }
}

fn check_password(password: &str, errors: &mut FieldErrors) {
    if password.trim().is_empty() {
        errors.insert("password", "Password field is required");
    } else if !within(password, PASSWORD_MIN_LENGTH, PASSWORD_MAX_LENGTH) {
        errors.insert("password", "Password must be at least 6 characters");
    }
}

fn within(value: &str, min: usize, max: usize) -> bool {
    let length = value.chars().count();
    length >= min && length <= max
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(name: &str, email: &str, password: &str, password2: &str) -> RegistrationInput {
        RegistrationInput {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            password2: password2.to_string(),
        }
    }

    #[test]
    fn test_valid_registration() {
        let result = registration("Ann", "ann@x.com", "p@ss1234", "p@ss1234").validate();
        assert!(result.is_valid());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_empty_registration_reports_every_field() {
        let result = RegistrationInput::default().validate();

        assert!(!result.is_valid());
        assert_eq!(result.errors.get("name"), Some("Name field is required"));
        assert_eq!(result.errors.get("email"), Some("Email field is required"));
        assert_eq!(
            result.errors.get("password"),
            Some("Password field is required")
        );
        assert_eq!(
            result.errors.get("password2"),
            Some("Confirm Password field is required")
        );
    }

    #[test]
    fn test_registration_length_and_format_rules() {
        let result = registration("A", "not-an-email", "short", "other").validate();

        assert_eq!(
            result.errors.get("name"),
            Some("Name must be between 2 and 30 characters")
        );
        assert_eq!(result.errors.get("email"), Some("Email is invalid"));
        assert_eq!(
            result.errors.get("password"),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(result.errors.get("password2"), Some("Passwords must match"));
    }

    #[test]
    fn test_name_length_counts_characters() {
        let long_name = "é".repeat(30);
        let result = registration(&long_name, "ann@x.com", "p@ss1234", "p@ss1234").validate();
        assert!(result.is_valid());

        let too_long = "é".repeat(31);
        let result = registration(&too_long, "ann@x.com", "p@ss1234", "p@ss1234").validate();
        assert!(result.errors.get("name").is_some());
    }

    #[test]
    fn test_login_validation() {
        let valid = LoginInput {
            email: "ann@x.com".to_string(),
            password: "p@ss1234".to_string(),
        };
        assert!(valid.validate().is_valid());

        let result = LoginInput::default().validate();
        assert_eq!(result.errors.get("email"), Some("Email field is required"));
        assert_eq!(
            result.errors.get("password"),
            Some("Password field is required")
        );
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_field_errors_serialize_as_plain_map() {
        let errors = FieldErrors::single("email", "Email already exists");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({ "email": "Email already exists" }));
    }
}
