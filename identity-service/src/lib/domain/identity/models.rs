use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::identity::errors::EmailError;
use crate::identity::errors::IdentityIdError;

/// Fixed lifetime of every access token.
pub const ACCESS_TOKEN_TTL_HOURS: i64 = 6;

pub fn access_token_ttl() -> Duration {
    Duration::hours(ACCESS_TOKEN_TTL_HOURS)
}

/// Identity aggregate entity.
///
/// Represents a registered identity. Created once at registration and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: IdentityId,
    pub name: String,
    pub email: EmailAddress,
    pub avatar: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Identity record before the store has assigned `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub name: String,
    pub email: EmailAddress,
    pub avatar: String,
    pub password_hash: String,
}

/// Identity unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityId(pub Uuid);

impl IdentityId {
    /// Generate a new random identity ID.
    ///
    /// # Returns
    /// IdentityId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identity ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdentityIdError> {
        Uuid::parse_str(s)
            .map(IdentityId)
            .map_err(|e| IdentityIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for IdentityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. The value is kept
/// exactly as submitted; case handling is left to the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Untrusted registration input.
///
/// Absent fields arrive as empty strings and are reported by validation.
#[derive(Clone, Default)]
pub struct RegistrationInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password2: String,
}

impl fmt::Debug for RegistrationInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationInput")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("password2", &"<redacted>")
            .finish()
    }
}

/// Untrusted login input.
#[derive(Clone, Default)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginInput")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Identity snapshot embedded in access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
}

impl From<&Identity> for AccessClaims {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.to_string(),
            name: identity.name.clone(),
            email: identity.email.as_str().to_string(),
            avatar: identity.avatar.clone(),
        }
    }
}

/// Access token granted by a successful login.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Token with the bearer scheme prefix (`Bearer <jwt>`)
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_address_valid() {
        let email = EmailAddress::new("ann@x.com".to_string()).unwrap();
        assert_eq!(email.as_str(), "ann@x.com");
    }

    #[test]
    fn test_email_address_invalid() {
        let result = EmailAddress::new("not-an-email".to_string());
        assert!(matches!(result, Err(EmailError::InvalidFormat(_))));
    }

    #[test]
    fn test_identity_id_round_trip() {
        let id = IdentityId::new();
        let parsed = IdentityId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);

        assert!(IdentityId::from_string("nope").is_err());
    }

    #[test]
    fn test_inputs_redact_passwords() {
        let registration = RegistrationInput {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            password: "p@ss1234".to_string(),
            password2: "p@ss1234".to_string(),
        };
        let login = LoginInput {
            email: "ann@x.com".to_string(),
            password: "p@ss1234".to_string(),
        };

        assert!(!format!("{:?}", registration).contains("p@ss1234"));
        assert!(!format!("{:?}", login).contains("p@ss1234"));
        assert!(format!("{:?}", login).contains("ann@x.com"));
    }

    #[test]
    fn test_access_claims_snapshot() {
        let identity = Identity {
            id: IdentityId::new(),
            name: "Ann".to_string(),
            email: EmailAddress::new("ann@x.com".to_string()).unwrap(),
            avatar: "https://www.gravatar.com/avatar/abc".to_string(),
            password_hash: "$argon2id$test_hash".to_string(),
            created_at: Utc::now(),
        };

        let claims = AccessClaims::from(&identity);
        assert_eq!(claims.id, identity.id.to_string());
        assert_eq!(claims.name, "Ann");
        assert_eq!(claims.email, "ann@x.com");
        assert_eq!(claims.avatar, identity.avatar);
    }
}
