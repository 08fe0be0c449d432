use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Holds the signing secret, the hasher work factor and the fixed token
/// time-to-live. Immutable after construction, so it can be shared behind
/// an `Arc` and moved into blocking tasks.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_ttl: Duration,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// JWT access token (without scheme prefix)
    pub access_token: String,
    /// Instant after which the token is rejected
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator with the default hasher.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `token_ttl` - Lifetime of every issued token
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        Self::with_password_hasher(jwt_secret, token_ttl, PasswordHasher::new())
    }

    /// Create a new authenticator with an explicitly configured hasher.
    pub fn with_password_hasher(
        jwt_secret: &[u8],
        token_ttl: Duration,
        password_hasher: PasswordHasher,
    ) -> Self {
        Self {
            password_hasher,
            jwt_handler: JwtHandler::new(jwt_secret),
            token_ttl,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `PasswordError` - Stored hash is unreadable
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and generate JWT token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `payload` - Claims to embed in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Password verification failed
    /// * `JwtError` - Token generation failed
    pub fn authenticate<T: Serialize>(
        &self,
        password: &str,
        stored_hash: &str,
        payload: T,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.verify_password(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(payload)?)
    }

    /// Generate a token issued now, without password verification.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token<T: Serialize>(&self, payload: T) -> Result<AuthenticationResult, JwtError> {
        self.issue_token_at(payload, Utc::now())
    }

    /// Generate a token with an explicit issuance instant.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token_at<T: Serialize>(
        &self,
        payload: T,
        issued_at: DateTime<Utc>,
    ) -> Result<AuthenticationResult, JwtError> {
        let claims = Claims::issued_at(payload, issued_at, self.token_ttl);
        let access_token = self.jwt_handler.encode(&claims)?;

        Ok(AuthenticationResult {
            access_token,
            expires_at: issued_at + self.token_ttl,
        })
    }

    /// Validate and decode JWT token.
    ///
    /// # Errors
    /// * `JwtError` - Token is expired, mis-signed or malformed
    pub fn validate_token<T: DeserializeOwned>(&self, token: &str) -> Result<Claims<T>, JwtError> {
        self.jwt_handler.decode(token)
    }
}
