use async_trait::async_trait;

use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IssuedToken;
use crate::domain::identity::models::LoginInput;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::models::RegistrationInput;
use crate::identity::errors::IdentityError;

/// Port for identity domain service operations.
#[async_trait]
pub trait IdentityServicePort: Send + Sync + 'static {
    /// Register a new identity.
    ///
    /// # Arguments
    /// * `input` - Untrusted registration input
    ///
    /// # Returns
    /// Created identity, including the store-assigned id
    ///
    /// # Errors
    /// * `Validation` - Input failed structural validation
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Password hashing failed
    /// * `DatabaseError` - Persisting the identity failed
    async fn register(&self, input: RegistrationInput) -> Result<Identity, IdentityError>;

    /// Authenticate an identity and issue an access token.
    ///
    /// # Arguments
    /// * `input` - Untrusted login input
    ///
    /// # Returns
    /// Bearer-prefixed access token valid for six hours
    ///
    /// # Errors
    /// * `Validation` - Input failed structural validation
    /// * `NotFound` - No identity with this email
    /// * `InvalidCredentials` - Password does not match
    /// * `Password` - Stored hash is unreadable or verification failed
    /// * `Token` - Token signing failed
    /// * `DatabaseError` - Lookup failed
    async fn login(&self, input: LoginInput) -> Result<IssuedToken, IdentityError>;
}

/// Port for identity persistence operations.
#[async_trait]
pub trait IdentityRepository: Send + Sync + 'static {
    /// Find identity by email.
    ///
    /// # Returns
    /// Identity if found, None otherwise
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Identity>, IdentityError>;

    /// Persist a new identity, assigning its id and creation time.
    ///
    /// Must be atomic with respect to the email: when another identity with
    /// the same email exists, nothing is written.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, identity: NewIdentity) -> Result<Identity, IdentityError>;
}

/// Port deriving an avatar URL from an email address.
pub trait AvatarDeriver: Send + Sync + 'static {
    /// Pure and deterministic in `email`.
    fn url_for(&self, email: &EmailAddress) -> String;
}

/// Port hashing passwords for storage.
pub trait PasswordHashing: Send + Sync + 'static {
    /// One-way salted hash of `password`.
    fn hash_password(&self, password: &str) -> Result<String, auth::PasswordError>;
}

impl PasswordHashing for auth::Authenticator {
    fn hash_password(&self, password: &str) -> Result<String, auth::PasswordError> {
        auth::Authenticator::hash_password(self, password)
    }
}
