use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::identity::models::AccessClaims;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IssuedToken;
use crate::domain::identity::models::LoginInput;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::models::RegistrationInput;
use crate::domain::identity::validation::Validate;
use crate::identity::errors::IdentityError;
use crate::identity::ports::AvatarDeriver;
use crate::identity::ports::IdentityRepository;
use crate::identity::ports::IdentityServicePort;
use crate::identity::ports::PasswordHashing;

/// Domain service implementation for registration and login.
///
/// Password hashing and verification run on tokio's blocking pool.
pub struct IdentityService<IR, AD, PH = Authenticator>
where
    IR: IdentityRepository,
    AD: AvatarDeriver,
    PH: PasswordHashing,
{
    repository: Arc<IR>,
    avatar_deriver: Arc<AD>,
    password_hasher: Arc<PH>,
    authenticator: Arc<Authenticator>,
}

impl<IR, AD> IdentityService<IR, AD, Authenticator>
where
    IR: IdentityRepository,
    AD: AvatarDeriver,
{
    /// Create a new identity service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Identity persistence implementation
    /// * `avatar_deriver` - Email to avatar URL mapping
    /// * `authenticator` - Password hashing, verification and token signing
    pub fn new(
        repository: Arc<IR>,
        avatar_deriver: Arc<AD>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self::with_password_hasher(
            repository,
            avatar_deriver,
            Arc::clone(&authenticator),
            authenticator,
        )
    }
}

impl<IR, AD, PH> IdentityService<IR, AD, PH>
where
    IR: IdentityRepository,
    AD: AvatarDeriver,
    PH: PasswordHashing,
{
    /// Create an identity service hashing registration passwords with
    /// `password_hasher`. Login verification still goes through
    /// `authenticator`.
    pub fn with_password_hasher(
        repository: Arc<IR>,
        avatar_deriver: Arc<AD>,
        password_hasher: Arc<PH>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            repository,
            avatar_deriver,
            password_hasher,
            authenticator,
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, IdentityError> {
        let password_hasher = Arc::clone(&self.password_hasher);

        let password_hash = tokio::task::spawn_blocking(move || {
            password_hasher.hash_password(&password).and_then(|hash| {
                if hash.is_empty() || hash == password {
                    Err(auth::PasswordError::HashingFailed(
                        "hasher returned an unusable value".to_string(),
                    ))
                } else {
                    Ok(hash)
                }
            })
        })
        .await
        .map_err(|e| {
            IdentityError::Password(auth::PasswordError::HashingFailed(format!(
                "hashing task failed: {}",
                e
            )))
        })??;

        Ok(password_hash)
    }

    async fn authenticate(
        &self,
        password: String,
        identity: &Identity,
    ) -> Result<auth::AuthenticationResult, IdentityError> {
        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = identity.password_hash.clone();
        let claims = AccessClaims::from(identity);

        tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, claims)
        })
        .await
        .map_err(|e| {
            IdentityError::Password(auth::PasswordError::VerificationFailed(format!(
                "verification task failed: {}",
                e
            )))
        })?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => IdentityError::InvalidCredentials,
            AuthenticationError::PasswordError(err) => IdentityError::Password(err),
            AuthenticationError::JwtError(err) => IdentityError::Token(err),
        })
    }
}

#[async_trait]
impl<IR, AD, PH> IdentityServicePort for IdentityService<IR, AD, PH>
where
    IR: IdentityRepository,
    AD: AvatarDeriver,
    PH: PasswordHashing,
{
    async fn register(&self, input: RegistrationInput) -> Result<Identity, IdentityError> {
        let validation = input.validate();
        if !validation.is_valid() {
            return Err(IdentityError::Validation(validation.errors));
        }

        let email = EmailAddress::new(input.email.trim().to_string())?;

        if self.repository.find_by_email(&email).await?.is_some() {
            tracing::debug!(email = %email, "Registration rejected, email already exists");
            return Err(IdentityError::EmailAlreadyExists(email.to_string()));
        }

        let avatar = self.avatar_deriver.url_for(&email);
        let password_hash = self.hash_password(input.password).await?;

        let identity = self
            .repository
            .insert(NewIdentity {
                name: input.name.trim().to_string(),
                email,
                avatar,
                password_hash,
            })
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to persist identity");
                e
            })?;

        tracing::info!(identity_id = %identity.id, "Identity registered");

        Ok(identity)
    }

    async fn login(&self, input: LoginInput) -> Result<IssuedToken, IdentityError> {
        let validation = input.validate();
        if !validation.is_valid() {
            return Err(IdentityError::Validation(validation.errors));
        }

        let email = EmailAddress::new(input.email.trim().to_string())?;

        let identity = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| IdentityError::NotFound(email.to_string()))?;

        let result = self
            .authenticate(input.password, &identity)
            .await
            .map_err(|e| {
                if matches!(e, IdentityError::InvalidCredentials) {
                    tracing::info!(identity_id = %identity.id, "Login rejected, password mismatch");
                }
                e
            })?;

        tracing::info!(identity_id = %identity.id, "Access token issued");

        Ok(IssuedToken {
            token: auth::bearer(&result.access_token),
            expires_at: result.expires_at,
        })
    }
}
