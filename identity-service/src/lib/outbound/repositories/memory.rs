use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::ports::IdentityRepository;
use crate::identity::errors::IdentityError;

/// Process-local identity store keyed by email.
///
/// Used when no database is configured and by the API tests. Check-and-insert
/// happens under a single write lock, so concurrent registrations of the same
/// email cannot both succeed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityRepository {
    identities: Arc<RwLock<HashMap<EmailAddress, Identity>>>,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored identities.
    pub async fn len(&self) -> usize {
        self.identities.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.identities.read().await.is_empty()
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Identity>, IdentityError> {
        Ok(self.identities.read().await.get(email).cloned())
    }

    async fn insert(&self, identity: NewIdentity) -> Result<Identity, IdentityError> {
        let mut identities = self.identities.write().await;

        if identities.contains_key(&identity.email) {
            return Err(IdentityError::EmailAlreadyExists(identity.email.to_string()));
        }

        let created = Identity {
            id: IdentityId::new(),
            name: identity.name,
            email: identity.email,
            avatar: identity.avatar,
            password_hash: identity.password_hash,
            created_at: Utc::now(),
        };

        identities.insert(created.email.clone(), created.clone());

        Ok(created)
    }
}
