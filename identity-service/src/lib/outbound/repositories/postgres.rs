use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::ports::IdentityRepository;
use crate::identity::errors::IdentityError;

const EMAIL_UNIQUE_CONSTRAINT: &str = "identities_email_key";

pub struct PostgresIdentityRepository {
    pool: PgPool,
}

impl PostgresIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct IdentityRow {
    id: Uuid,
    name: String,
    email: String,
    avatar: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<IdentityRow> for Identity {
    type Error = IdentityError;

    fn try_from(row: IdentityRow) -> Result<Self, Self::Error> {
        Ok(Identity {
            id: IdentityId(row.id),
            name: row.name,
            email: EmailAddress::new(row.email)?,
            avatar: row.avatar,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl IdentityRepository for PostgresIdentityRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Identity>, IdentityError> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT id, name, email, avatar, password_hash, created_at
            FROM identities
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;

        row.map(Identity::try_from).transpose()
    }

    async fn insert(&self, identity: NewIdentity) -> Result<Identity, IdentityError> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            INSERT INTO identities (id, name, email, avatar, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, email, avatar, password_hash, created_at
            "#,
        )
        .bind(IdentityId::new().0)
        .bind(&identity.name)
        .bind(identity.email.as_str())
        .bind(&identity.avatar)
        .bind(&identity.password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
                {
                    return IdentityError::EmailAlreadyExists(identity.email.to_string());
                }
            }
            IdentityError::DatabaseError(e.to_string())
        })?;

        Identity::try_from(row)
    }
}
