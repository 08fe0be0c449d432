use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::RegistrationInput;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    state
        .identity_service
        .register(body.into())
        .await
        .map_err(ApiError::from)
        .map(|ref identity| ApiSuccess::new(StatusCode::OK, identity.into()))
}

/// HTTP request body for registering an identity (raw JSON)
#[derive(Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegisterRequest {
    name: String,
    email: String,
    password: String,
    password2: String,
}

impl From<RegisterRequest> for RegistrationInput {
    fn from(body: RegisterRequest) -> Self {
        RegistrationInput {
            name: body.name,
            email: body.email,
            password: body.password,
            password2: body.password2,
        }
    }
}

/// The created record. The password hash never leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub date: DateTime<Utc>,
}

impl From<&Identity> for RegisterResponseData {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.to_string(),
            name: identity.name.clone(),
            email: identity.email.as_str().to_string(),
            avatar: identity.avatar.clone(),
            date: identity.created_at,
        }
    }
}
