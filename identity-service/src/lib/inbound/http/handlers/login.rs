use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::identity::models::LoginInput;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let issued = state.identity_service.login(body.into()).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            success: true,
            token: issued.token,
        },
    ))
}

#[derive(Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoginRequest {
    email: String,
    password: String,
}

impl From<LoginRequest> for LoginInput {
    fn from(body: LoginRequest) -> Self {
        LoginInput {
            email: body.email,
            password: body.password,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub success: bool,
    /// `Bearer <jwt>`, ready to be sent back as the Authorization header
    pub token: String,
}
