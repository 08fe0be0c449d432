use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedIdentity;

pub async fn current(
    Extension(identity): Extension<AuthenticatedIdentity>,
) -> ApiSuccess<CurrentResponseData> {
    ApiSuccess::new(StatusCode::OK, (&identity).into())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentResponseData {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&AuthenticatedIdentity> for CurrentResponseData {
    fn from(identity: &AuthenticatedIdentity) -> Self {
        Self {
            id: identity.id.to_string(),
            name: identity.name.clone(),
            email: identity.email.clone(),
        }
    }
}
