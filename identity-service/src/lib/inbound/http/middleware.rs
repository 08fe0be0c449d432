use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::identity::models::AccessClaims;
use crate::domain::identity::models::IdentityId;
use crate::inbound::http::router::AppState;

/// Extension type carrying the verified caller identity.
///
/// Built from token claims alone; the identity store is never consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub id: IdentityId,
    pub name: String,
    pub email: String,
    pub avatar: String,
}

/// Middleware that validates bearer tokens and adds the caller identity to
/// request extensions. Rejected requests never reach the inner handler.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    // Extract token from Authorization header
    let token = extract_token_from_header(&req)?;

    // Validate token and extract claims (from auth library)
    let claims: auth::Claims<AccessClaims> =
        state.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!("JWT validation failed: {}", e);
            unauthorized("Invalid or expired token")
        })?;

    let id = IdentityId::from_string(&claims.payload.id).map_err(|e| {
        tracing::error!("Failed to parse identity ID from token: {}", e);
        unauthorized("Invalid token format")
    })?;

    let AccessClaims {
        name,
        email,
        avatar,
        ..
    } = claims.payload;

    req.extensions_mut().insert(AuthenticatedIdentity {
        id,
        name,
        email,
        avatar,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    auth::strip_bearer(auth_str).ok_or_else(|| {
        unauthorized("Invalid Authorization header format. Expected: Bearer <token>")
    })
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": message
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use auth::Authenticator;
    use axum::body::Body;
    use axum::middleware;
    use axum::routing::get;
    use axum::Extension;
    use axum::Router;
    use chrono::Duration;
    use chrono::Utc;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::identity::models::access_token_ttl;
    use crate::domain::identity::service::IdentityService;
    use crate::outbound::avatar::GravatarAvatarDeriver;
    use crate::outbound::repositories::InMemoryIdentityRepository;

    const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

    fn claims() -> AccessClaims {
        AccessClaims {
            id: IdentityId::new().to_string(),
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            avatar: "https://avatar.test/ann".to_string(),
        }
    }

    /// Router with a single gated route counting how often its handler runs.
    fn gated_router(calls: Arc<AtomicUsize>) -> (Router, Arc<Authenticator>) {
        let authenticator = Arc::new(Authenticator::new(SECRET, access_token_ttl()));
        let identity_service = Arc::new(IdentityService::new(
            Arc::new(InMemoryIdentityRepository::new()),
            Arc::new(GravatarAvatarDeriver::default()),
            Arc::clone(&authenticator),
        ));

        let state = AppState {
            identity_service,
            authenticator: Arc::clone(&authenticator),
        };

        let router = Router::new()
            .route(
                "/protected",
                get(move |Extension(identity): Extension<AuthenticatedIdentity>| {
                    let calls = Arc::clone(&calls);
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        identity.email
                    }
                }),
            )
            .route_layer(middleware::from_fn_with_state(state.clone(), authenticate))
            .with_state(state);

        (router, authenticator)
    }

    fn request(authorization: Option<String>) -> http::Request<Body> {
        let mut builder = http::Request::builder().uri("/protected");
        if let Some(value) = authorization {
            builder = builder.header(http::header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (router, authenticator) = gated_router(Arc::clone(&calls));

        let issued = authenticator.issue_token(claims()).unwrap();
        let response = router
            .oneshot(request(Some(auth::bearer(&issued.access_token))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"ann@x.com");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_token_never_reaches_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (router, authenticator) = gated_router(Arc::clone(&calls));

        let issued = authenticator
            .issue_token_at(claims(), Utc::now() - Duration::hours(7))
            .unwrap();
        let response = router
            .oneshot(request(Some(auth::bearer(&issued.access_token))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_foreign_signature_rejected() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (router, _) = gated_router(Arc::clone(&calls));

        let foreign = Authenticator::new(b"another-secret-key-at-least-32-bytes!!", access_token_ttl());
        let issued = foreign.issue_token(claims()).unwrap();
        let response = router
            .oneshot(request(Some(auth::bearer(&issued.access_token))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_or_malformed_header_rejected() {
        let calls = Arc::new(AtomicUsize::new(0));

        for authorization in [
            None,
            Some("Token abc".to_string()),
            Some("Bearer not.a.jwt".to_string()),
        ] {
            let (router, _) = gated_router(Arc::clone(&calls));
            let response = router.oneshot(request(authorization)).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_uuid_subject_rejected() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (router, authenticator) = gated_router(Arc::clone(&calls));

        let issued = authenticator
            .issue_token(AccessClaims {
                id: "not-a-uuid".to_string(),
                ..claims()
            })
            .unwrap();
        let response = router
            .oneshot(request(Some(auth::bearer(&issued.access_token))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
