use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use identity_service::domain::identity::models::access_token_ttl;
use identity_service::domain::identity::service::IdentityService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::avatar::GravatarAvatarDeriver;
use identity_service::outbound::repositories::InMemoryIdentityRepository;
use serde_json::json;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub repository: InMemoryIdentityRepository,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = InMemoryIdentityRepository::new();

        // Minimal Argon2 work factor keeps the suite fast
        let authenticator = Arc::new(Authenticator::with_password_hasher(
            JWT_SECRET,
            access_token_ttl(),
            PasswordHasher::with_params(8, 1, 1).expect("Failed to build password hasher"),
        ));

        let identity_service = Arc::new(IdentityService::new(
            Arc::new(repository.clone()),
            Arc::new(GravatarAvatarDeriver::default()),
            Arc::clone(&authenticator),
        ));

        let router = create_router(identity_service, Arc::clone(&authenticator));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            repository,
            api_client: reqwest::Client::new(),
            authenticator,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with a raw Authorization header value
    pub fn get_with_authorization(&self, path: &str, authorization: &str) -> reqwest::RequestBuilder {
        self.get(path)
            .header(reqwest::header::AUTHORIZATION, authorization)
    }

    /// Register Ann and return the response body
    pub async fn register_ann(&self) -> reqwest::Response {
        self.post("/api/users/register")
            .json(&json!({
                "name": "Ann",
                "email": "ann@x.com",
                "password": "p@ss1234",
                "password2": "p@ss1234"
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log Ann in and return the bearer-prefixed token
    pub async fn login_ann(&self) -> String {
        let response = self
            .post("/api/users/login")
            .json(&json!({
                "email": "ann@x.com",
                "password": "p@ss1234"
            }))
            .send()
            .await
            .expect("Failed to execute request");

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["token"]
            .as_str()
            .expect("Login response has no token")
            .to_string()
    }
}
