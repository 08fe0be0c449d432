//! Authentication utilities library
//!
//! Provides reusable credential infrastructure:
//! - Password hashing (Argon2id, configurable work factor)
//! - Time-bounded JWT issuance and validation
//! - Authentication coordination
//!
//! Services define their own claim payloads and adapt these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//! use chrono::Duration;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Subject {
//!     id: String,
//! }
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::new(Subject { id: "user123".into() }, Duration::hours(6));
//! let token = handler.encode(&claims).unwrap();
//! let decoded: Claims<Subject> = handler.decode(&token).unwrap();
//! assert_eq!(decoded.payload.id, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Claims};
//! use chrono::Duration;
//! use serde_json::{json, Value};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(6));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth
//!     .authenticate("password123", &hash, json!({ "id": "user123" }))
//!     .unwrap();
//!
//! // Validate token
//! let decoded: Claims<Value> = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded.payload["id"], "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::bearer;
pub use jwt::strip_bearer;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::BEARER_SCHEME;
pub use password::PasswordError;
pub use password::PasswordHasher;
