use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Time-bounded JWT claims.
///
/// Wraps a service-defined payload (flattened into the token body) with the
/// RFC 7519 `iat` and `exp` timestamps. The payload is a snapshot taken at
/// issuance and is never refreshed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims<T> {
    /// Service-defined claims
    #[serde(flatten)]
    pub payload: T,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl<T> Claims<T> {
    /// Create claims issued now that expire after `ttl`.
    pub fn new(payload: T, ttl: Duration) -> Self {
        Self::issued_at(payload, Utc::now(), ttl)
    }

    /// Create claims with an explicit issuance instant.
    ///
    /// # Arguments
    /// * `payload` - Service-defined claims
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Time-to-live added to `issued_at` to obtain `exp`
    pub fn issued_at(payload: T, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            payload,
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }
}
