pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::Claims;
pub use errors::JwtError;
pub use handler::JwtHandler;

/// Authorization scheme tokens are presented with.
pub const BEARER_SCHEME: &str = "Bearer";

/// Prefix a raw JWT with the bearer scheme (`Bearer <token>`).
pub fn bearer(token: &str) -> String {
    format!("{} {}", BEARER_SCHEME, token)
}

/// Strip the bearer scheme from an `Authorization` header value.
///
/// Returns `None` when the scheme is missing or the token part is empty.
pub fn strip_bearer(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix(BEARER_SCHEME)
        .and_then(|rest| rest.strip_prefix(' '))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
