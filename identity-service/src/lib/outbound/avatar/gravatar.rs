use sha2::Digest;
use sha2::Sha256;

use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::ports::AvatarDeriver;

const GRAVATAR_BASE_URL: &str = "https://www.gravatar.com/avatar";

/// Gravatar URL derivation.
///
/// The email is trimmed and lower-cased before hashing, so addresses that
/// differ only in case share an avatar.
#[derive(Debug, Clone)]
pub struct GravatarAvatarDeriver {
    size: u32,
    rating: String,
    default_image: String,
}

impl GravatarAvatarDeriver {
    /// # Arguments
    /// * `size` - Image size in pixels (`s`)
    /// * `rating` - Maximum content rating (`r`), e.g. `pg`
    /// * `default_image` - Fallback image when no avatar exists (`d`), e.g. `mm`
    pub fn new(size: u32, rating: impl Into<String>, default_image: impl Into<String>) -> Self {
        Self {
            size,
            rating: rating.into(),
            default_image: default_image.into(),
        }
    }

    fn email_hash(email: &EmailAddress) -> String {
        let normalized = email.as_str().trim().to_lowercase();
        hex::encode(Sha256::digest(normalized.as_bytes()))
    }
}

impl Default for GravatarAvatarDeriver {
    fn default() -> Self {
        Self::new(200, "pg", "mm")
    }
}

impl AvatarDeriver for GravatarAvatarDeriver {
    fn url_for(&self, email: &EmailAddress) -> String {
        format!(
            "{}/{}?s={}&r={}&d={}",
            GRAVATAR_BASE_URL,
            Self::email_hash(email),
            self.size,
            self.rating,
            self.default_image
        )
    }
}
