pub mod gravatar;

pub use gravatar::GravatarAvatarDeriver;
