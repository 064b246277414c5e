//! Authentication
//!
//! API key identity provider and the login gate for protected routes.

pub mod api_key;

pub use api_key::{login_required, request_context, ApiKeyIdentityProvider};

/// Where anonymous visitors are sent to authenticate
pub const LOGIN_URL: &str = "/auth/login/";

/// Login URL carrying the destination to return to after authenticating.
///
/// Slashes in `next` are kept readable, everything else is percent-encoded.
pub fn login_url_with_next(next: Option<&str>) -> String {
    match next {
        Some(next) if !next.is_empty() => format!(
            "{}?next={}",
            LOGIN_URL,
            urlencoding::encode(next).replace("%2F", "/")
        ),
        _ => LOGIN_URL.to_string(),
    }
}
