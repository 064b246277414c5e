//! Account service
//!
//! Handles user signup and API key revocation.

use std::sync::{Arc, LazyLock};

use rand::Rng;
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::domain::entities::{NewUser, Principal, User};
use crate::domain::ports::UserRepository;
use crate::error::{AppError, DomainError};

/// Maximum length of a username, in characters
pub const USERNAME_MAX_LENGTH: usize = 150;

static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+\-]+$").expect("username pattern is valid"));

/// Service for managing user accounts
pub struct AccountService<UR: ?Sized> {
    users: Arc<UR>,
}

impl<UR> AccountService<UR>
where
    UR: UserRepository + ?Sized,
{
    pub fn new(users: Arc<UR>) -> Self {
        Self { users }
    }

    /// Register a new user
    ///
    /// Returns (user, api_key) - the key is only shown once
    pub async fn signup(&self, username: &str) -> Result<(User, String), AppError> {
        let username = username.trim();
        if username.is_empty() || username.chars().count() > USERNAME_MAX_LENGTH {
            return Err(AppError::validation(
                "username",
                format!(
                    "Username must be between 1 and {} characters",
                    USERNAME_MAX_LENGTH
                ),
            ));
        }
        if !USERNAME_PATTERN.is_match(username) {
            return Err(AppError::validation(
                "username",
                "Username may contain only letters, numbers and @/./+/-/_ characters",
            ));
        }

        if self.users.find_by_username(username).await?.is_some() {
            return Err(AppError::Domain(DomainError::AlreadyExists(format!(
                "User with username '{}' already exists",
                username
            ))));
        }

        let api_key = generate_api_key();
        let user = self
            .users
            .create(&NewUser {
                username: username.to_string(),
                api_key_hash: hash_api_key(&api_key),
            })
            .await?;

        tracing::info!(user = %user.id, username = %user.username, "User signed up");
        Ok((user, api_key))
    }

    /// Revoke the principal's current API key.
    ///
    /// Anonymous principals have nothing to revoke.
    pub async fn logout(&self, principal: &Principal) -> Result<(), AppError> {
        let Some(user) = principal.user() else {
            return Ok(());
        };

        self.users
            .update_api_key_hash(&user.id, &hash_api_key(&generate_api_key()))
            .await?;

        tracing::info!(user = %user.id, "API key revoked on logout");
        Ok(())
    }
}

/// Generate a random API key
fn generate_api_key() -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    format!("nk-{}", hex::encode(bytes))
}

/// Hash an API key for storage
pub fn hash_api_key(api_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hex::encode(hasher.finalize())
}
