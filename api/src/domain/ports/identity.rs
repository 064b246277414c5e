//! Identity port
//!
//! Resolves who is making a request.

use async_trait::async_trait;

use crate::domain::entities::Principal;
use crate::error::DomainError;

/// What a request presents to identify itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// API key from `Authorization: Bearer <key>`
    pub api_key: Option<String>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
        }
    }
}

/// Provider of the current principal for a request
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the principal. Unknown credentials resolve to `Principal::Anonymous`.
    async fn current_principal(&self, ctx: &RequestContext) -> Result<Principal, DomainError>;
}
