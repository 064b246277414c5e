//! API key authentication

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use crate::app::hash_api_key;
use crate::domain::entities::Principal;
use crate::domain::ports::{IdentityProvider, RequestContext, UserRepository};
use crate::error::{AppError, DomainError};
use crate::AppState;

/// Extract the API key from the Authorization header
fn extract_api_key(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|k| !k.is_empty())
}

/// Build the identity context for a request from its headers
pub fn request_context(headers: &HeaderMap) -> RequestContext {
    RequestContext {
        api_key: extract_api_key(headers).map(str::to_string),
    }
}

/// Identity provider resolving API keys against stored key hashes
pub struct ApiKeyIdentityProvider<UR: ?Sized> {
    users: Arc<UR>,
}

impl<UR: ?Sized> ApiKeyIdentityProvider<UR> {
    pub fn new(users: Arc<UR>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<UR> IdentityProvider for ApiKeyIdentityProvider<UR>
where
    UR: UserRepository + ?Sized,
{
    async fn current_principal(&self, ctx: &RequestContext) -> Result<Principal, DomainError> {
        let Some(api_key) = ctx.api_key.as_deref() else {
            return Ok(Principal::Anonymous);
        };

        let user = self
            .users
            .find_by_api_key_hash(&hash_api_key(api_key))
            .await?;
        if user.is_none() {
            tracing::debug!("Unknown API key presented, treating request as anonymous");
        }

        Ok(Principal::from(user))
    }
}

/// Login gate middleware
///
/// Resolves the principal and injects it into request extensions.
/// Anonymous requests are redirected to the login page with the
/// requested path preserved in `next`.
pub async fn login_required(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let ctx = request_context(request.headers());
    let principal = state.note_service.current_principal(&ctx).await?;

    if principal.is_anonymous() {
        let destination = request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| request.uri().path().to_string());
        tracing::debug!(next = %destination, "Anonymous request to protected route");
        return Err(AppError::Unauthenticated {
            next: Some(destination),
        });
    }

    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}
