//! Auth handlers
//!
//! Signup, login entry point and logout.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::request_context;
use crate::error::AppError;
use crate::AppState;

/// Query parameters for the login page
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Request body for signup
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
}

/// Response body for signup
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub id: String,
    pub username: String,
    /// API key for note requests (Authorization: Bearer <api_key>)
    pub api_key: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// GET /auth/login/
///
/// Login entry point. Protected pages redirect here with `next` set.
pub async fn login(Query(query): Query<LoginQuery>) -> Json<LoginResponse> {
    Json(LoginResponse {
        message: "Send your API key as 'Authorization: Bearer <api_key>'. \
                  Sign up at /auth/signup/ if you do not have one.",
        next: query.next.filter(|n| !n.is_empty()),
    })
}

/// GET|POST /auth/logout/
///
/// Revoke the presented API key, if any.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, AppError> {
    let principal = state
        .note_service
        .current_principal(&request_context(&headers))
        .await?;
    state.account_service.logout(&principal).await?;

    Ok(Json(MessageResponse {
        message: "You have been logged out.",
    }))
}

/// GET /auth/signup/
pub async fn signup_form() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "POST a JSON body {\"username\": \"...\"} to this URL to register.",
    })
}

/// POST /auth/signup/
///
/// Register a new user. Returns the API key (only shown once).
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let (user, api_key) = state.account_service.signup(&request.username).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            id: user.id.to_string(),
            username: user.username,
            api_key,
            message: "Save your API key! It won't be shown again.".to_string(),
        }),
    ))
}
