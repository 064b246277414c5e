//! Unified error types for the Notes API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Persistence and port errors
//! - `AppError`: Application layer errors (wraps domain errors for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::auth::login_url_with_next;

/// Domain layer errors - raised by ports and their adapters
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Entity already exists: {0}")]
    AlreadyExists(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Application layer errors - used by services and HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// No authenticated principal. `next` is the destination to return to after login.
    #[error("Authentication required")]
    Unauthenticated { next: Option<String> },

    /// Missing resource, or one the principal does not own.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}{}", SLUG_TAKEN_SUFFIX)]
    DuplicateSlug(String),

    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },
}

/// Appended to the offending slug in the form error shown to the user.
pub const SLUG_TAKEN_SUFFIX: &str = " - such slug already exists, please choose a unique value!";

impl AppError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field,
            message: message.into(),
        }
    }
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    /// Form field the error belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details, field) = match &self {
            AppError::Unauthenticated { next } => {
                return Redirect::to(&login_url_with_next(next.as_deref())).into_response();
            }
            AppError::Domain(DomainError::NotFound(msg)) | AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, "Not found", Some(msg.clone()), None)
            }
            AppError::Domain(DomainError::AlreadyExists(msg)) => (
                StatusCode::CONFLICT,
                "Already exists",
                Some(msg.clone()),
                None,
            ),
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                    None,
                )
            }
            AppError::DuplicateSlug(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation error",
                Some(self.to_string()),
                Some("slug"),
            ),
            AppError::Validation { field, message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation error",
                Some(message.clone()),
                Some(*field),
            ),
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
            field,
        });

        (status, body).into_response()
    }
}
