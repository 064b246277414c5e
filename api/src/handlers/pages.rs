//! Static pages
//!
//! Home page (public) and the post-submission success page (login required).

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub title: &'static str,
    pub message: &'static str,
}

/// GET /
pub async fn home() -> Json<PageResponse> {
    Json(PageResponse {
        title: "Notes",
        message: "Private notes for registered users. Sign up at /auth/signup/ to get an API key.",
    })
}

/// GET /done/
pub async fn success() -> Json<PageResponse> {
    Json(PageResponse {
        title: "Done",
        message: "Your changes have been saved. See /notes/ for all your notes.",
    })
}
