//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod auth;
pub mod notes;
pub mod pages;

pub use auth::{login, logout, signup, signup_form};
pub use notes::{
    add_note_form, create_note, delete_note, delete_note_confirm, edit_note_form, list_notes,
    note_detail, update_note,
};
pub use pages::{home, success};
