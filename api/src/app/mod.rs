//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports.

pub mod account_service;
pub mod note_service;

pub use account_service::{hash_api_key, AccountService};
pub use note_service::NoteService;
