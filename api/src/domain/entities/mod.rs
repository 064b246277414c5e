//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod note;
pub mod user;

pub use note::{NewNote, Note, NoteDraft, NoteId, TITLE_MAX_LENGTH};
pub use user::{NewUser, Principal, User, UserId};
