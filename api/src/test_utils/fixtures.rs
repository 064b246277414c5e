//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use uuid::Uuid;

use crate::app::hash_api_key;
use crate::domain::entities::{Note, NoteDraft, NoteId, User, UserId};

static NEXT_NOTE_ID: AtomicI64 = AtomicI64::new(1);

/// Create a test user with default values
pub fn test_user() -> User {
    test_user_named("author")
}

/// Create a test user with a specific name. Their API key is `key-<name>`.
pub fn test_user_named(name: &str) -> User {
    User {
        id: UserId(Uuid::new_v4()),
        username: name.to_string(),
        api_key_hash: hash_api_key(&test_api_key(name)),
        created_at: Utc::now(),
    }
}

/// The API key belonging to `test_user_named(name)`
pub fn test_api_key(name: &str) -> String {
    format!("key-{}", name)
}

/// Create a stored note written by `author`
pub fn test_note(author: &User, slug: &str) -> Note {
    Note {
        id: NoteId(NEXT_NOTE_ID.fetch_add(1, Ordering::SeqCst)),
        title: "Заголовок".to_string(),
        text: "Текст заметки".to_string(),
        slug: slug.to_string(),
        author_id: author.id,
        created_at: Utc::now(),
    }
}

/// Form data for a note with the given slug
pub fn note_draft(slug: &str) -> NoteDraft {
    NoteDraft::new("Новый заголовок", "Новый текст").with_slug(slug)
}
