//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{NewNote, NewUser, Note, NoteId, User, UserId};
use crate::error::DomainError;

/// Repository for Note entities
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Find a note by its slug
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Note>, DomainError>;

    /// Check whether a note other than `exclude` already uses `slug`
    async fn exists_with_slug(
        &self,
        slug: &str,
        exclude: Option<NoteId>,
    ) -> Result<bool, DomainError>;

    /// Insert a new note.
    ///
    /// Fails with `DomainError::AlreadyExists` if the slug is taken.
    async fn insert(&self, note: &NewNote) -> Result<Note, DomainError>;

    /// Persist title, text and slug of an existing note. Author and id are never changed.
    ///
    /// Fails with `DomainError::AlreadyExists` if the new slug is taken.
    async fn update(&self, note: &Note) -> Result<Note, DomainError>;

    /// Delete a note by ID
    async fn delete(&self, id: NoteId) -> Result<(), DomainError>;

    /// All notes written by an author, oldest first
    async fn list_by_author(&self, author_id: &UserId) -> Result<Vec<Note>, DomainError>;

    /// Total number of stored notes
    async fn count(&self) -> Result<u64, DomainError>;
}

/// Repository for User entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by API key hash
    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;

    /// Replace the stored API key hash, revoking the previous key
    async fn update_api_key_hash(&self, id: &UserId, hash: &str) -> Result<(), DomainError>;
}
