//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{NewNote, NewUser, Note, NoteId, Principal, User, UserId};
use crate::domain::ports::{IdentityProvider, NoteRepository, RequestContext, UserRepository};
use crate::error::DomainError;

// ============================================================================
// In-Memory Note Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryNoteRepository {
    notes: Arc<RwLock<BTreeMap<NoteId, Note>>>,
    last_id: AtomicI64,
    /// Report every slug as free, so only the write-time check can catch a collision
    blind_existence_checks: bool,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a note for testing
    pub fn with_note(self, note: Note) -> Self {
        self.last_id.fetch_max(note.id.0, Ordering::SeqCst);
        {
            let mut notes = self.notes.write().unwrap();
            notes.insert(note.id, note);
        }
        self
    }

    /// Simulate a concurrent writer taking a slug between check and insert
    pub fn hiding_slugs_from_existence_checks(mut self) -> Self {
        self.blind_existence_checks = true;
        self
    }

    fn slug_taken(notes: &BTreeMap<NoteId, Note>, slug: &str, exclude: Option<NoteId>) -> bool {
        notes
            .values()
            .any(|n| n.slug == slug && Some(n.id) != exclude)
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Note>, DomainError> {
        let notes = self.notes.read().unwrap();
        Ok(notes.values().find(|n| n.slug == slug).cloned())
    }

    async fn exists_with_slug(
        &self,
        slug: &str,
        exclude: Option<NoteId>,
    ) -> Result<bool, DomainError> {
        if self.blind_existence_checks {
            return Ok(false);
        }
        let notes = self.notes.read().unwrap();
        Ok(Self::slug_taken(&notes, slug, exclude))
    }

    async fn insert(&self, new_note: &NewNote) -> Result<Note, DomainError> {
        let mut notes = self.notes.write().unwrap();
        if Self::slug_taken(&notes, &new_note.slug, None) {
            return Err(DomainError::AlreadyExists(format!(
                "Note with slug '{}' already exists",
                new_note.slug
            )));
        }

        let note = Note {
            id: NoteId(self.last_id.fetch_add(1, Ordering::SeqCst) + 1),
            title: new_note.title.clone(),
            text: new_note.text.clone(),
            slug: new_note.slug.clone(),
            author_id: new_note.author_id,
            created_at: Utc::now(),
        };
        notes.insert(note.id, note.clone());
        Ok(note)
    }

    async fn update(&self, note: &Note) -> Result<Note, DomainError> {
        let mut notes = self.notes.write().unwrap();
        if Self::slug_taken(&notes, &note.slug, Some(note.id)) {
            return Err(DomainError::AlreadyExists(format!(
                "Note with slug '{}' already exists",
                note.slug
            )));
        }

        let stored = notes
            .get_mut(&note.id)
            .ok_or_else(|| DomainError::NotFound(format!("Note {} not found", note.id)))?;
        stored.title = note.title.clone();
        stored.text = note.text.clone();
        stored.slug = note.slug.clone();
        Ok(stored.clone())
    }

    async fn delete(&self, id: NoteId) -> Result<(), DomainError> {
        let mut notes = self.notes.write().unwrap();
        notes
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound(format!("Note {} not found", id)))
    }

    async fn list_by_author(&self, author_id: &UserId) -> Result<Vec<Note>, DomainError> {
        let notes = self.notes.read().unwrap();
        Ok(notes
            .values()
            .filter(|n| n.author_id == *author_id)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let notes = self.notes.read().unwrap();
        Ok(notes.len() as u64)
    }
}

// ============================================================================
// In-Memory User Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, user: User) -> Self {
        {
            let mut users = self.users.write().unwrap();
            users.insert(user.id, user);
        }
        self
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.values().find(|u| u.api_key_hash == hash).cloned())
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().unwrap();
        if users.values().any(|u| u.username == new_user.username) {
            return Err(DomainError::AlreadyExists(format!(
                "User with username '{}' already exists",
                new_user.username
            )));
        }

        let user = User {
            id: UserId::new(),
            username: new_user.username.clone(),
            api_key_hash: new_user.api_key_hash.clone(),
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_api_key_hash(&self, id: &UserId, hash: &str) -> Result<(), DomainError> {
        let mut users = self.users.write().unwrap();
        if let Some(user) = users.get_mut(id) {
            user.api_key_hash = hash.to_string();
            Ok(())
        } else {
            Err(DomainError::NotFound(format!("User {} not found", id)))
        }
    }
}

// ============================================================================
// Mock Identity Provider
// ============================================================================

/// Identity provider with a fixed table of API keys
#[derive(Default)]
pub struct MockIdentityProvider {
    keys: RwLock<HashMap<String, User>>,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, api_key: &str, user: User) -> Self {
        self.keys.write().unwrap().insert(api_key.to_string(), user);
        self
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn current_principal(&self, ctx: &RequestContext) -> Result<Principal, DomainError> {
        let keys = self.keys.read().unwrap();
        Ok(Principal::from(
            ctx.api_key.as_ref().and_then(|k| keys.get(k)).cloned(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_note, test_user};

    #[tokio::test]
    async fn mock_identity_resolves_known_keys() {
        let user = test_user();
        let provider = MockIdentityProvider::new().with_user("k1", user.clone());

        let principal = provider
            .current_principal(&RequestContext::with_api_key("k1"))
            .await
            .unwrap();
        assert_eq!(principal, Principal::User(user));

        let principal = provider
            .current_principal(&RequestContext::with_api_key("k2"))
            .await
            .unwrap();
        assert!(principal.is_anonymous());
    }

    #[tokio::test]
    async fn list_by_author_is_in_id_order() {
        let author = test_user();
        let first = test_note(&author, "first");
        let second = test_note(&author, "second");
        let repo = InMemoryNoteRepository::new()
            .with_note(second.clone())
            .with_note(first.clone());

        let notes = repo.list_by_author(&author.id).await.unwrap();

        assert_eq!(notes, vec![first, second]);
    }

    #[tokio::test]
    async fn inserted_ids_follow_prepopulated_notes() {
        let author = test_user();
        let existing = test_note(&author, "existing");
        let repo = InMemoryNoteRepository::new().with_note(existing.clone());

        let note = repo
            .insert(&NewNote {
                title: "T".to_string(),
                text: "B".to_string(),
                slug: "fresh".to_string(),
                author_id: author.id,
            })
            .await
            .unwrap();

        assert!(note.id > existing.id);
    }
}
