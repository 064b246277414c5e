//! Note service
//!
//! Validates note submissions and enforces that only the author of a note
//! may read, change or delete it. A note owned by someone else is reported
//! exactly like a missing one.

use std::sync::Arc;

use crate::domain::entities::{
    NewNote, Note, NoteDraft, NoteId, Principal, User, TITLE_MAX_LENGTH,
};
use crate::domain::ports::{IdentityProvider, NoteRepository, RequestContext};
use crate::domain::slug::{is_valid_slug, slug_for_title, SLUG_MAX_LENGTH};
use crate::error::{AppError, DomainError};

const REQUIRED: &str = "This field is required.";

/// Title, text and slug that passed field validation
#[derive(Debug, Clone, PartialEq, Eq)]
struct ValidNote {
    title: String,
    text: String,
    slug: String,
}

/// Service for owner-scoped note operations
pub struct NoteService<NR: ?Sized, IP: ?Sized> {
    notes: Arc<NR>,
    identity: Arc<IP>,
}

impl<NR, IP> NoteService<NR, IP>
where
    NR: NoteRepository + ?Sized,
    IP: IdentityProvider + ?Sized,
{
    pub fn new(notes: Arc<NR>, identity: Arc<IP>) -> Self {
        Self { notes, identity }
    }

    /// Resolve who is making a request
    pub async fn current_principal(&self, ctx: &RequestContext) -> Result<Principal, AppError> {
        Ok(self.identity.current_principal(ctx).await?)
    }

    /// Create a note owned by the principal
    pub async fn create(&self, principal: &Principal, draft: NoteDraft) -> Result<Note, AppError> {
        let user = require_user(principal)?;
        let valid = validate(&draft)?;
        self.ensure_slug_available(&valid.slug, None).await?;

        let note = self
            .notes
            .insert(&NewNote {
                title: valid.title,
                text: valid.text,
                slug: valid.slug.clone(),
                author_id: user.id,
            })
            .await
            .map_err(|e| slug_conflict(e, &valid.slug))?;

        tracing::info!(note_id = %note.id, slug = %note.slug, author = %user.id, "Note created");
        Ok(note)
    }

    /// Read one of the principal's notes
    pub async fn get(&self, principal: &Principal, slug: &str) -> Result<Note, AppError> {
        let user = require_user(principal)?;
        self.owned_note(user, slug).await
    }

    /// Replace title, text and slug of one of the principal's notes
    pub async fn update(
        &self,
        principal: &Principal,
        slug: &str,
        draft: NoteDraft,
    ) -> Result<Note, AppError> {
        let user = require_user(principal)?;
        let mut note = self.owned_note(user, slug).await?;
        let valid = validate(&draft)?;
        self.ensure_slug_available(&valid.slug, Some(note.id))
            .await?;

        note.title = valid.title;
        note.text = valid.text;
        note.slug = valid.slug;

        let updated = self
            .notes
            .update(&note)
            .await
            .map_err(|e| slug_conflict(e, &note.slug))?;

        tracing::info!(note_id = %updated.id, old_slug = %slug, slug = %updated.slug, "Note updated");
        Ok(updated)
    }

    /// Delete one of the principal's notes
    pub async fn delete(&self, principal: &Principal, slug: &str) -> Result<(), AppError> {
        let user = require_user(principal)?;
        let note = self.owned_note(user, slug).await?;
        self.notes.delete(note.id).await?;

        tracing::info!(note_id = %note.id, slug = %note.slug, "Note deleted");
        Ok(())
    }

    /// All of the principal's notes, oldest first
    pub async fn list(&self, principal: &Principal) -> Result<Vec<Note>, AppError> {
        let user = require_user(principal)?;
        Ok(self.notes.list_by_author(&user.id).await?)
    }

    /// Look up a note and check it belongs to `user`.
    ///
    /// Every owner-scoped operation goes through here.
    async fn owned_note(&self, user: &User, slug: &str) -> Result<Note, AppError> {
        match self.notes.find_by_slug(slug).await? {
            Some(note) if note.is_owned_by(&user.id) => Ok(note),
            Some(note) => {
                tracing::debug!(note_id = %note.id, user = %user.id, "Note requested by non-author");
                Err(not_found(slug))
            }
            None => Err(not_found(slug)),
        }
    }

    async fn ensure_slug_available(
        &self,
        slug: &str,
        exclude: Option<NoteId>,
    ) -> Result<(), AppError> {
        if self.notes.exists_with_slug(slug, exclude).await? {
            return Err(AppError::DuplicateSlug(slug.to_string()));
        }
        Ok(())
    }
}

fn require_user(principal: &Principal) -> Result<&User, AppError> {
    principal
        .user()
        .ok_or(AppError::Unauthenticated { next: None })
}

fn not_found(slug: &str) -> AppError {
    AppError::NotFound(format!("Note '{}' not found", slug))
}

/// The store's unique index can still reject a slug that passed the pre-check
fn slug_conflict(e: DomainError, slug: &str) -> AppError {
    match e {
        DomainError::AlreadyExists(_) => AppError::DuplicateSlug(slug.to_string()),
        e => AppError::Domain(e),
    }
}

fn validate(draft: &NoteDraft) -> Result<ValidNote, AppError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(AppError::validation("title", REQUIRED));
    }
    if title.chars().count() > TITLE_MAX_LENGTH {
        return Err(AppError::validation(
            "title",
            format!(
                "Ensure this value has at most {} characters.",
                TITLE_MAX_LENGTH
            ),
        ));
    }

    let text = draft.text.trim();
    if text.is_empty() {
        return Err(AppError::validation("text", REQUIRED));
    }

    let slug = match draft.requested_slug() {
        Some(slug) if is_valid_slug(slug) => slug.to_string(),
        Some(_) => {
            return Err(AppError::validation(
                "slug",
                format!(
                    "Enter a valid slug of at most {} letters, numbers, underscores or hyphens.",
                    SLUG_MAX_LENGTH
                ),
            ))
        }
        None => {
            let derived = slug_for_title(title);
            if derived.is_empty() {
                return Err(AppError::validation(
                    "slug",
                    "Could not derive a slug from the title, please provide one.",
                ));
            }
            derived
        }
    };

    Ok(ValidNote {
        title: title.to_string(),
        text: text.to_string(),
        slug,
    })
}
