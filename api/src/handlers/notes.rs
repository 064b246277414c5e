//! Note handlers
//!
//! Owner-scoped note pages. All routes here sit behind the login gate, which
//! puts the resolved `Principal` into request extensions.

use axum::{
    extract::{Path, State},
    response::Redirect,
    Extension, Form, Json,
};
use serde::Serialize;

use crate::domain::entities::{Note, NoteDraft, Principal, TITLE_MAX_LENGTH};
use crate::domain::slug::SLUG_MAX_LENGTH;
use crate::error::AppError;
use crate::AppState;

/// Where successful create/edit/delete submissions land
pub const SUCCESS_URL: &str = "/done/";

/// A note as returned by the API
#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author_id: String,
    pub created_at: String,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        NoteResponse {
            id: note.id.0,
            title: note.title,
            text: note.text,
            slug: note.slug,
            author_id: note.author_id.to_string(),
            created_at: note.created_at.to_rfc3339(),
        }
    }
}

/// Response for the note list page
#[derive(Debug, Serialize)]
pub struct NoteListResponse {
    pub object_list: Vec<NoteResponse>,
}

/// One field of the note form
#[derive(Debug, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub required: bool,
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<&'static str>,
}

/// Response for the add/edit form pages
#[derive(Debug, Serialize)]
pub struct NoteFormResponse {
    pub form: Vec<FormField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<NoteResponse>,
}

/// Response for the delete confirmation page
#[derive(Debug, Serialize)]
pub struct DeleteConfirmResponse {
    pub note: NoteResponse,
    pub message: &'static str,
}

fn note_form(values: Option<&NoteDraft>) -> Vec<FormField> {
    vec![
        FormField {
            name: "title",
            required: true,
            max_length: Some(TITLE_MAX_LENGTH),
            value: values.map(|v| v.title.clone()),
            help_text: None,
        },
        FormField {
            name: "text",
            required: true,
            max_length: None,
            value: values.map(|v| v.text.clone()),
            help_text: None,
        },
        FormField {
            name: "slug",
            required: false,
            max_length: Some(SLUG_MAX_LENGTH),
            value: values.and_then(|v| v.slug.clone()),
            help_text: Some("Leave empty to derive the slug from the title."),
        },
    ]
}

/// GET /notes/
///
/// List the current user's notes, oldest first.
pub async fn list_notes(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<NoteListResponse>, AppError> {
    let notes = state.note_service.list(&principal).await?;

    Ok(Json(NoteListResponse {
        object_list: notes.into_iter().map(NoteResponse::from).collect(),
    }))
}

/// GET /add/
///
/// Describe the empty note form.
pub async fn add_note_form() -> Json<NoteFormResponse> {
    Json(NoteFormResponse {
        form: note_form(None),
        note: None,
    })
}

/// POST /add/
///
/// Create a note from a form submission.
pub async fn create_note(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Form(draft): Form<NoteDraft>,
) -> Result<Redirect, AppError> {
    state.note_service.create(&principal, draft).await?;
    Ok(Redirect::to(SUCCESS_URL))
}

/// GET /note/:slug/
///
/// Show one of the current user's notes.
pub async fn note_detail(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(slug): Path<String>,
) -> Result<Json<NoteResponse>, AppError> {
    let note = state.note_service.get(&principal, &slug).await?;
    Ok(Json(note.into()))
}

/// GET /edit/:slug/
///
/// Describe the edit form, prefilled with the note.
pub async fn edit_note_form(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(slug): Path<String>,
) -> Result<Json<NoteFormResponse>, AppError> {
    let note = state.note_service.get(&principal, &slug).await?;

    Ok(Json(NoteFormResponse {
        form: note_form(Some(&NoteDraft::from(&note))),
        note: Some(note.into()),
    }))
}

/// POST /edit/:slug/
///
/// Apply an edit form submission.
pub async fn update_note(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(slug): Path<String>,
    Form(draft): Form<NoteDraft>,
) -> Result<Redirect, AppError> {
    state.note_service.update(&principal, &slug, draft).await?;
    Ok(Redirect::to(SUCCESS_URL))
}

/// GET /delete/:slug/
///
/// Ask for confirmation before deleting.
pub async fn delete_note_confirm(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(slug): Path<String>,
) -> Result<Json<DeleteConfirmResponse>, AppError> {
    let note = state.note_service.get(&principal, &slug).await?;

    Ok(Json(DeleteConfirmResponse {
        note: note.into(),
        message: "Submit POST or DELETE to this URL to delete the note.",
    }))
}

/// POST /delete/:slug/, DELETE /delete/:slug/
///
/// Delete the note.
pub async fn delete_note(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(slug): Path<String>,
) -> Result<Redirect, AppError> {
    state.note_service.delete(&principal, &slug).await?;
    Ok(Redirect::to(SUCCESS_URL))
}
