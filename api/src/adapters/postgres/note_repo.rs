//! PostgreSQL adapter for NoteRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};

use crate::domain::entities::{NewNote, Note, NoteId, UserId};
use crate::domain::ports::NoteRepository;
use crate::entity::notes;
use crate::error::DomainError;

/// PostgreSQL implementation of NoteRepository
pub struct PostgresNoteRepository {
    db: DatabaseConnection,
}

impl PostgresNoteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Map a write error, surfacing slug collisions caught by the unique index
fn write_error(e: DbErr, slug: &str) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::AlreadyExists(format!("Note with slug '{}' already exists", slug))
        }
        _ => DomainError::Database(e.to_string()),
    }
}

#[async_trait]
impl NoteRepository for PostgresNoteRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Note>, DomainError> {
        let result = notes::Entity::find()
            .filter(notes::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn exists_with_slug(
        &self,
        slug: &str,
        exclude: Option<NoteId>,
    ) -> Result<bool, DomainError> {
        let mut query = notes::Entity::find().filter(notes::Column::Slug.eq(slug));
        if let Some(id) = exclude {
            query = query.filter(notes::Column::Id.ne(id.0));
        }

        let count = query
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    async fn insert(&self, note: &NewNote) -> Result<Note, DomainError> {
        let now = Utc::now().fixed_offset();

        let model = notes::ActiveModel {
            id: NotSet,
            title: Set(note.title.clone()),
            text: Set(note.text.clone()),
            slug: Set(note.slug.clone()),
            author_id: Set(note.author_id.0),
            created_at: Set(Some(now)),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, &note.slug))?;

        Ok(result.into())
    }

    async fn update(&self, note: &Note) -> Result<Note, DomainError> {
        let result = notes::ActiveModel {
            id: Set(note.id.0),
            title: Set(note.title.clone()),
            text: Set(note.text.clone()),
            slug: Set(note.slug.clone()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::NotFound(format!("Note {} not found", note.id)),
            e => write_error(e, &note.slug),
        })?;

        Ok(result.into())
    }

    async fn delete(&self, id: NoteId) -> Result<(), DomainError> {
        let result = notes::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            Err(DomainError::NotFound(format!("Note {} not found", id)))
        } else {
            Ok(())
        }
    }

    async fn list_by_author(&self, author_id: &UserId) -> Result<Vec<Note>, DomainError> {
        let results = notes::Entity::find()
            .filter(notes::Column::AuthorId.eq(author_id.0))
            .order_by_asc(notes::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        notes::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))
    }
}

/// Convert SeaORM model to domain entity
impl From<notes::Model> for Note {
    fn from(model: notes::Model) -> Self {
        Note {
            id: NoteId(model.id),
            title: model.title,
            text: model.text,
            slug: model.slug,
            author_id: UserId(model.author_id),
            created_at: model
                .created_at
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(Utc::now),
        }
    }
}
