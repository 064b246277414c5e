//! Schema bootstrap
//!
//! Applies the bundled SQL migrations. Statements are idempotent.

use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::error::DomainError;

const MIGRATIONS: &[(&str, &str)] = &[(
    "0001_create_users_and_notes",
    include_str!("../../../migrations/0001_create_users_and_notes.sql"),
)];

/// Run every bundled migration against the database
pub async fn apply_migrations(db: &DatabaseConnection) -> Result<(), DomainError> {
    for (name, sql) in MIGRATIONS {
        tracing::debug!(migration = %name, "Applying migration");
        db.execute_unprepared(sql)
            .await
            .map_err(|e| DomainError::Database(format!("Migration {} failed: {}", name, e)))?;
    }

    tracing::info!(count = MIGRATIONS.len(), "Migrations applied");
    Ok(())
}
