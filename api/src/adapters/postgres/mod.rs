//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod note_repo;
pub mod schema;
pub mod user_repo;


pub use note_repo::PostgresNoteRepository;
pub use schema::apply_migrations;
pub use user_repo::PostgresUserRepository;
