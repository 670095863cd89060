//! PostgreSQL repository implementations

pub mod joke_repo_impl;
pub mod like_repo_impl;
pub mod user_repo_impl;

pub use joke_repo_impl::PgJokeRepository;
pub use like_repo_impl::PgLikeRepository;
pub use user_repo_impl::PgUserRepository;

use jokes_core::error::DomainError;
use tracing::error;

fn database_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(e.to_string())
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}
