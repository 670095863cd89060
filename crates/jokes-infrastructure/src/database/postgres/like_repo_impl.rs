// ============================================================================
// Jokes Infrastructure - PostgreSQL Like Repository
// File: crates/jokes-infrastructure/src/database/postgres/like_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::PgPool;

use jokes_core::domain::Like;
use jokes_core::error::DomainError;
use jokes_core::repositories::LikeRepository;

use super::{database_error, is_foreign_key_violation};

pub struct PgLikeRepository {
    pool: PgPool,
}

impl PgLikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeRepository for PgLikeRepository {
    async fn insert(&self, like: &Like) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO likes (user_id, joke_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, joke_id) DO NOTHING
            "#,
        )
        .bind(like.user_id)
        .bind(like.joke_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // The joke was deleted between the existence check and the insert
            if is_foreign_key_violation(&e) {
                DomainError::JokeNotFound(like.joke_id)
            } else {
                database_error("inserting like", e)
            }
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, like: &Like) -> Result<bool, DomainError> {
        let result = sqlx::query(r#"DELETE FROM likes WHERE user_id = $1 AND joke_id = $2"#)
            .bind(like.user_id)
            .bind(like.joke_id)
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("deleting like", e))?;

        Ok(result.rows_affected() > 0)
    }
}
