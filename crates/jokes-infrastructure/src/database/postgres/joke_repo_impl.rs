// ============================================================================
// Jokes Infrastructure - PostgreSQL Joke Repository
// File: crates/jokes-infrastructure/src/database/postgres/joke_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use jokes_core::domain::{Joke, JokeView};
use jokes_core::error::DomainError;
use jokes_core::repositories::JokeRepository;

use super::{database_error, is_foreign_key_violation};

/// Every joke, with the author's name, the like count, and whether `$1`
/// liked it. Correlated subqueries keep one output row per joke.
const LIST_FOR_VIEWER_SQL: &str = r#"
    SELECT
        j.joke_id AS id,
        j.joke,
        j.created,
        COALESCE((SELECT u.username FROM users u WHERE u.user_id = j.author_id), '') AS author,
        (SELECT COUNT(*) FROM likes l WHERE l.joke_id = j.joke_id) AS likes,
        EXISTS (
            SELECT 1 FROM likes l WHERE l.joke_id = j.joke_id AND l.user_id = $1
        ) AS liked
    FROM jokes j
    ORDER BY j.created, j.joke_id
"#;

pub struct PgJokeRepository {
    pool: PgPool,
}

impl PgJokeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct JokeRow {
    pub joke_id: Uuid,
    pub joke: String,
    pub author_id: Uuid,
    pub created: DateTime<Utc>,
}

impl From<JokeRow> for Joke {
    fn from(row: JokeRow) -> Self {
        Joke {
            id: row.joke_id,
            joke: row.joke,
            author_id: row.author_id,
            created: row.created,
        }
    }
}

#[derive(Debug, FromRow)]
struct JokeViewRow {
    pub id: Uuid,
    pub joke: String,
    pub created: DateTime<Utc>,
    pub author: String,
    pub likes: i64,
    pub liked: bool,
}

impl From<JokeViewRow> for JokeView {
    fn from(row: JokeViewRow) -> Self {
        JokeView {
            id: row.id,
            joke: row.joke,
            created: row.created,
            author: row.author,
            likes: row.likes,
            liked: row.liked,
        }
    }
}

#[async_trait]
impl JokeRepository for PgJokeRepository {
    async fn create(&self, joke: &Joke) -> Result<Joke, DomainError> {
        let row: JokeRow = sqlx::query_as(
            r#"
            INSERT INTO jokes (joke_id, joke, author_id, created)
            VALUES ($1, $2, $3, $4)
            RETURNING joke_id, joke, author_id, created
            "#,
        )
        .bind(joke.id)
        .bind(&joke.joke)
        .bind(joke.author_id)
        .bind(joke.created)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Author removed after the identity check
            if is_foreign_key_violation(&e) {
                DomainError::UserNotFound(joke.author_id)
            } else {
                database_error("creating joke", e)
            }
        })?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Joke>, DomainError> {
        let row: Option<JokeRow> = sqlx::query_as(
            r#"SELECT joke_id, joke, author_id, created FROM jokes WHERE joke_id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("finding joke by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("starting joke delete", e))?;

        sqlx::query(r#"DELETE FROM likes WHERE joke_id = $1"#)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| database_error("deleting likes of joke", e))?;

        let result = sqlx::query(r#"DELETE FROM jokes WHERE joke_id = $1"#)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| database_error("deleting joke", e))?;

        tx.commit()
            .await
            .map_err(|e| database_error("committing joke delete", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_for_viewer(&self, viewer_id: &Uuid) -> Result<Vec<JokeView>, DomainError> {
        let rows: Vec<JokeViewRow> = sqlx::query_as(LIST_FOR_VIEWER_SQL)
            .bind(viewer_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| database_error("listing jokes", e))?;

        debug!("Fetched {} joke rows for viewer {}", rows.len(), viewer_id);
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
