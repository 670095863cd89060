// ============================================================================
// Jokes Infrastructure - PostgreSQL User Repository
// File: crates/jokes-infrastructure/src/database/postgres/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::{info, warn};
use uuid::Uuid;

use jokes_core::domain::User;
use jokes_core::error::DomainError;
use jokes_core::repositories::UserRepository;

use super::{database_error, is_unique_violation};

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct UserRow {
    pub user_id: Uuid,
    pub openid_sub: String,
    pub username: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.user_id,
            openid_sub: row.openid_sub,
            username: row.username,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> Result<User, DomainError> {
        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (user_id, openid_sub, username)
            VALUES ($1, $2, $3)
            RETURNING user_id, openid_sub, username
            "#,
        )
        .bind(user.id)
        .bind(&user.openid_sub)
        .bind(&user.username)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                warn!("Subject registered concurrently: {}", user.openid_sub);
                DomainError::SubjectAlreadyRegistered
            } else {
                database_error("creating user", e)
            }
        })?;

        info!("User created: {}", row.user_id);
        Ok(row.into())
    }

    async fn find_ids_by_subject(&self, openid_sub: &str) -> Result<Vec<Uuid>, DomainError> {
        sqlx::query_scalar::<_, Uuid>(r#"SELECT user_id FROM users WHERE openid_sub = $1"#)
            .bind(openid_sub)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| database_error("finding user by subject", e))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("starting user delete", e))?;

        // Likes given by the user, then likes received on their jokes
        sqlx::query(r#"DELETE FROM likes WHERE user_id = $1"#)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| database_error("deleting likes of user", e))?;

        sqlx::query(
            r#"DELETE FROM likes WHERE joke_id IN (SELECT joke_id FROM jokes WHERE author_id = $1)"#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| database_error("deleting likes on user's jokes", e))?;

        sqlx::query(r#"DELETE FROM jokes WHERE author_id = $1"#)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| database_error("deleting jokes of user", e))?;

        let result = sqlx::query(r#"DELETE FROM users WHERE user_id = $1"#)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| database_error("deleting user", e))?;

        tx.commit()
            .await
            .map_err(|e| database_error("committing user delete", e))?;

        Ok(result.rows_affected() > 0)
    }
}
