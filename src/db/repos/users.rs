//! User repository
//!
//! Single-row lookups and insertion. Unlike the list repositories,
//! failures here propagate to the caller unmasked.

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::models::NewUser;

/// User record from the store.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look a user up by email.
    ///
    /// Blank or absent input binds SQL NULL, which matches no row, rather
    /// than being rejected up front.
    pub async fn find_by_email(&self, email: Option<&str>) -> Result<Option<User>, DbError> {
        let user: Option<User> = sqlx::query_as(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(normalize_email(email))
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Look a user up by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, DbError> {
        let user: Option<User> = sqlx::query_as(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Insert a new user and return the stored row.
    pub async fn create(&self, new_user: NewUser) -> Result<User, DbError> {
        let user: User = sqlx::query_as(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password
            "#,
        )
        .bind(new_user.name)
        .bind(new_user.email)
        .bind(new_user.password)
        .fetch_one(self.pool)
        .await?;

        Ok(user)
    }
}

/// Collapse blank input to None so it binds as SQL NULL.
fn normalize_email(email: Option<&str>) -> Option<&str> {
    email.filter(|e| !e.is_empty())
}
