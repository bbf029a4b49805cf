//! Users repository implementation
//!
//! Portal users are provisioned out of band; this repository only reads them,
//! apart from the seeding helper used by tests and local setups.

use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::DatabaseError;

/// Repository for the `users` table
#[derive(Debug, Clone)]
pub struct UsersRepository {
    pool: PgPool,
}

impl UsersRepository {
    /// Creates a new UsersRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds the user with `role` whose identifier or email equals `login`
    ///
    /// Identifier is checked first, then email.
    pub async fn find_by_login(
        &self,
        login: &str,
        role: UserRole,
    ) -> Result<Option<UserRow>, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, identifier, email, role
            FROM users
            WHERE role = $2 AND (identifier = $1 OR email = $1)
            ORDER BY (identifier = $1) DESC
            LIMIT 1
            "#,
        )
        .bind(login)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Retrieves a user by identifier
    pub async fn get_by_id(&self, user_id: Uuid) -> Result<Option<UserRow>, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT user_id, identifier, email, role FROM users WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Inserts or replaces a user
    pub async fn upsert(&self, user: &UserRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO users (user_id, identifier, email, role)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE SET
                identifier = EXCLUDED.identifier,
                email = EXCLUDED.email,
                role = EXCLUDED.role
            "#,
        )
        .bind(user.user_id)
        .bind(&user.identifier)
        .bind(&user.email)
        .bind(user.role)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Database row for the users table
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub user_id: Uuid,
    pub identifier: String,
    pub email: String,
    pub role: UserRole,
}

/// Role enum matching the database type
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
pub enum UserRole {
    Student,
    Faculty,
}
