//! Repository for the `users` table.

use sqlx::PgPool;
use studio_core::account::{DEMO_EMAIL, DEMO_NAME, DEMO_USER_ID};
use studio_core::types::DbId;

use crate::models::user::{CreateUser, User};

const COLUMNS: &str = "id, name, email, password_hash, subscription, created_at, updated_at";

/// Provides account lookups and registration.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// A duplicate email fails with a unique violation on `uq_users_email`.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Ensure the demo account row exists and return it.
    ///
    /// Keyed on the email: a row already holding the demo address is
    /// returned as-is, whatever its id. New rows get [`DEMO_USER_ID`] and a
    /// placeholder hash that never verifies; the demo login is matched on
    /// credentials before any hash check.
    pub async fn upsert_demo(pool: &PgPool) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, name, email, password_hash)
             VALUES ($1, $2, $3, '!')
             ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(DEMO_USER_ID)
            .bind(DEMO_NAME)
            .bind(DEMO_EMAIL)
            .fetch_one(pool)
            .await
    }
}
