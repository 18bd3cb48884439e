//! Repository for the `projects` table.

use sqlx::PgPool;
use studio_core::types::DbId;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, description, bpm, key_signature, time_signature, \
                       status, duration, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// `None` fields fall back to the column defaults (120 BPM, `C`, `4/4`,
    /// draft, zero duration).
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (user_id, name, description, bpm, key_signature, time_signature, status, duration)
             VALUES ($1, $2, $3, COALESCE($4, 120), COALESCE($5, 'C'), COALESCE($6, '4/4'),
                     COALESCE($7, 'draft'), COALESCE($8::float8, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.bpm)
            .bind(&input.key_signature)
            .bind(&input.time_signature)
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.duration)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's projects, most recently updated first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE user_id = $1 ORDER BY updated_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = CASE WHEN $3::text IS NULL THEN description ELSE NULLIF($3, '') END,
                bpm = COALESCE($4, bpm),
                key_signature = COALESCE($5, key_signature),
                time_signature = COALESCE($6, time_signature),
                status = COALESCE($7, status),
                duration = COALESCE($8, duration)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.bpm)
            .bind(&input.key_signature)
            .bind(&input.time_signature)
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.duration)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project and, via cascade, its tracks and analyses.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
