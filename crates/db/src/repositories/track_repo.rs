//! Repository for the `tracks` table.

use sqlx::types::Json;
use sqlx::PgPool;
use studio_core::track::next_order_index;
use studio_core::types::DbId;

use crate::models::track::{CreateTrack, Track, UpdateTrack};

const COLUMNS: &str = "id, project_id, name, type, instrument, volume, pan, muted, solo, color, \
                       order_index, audio_file_url, midi_data, effects, automation, \
                       created_at, updated_at";

/// Provides CRUD operations for tracks.
pub struct TrackRepo;

impl TrackRepo {
    /// Insert a new track, returning the created row.
    ///
    /// Without an explicit `order_index` the track goes one past the current
    /// maximum in its project (0 for the first track). Concurrent inserts may
    /// share an index; ordering is advisory.
    pub async fn create(pool: &PgPool, input: &CreateTrack) -> Result<Track, sqlx::Error> {
        let order_index = match input.order_index {
            Some(index) => index,
            None => next_order_index(Self::max_order_index(pool, input.project_id).await?),
        };

        let query = format!(
            "INSERT INTO tracks
                (project_id, name, type, instrument, volume, pan, muted, solo, color,
                 order_index, audio_file_url, midi_data, effects, automation)
             VALUES ($1, $2, $3, $4, COALESCE($5::float8, 1.0), COALESCE($6::float8, 0.0),
                     COALESCE($7, FALSE), COALESCE($8, FALSE), COALESCE($9, '#3B82F6'),
                     $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(input.project_id)
            .bind(&input.name)
            .bind(input.kind.as_str())
            .bind(&input.instrument)
            .bind(input.volume)
            .bind(input.pan)
            .bind(input.muted)
            .bind(input.solo)
            .bind(&input.color)
            .bind(order_index)
            .bind(&input.audio_file_url)
            .bind(input.midi_data.as_ref().map(Json))
            .bind(Json(&input.effects))
            .bind(Json(&input.automation))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Track>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tracks WHERE id = $1");
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's tracks in display order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Track>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tracks
             WHERE project_id = $1
             ORDER BY order_index ASC, created_at ASC"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Highest `order_index` in a project, `None` when it has no tracks.
    pub async fn max_order_index(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<i32>, sqlx::Error> {
        let row: (Option<i32>,) =
            sqlx::query_as("SELECT MAX(order_index) FROM tracks WHERE project_id = $1")
                .bind(project_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// Update a track. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTrack,
    ) -> Result<Option<Track>, sqlx::Error> {
        let query = format!(
            "UPDATE tracks SET
                name = COALESCE($2, name),
                type = COALESCE($3, type),
                instrument = CASE WHEN $4::text IS NULL THEN instrument ELSE NULLIF($4, '') END,
                volume = COALESCE($5, volume),
                pan = COALESCE($6, pan),
                muted = COALESCE($7, muted),
                solo = COALESCE($8, solo),
                color = COALESCE($9, color),
                order_index = COALESCE($10, order_index),
                audio_file_url = CASE WHEN $11::text IS NULL THEN audio_file_url
                                      ELSE NULLIF($11, '') END,
                midi_data = CASE WHEN $12::boolean THEN $13::jsonb ELSE midi_data END,
                effects = COALESCE($14, effects),
                automation = COALESCE($15, automation)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let midi = input.midi_data.as_ref();
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.kind.map(|k| k.as_str()))
            .bind(&input.instrument)
            .bind(input.volume)
            .bind(input.pan)
            .bind(input.muted)
            .bind(input.solo)
            .bind(&input.color)
            .bind(input.order_index)
            .bind(&input.audio_file_url)
            .bind(midi.is_some())
            .bind(midi.and_then(Option::as_ref).map(Json))
            .bind(input.effects.as_ref().map(Json))
            .bind(input.automation.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Delete a track. Analyses referencing it are left in place.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tracks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
