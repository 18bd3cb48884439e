//! Repository for the `ai_analyses` table.

use sqlx::PgPool;
use studio_core::types::DbId;

use crate::models::ai_analysis::{
    AiAnalysis, AnalysisStatRow, CreateAiAnalysis, UpdateAiAnalysis,
};

const COLUMNS: &str = "id, project_id, track_id, analysis_type, input_data, result, \
                       confidence_score, processing_time_ms, created_at, updated_at";

/// Provides CRUD operations and aggregate inputs for analysis records.
pub struct AiAnalysisRepo;

impl AiAnalysisRepo {
    /// Insert a new analysis record, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAiAnalysis,
    ) -> Result<AiAnalysis, sqlx::Error> {
        let query = format!(
            "INSERT INTO ai_analyses
                (project_id, track_id, analysis_type, input_data, result,
                 confidence_score, processing_time_ms)
             VALUES ($1, $2, $3, $4, COALESCE($5, '{{}}'::jsonb), $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AiAnalysis>(&query)
            .bind(input.project_id)
            .bind(input.track_id)
            .bind(input.analysis_type.as_str())
            .bind(&input.input_data)
            .bind(&input.result)
            .bind(input.confidence_score)
            .bind(input.processing_time_ms)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AiAnalysis>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ai_analyses WHERE id = $1");
        sqlx::query_as::<_, AiAnalysis>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's analyses newest first, optionally for one track only.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
        track_id: Option<DbId>,
    ) -> Result<Vec<AiAnalysis>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ai_analyses
             WHERE project_id = $1 AND ($2::uuid IS NULL OR track_id = $2)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, AiAnalysis>(&query)
            .bind(project_id)
            .bind(track_id)
            .fetch_all(pool)
            .await
    }

    /// The per-row inputs to the project statistics.
    pub async fn stat_rows(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<AnalysisStatRow>, sqlx::Error> {
        sqlx::query_as::<_, AnalysisStatRow>(
            "SELECT analysis_type, confidence_score, processing_time_ms
             FROM ai_analyses WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Update an analysis. Only non-`None` fields in `input` are applied;
    /// `Some(None)` clears the confidence score or processing time.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAiAnalysis,
    ) -> Result<Option<AiAnalysis>, sqlx::Error> {
        let query = format!(
            "UPDATE ai_analyses SET
                analysis_type = COALESCE($2, analysis_type),
                input_data = COALESCE($3, input_data),
                result = COALESCE($4, result),
                confidence_score = CASE WHEN $5::boolean THEN $6::float8
                                        ELSE confidence_score END,
                processing_time_ms = CASE WHEN $7::boolean THEN $8::integer
                                          ELSE processing_time_ms END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AiAnalysis>(&query)
            .bind(id)
            .bind(input.analysis_type.map(|t| t.as_str()))
            .bind(&input.input_data)
            .bind(&input.result)
            .bind(input.confidence_score.is_some())
            .bind(input.confidence_score.flatten())
            .bind(input.processing_time_ms.is_some())
            .bind(input.processing_time_ms.flatten())
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ai_analyses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
