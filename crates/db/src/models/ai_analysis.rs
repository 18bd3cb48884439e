//! AI analysis entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use studio_core::analysis::{AnalysisSample, AnalysisType};
use studio_core::types::{DbId, Timestamp};

/// A row from the `ai_analyses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AiAnalysis {
    pub id: DbId,
    pub project_id: DbId,
    /// Not a foreign key; may point at a track that has since been deleted.
    pub track_id: Option<DbId>,
    #[sqlx(try_from = "String")]
    pub analysis_type: AnalysisType,
    pub input_data: serde_json::Value,
    pub result: serde_json::Value,
    pub confidence_score: Option<f64>,
    pub processing_time_ms: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The columns the statistics endpoint aggregates over.
#[derive(Debug, Clone, FromRow)]
pub struct AnalysisStatRow {
    #[sqlx(try_from = "String")]
    pub analysis_type: AnalysisType,
    pub confidence_score: Option<f64>,
    pub processing_time_ms: Option<i32>,
}

impl From<AnalysisStatRow> for AnalysisSample {
    fn from(row: AnalysisStatRow) -> Self {
        AnalysisSample {
            analysis_type: row.analysis_type,
            confidence_score: row.confidence_score,
            processing_time_ms: row.processing_time_ms,
        }
    }
}

/// DTO for creating a new analysis record.
#[derive(Debug, Clone)]
pub struct CreateAiAnalysis {
    pub project_id: DbId,
    pub track_id: Option<DbId>,
    pub analysis_type: AnalysisType,
    pub input_data: serde_json::Value,
    /// Defaults to `{}` when `None`.
    pub result: Option<serde_json::Value>,
    pub confidence_score: Option<f64>,
    pub processing_time_ms: Option<i32>,
}

/// DTO for updating an analysis record. All fields are optional.
///
/// The two nullable columns take `Some(None)` to clear them.
#[derive(Debug, Clone, Default)]
pub struct UpdateAiAnalysis {
    pub analysis_type: Option<AnalysisType>,
    pub input_data: Option<serde_json::Value>,
    pub result: Option<serde_json::Value>,
    pub confidence_score: Option<Option<f64>>,
    pub processing_time_ms: Option<Option<i32>>,
}
