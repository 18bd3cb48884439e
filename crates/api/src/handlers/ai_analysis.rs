//! Handlers for the `/ai-analyses` resource.
//!
//! Analysis records are stored as submitted; nothing here runs a model.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use studio_core::analysis::{
    summarize, validate_confidence, validate_processing_time, AnalysisStats, AnalysisType,
};
use studio_core::types::DbId;
use studio_db::models::ai_analysis::{AiAnalysis, CreateAiAnalysis, UpdateAiAnalysis};
use studio_db::repositories::{AiAnalysisRepo, TrackRepo};

use crate::access::{load_owned_analysis, load_owned_project, ANALYSIS};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::handlers::{blank_as_none, explicit_null};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /ai-analyses`.
#[derive(Debug, Deserialize)]
pub struct AnalysisListQuery {
    pub project_id: Option<DbId>,
    /// `track_id=` (empty) means no filter.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub track_id: Option<DbId>,
}

/// Request body for `POST /ai-analyses`.
#[derive(Debug, Deserialize)]
pub struct CreateAnalysisRequest {
    pub project_id: Option<DbId>,
    /// `""` is treated as no track.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub track_id: Option<DbId>,
    pub analysis_type: Option<String>,
    pub input_data: Option<serde_json::Value>,
    pub result_data: Option<serde_json::Value>,
    pub confidence_score: Option<f64>,
    pub processing_time_ms: Option<i32>,
}

/// Request body for `PUT /ai-analyses/{id}`. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateAnalysisRequest {
    pub analysis_type: Option<String>,
    pub input_data: Option<serde_json::Value>,
    pub result_data: Option<serde_json::Value>,
    /// `null` clears the score.
    #[serde(default, deserialize_with = "explicit_null")]
    pub confidence_score: Option<Option<f64>>,
    /// `null` clears the timing.
    #[serde(default, deserialize_with = "explicit_null")]
    pub processing_time_ms: Option<Option<i32>>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisPayload {
    pub analysis: AiAnalysis,
}

#[derive(Debug, Serialize)]
pub struct AnalysisListPayload {
    pub analyses: Vec<AiAnalysis>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/ai-analyses?project_id=&track_id=
pub async fn list_by_project(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(query): AppQuery<AnalysisListQuery>,
) -> AppResult<Json<ApiResponse<AnalysisListPayload>>> {
    let project_id = query
        .project_id
        .ok_or_else(|| AppError::BadRequest("Project ID is required".into()))?;
    load_owned_project(&state.pool, auth.user_id, project_id).await?;

    let analyses = AiAnalysisRepo::list_by_project(&state.pool, project_id, query.track_id).await?;
    Ok(Json(ApiResponse::data(AnalysisListPayload { analyses })))
}

/// GET /api/ai-analyses/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<AnalysisPayload>>> {
    let analysis = load_owned_analysis(&state.pool, auth.user_id, id).await?;
    Ok(Json(ApiResponse::data(AnalysisPayload { analysis })))
}

/// POST /api/ai-analyses
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreateAnalysisRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AnalysisPayload>>)> {
    let analysis_type = input.analysis_type.as_deref().filter(|t| !t.is_empty());
    let (Some(project_id), Some(analysis_type), Some(input_data)) =
        (input.project_id, analysis_type, input.input_data)
    else {
        return Err(AppError::BadRequest(
            "Project ID, analysis type, and input data are required".into(),
        ));
    };
    let analysis_type = AnalysisType::parse(analysis_type)?;
    validate_scores(input.confidence_score, input.processing_time_ms)?;

    load_owned_project(&state.pool, auth.user_id, project_id).await?;

    if let Some(track_id) = input.track_id {
        let in_project = TrackRepo::find_by_id(&state.pool, track_id)
            .await?
            .is_some_and(|t| t.project_id == project_id);
        if !in_project {
            return Err(AppError::NotFound(
                "Track not found in the specified project".into(),
            ));
        }
    }

    let analysis = AiAnalysisRepo::create(
        &state.pool,
        &CreateAiAnalysis {
            project_id,
            track_id: input.track_id,
            analysis_type,
            input_data,
            result: input.result_data,
            confidence_score: input.confidence_score,
            processing_time_ms: input.processing_time_ms,
        },
    )
    .await?;

    tracing::info!(
        user_id = %auth.user_id,
        project_id = %project_id,
        analysis_id = %analysis.id,
        analysis_type = %analysis.analysis_type,
        "AI analysis created"
    );

    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::data(AnalysisPayload { analysis })
                .with_message("AI analysis created successfully"),
        ),
    ))
}

/// PUT /api/ai-analyses/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateAnalysisRequest>,
) -> AppResult<Json<ApiResponse<AnalysisPayload>>> {
    let analysis_type = input
        .analysis_type
        .as_deref()
        .map(AnalysisType::parse)
        .transpose()?;
    validate_scores(
        input.confidence_score.flatten(),
        input.processing_time_ms.flatten(),
    )?;

    load_owned_analysis(&state.pool, auth.user_id, id).await?;

    let changes = UpdateAiAnalysis {
        analysis_type,
        input_data: input.input_data,
        result: input.result_data,
        confidence_score: input.confidence_score,
        processing_time_ms: input.processing_time_ms,
    };
    let analysis = AiAnalysisRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or(AppError::not_found(ANALYSIS, id))?;

    tracing::info!(user_id = %auth.user_id, analysis_id = %id, "AI analysis updated");

    Ok(Json(
        ApiResponse::data(AnalysisPayload { analysis })
            .with_message("AI analysis updated successfully"),
    ))
}

/// DELETE /api/ai-analyses/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    load_owned_analysis(&state.pool, auth.user_id, id).await?;

    if !AiAnalysisRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found(ANALYSIS, id));
    }

    tracing::info!(user_id = %auth.user_id, analysis_id = %id, "AI analysis deleted");
    Ok(Json(ApiResponse::message("AI analysis deleted successfully")))
}

/// GET /api/ai-analyses/stats/{project_id}
pub async fn stats(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(project_id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<AnalysisStats>>> {
    load_owned_project(&state.pool, auth.user_id, project_id).await?;

    let rows = AiAnalysisRepo::stat_rows(&state.pool, project_id).await?;
    let stats = summarize(rows.into_iter().map(Into::into));
    Ok(Json(ApiResponse::data(stats)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_scores(confidence: Option<f64>, processing_time_ms: Option<i32>) -> AppResult<()> {
    if let Some(score) = confidence {
        validate_confidence(score)?;
    }
    if let Some(ms) = processing_time_ms {
        validate_processing_time(ms)?;
    }
    Ok(())
}
