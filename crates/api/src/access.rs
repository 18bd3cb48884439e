//! Ownership-checked loaders.
//!
//! Every read or mutation of a project, track or analysis goes through one
//! of these first. A resource the caller does not own is reported exactly
//! like a missing one (404), so ids cannot be discovered across accounts.

use studio_core::ownership::ensure_owned;
use studio_core::types::DbId;
use studio_db::models::ai_analysis::AiAnalysis;
use studio_db::models::project::Project;
use studio_db::models::track::Track;
use studio_db::repositories::{AiAnalysisRepo, ProjectRepo, TrackRepo};
use studio_db::DbPool;

use crate::error::{AppError, AppResult};

pub const PROJECT: &str = "Project";
pub const TRACK: &str = "Track";
pub const ANALYSIS: &str = "AI analysis";

/// Load a project the caller owns.
pub async fn load_owned_project(
    pool: &DbPool,
    user_id: DbId,
    project_id: DbId,
) -> AppResult<Project> {
    let project = ProjectRepo::find_by_id(pool, project_id).await?;
    Ok(ensure_owned(project, user_id, PROJECT, project_id)?)
}

/// Load a track whose project the caller owns, together with that project.
pub async fn load_owned_track(
    pool: &DbPool,
    user_id: DbId,
    track_id: DbId,
) -> AppResult<(Track, Project)> {
    let track = TrackRepo::find_by_id(pool, track_id)
        .await?
        .ok_or(AppError::not_found(TRACK, track_id))?;
    let project = ProjectRepo::find_by_id(pool, track.project_id).await?;
    let project = ensure_owned(project, user_id, TRACK, track_id)?;
    Ok((track, project))
}

/// Load an analysis whose project the caller owns.
pub async fn load_owned_analysis(
    pool: &DbPool,
    user_id: DbId,
    analysis_id: DbId,
) -> AppResult<AiAnalysis> {
    let analysis = AiAnalysisRepo::find_by_id(pool, analysis_id)
        .await?
        .ok_or(AppError::not_found(ANALYSIS, analysis_id))?;
    let project = ProjectRepo::find_by_id(pool, analysis.project_id).await?;
    ensure_owned(project, user_id, ANALYSIS, analysis_id)?;
    Ok(analysis)
}
