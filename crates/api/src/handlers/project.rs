//! Handlers for the `/projects` resource.
//!
//! Every handler is scoped to the authenticated user; projects owned by
//! someone else are reported as not found.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use studio_core::project::{validate_bpm, validate_duration, ProjectStatus};
use studio_core::text::{optional_text, require_name};
use studio_core::types::DbId;
use studio_db::models::project::{CreateProject, Project, UpdateProject};
use studio_db::repositories::ProjectRepo;

use crate::access::{load_owned_project, PROJECT};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::handlers::present;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /projects`.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub bpm: Option<i32>,
    pub key_signature: Option<String>,
    pub time_signature: Option<String>,
    pub status: Option<String>,
    pub duration: Option<f64>,
}

/// Request body for `PUT /projects/{id}`. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    /// `""` clears the description.
    pub description: Option<String>,
    pub bpm: Option<i32>,
    pub key_signature: Option<String>,
    pub time_signature: Option<String>,
    pub status: Option<String>,
    pub duration: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ProjectPayload {
    pub project: Project,
}

#[derive(Debug, Serialize)]
pub struct ProjectListPayload {
    pub projects: Vec<Project>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/projects
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ApiResponse<ProjectListPayload>>> {
    let projects = ProjectRepo::list_by_user(&state.pool, auth.user_id).await?;
    Ok(Json(ApiResponse::data(ProjectListPayload { projects })))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<ProjectPayload>>> {
    let project = load_owned_project(&state.pool, auth.user_id, id).await?;
    Ok(Json(ApiResponse::data(ProjectPayload { project })))
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProjectPayload>>)> {
    let name = require_name(
        input.name.as_deref().unwrap_or_default(),
        "Project name is required",
    )?;
    if let Some(bpm) = input.bpm {
        validate_bpm(bpm)?;
    }
    if let Some(duration) = input.duration {
        validate_duration(duration)?;
    }
    let status = input
        .status
        .as_deref()
        .map(ProjectStatus::parse)
        .transpose()?;

    let project = ProjectRepo::create(
        &state.pool,
        &CreateProject {
            user_id: auth.user_id,
            name,
            description: optional_text(input.description.as_deref()),
            bpm: input.bpm,
            key_signature: present(input.key_signature),
            time_signature: present(input.time_signature),
            status,
            duration: input.duration,
        },
    )
    .await?;

    tracing::info!(user_id = %auth.user_id, project_id = %project.id, "Project created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(ProjectPayload { project }).with_message("Project created successfully")),
    ))
}

/// PUT /api/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateProjectRequest>,
) -> AppResult<Json<ApiResponse<ProjectPayload>>> {
    let name = input
        .name
        .as_deref()
        .map(|n| require_name(n, "Project name cannot be empty"))
        .transpose()?;
    if let Some(bpm) = input.bpm {
        validate_bpm(bpm)?;
    }
    if let Some(duration) = input.duration {
        validate_duration(duration)?;
    }
    let status = input
        .status
        .as_deref()
        .map(ProjectStatus::parse)
        .transpose()?;

    load_owned_project(&state.pool, auth.user_id, id).await?;

    let changes = UpdateProject {
        name,
        description: input.description.map(|d| d.trim().to_string()),
        bpm: input.bpm,
        key_signature: present(input.key_signature),
        time_signature: present(input.time_signature),
        status,
        duration: input.duration,
    };
    let project = ProjectRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or(AppError::not_found(PROJECT, id))?;

    tracing::info!(user_id = %auth.user_id, project_id = %id, "Project updated");

    Ok(Json(
        ApiResponse::data(ProjectPayload { project }).with_message("Project updated successfully"),
    ))
}

/// DELETE /api/projects/{id}
///
/// Tracks and analyses of the project are removed with it.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    load_owned_project(&state.pool, auth.user_id, id).await?;

    if !ProjectRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found(PROJECT, id));
    }

    tracing::info!(user_id = %auth.user_id, project_id = %id, "Project deleted");
    Ok(Json(ApiResponse::message("Project deleted successfully")))
}
