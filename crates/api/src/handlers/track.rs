//! Handlers for the `/tracks` resource.
//!
//! Tracks are reached through their project: a track is visible only when
//! its project belongs to the caller.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use studio_core::automation::Automation;
use studio_core::effects::{into_signal_order, validate_chain, Effect};
use studio_core::midi::MidiData;
use studio_core::text::{optional_text, require_name};
use studio_core::track::{
    validate_color, validate_midi_allowed, validate_order_index, validate_pan, validate_volume,
    TrackKind,
};
use studio_core::types::DbId;
use studio_db::models::track::{CreateTrack, Track, UpdateTrack};
use studio_db::repositories::TrackRepo;

use crate::access::{load_owned_project, load_owned_track, TRACK};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::handlers::explicit_null;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /tracks`.
#[derive(Debug, Deserialize)]
pub struct TrackListQuery {
    pub project_id: Option<DbId>,
}

/// Request body for `POST /tracks`.
#[derive(Debug, Deserialize)]
pub struct CreateTrackRequest {
    pub project_id: Option<DbId>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub instrument: Option<String>,
    pub volume: Option<f64>,
    pub pan: Option<f64>,
    pub muted: Option<bool>,
    pub solo: Option<bool>,
    pub color: Option<String>,
    pub order_index: Option<i32>,
    pub audio_file_url: Option<String>,
    pub midi_data: Option<MidiData>,
    pub effects: Option<Vec<Effect>>,
    pub automation: Option<Automation>,
}

/// Request body for `PUT /tracks/{id}`. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateTrackRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// `""` clears the instrument.
    pub instrument: Option<String>,
    pub volume: Option<f64>,
    pub pan: Option<f64>,
    pub muted: Option<bool>,
    pub solo: Option<bool>,
    pub color: Option<String>,
    pub order_index: Option<i32>,
    /// `""` clears the audio file.
    pub audio_file_url: Option<String>,
    /// Absent leaves MIDI untouched; `null` clears it.
    #[serde(default, deserialize_with = "explicit_null")]
    pub midi_data: Option<Option<MidiData>>,
    pub effects: Option<Vec<Effect>>,
    pub automation: Option<Automation>,
}

#[derive(Debug, Serialize)]
pub struct TrackPayload {
    pub track: Track,
}

#[derive(Debug, Serialize)]
pub struct TrackListPayload {
    pub tracks: Vec<Track>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/tracks?project_id=
pub async fn list_by_project(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(query): AppQuery<TrackListQuery>,
) -> AppResult<Json<ApiResponse<TrackListPayload>>> {
    let project_id = query
        .project_id
        .ok_or_else(|| AppError::BadRequest("Project ID is required".into()))?;
    load_owned_project(&state.pool, auth.user_id, project_id).await?;

    let tracks = TrackRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(ApiResponse::data(TrackListPayload { tracks })))
}

/// GET /api/tracks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<TrackPayload>>> {
    let (track, _) = load_owned_track(&state.pool, auth.user_id, id).await?;
    Ok(Json(ApiResponse::data(TrackPayload { track })))
}

/// POST /api/tracks
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreateTrackRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<TrackPayload>>)> {
    let name = input.name.as_deref().map(str::trim).filter(|n| !n.is_empty());
    let kind = input.kind.as_deref().filter(|k| !k.is_empty());
    let (Some(project_id), Some(name), Some(kind)) = (input.project_id, name, kind) else {
        return Err(AppError::BadRequest(
            "Project ID, name, and type are required".into(),
        ));
    };
    let name = require_name(name, "Track name cannot be empty")?;
    let kind = TrackKind::parse(kind)?;

    validate_mixer(input.volume, input.pan, input.color.as_deref(), input.order_index)?;
    let effects = input.effects.unwrap_or_default();
    let automation = input.automation.unwrap_or_default();
    validate_payloads(
        input.midi_data.as_ref(),
        Some(effects.as_slice()),
        Some(&automation),
    )?;
    validate_midi_allowed(kind, input.midi_data.is_some())?;

    load_owned_project(&state.pool, auth.user_id, project_id).await?;

    let track = TrackRepo::create(
        &state.pool,
        &CreateTrack {
            project_id,
            name,
            kind,
            instrument: optional_text(input.instrument.as_deref()),
            volume: input.volume,
            pan: input.pan,
            muted: input.muted,
            solo: input.solo,
            color: input.color,
            order_index: input.order_index,
            audio_file_url: optional_text(input.audio_file_url.as_deref()),
            midi_data: input.midi_data,
            effects: into_signal_order(effects),
            automation,
        },
    )
    .await?;

    tracing::info!(
        user_id = %auth.user_id,
        project_id = %project_id,
        track_id = %track.id,
        order_index = track.order_index,
        "Track created"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(TrackPayload { track }).with_message("Track created successfully")),
    ))
}

/// PUT /api/tracks/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateTrackRequest>,
) -> AppResult<Json<ApiResponse<TrackPayload>>> {
    let name = input
        .name
        .as_deref()
        .map(|n| require_name(n, "Track name cannot be empty"))
        .transpose()?;
    let kind = input.kind.as_deref().map(TrackKind::parse).transpose()?;

    validate_mixer(input.volume, input.pan, input.color.as_deref(), input.order_index)?;
    validate_payloads(
        input.midi_data.as_ref().and_then(Option::as_ref),
        input.effects.as_deref(),
        input.automation.as_ref(),
    )?;

    let (existing, _) = load_owned_track(&state.pool, auth.user_id, id).await?;

    // The type/MIDI rule applies to the track as it will be after the update.
    let effective_kind = kind.unwrap_or(existing.kind);
    let will_have_midi = match &input.midi_data {
        Some(new_midi) => new_midi.is_some(),
        None => existing.midi_data.is_some(),
    };
    validate_midi_allowed(effective_kind, will_have_midi)?;

    let changes = UpdateTrack {
        name,
        kind,
        instrument: input.instrument.map(|i| i.trim().to_string()),
        volume: input.volume,
        pan: input.pan,
        muted: input.muted,
        solo: input.solo,
        color: input.color,
        order_index: input.order_index,
        audio_file_url: input.audio_file_url.map(|u| u.trim().to_string()),
        midi_data: input.midi_data,
        effects: input.effects.map(into_signal_order),
        automation: input.automation,
    };
    let track = TrackRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or(AppError::not_found(TRACK, id))?;

    tracing::info!(user_id = %auth.user_id, track_id = %id, "Track updated");

    Ok(Json(
        ApiResponse::data(TrackPayload { track }).with_message("Track updated successfully"),
    ))
}

/// DELETE /api/tracks/{id}
///
/// Analyses that referenced the track are kept.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    load_owned_track(&state.pool, auth.user_id, id).await?;

    if !TrackRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found(TRACK, id));
    }

    tracing::info!(user_id = %auth.user_id, track_id = %id, "Track deleted");
    Ok(Json(ApiResponse::message("Track deleted successfully")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_mixer(
    volume: Option<f64>,
    pan: Option<f64>,
    color: Option<&str>,
    order_index: Option<i32>,
) -> AppResult<()> {
    if let Some(volume) = volume {
        validate_volume(volume)?;
    }
    if let Some(pan) = pan {
        validate_pan(pan)?;
    }
    if let Some(color) = color {
        validate_color(color)?;
    }
    if let Some(order_index) = order_index {
        validate_order_index(order_index)?;
    }
    Ok(())
}

fn validate_payloads(
    midi: Option<&MidiData>,
    effects: Option<&[Effect]>,
    automation: Option<&Automation>,
) -> AppResult<()> {
    if let Some(midi) = midi {
        midi.validate()?;
    }
    if let Some(effects) = effects {
        validate_chain(effects)?;
    }
    if let Some(automation) = automation {
        automation.validate()?;
    }
    Ok(())
}
