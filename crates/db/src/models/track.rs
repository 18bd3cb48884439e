//! Track entity model and DTOs.
//!
//! The `effects`, `midi_data` and `automation` JSONB columns decode into the
//! typed payloads from `studio_core`.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use studio_core::automation::Automation;
use studio_core::effects::Effect;
use studio_core::midi::MidiData;
use studio_core::track::TrackKind;
use studio_core::types::{DbId, Timestamp};

/// A track row from the `tracks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Track {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    #[sqlx(rename = "type", try_from = "String")]
    #[serde(rename = "type")]
    pub kind: TrackKind,
    pub instrument: Option<String>,
    pub volume: f64,
    pub pan: f64,
    pub muted: bool,
    pub solo: bool,
    pub color: String,
    pub order_index: i32,
    pub audio_file_url: Option<String>,
    pub midi_data: Option<Json<MidiData>>,
    pub effects: Json<Vec<Effect>>,
    pub automation: Json<Automation>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new track.
///
/// `order_index: None` places the track after the current last track of the
/// project.
#[derive(Debug, Clone)]
pub struct CreateTrack {
    pub project_id: DbId,
    pub name: String,
    pub kind: TrackKind,
    pub instrument: Option<String>,
    pub volume: Option<f64>,
    pub pan: Option<f64>,
    pub muted: Option<bool>,
    pub solo: Option<bool>,
    pub color: Option<String>,
    pub order_index: Option<i32>,
    pub audio_file_url: Option<String>,
    pub midi_data: Option<MidiData>,
    pub effects: Vec<Effect>,
    pub automation: Automation,
}

/// DTO for updating an existing track. All fields are optional.
///
/// `instrument` and `audio_file_url` are cleared by `Some("")`;
/// `midi_data: Some(None)` clears the MIDI payload.
#[derive(Debug, Clone, Default)]
pub struct UpdateTrack {
    pub name: Option<String>,
    pub kind: Option<TrackKind>,
    pub instrument: Option<String>,
    pub volume: Option<f64>,
    pub pan: Option<f64>,
    pub muted: Option<bool>,
    pub solo: Option<bool>,
    pub color: Option<String>,
    pub order_index: Option<i32>,
    pub audio_file_url: Option<String>,
    pub midi_data: Option<Option<MidiData>>,
    pub effects: Option<Vec<Effect>>,
    pub automation: Option<Automation>,
}
