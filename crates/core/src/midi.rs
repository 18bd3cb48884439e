//! Piano-roll note data stored on MIDI-capable tracks.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const MAX_NOTE: u8 = 127;
pub const MAX_VELOCITY: u8 = 127;
pub const MAX_CHANNEL: u8 = 15;

/// A single note. Times are in beats relative to the clip start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MidiNote {
    pub id: String,
    /// MIDI note number, 60 = middle C.
    pub note: u8,
    pub velocity: u8,
    pub start_time: f64,
    pub duration: f64,
    #[serde(default)]
    pub channel: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MidiData {
    #[serde(default)]
    pub notes: Vec<MidiNote>,
}

impl MidiData {
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut ids = HashSet::with_capacity(self.notes.len());
        for n in &self.notes {
            if !ids.insert(n.id.as_str()) {
                return Err(CoreError::Validation(format!(
                    "Duplicate MIDI note id '{}'",
                    n.id
                )));
            }
            if n.note > MAX_NOTE {
                return Err(CoreError::Validation(format!(
                    "MIDI note '{}': note must be between 0 and {MAX_NOTE}",
                    n.id
                )));
            }
            if n.velocity > MAX_VELOCITY {
                return Err(CoreError::Validation(format!(
                    "MIDI note '{}': velocity must be between 0 and {MAX_VELOCITY}",
                    n.id
                )));
            }
            if n.channel > MAX_CHANNEL {
                return Err(CoreError::Validation(format!(
                    "MIDI note '{}': channel must be between 0 and {MAX_CHANNEL}",
                    n.id
                )));
            }
            if !n.start_time.is_finite() || n.start_time < 0.0 {
                return Err(CoreError::Validation(format!(
                    "MIDI note '{}': start time must be non-negative",
                    n.id
                )));
            }
            if !n.duration.is_finite() || n.duration <= 0.0 {
                return Err(CoreError::Validation(format!(
                    "MIDI note '{}': duration must be positive",
                    n.id
                )));
            }
        }
        Ok(())
    }
}
