//! Typed effect chains stored on tracks.
//!
//! Each effect carries a parameter set tagged by its `type`. Ranges mirror
//! the editor's slider limits so a chain saved by the client always
//! validates, and anything outside them is rejected before it reaches the
//! database.
//!
//! Wire shape:
//!
//! ```json
//! {
//!   "id": "reverb_1",
//!   "name": "Hall",
//!   "enabled": true,
//!   "order": 0,
//!   "params": { "type": "reverb", "roomSize": 0.3, "decay": 1.5, "wet": 0.3 }
//! }
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

define_text_enum! {
    /// Effect type discriminator, matching the `params.type` tag.
    EffectKind ("effect type") {
        Reverb = "reverb",
        Delay = "delay",
        Chorus = "chorus",
        Distortion = "distortion",
        Filter = "filter",
        Compressor = "compressor",
        Eq = "eq",
        Limiter = "limiter",
    }
}

impl EffectKind {
    /// Human-readable label shown in the effect picker.
    pub fn label(self) -> &'static str {
        match self {
            EffectKind::Reverb => "Reverb",
            EffectKind::Delay => "Delay",
            EffectKind::Chorus => "Chorus",
            EffectKind::Distortion => "Distortion",
            EffectKind::Filter => "Filter",
            EffectKind::Compressor => "Compressor",
            EffectKind::Eq => "EQ",
            EffectKind::Limiter => "Limiter",
        }
    }
}

/// Response curve of a [`EffectParams::Filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    Lowpass,
    Highpass,
    Bandpass,
    Notch,
}

/// Parameters for one effect, tagged by effect type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectParams {
    #[serde(rename_all = "camelCase")]
    Reverb { room_size: f64, decay: f64, wet: f64 },
    #[serde(rename_all = "camelCase")]
    Delay {
        delay_time: f64,
        feedback: f64,
        wet: f64,
    },
    /// `delay_time` is in milliseconds here, unlike [`EffectParams::Delay`].
    #[serde(rename_all = "camelCase")]
    Chorus {
        frequency: f64,
        delay_time: f64,
        depth: f64,
        wet: f64,
    },
    #[serde(rename_all = "camelCase")]
    Distortion {
        distortion: f64,
        oversample: u8,
        wet: f64,
    },
    #[serde(rename_all = "camelCase")]
    Filter {
        frequency: f64,
        #[serde(rename = "Q")]
        q: f64,
        gain: f64,
        filter_type: FilterType,
    },
    #[serde(rename_all = "camelCase")]
    Compressor {
        threshold: f64,
        ratio: f64,
        attack: f64,
        release: f64,
        knee: f64,
    },
    #[serde(rename_all = "camelCase")]
    Eq {
        low_gain: f64,
        mid_gain: f64,
        high_gain: f64,
        low_freq: f64,
        mid_freq: f64,
        high_freq: f64,
    },
    #[serde(rename_all = "camelCase")]
    Limiter { threshold: f64, look_ahead: f64 },
}

impl EffectParams {
    pub fn kind(&self) -> EffectKind {
        match self {
            EffectParams::Reverb { .. } => EffectKind::Reverb,
            EffectParams::Delay { .. } => EffectKind::Delay,
            EffectParams::Chorus { .. } => EffectKind::Chorus,
            EffectParams::Distortion { .. } => EffectKind::Distortion,
            EffectParams::Filter { .. } => EffectKind::Filter,
            EffectParams::Compressor { .. } => EffectKind::Compressor,
            EffectParams::Eq { .. } => EffectKind::Eq,
            EffectParams::Limiter { .. } => EffectKind::Limiter,
        }
    }

    /// Factory settings for a freshly inserted effect.
    pub fn defaults(kind: EffectKind) -> Self {
        match kind {
            EffectKind::Reverb => EffectParams::Reverb {
                room_size: 0.3,
                decay: 1.5,
                wet: 0.3,
            },
            EffectKind::Delay => EffectParams::Delay {
                delay_time: 0.25,
                feedback: 0.3,
                wet: 0.3,
            },
            EffectKind::Chorus => EffectParams::Chorus {
                frequency: 1.5,
                delay_time: 3.5,
                depth: 0.7,
                wet: 0.5,
            },
            EffectKind::Distortion => EffectParams::Distortion {
                distortion: 0.4,
                oversample: 1,
                wet: 1.0,
            },
            EffectKind::Filter => EffectParams::Filter {
                frequency: 1000.0,
                q: 1.0,
                gain: 0.0,
                filter_type: FilterType::Lowpass,
            },
            EffectKind::Compressor => EffectParams::Compressor {
                threshold: -24.0,
                ratio: 4.0,
                attack: 0.003,
                release: 0.1,
                knee: 30.0,
            },
            EffectKind::Eq => EffectParams::Eq {
                low_gain: 0.0,
                mid_gain: 0.0,
                high_gain: 0.0,
                low_freq: 200.0,
                mid_freq: 1000.0,
                high_freq: 5000.0,
            },
            EffectKind::Limiter => EffectParams::Limiter {
                threshold: -3.0,
                look_ahead: 0.005,
            },
        }
    }

    /// Check every parameter against its allowed range.
    pub fn validate(&self) -> Result<(), CoreError> {
        match *self {
            EffectParams::Reverb {
                room_size,
                decay,
                wet,
            } => {
                param("roomSize", room_size, 0.0, 1.0)?;
                param("decay", decay, 0.1, 10.0)?;
                param("wet", wet, 0.0, 1.0)
            }
            EffectParams::Delay {
                delay_time,
                feedback,
                wet,
            } => {
                param("delayTime", delay_time, 0.0, 1.0)?;
                param("feedback", feedback, 0.0, 0.95)?;
                param("wet", wet, 0.0, 1.0)
            }
            EffectParams::Chorus {
                frequency,
                delay_time,
                depth,
                wet,
            } => {
                param("frequency", frequency, 0.1, 10.0)?;
                param("delayTime", delay_time, 2.0, 20.0)?;
                param("depth", depth, 0.0, 1.0)?;
                param("wet", wet, 0.0, 1.0)
            }
            EffectParams::Distortion {
                distortion,
                oversample,
                wet,
            } => {
                param("distortion", distortion, 0.0, 1.0)?;
                param("oversample", f64::from(oversample), 0.0, 3.0)?;
                param("wet", wet, 0.0, 1.0)
            }
            EffectParams::Filter {
                frequency, q, gain, ..
            } => {
                param("frequency", frequency, 20.0, 20_000.0)?;
                param("Q", q, 0.1, 30.0)?;
                param("gain", gain, -40.0, 40.0)
            }
            EffectParams::Compressor {
                threshold,
                ratio,
                attack,
                release,
                knee,
            } => {
                param("threshold", threshold, -60.0, 0.0)?;
                param("ratio", ratio, 1.0, 20.0)?;
                param("attack", attack, 0.0, 1.0)?;
                param("release", release, 0.0, 1.0)?;
                param("knee", knee, 0.0, 40.0)
            }
            EffectParams::Eq {
                low_gain,
                mid_gain,
                high_gain,
                low_freq,
                mid_freq,
                high_freq,
            } => {
                param("lowGain", low_gain, -20.0, 20.0)?;
                param("midGain", mid_gain, -20.0, 20.0)?;
                param("highGain", high_gain, -20.0, 20.0)?;
                param("lowFreq", low_freq, 20.0, 500.0)?;
                param("midFreq", mid_freq, 200.0, 5000.0)?;
                param("highFreq", high_freq, 1000.0, 20_000.0)
            }
            EffectParams::Limiter {
                threshold,
                look_ahead,
            } => {
                param("threshold", threshold, -20.0, 0.0)?;
                param("lookAhead", look_ahead, 0.0, 0.1)
            }
        }
    }
}

fn param(name: &str, value: f64, min: f64, max: f64) -> Result<(), CoreError> {
    if !value.is_finite() || value < min || value > max {
        return Err(CoreError::Validation(format!(
            "{name} must be between {min} and {max}"
        )));
    }
    Ok(())
}

fn default_enabled() -> bool {
    true
}

/// One slot in a track's effect chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effect {
    /// Client-assigned id, unique within the chain.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Position in the signal path; lower runs first.
    #[serde(default)]
    pub order: i32,
    pub params: EffectParams,
}

impl Effect {
    /// A new, enabled effect with factory settings.
    pub fn with_defaults(id: impl Into<String>, kind: EffectKind) -> Self {
        Effect {
            id: id.into(),
            name: Some(kind.label().to_string()),
            enabled: true,
            order: 0,
            params: EffectParams::defaults(kind),
        }
    }
}

/// Validate a whole chain: non-empty unique ids and in-range parameters.
pub fn validate_chain(chain: &[Effect]) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(chain.len());
    for effect in chain {
        if effect.id.trim().is_empty() {
            return Err(CoreError::validation("Effect id must not be empty"));
        }
        if !seen.insert(effect.id.as_str()) {
            return Err(CoreError::Validation(format!(
                "Duplicate effect id '{}' in chain",
                effect.id
            )));
        }
        effect.params.validate().map_err(|e| match e {
            CoreError::Validation(msg) => {
                CoreError::Validation(format!("Effect '{}': {msg}", effect.id))
            }
            other => other,
        })?;
    }
    Ok(())
}

/// Sort a chain into signal-path order (stable on ties).
pub fn into_signal_order(mut chain: Vec<Effect>) -> Vec<Effect> {
    chain.sort_by_key(|e| e.order);
    chain
}
