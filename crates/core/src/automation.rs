//! Per-track automation lanes.
//!
//! Serialized as a plain object keyed by the automated parameter, so an
//! empty automation is `{}`:
//!
//! ```json
//! { "volume": { "points": [ { "time": 0.0, "value": 1.0 }, { "time": 8.0, "value": 0.4 } ] } }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::track::{MAX_PAN, MAX_VOLUME, MIN_PAN, MIN_VOLUME};

/// A breakpoint: `value` is reached at `time` (in beats).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutomationPoint {
    pub time: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutomationLane {
    #[serde(default)]
    pub points: Vec<AutomationPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Automation {
    pub lanes: BTreeMap<String, AutomationLane>,
}

impl Automation {
    /// Lanes must be named, times non-negative and non-decreasing, and the
    /// built-in `volume` / `pan` targets stay inside the mixer ranges.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (target, lane) in &self.lanes {
            if target.trim().is_empty() {
                return Err(CoreError::validation(
                    "Automation lane name must not be empty",
                ));
            }
            let bounds = match target.as_str() {
                "volume" => Some((MIN_VOLUME, MAX_VOLUME)),
                "pan" => Some((MIN_PAN, MAX_PAN)),
                _ => None,
            };

            let mut previous = 0.0_f64;
            for point in &lane.points {
                if !point.time.is_finite() || point.time < 0.0 {
                    return Err(CoreError::Validation(format!(
                        "Automation '{target}': point time must be non-negative"
                    )));
                }
                if point.time < previous {
                    return Err(CoreError::Validation(format!(
                        "Automation '{target}': points must be in time order"
                    )));
                }
                previous = point.time;

                if !point.value.is_finite() {
                    return Err(CoreError::Validation(format!(
                        "Automation '{target}': point value must be a finite number"
                    )));
                }
                if let Some((min, max)) = bounds {
                    if point.value < min || point.value > max {
                        return Err(CoreError::Validation(format!(
                            "Automation '{target}': value must be between {min} and {max}"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}
