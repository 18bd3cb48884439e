//! Project constants, status enum, and field validators.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
   Defaults and limits
   -------------------------------------------------------------------------- */

/// Lowest accepted tempo.
pub const MIN_BPM: i32 = 60;

/// Highest accepted tempo.
pub const MAX_BPM: i32 = 300;

/// Tempo assigned when the caller does not supply one.
pub const DEFAULT_BPM: i32 = 120;

/// Key signature assigned when the caller does not supply one.
pub const DEFAULT_KEY_SIGNATURE: &str = "C";

/// Time signature assigned when the caller does not supply one.
pub const DEFAULT_TIME_SIGNATURE: &str = "4/4";

define_text_enum! {
    /// Project lifecycle status.
    ProjectStatus ("project status") {
        Draft = "draft",
        InProgress = "in_progress",
        Completed = "completed",
        Archived = "archived",
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Draft
    }
}

/* --------------------------------------------------------------------------
   Validation functions
   -------------------------------------------------------------------------- */

/// Validate that a tempo lies within [`MIN_BPM`, `MAX_BPM`].
pub fn validate_bpm(bpm: i32) -> Result<(), CoreError> {
    if !(MIN_BPM..=MAX_BPM).contains(&bpm) {
        return Err(CoreError::Validation(format!(
            "BPM must be between {MIN_BPM} and {MAX_BPM}"
        )));
    }
    Ok(())
}

/// Validate a project duration in seconds.
pub fn validate_duration(duration: f64) -> Result<(), CoreError> {
    if !duration.is_finite() || duration < 0.0 {
        return Err(CoreError::validation("Duration must be non-negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn bpm_bounds_are_inclusive() {
        assert!(validate_bpm(MIN_BPM).is_ok());
        assert!(validate_bpm(MAX_BPM).is_ok());
        assert!(validate_bpm(250).is_ok());
    }

    #[test]
    fn bpm_out_of_range_is_rejected() {
        assert_matches!(
            validate_bpm(400),
            Err(CoreError::Validation(msg)) if msg == "BPM must be between 60 and 300"
        );
        assert!(validate_bpm(59).is_err());
    }

    #[test]
    fn status_round_trips_through_text() {
        for status in ProjectStatus::ALL {
            assert_eq!(ProjectStatus::parse(status.as_str()).unwrap(), *status);
        }
        assert_eq!(ProjectStatus::default(), ProjectStatus::Draft);
    }

    #[test]
    fn unknown_status_names_the_enum() {
        assert_matches!(
            ProjectStatus::parse("published"),
            Err(CoreError::Validation(msg)) if msg == "Invalid project status"
        );
    }

    #[test]
    fn negative_duration_rejected() {
        assert!(validate_duration(-1.0).is_err());
        assert!(validate_duration(0.0).is_ok());
        assert!(validate_duration(183.5).is_ok());
    }
}
