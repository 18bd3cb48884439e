//! Track kinds, mixer ranges, and ordering rules.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::text::check_range;

pub const MIN_VOLUME: f64 = 0.0;
pub const MAX_VOLUME: f64 = 2.0;
pub const DEFAULT_VOLUME: f64 = 1.0;

pub const MIN_PAN: f64 = -1.0;
pub const MAX_PAN: f64 = 1.0;
pub const DEFAULT_PAN: f64 = 0.0;

/// Colour assigned to new tracks when none is given.
pub const DEFAULT_COLOR: &str = "#3B82F6";

static COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").expect("valid regex"));

define_text_enum! {
    /// What a track holds. Drives which payloads it may carry.
    TrackKind ("track type") {
        Audio = "audio",
        Midi = "midi",
        Instrument = "instrument",
        Vocal = "vocal",
        Drums = "drums",
        Bass = "bass",
        Synth = "synth",
        Other = "other",
    }
}

impl TrackKind {
    /// Recorded-audio tracks have no note data; every other kind may.
    pub fn accepts_midi(self) -> bool {
        !matches!(self, TrackKind::Audio | TrackKind::Vocal)
    }
}

pub fn validate_volume(volume: f64) -> Result<(), CoreError> {
    check_range(
        volume,
        MIN_VOLUME,
        MAX_VOLUME,
        "Volume must be between 0 and 2",
    )
}

pub fn validate_pan(pan: f64) -> Result<(), CoreError> {
    check_range(pan, MIN_PAN, MAX_PAN, "Pan must be between -1 and 1")
}

/// Accepts `#RGB` and `#RRGGBB` hex colours.
pub fn validate_color(color: &str) -> Result<(), CoreError> {
    if !COLOR_RE.is_match(color) {
        return Err(CoreError::Validation(format!(
            "Invalid track color '{color}'. Expected a hex colour such as {DEFAULT_COLOR}"
        )));
    }
    Ok(())
}

pub fn validate_order_index(order_index: i32) -> Result<(), CoreError> {
    if order_index < 0 {
        return Err(CoreError::validation("Order index must be non-negative"));
    }
    Ok(())
}

/// Order index for a track appended to a project whose highest index is
/// `current_max` (`None` for an empty project).
pub fn next_order_index(current_max: Option<i32>) -> i32 {
    current_max.map_or(0, |max| max.saturating_add(1))
}

/// Reject MIDI data on a track kind that cannot carry it.
pub fn validate_midi_allowed(kind: TrackKind, has_midi: bool) -> Result<(), CoreError> {
    if has_midi && !kind.accepts_midi() {
        return Err(CoreError::Validation(format!(
            "MIDI data is not supported on {kind} tracks"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn first_track_gets_zero() {
        assert_eq!(next_order_index(None), 0);
    }

    #[test]
    fn next_index_is_one_past_max() {
        assert_eq!(next_order_index(Some(0)), 1);
        assert_eq!(next_order_index(Some(7)), 8);
    }

    #[test]
    fn next_index_saturates() {
        assert_eq!(next_order_index(Some(i32::MAX)), i32::MAX);
    }

    #[test]
    fn volume_and_pan_ranges() {
        assert!(validate_volume(0.0).is_ok());
        assert!(validate_volume(2.0).is_ok());
        assert_matches!(
            validate_volume(2.5),
            Err(CoreError::Validation(msg)) if msg == "Volume must be between 0 and 2"
        );
        assert!(validate_pan(-1.0).is_ok());
        assert!(validate_pan(1.0).is_ok());
        assert!(validate_pan(-1.2).is_err());
    }

    #[test]
    fn track_kind_parse() {
        assert_eq!(TrackKind::parse("drums").unwrap(), TrackKind::Drums);
        assert_matches!(
            TrackKind::parse("banjo"),
            Err(CoreError::Validation(msg)) if msg == "Invalid track type"
        );
        assert_eq!(TrackKind::ALL.len(), 8);
    }

    #[test]
    fn colors() {
        assert!(validate_color(DEFAULT_COLOR).is_ok());
        assert!(validate_color("#fff").is_ok());
        assert!(validate_color("blue").is_err());
        assert!(validate_color("#12345").is_err());
    }

    #[test]
    fn midi_only_on_note_tracks() {
        assert!(validate_midi_allowed(TrackKind::Synth, true).is_ok());
        assert!(validate_midi_allowed(TrackKind::Audio, false).is_ok());
        assert_matches!(
            validate_midi_allowed(TrackKind::Vocal, true),
            Err(CoreError::Validation(msg)) if msg.contains("vocal")
        );
    }
}
