//! Track records flowing through the pipeline.
//!
//! [`RawTrack`] is what the Rekordbox loader produces, straight from the
//! export columns. [`Track`] is the cleaned record the optimizer consumes and
//! returns; its fields are never mutated by the sequencer.

use serde::{Deserialize, Serialize};

/// Camelot value used when a key has no entry in the lookup table.
pub const UNKNOWN_CAMELOT: &str = "Unknown";

/// A row as read from the export, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTrack {
    pub title: String,
    pub artist: String,
    /// Unparsed tempo column.
    pub bpm: String,
    /// Key as spelled by the export ("Ebm", "E♭m", "ebm", ...).
    pub key: String,
}

/// A cleaned track ready for sequencing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    /// Tempo in beats per minute, `>= 0`.
    pub bpm: f64,
    /// Canonical key name, possibly empty.
    pub key: String,
    /// `{1..12}{A|B}` or [`UNKNOWN_CAMELOT`].
    pub camelot_key: String,
}

impl Track {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        bpm: f64,
        key: impl Into<String>,
        camelot_key: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            bpm,
            key: key.into(),
            camelot_key: camelot_key.into(),
        }
    }

    /// Tempo used for all sequencing arithmetic.
    ///
    /// NaN, infinite and negative values count as `0.0` so a bad record can
    /// never poison the target curve or the distance comparisons.
    #[must_use]
    pub fn effective_bpm(&self) -> f64 {
        sanitize_bpm(self.bpm)
    }

    /// True when the camelot key resolved to a wheel position.
    #[must_use]
    pub fn has_known_key(&self) -> bool {
        self.camelot_key != UNKNOWN_CAMELOT
    }
}

/// Clamp a tempo value into the valid domain.
#[inline]
#[must_use]
pub fn sanitize_bpm(bpm: f64) -> f64 {
    if bpm.is_finite() && bpm > 0.0 {
        bpm
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_bpm_passes_valid_values() {
        let track = Track::new("A", "B", 124.5, "Am", "8A");
        assert_eq!(track.effective_bpm(), 124.5);
    }

    #[test]
    fn test_effective_bpm_coerces_invalid_values() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -12.0] {
            let track = Track::new("A", "B", bad, "Am", "8A");
            assert_eq!(track.effective_bpm(), 0.0, "bpm {bad} should coerce to zero");
        }
    }

    #[test]
    fn test_unknown_key_detection() {
        assert!(Track::new("A", "", 120.0, "C", "8B").has_known_key());
        assert!(!Track::new("A", "", 120.0, "", UNKNOWN_CAMELOT).has_known_key());
    }
}
