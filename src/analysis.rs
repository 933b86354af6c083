//! Playlist statistics used to compare the original and optimized orders.

use crate::camelot;
use crate::track::Track;
use std::collections::HashSet;

/// Summary figures for a playlist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaylistStats {
    pub track_count: usize,
    pub average_bpm: f64,
    pub min_bpm: f64,
    pub max_bpm: f64,
    /// Distinct canonical key names, the empty key included.
    pub unique_keys: usize,
}

impl PlaylistStats {
    #[must_use]
    pub fn from_tracks(tracks: &[Track]) -> Self {
        if tracks.is_empty() {
            return Self::default();
        }

        let bpms = tracks.iter().map(|t| t.bpm);
        #[allow(clippy::cast_precision_loss)]
        let average_bpm = bpms.clone().sum::<f64>() / tracks.len() as f64;

        Self {
            track_count: tracks.len(),
            average_bpm,
            min_bpm: bpms.clone().fold(f64::INFINITY, f64::min),
            max_bpm: bpms.fold(f64::NEG_INFINITY, f64::max),
            unique_keys: tracks
                .iter()
                .map(|t| t.key.as_str())
                .collect::<HashSet<_>>()
                .len(),
        }
    }
}

/// How smooth the transitions of an ordering are.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionSummary {
    /// Transitions per compatibility score, indexed by score (0..=3).
    pub by_compatibility: [usize; 4],
    /// Mean absolute BPM change between consecutive tracks.
    pub mean_bpm_jump: f64,
    /// Largest absolute BPM change between consecutive tracks.
    pub max_bpm_jump: f64,
}

impl TransitionSummary {
    /// Number of transitions scored 2 or better.
    #[must_use]
    pub fn harmonic_transitions(&self) -> usize {
        self.by_compatibility[2] + self.by_compatibility[3]
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.by_compatibility.iter().sum()
    }
}

/// Score every consecutive pair of `tracks`.
#[must_use]
pub fn transition_report(tracks: &[Track]) -> TransitionSummary {
    let mut summary = TransitionSummary::default();
    let mut jump_total = 0.0;

    for pair in tracks.windows(2) {
        let compat = camelot::compatibility(&pair[0].camelot_key, &pair[1].camelot_key);
        summary.by_compatibility[usize::from(compat)] += 1;

        let jump = (pair[1].effective_bpm() - pair[0].effective_bpm()).abs();
        jump_total += jump;
        summary.max_bpm_jump = summary.max_bpm_jump.max(jump);
    }

    let transitions = summary.total();
    if transitions > 0 {
        #[allow(clippy::cast_precision_loss)]
        let mean = jump_total / transitions as f64;
        summary.mean_bpm_jump = mean;
    }
    summary
}
