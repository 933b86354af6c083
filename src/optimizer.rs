//! Greedy playlist sequencing along a target energy curve.
//!
//! The sequencer builds a target BPM for every slot of the set, seeds the set
//! with the track closest to the first target, then repeatedly appends the
//! best-scoring unused track for the next slot. Key compatibility dominates
//! the score; tempo closeness breaks ties inside a ±3 BPM window. When no
//! track fits the window the closest tempo wins regardless of key.
//!
//! # Scoring
//!
//! ```text
//! score(candidate) = compatibility(anchor, candidate) * 10
//!                  + max(0, 3 - |candidate.bpm - target|)
//! ```
//!
//! Ties go to the first candidate in original playlist order. The algorithm
//! never backtracks, so it is O(n²) and deterministic.

use crate::camelot;
use crate::track::Track;
use log::{debug, trace};

/// Fraction of the set at which the energy curve peaks.
pub const PEAK_POSITION: f64 = 0.75;
/// Maximum distance from the target BPM for a candidate to be scored.
pub const BPM_WINDOW: f64 = 3.0;
/// Weight of one compatibility point relative to one BPM of closeness.
pub const KEY_WEIGHT: f64 = 10.0;

/// How a slot in the optimized order was filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickKind {
    /// First track, closest to the opening target.
    Seed,
    /// Best-scoring candidate inside the BPM window.
    Harmonic { key_compat: u8, score: f64 },
    /// Nothing fit the window; closest tempo taken.
    Fallback,
}

/// One sequencing decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick {
    /// Position of the chosen track in the input playlist.
    pub position: usize,
    pub target_bpm: f64,
    pub bpm_diff: f64,
    pub kind: PickKind,
}

/// Full result of a sequencing run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sequence {
    /// Input positions in output order.
    pub order: Vec<usize>,
    /// Target BPM per output slot.
    pub targets: Vec<f64>,
    /// Decision per output slot. Empty when the input was left untouched.
    pub picks: Vec<Pick>,
}

impl Sequence {
    /// Materialize the ordered tracks.
    #[must_use]
    pub fn apply(&self, tracks: &[Track]) -> Vec<Track> {
        self.order.iter().map(|&i| tracks[i].clone()).collect()
    }

    /// Number of slots that had to fall back to nearest tempo.
    #[must_use]
    pub fn fallback_count(&self) -> usize {
        self.picks
            .iter()
            .filter(|pick| pick.kind == PickKind::Fallback)
            .count()
    }
}

/// Reorder `tracks` for smooth harmonic mixing along the energy curve.
///
/// Returns a permutation of the input. Fewer than two tracks come back in the
/// same order.
///
/// ```
/// use setflow::optimizer::optimize;
/// use setflow::track::Track;
///
/// let tracks = vec![
///     Track::new("Peak", "", 150.0, "C", "8B"),
///     Track::new("Warmup", "", 120.0, "C", "8B"),
/// ];
/// let ordered = optimize(&tracks);
/// assert_eq!(ordered[0].title, "Warmup");
/// ```
#[must_use]
pub fn optimize(tracks: &[Track]) -> Vec<Track> {
    sequence(tracks).apply(tracks)
}

/// Run the sequencer and keep every decision it made.
#[must_use]
pub fn sequence(tracks: &[Track]) -> Sequence {
    let n = tracks.len();
    if n < 2 {
        return Sequence {
            order: (0..n).collect(),
            targets: tracks.iter().map(Track::effective_bpm).collect(),
            picks: Vec::new(),
        };
    }

    let targets = target_curve(tracks);
    let mut used = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut picks = Vec::with_capacity(n);

    let seed = closest_unused(tracks, &used, targets[0]);
    debug!(
        "Seeding set with `{}' ({} BPM, target {:.2})",
        tracks[seed].title, tracks[seed].bpm, targets[0]
    );
    used[seed] = true;
    order.push(seed);
    picks.push(Pick {
        position: seed,
        target_bpm: targets[0],
        bpm_diff: bpm_distance(&tracks[seed], targets[0]),
        kind: PickKind::Seed,
    });

    for (slot, &target) in targets.iter().enumerate().skip(1) {
        let anchor = &tracks[order[order.len() - 1]];

        let pick = match best_in_window(tracks, &used, anchor, target) {
            Some((position, key_compat, score)) => {
                trace!(
                    "Slot {slot}: `{}' -> `{}' (compat {key_compat}, score {score:.2})",
                    anchor.camelot_key, tracks[position].camelot_key
                );
                Pick {
                    position,
                    target_bpm: target,
                    bpm_diff: bpm_distance(&tracks[position], target),
                    kind: PickKind::Harmonic { key_compat, score },
                }
            }
            None => {
                let position = closest_unused(tracks, &used, target);
                debug!(
                    "Slot {slot}: nothing within ±{BPM_WINDOW} of {target:.2} BPM, \
                     falling back to `{}' ({} BPM)",
                    tracks[position].title, tracks[position].bpm
                );
                Pick {
                    position,
                    target_bpm: target,
                    bpm_diff: bpm_distance(&tracks[position], target),
                    kind: PickKind::Fallback,
                }
            }
        };

        used[pick.position] = true;
        order.push(pick.position);
        picks.push(pick);
    }

    Sequence {
        order,
        targets,
        picks,
    }
}

/// Target BPM per slot of the set.
///
/// Sets of up to three tracks use a fixed progression: lowest, highest, then
/// second lowest. Larger sets follow a linear rise from the lowest to the
/// highest BPM until [`PEAK_POSITION`], then a linear fall back down.
#[must_use]
pub fn target_curve(tracks: &[Track]) -> Vec<f64> {
    let n = tracks.len();
    if n == 0 {
        return Vec::new();
    }

    let mut sorted: Vec<f64> = tracks.iter().map(Track::effective_bpm).collect();
    // `sort_by` is stable; equal tempos keep their relative order
    sorted.sort_by(f64::total_cmp);

    let min_bpm = sorted[0];
    let max_bpm = sorted[n - 1];

    if n <= 3 {
        let third = if n > 2 { sorted[1] } else { max_bpm };
        let mut targets = vec![min_bpm, max_bpm, third];
        targets.truncate(n);
        return targets;
    }

    let span = max_bpm - min_bpm;
    #[allow(clippy::cast_precision_loss)]
    let last = (n - 1) as f64;

    (0..n)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let pos = i as f64 / last;
            if pos <= PEAK_POSITION {
                min_bpm + span * (pos / PEAK_POSITION)
            } else {
                max_bpm - span * ((pos - PEAK_POSITION) / (1.0 - PEAK_POSITION))
            }
        })
        .collect()
}

/// Score of a candidate that already passed the window filter.
#[inline]
#[must_use]
pub fn transition_score(key_compat: u8, bpm_diff: f64) -> f64 {
    f64::from(key_compat) * KEY_WEIGHT + (BPM_WINDOW - bpm_diff).max(0.0)
}

#[inline]
fn bpm_distance(track: &Track, target: f64) -> f64 {
    (track.effective_bpm() - target).abs()
}

/// Best `(position, key_compat, score)` among unused tracks within the
/// window, or `None` when the window is empty.
fn best_in_window(
    tracks: &[Track],
    used: &[bool],
    anchor: &Track,
    target: f64,
) -> Option<(usize, u8, f64)> {
    let mut best: Option<(usize, u8, f64)> = None;

    for (position, candidate) in tracks.iter().enumerate() {
        if used[position] {
            continue;
        }
        let bpm_diff = bpm_distance(candidate, target);
        if bpm_diff > BPM_WINDOW {
            continue;
        }
        let key_compat = camelot::compatibility(&anchor.camelot_key, &candidate.camelot_key);
        let score = transition_score(key_compat, bpm_diff);
        if best.map_or(true, |(_, _, best_score)| score > best_score) {
            best = Some((position, key_compat, score));
        }
    }

    best
}

/// Unused track with the smallest tempo distance to `target`, first wins ties.
///
/// Callers guarantee at least one unused track remains.
fn closest_unused(tracks: &[Track], used: &[bool], target: f64) -> usize {
    let mut best: Option<(usize, f64)> = None;
    for (position, track) in tracks.iter().enumerate() {
        if used[position] {
            continue;
        }
        let diff = bpm_distance(track, target);
        if best.map_or(true, |(_, best_diff)| diff < best_diff) {
            best = Some((position, diff));
        }
    }
    best.map_or(0, |(position, _)| position)
}
