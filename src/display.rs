//! Terminal rendering of playlists, statistics and the energy flow.

use crate::analysis::{PlaylistStats, TransitionSummary};
use crate::optimizer::{PickKind, Sequence};
use crate::track::Track;
use std::fmt::Write as _;

/// Characters of the title kept in chart annotations.
const TITLE_PREVIEW: usize = 20;

/// Format a tempo the way the export columns show it: `128.0`, `127.5`.
#[must_use]
pub fn format_bpm(bpm: f64) -> String {
    format!("{bpm:?}")
}

/// One line per track: `Title by Artist (BPM: .., Key: .., Camelot Key: ..)`.
///
/// The ` by Artist` part is omitted when the artist is empty.
#[must_use]
pub fn format_track_line(track: &Track) -> String {
    let details = format!(
        "(BPM: {}, Key: {}, Camelot Key: {})",
        format_bpm(track.bpm),
        track.key,
        track.camelot_key
    );
    if track.artist.is_empty() {
        format!("{} {details}", track.title)
    } else {
        format!("{} by {} {details}", track.title, track.artist)
    }
}

pub fn print_playlist(heading: &str, tracks: &[Track]) {
    println!("\n{heading}");
    for track in tracks {
        println!("{}", format_track_line(track));
    }
}

#[must_use]
pub fn format_stats(stats: &PlaylistStats) -> String {
    format!(
        "Playlist Analysis for {} tracks\n\
         Average BPM: {:.1}\n\
         BPM Range: {} - {}\n\
         Unique Keys: {}",
        stats.track_count,
        stats.average_bpm,
        format_bpm(stats.min_bpm),
        format_bpm(stats.max_bpm),
        stats.unique_keys
    )
}

#[must_use]
pub fn format_transitions(summary: &TransitionSummary) -> String {
    let [clash, moderate, good, perfect] = summary.by_compatibility;
    format!(
        "Transitions: {perfect} perfect, {good} good, {moderate} moderate, {clash} clashing\n\
         BPM jumps: mean {:.2}, max {:.2}",
        summary.mean_bpm_jump, summary.max_bpm_jump
    )
}

/// Text chart of the BPM progression, one row per track.
///
/// Bars are scaled between the lowest and highest tempo of the list so the
/// shape of the curve stays visible even for narrow BPM ranges.
#[must_use]
pub fn render_energy_flow(tracks: &[Track], width: usize) -> String {
    let width = width.max(1);
    let stats = PlaylistStats::from_tracks(tracks);
    let span = stats.max_bpm - stats.min_bpm;
    let mut out = String::new();

    for (i, track) in tracks.iter().enumerate() {
        let filled = if span > 0.0 {
            let ratio = ((track.bpm - stats.min_bpm) / span).clamp(0.0, 1.0);
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                clippy::cast_precision_loss
            )]
            let extra = (ratio * (width - 1) as f64).round() as usize;
            1 + extra
        } else {
            width
        };
        let _ = writeln!(
            out,
            "{:>3} {:>7.1} |{:<width$}| {:>7}  {}",
            i + 1,
            track.bpm,
            "#".repeat(filled),
            track.camelot_key,
            title_preview(&track.title),
        );
    }
    out
}

/// Per-slot explanation of what the sequencer did.
#[must_use]
pub fn format_decisions(tracks: &[Track], sequence: &Sequence) -> String {
    let mut out = String::new();
    for (slot, pick) in sequence.picks.iter().enumerate() {
        let track = &tracks[pick.position];
        let reason = match pick.kind {
            PickKind::Seed => "seed, closest to opening target".to_string(),
            PickKind::Harmonic { key_compat, score } => {
                format!("key compat {key_compat}, score {score:.2}")
            }
            PickKind::Fallback => "fallback, nothing within BPM window".to_string(),
        };
        let _ = writeln!(
            out,
            "  {}. {} [{} BPM, {}] target {:.2} (diff {:.2}): {reason}",
            slot + 1,
            track.title,
            format_bpm(track.bpm),
            track.camelot_key,
            pick.target_bpm,
            pick.bpm_diff,
        );
    }
    out
}

fn title_preview(title: &str) -> String {
    let preview: String = title.chars().take(TITLE_PREVIEW).collect();
    format!("{preview}...")
}
