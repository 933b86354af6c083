//! Normalization of raw export rows into sequencer-ready tracks.

use crate::camelot;
use crate::track::{sanitize_bpm, RawTrack, Track, UNKNOWN_CAMELOT};
use log::{debug, info};

/// Clean every raw row: parse the tempo, normalize the key spelling and
/// resolve its Camelot position.
#[must_use]
pub fn clean_data(tracks: &[RawTrack]) -> Vec<Track> {
    let cleaned: Vec<Track> = tracks.iter().map(clean_track).collect();
    let unknown = cleaned.iter().filter(|t| !t.has_known_key()).count();
    info!("Cleaned {} tracks ({unknown} without a Camelot key)", cleaned.len());
    cleaned
}

/// Clean a single row.
#[must_use]
pub fn clean_track(raw: &RawTrack) -> Track {
    let bpm = parse_bpm(&raw.bpm);
    let key = normalize_key(&raw.key);
    let camelot_key = camelot::camelot_for_key(&key).unwrap_or(UNKNOWN_CAMELOT);
    if camelot_key == UNKNOWN_CAMELOT && !key.is_empty() {
        debug!("No Camelot mapping for key `{key}' on `{}'", raw.title);
    }

    Track {
        title: raw.title.clone(),
        artist: raw.artist.clone(),
        bpm,
        key,
        camelot_key: camelot_key.to_string(),
    }
}

/// Parse a tempo column. Anything that is not a finite, non-negative number
/// becomes `0.0`.
#[must_use]
pub fn parse_bpm(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(bpm) => sanitize_bpm(bpm),
        Err(_) => {
            if !text.trim().is_empty() {
                debug!("Unparseable BPM `{text}', using 0");
            }
            0.0
        }
    }
}

/// Standardize a key spelling, e.g. `" e♭M "` → `"Ebm"`, `"f#"` → `"F#"`.
///
/// Flat and sharp symbols become `b` and `#`. Any `m` marks a minor key: all
/// of them are dropped, the note is capitalized, and a single `m` appended.
#[must_use]
pub fn normalize_key(key: &str) -> String {
    let key = key
        .trim()
        .replace('\u{266d}', "b")
        .replace('\u{266f}', "#")
        .to_lowercase();
    if key.is_empty() {
        return String::new();
    }

    if key.contains('m') {
        format!("{}m", capitalize(&key.replace('m', "")))
    } else {
        capitalize(&key)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: &str, bpm: &str, key: &str) -> RawTrack {
        RawTrack {
            title: title.to_string(),
            artist: "Artist".to_string(),
            bpm: bpm.to_string(),
            key: key.to_string(),
        }
    }

    #[test]
    fn test_normalize_key_spellings() {
        assert_eq!(normalize_key("Ebm"), "Ebm");
        assert_eq!(normalize_key("ebm"), "Ebm");
        assert_eq!(normalize_key("  EBM "), "Ebm");
        assert_eq!(normalize_key("E\u{266d}m"), "Ebm");
        assert_eq!(normalize_key("f\u{266f}"), "F#");
        assert_eq!(normalize_key("C"), "C");
        assert_eq!(normalize_key("a#m"), "A#m");
        assert_eq!(normalize_key(""), "");
        assert_eq!(normalize_key("   "), "");
    }

    #[test]
    fn test_normalize_key_strips_every_m() {
        // "Amin" style spellings lose all m's before the suffix is re-added
        assert_eq!(normalize_key("Amm"), "Am");
        assert_eq!(normalize_key("Amin"), "Ainm");
    }

    #[test]
    fn test_parse_bpm_coercion() {
        assert_eq!(parse_bpm("128"), 128.0);
        assert_eq!(parse_bpm(" 127.50 "), 127.5);
        assert_eq!(parse_bpm(""), 0.0);
        assert_eq!(parse_bpm("fast"), 0.0);
        assert_eq!(parse_bpm("-90"), 0.0);
        assert_eq!(parse_bpm("NaN"), 0.0);
        assert_eq!(parse_bpm("inf"), 0.0);
    }

    #[test]
    fn test_clean_track_maps_camelot() {
        let track = clean_track(&raw("Song", "124.00", "ebm"));
        assert_eq!(track.key, "Ebm");
        assert_eq!(track.camelot_key, "2A");
        assert_eq!(track.bpm, 124.0);
        assert_eq!(track.artist, "Artist");
    }

    #[test]
    fn test_clean_track_unknown_key() {
        assert_eq!(clean_track(&raw("Song", "120", "")).camelot_key, "Unknown");
        assert_eq!(clean_track(&raw("Song", "120", "8A")).camelot_key, "Unknown");
        assert_eq!(clean_track(&raw("Song", "120", "H")).camelot_key, "Unknown");
    }

    #[test]
    fn test_clean_data_preserves_order_and_length() {
        let rows = vec![raw("One", "120", "C"), raw("Two", "x", "Am"), raw("Three", "130", "")];
        let cleaned = clean_data(&rows);
        let titles: Vec<&str> = cleaned.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Two", "Three"]);
        assert_eq!(cleaned[1].bpm, 0.0);
        assert_eq!(cleaned[1].camelot_key, "8A");
    }
}
