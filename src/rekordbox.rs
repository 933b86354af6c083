//! # Rekordbox Playlist Export Reader
//!
//! Rekordbox exports playlists as tab-separated text ("Export a playlist to a
//! file for KUVO" / "Export as .txt"). The file is UTF-16 with a BOM, may
//! start with a few preamble lines, and has a header row naming the columns.
//!
//! Only four columns are used: `Track Title`, `Artist`, `BPM` and `Key`.
//! Rows whose column count does not match the header are skipped rather than
//! guessed at.

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info};
use std::fs;
use std::path::Path;

use crate::track::RawTrack;

const TITLE_COLUMN: &str = "Track Title";
const ARTIST_COLUMN: &str = "Artist";
const BPM_COLUMN: &str = "BPM";
const KEY_COLUMN: &str = "Key";

/// Load the raw track rows from a Rekordbox `.txt` export.
///
/// # Errors
///
/// Fails when the file does not exist or cannot be read, when its bytes are
/// not valid UTF-16/UTF-8 text, or when no header row is present.
pub fn load_rekordbox_txt(path: &Path) -> Result<Vec<RawTrack>> {
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }

    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read playlist export {}", path.display()))?;
    let text = decode_export(&bytes)
        .with_context(|| format!("Failed to decode playlist export {}", path.display()))?;

    let tracks = parse_rekordbox_text(&text)
        .with_context(|| format!("Failed to parse playlist export {}", path.display()))?;
    info!("Loaded {} tracks from {}", tracks.len(), path.display());
    Ok(tracks)
}

/// Decode export bytes into text.
///
/// A byte-order mark decides the encoding when present. Without one, data
/// containing NUL bytes is read as UTF-16LE and anything else as UTF-8.
///
/// # Errors
///
/// Returns an error if the bytes are not valid in the detected encoding.
pub fn decode_export(bytes: &[u8]) -> Result<String> {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => decode_utf8(rest),
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
        _ if bytes.contains(&0) => decode_utf16(bytes, u16::from_le_bytes),
        _ => decode_utf8(bytes),
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec()).context("Export is not valid UTF-8")
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String> {
    if bytes.len() % 2 != 0 {
        bail!("UTF-16 export has an odd number of bytes ({})", bytes.len());
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|e| anyhow!("Export is not valid UTF-16: {e}"))
}

/// Parse decoded export text into raw rows.
///
/// # Errors
///
/// Returns an error when no line contains both the `Track Title` and
/// `Artist` column names.
pub fn parse_rekordbox_text(text: &str) -> Result<Vec<RawTrack>> {
    let lines: Vec<&str> = text.lines().collect();

    let header_index = lines
        .iter()
        .position(|line| line.contains(TITLE_COLUMN) && line.contains(ARTIST_COLUMN))
        .ok_or_else(|| anyhow!("Header not found in the file"))?;

    let headers: Vec<&str> = lines[header_index].trim().split('\t').collect();
    let column = |name: &str| headers.iter().position(|h| *h == name);
    let columns = [
        column(TITLE_COLUMN),
        column(ARTIST_COLUMN),
        column(BPM_COLUMN),
        column(KEY_COLUMN),
    ];
    debug!("Header at line {}: {} columns", header_index + 1, headers.len());

    let mut tracks = Vec::new();
    for (offset, line) in lines[header_index + 1..].iter().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let values: Vec<&str> = line.split('\t').collect();
        if values.len() != headers.len() {
            debug!(
                "Skipping line {}: {} values for {} columns",
                header_index + offset + 2,
                values.len(),
                headers.len()
            );
            continue;
        }

        let field = |index: Option<usize>| {
            index
                .map(|i| values[i].to_string())
                .unwrap_or_default()
        };
        tracks.push(RawTrack {
            title: field(columns[0]),
            artist: field(columns[1]),
            bpm: field(columns[2]),
            key: field(columns[3]),
        });
    }

    Ok(tracks)
}
