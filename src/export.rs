//! # Playlist Export
//!
//! Writes the optimized order next to the source export (or into a chosen
//! directory) in two forms:
//!
//! - `<name>_final.csv` - numbered table with every track field
//! - `<name>_final.m3u8` - extended M3U that Rekordbox can import
//!
//! The M3U entries are `Title - Artist.mp3` names rather than real paths;
//! Rekordbox matches them against its collection on import.

use anyhow::{anyhow, Context, Result};
use log::info;
use path_absolutize::Absolutize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::display::format_bpm;
use crate::track::Track;

const CSV_HEADER: [&str; 6] = ["Track #", "Title", "Artist", "BPM", "Key", "Camelot Key"];

/// Render the numbered CSV table.
#[must_use]
pub fn to_csv(tracks: &[Track]) -> String {
    let mut out = csv_row(CSV_HEADER.iter().map(|s| (*s).to_string()));
    for (i, track) in tracks.iter().enumerate() {
        out.push_str(&csv_row([
            (i + 1).to_string(),
            track.title.clone(),
            track.artist.clone(),
            format_bpm(track.bpm),
            track.key.clone(),
            track.camelot_key.clone(),
        ]));
    }
    out
}

fn csv_row(fields: impl IntoIterator<Item = String>) -> String {
    let mut row = fields
        .into_iter()
        .map(|field| csv_field(&field))
        .collect::<Vec<_>>()
        .join(",");
    row.push('\n');
    row
}

/// Quote a field when it contains a delimiter, quote or line break.
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render an extended M3U playlist.
#[must_use]
pub fn to_m3u(tracks: &[Track]) -> String {
    let mut out = String::from("#EXTM3U\n");
    for track in tracks {
        out.push_str(&format!("{} - {}.mp3\n", track.title, track.artist));
    }
    out
}

/// Destination files for an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub csv: PathBuf,
    pub m3u: PathBuf,
}

/// Work out `<stem>_final.csv` / `<stem>_final.m3u8` for `input`.
///
/// Files go to `output_dir` when given, otherwise next to the input.
///
/// # Errors
///
/// Fails when the input has no file name or a path cannot be made absolute.
pub fn export_paths(input: &Path, output_dir: Option<&Path>) -> Result<ExportPaths> {
    let stem = input
        .file_stem()
        .ok_or_else(|| anyhow!("Input path {} has no file name", input.display()))?
        .to_string_lossy();

    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    let dir = dir
        .absolutize()
        .with_context(|| format!("Failed to resolve output directory {}", dir.display()))?
        .into_owned();

    Ok(ExportPaths {
        csv: dir.join(format!("{stem}_final.csv")),
        m3u: dir.join(format!("{stem}_final.m3u8")),
    })
}

/// Write the requested exports, returning the files written.
///
/// # Errors
///
/// Returns an error when the output directory cannot be created or a file
/// cannot be written.
pub fn write_exports(
    tracks: &[Track],
    paths: &ExportPaths,
    csv: bool,
    m3u: bool,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    let targets: [(bool, &PathBuf, fn(&[Track]) -> String); 2] =
        [(csv, &paths.csv, to_csv), (m3u, &paths.m3u, to_m3u)];

    for (enabled, path, render) in targets {
        if !enabled {
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory {}", parent.display())
            })?;
        }
        fs::write(path, render(tracks))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {}", path.display());
        written.push(path.clone());
    }

    Ok(written)
}
