//! # Integration Tests for SetFlow
//!
//! End-to-end tests covering the load → clean → optimize → export pipeline
//! and the command-line binary.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

use setflow::track::Track;

const EXPORT: &str = "#\tArtwork\tTrack Title\tArtist\tAlbum\tBPM\tKey\n\
    1\t\x20\tSunrise\tAurora\tDawn\t120.00\tAm\n\
    2\t\x20\tPeak Time\tVolt\tNight\t150.00\tAm\n\
    3\t\x20\tDrift\tTide\tSea\t122.00\tEm\n\
    4\t\x20\tGlow\tEmber\tFire\t121.00\tDm\n\
    5\t\x20\tMystery\t\tUnknown\t128.00\t???\n";

/// Test helper to write a UTF-16LE Rekordbox export into a temp directory
fn create_test_export(contents: &str) -> Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("friday.txt");

    let mut bytes = vec![0xFF, 0xFE];
    for unit in contents.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    fs::write(&path, bytes)?;

    Ok((temp_dir, path))
}

fn setflow() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_setflow"));
    // Keep the user's real config out of the tests
    cmd.env("SETFLOW_CONFIG", "/nonexistent/setflow/config.json");
    cmd
}

fn multiset(tracks: &[Track]) -> Vec<String> {
    let mut items: Vec<String> = tracks.iter().map(|t| format!("{t:?}")).collect();
    items.sort();
    items
}

#[cfg(test)]
mod pipeline_tests {
    use super::*;
    use setflow::{cleaning, export, optimizer, rekordbox};

    fn load(path: &Path) -> Result<Vec<Track>> {
        Ok(cleaning::clean_data(&rekordbox::load_rekordbox_txt(path)?))
    }

    #[test]
    fn test_export_is_loaded_and_cleaned() -> Result<()> {
        let (_temp_dir, path) = create_test_export(EXPORT)?;
        let tracks = load(&path)?;

        assert_eq!(tracks.len(), 5);
        assert_eq!(tracks[0].title, "Sunrise");
        assert_eq!(tracks[0].camelot_key, "8A");
        assert_eq!(tracks[2].camelot_key, "9A");
        assert_eq!(tracks[3].camelot_key, "7A");
        assert_eq!(tracks[4].camelot_key, "Unknown");
        assert_eq!(tracks[4].artist, "");
        Ok(())
    }

    #[test]
    fn test_optimized_order_is_permutation() -> Result<()> {
        let (_temp_dir, path) = create_test_export(EXPORT)?;
        let tracks = load(&path)?;
        let optimized = optimizer::optimize(&tracks);

        assert_eq!(multiset(&tracks), multiset(&optimized));
        assert_eq!(optimized[0].title, "Sunrise");
        Ok(())
    }

    #[test]
    fn test_random_playlists_stay_permutations() {
        let mut rng = StdRng::seed_from_u64(0x5e7f_1055);
        for len in [0_usize, 1, 2, 3, 4, 7, 25, 80] {
            let tracks: Vec<Track> = (0..len)
                .map(|i| {
                    let camelot = if rng.gen_bool(0.1) {
                        "Unknown".to_string()
                    } else {
                        format!(
                            "{}{}",
                            rng.gen_range(1..=12),
                            if rng.gen_bool(0.5) { 'A' } else { 'B' }
                        )
                    };
                    Track::new(
                        format!("Track {i}"),
                        "Artist",
                        f64::from(rng.gen_range(110_u32..=140)),
                        "",
                        camelot,
                    )
                })
                .collect();

            let result = optimizer::sequence(&tracks);
            let optimized = result.apply(&tracks);
            assert_eq!(multiset(&tracks), multiset(&optimized), "len {len}");

            for pick in &result.picks {
                if let optimizer::PickKind::Harmonic { .. } = pick.kind {
                    assert!(pick.bpm_diff <= optimizer::BPM_WINDOW);
                }
            }
        }
    }

    #[test]
    fn test_exports_written_next_to_input() -> Result<()> {
        let (_temp_dir, path) = create_test_export(EXPORT)?;
        let optimized = optimizer::optimize(&load(&path)?);

        let paths = export::export_paths(&path, None)?;
        let written = export::write_exports(&optimized, &paths, true, true)?;
        assert_eq!(written.len(), 2);

        let csv = fs::read_to_string(&paths.csv)?;
        assert!(csv.starts_with("Track #,Title,Artist,BPM,Key,Camelot Key\n"));
        assert!(csv.contains("1,Sunrise,Aurora,120.0,Am,8A"));
        assert_eq!(csv.lines().count(), 6);

        let m3u = fs::read_to_string(&paths.m3u)?;
        assert!(m3u.starts_with("#EXTM3U\nSunrise - Aurora.mp3\n"));
        Ok(())
    }
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn test_cli_help_displays_correctly() {
        let output = setflow().arg("--help").output().expect("Failed to run help command");

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("setflow"));
        assert!(stdout.contains("optimize"));
        assert!(stdout.contains("analyze"));
        assert!(stdout.contains("compat"));
    }

    #[test]
    fn test_compat_command() {
        let output = setflow()
            .args(["compat", "8A", "9A"])
            .output()
            .expect("Failed to run compat command");

        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "2");
    }

    #[test]
    fn test_optimize_command_with_exports() -> Result<()> {
        let (temp_dir, path) = create_test_export(EXPORT)?;
        let out_dir = temp_dir.path().join("out");

        let output = setflow()
            .arg("optimize")
            .arg(&path)
            .arg("--csv")
            .arg("--m3u")
            .arg("--output-dir")
            .arg(&out_dir)
            .arg("--verbose")
            .output()?;

        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Original Playlist:"));
        assert!(stdout.contains("Optimized Playlist:"));
        assert!(stdout.contains("Sequencing decisions:"));
        assert!(stdout.contains("Sunrise by Aurora (BPM: 120.0, Key: Am, Camelot Key: 8A)"));
        assert!(out_dir.join("friday_final.csv").exists());
        assert!(out_dir.join("friday_final.m3u8").exists());
        Ok(())
    }

    #[test]
    fn test_optimize_missing_file_fails() {
        let output = setflow()
            .args(["optimize", "/nonexistent/setflow/set.txt"])
            .output()
            .expect("Failed to run optimize command");

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("File not found"));
    }

    #[test]
    fn test_completion_generation() {
        let output = setflow()
            .args(["completion", "bash"])
            .output()
            .expect("Failed to run completion command");

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("_setflow"));
        assert!(stdout.contains("complete"));
    }
}
