//! # SetFlow - Harmonic DJ Set Sequencing
//!
//! Reads a Rekordbox playlist export, reorders it so that consecutive tracks
//! mix harmonically while the tempo follows an energy curve, and optionally
//! exports the result as CSV and M3U8.
//!
//! ## Usage
//!
//! ```bash
//! # Optimize and export next to the input
//! setflow optimize ~/sets/friday.txt --csv --m3u
//!
//! # Show why each track was placed where it was
//! RUST_LOG=setflow::optimizer=debug setflow optimize friday.txt -v
//!
//! # Inspect a playlist without changing it
//! setflow analyze friday.txt
//! ```

use anyhow::Result;
use clap::{CommandFactory, Parser};
use log::{debug, info};
use path_absolutize::Absolutize;
use std::path::Path;

use setflow::analysis::{self, PlaylistStats};
use setflow::config::RuntimeConfig;
use setflow::track::Track;
use setflow::{camelot, cleaning, cli, completion, display, export, optimizer, rekordbox};

/// Load and clean the tracks of an export.
fn load_tracks(file: &Path) -> Result<Vec<Track>> {
    let file = file.absolutize()?;
    info!("Reading playlist export: {}", file.display());
    let raw_tracks = rekordbox::load_rekordbox_txt(&file)?;
    Ok(cleaning::clean_data(&raw_tracks))
}

fn print_analysis(tracks: &[Track], chart_width: usize) {
    println!("{}", display::format_stats(&PlaylistStats::from_tracks(tracks)));
    println!("{}", display::format_transitions(&analysis::transition_report(tracks)));
    println!("\nEnergy Flow (BPM Progression)");
    print!("{}", display::render_energy_flow(tracks, chart_width));
}

/// Main entry point for the SetFlow application.
///
/// Initializes logging, loads the user configuration, parses command-line
/// arguments, and routes commands to the library modules.
///
/// # Logging
///
/// Initializes environment logger which can be controlled via `RUST_LOG`:
/// - `RUST_LOG=debug setflow optimize set.txt` - Enable debug logging
/// - `RUST_LOG=setflow::optimizer=trace setflow optimize set.txt` - Every pick
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    match args.command {
        cli::Command::Optimize {
            file,
            output_dir,
            csv,
            m3u,
            no_analysis,
            verbose,
        } => {
            let config = RuntimeConfig::load()?.with_output_dir(output_dir);
            let show_analysis = config.show_analysis && !no_analysis;
            let tracks = load_tracks(&file)?;

            display::print_playlist("Original Playlist:", &tracks);
            if show_analysis {
                println!("\nPlaylist Analysis:");
                print_analysis(&tracks, config.chart_width);
            }

            println!("\nOptimizing playlist for DJ mixing...");
            let sequence = optimizer::sequence(&tracks);
            let optimized = sequence.apply(&tracks);
            debug!(
                "Optimized {} tracks, {} fallback picks",
                optimized.len(),
                sequence.fallback_count()
            );

            if verbose {
                println!("\nSequencing decisions:");
                print!("{}", display::format_decisions(&tracks, &sequence));
            }

            display::print_playlist("Optimized Playlist:", &optimized);
            if show_analysis {
                println!();
                print_analysis(&optimized, config.chart_width);
            }

            let write_csv = csv || config.write_csv;
            let write_m3u = m3u || config.write_m3u;
            if write_csv || write_m3u {
                let paths = export::export_paths(&file, config.output_dir.as_deref())?;
                for path in export::write_exports(&optimized, &paths, write_csv, write_m3u)? {
                    println!("Saved {}", path.display());
                }
            }
        }
        cli::Command::Analyze { file } => {
            let config = RuntimeConfig::load()?;
            let tracks = load_tracks(&file)?;
            display::print_playlist("Playlist:", &tracks);
            println!();
            print_analysis(&tracks, config.chart_width);
        }
        cli::Command::Compat { key_a, key_b } => {
            println!("{}", camelot::compatibility(&key_a, &key_b));
        }
        cli::Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(shell), &mut cmd);
        }
    }

    Ok(())
}
