//! # Command-Line Interface Module
//!
//! This module defines the command-line interface for SetFlow using Clap
//! derive macros.
//!
//! ## Commands
//!
//! - `optimize`: Reorder a Rekordbox export for harmonic mixing
//! - `analyze`: Show statistics and the energy flow of an export as-is
//! - `compat`: Score the compatibility of two Camelot keys
//! - `completion`: Generate shell completion scripts
//!
//! ## Examples
//!
//! ```bash
//! setflow optimize friday.txt --csv --m3u
//! setflow analyze friday.txt
//! setflow compat 8A 9A
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "setflow")]
#[command(about = "SetFlow: harmonic DJ set sequencing along an energy curve")]
#[command(version)]
pub struct Args {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Optimize a Rekordbox playlist export for DJ mixing
    ///
    /// Reorders the tracks so consecutive keys are compatible on the Camelot
    /// wheel while the tempo follows a rising-then-falling energy curve.
    /// Prints the original and optimized orders and can export the result.
    Optimize {
        /// Path to the Rekordbox .txt export (UTF-16, tab separated)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Directory for exported files (default: next to the input)
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        output_dir: Option<PathBuf>,

        /// Write <name>_final.csv
        #[arg(long)]
        csv: bool,

        /// Write <name>_final.m3u8 for import into Rekordbox
        #[arg(long)]
        m3u: bool,

        /// Skip statistics and energy-flow charts
        #[arg(long)]
        no_analysis: bool,

        /// Enable verbose output showing algorithm decisions
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show statistics and energy flow of a playlist without reordering
    Analyze {
        /// Path to the Rekordbox .txt export
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Score how well two Camelot keys mix (0-3)
    ///
    /// 3 = same key, 2 = adjacent or relative major/minor,
    /// 1 = two steps apart, 0 = clash or unknown key.
    Compat {
        /// First key, e.g. 8A
        key_a: String,
        /// Second key, e.g. 9A
        key_b: String,
    },

    /// Generate shell completions
    ///
    /// Usage: setflow completion bash > ~/.local/share/bash-completion/completions/setflow
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}
