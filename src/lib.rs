//! Harmonic DJ set sequencing.
//!
//! Core modules:
//! - [`camelot`] - Camelot wheel parsing and key compatibility scoring
//! - [`optimizer`] - Greedy sequencing along a target BPM curve
//!
//! ### Supporting Modules
//!
//! - [`track`] - Raw and cleaned track records
//! - [`rekordbox`] - Rekordbox `.txt` export reader
//! - [`cleaning`] - Key normalization and BPM coercion
//! - [`analysis`] - Playlist and transition statistics
//! - [`display`] - Terminal rendering
//! - [`export`] - CSV and M3U8 output
//! - [`config`] - User configuration
//! - [`cli`] / [`completion`] - Command-line interface
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use setflow::{cleaning, optimizer, rekordbox};
//! use std::path::Path;
//!
//! let raw = rekordbox::load_rekordbox_txt(Path::new("friday.txt"))?;
//! let tracks = cleaning::clean_data(&raw);
//! let optimized = optimizer::optimize(&tracks);
//! for track in &optimized {
//!     println!("{} ({} BPM, {})", track.title, track.bpm, track.camelot_key);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Algorithm Details
//!
//! ### Energy curve
//! - Sets of up to three tracks: lowest, highest, second-lowest BPM
//! - Larger sets: linear rise from the lowest to the highest BPM until 75% of
//!   the set, then a linear fall back to the lowest
//!
//! ### Greedy selection
//! - Seed with the track closest to the first target
//! - For each next slot, only tracks within ±3 BPM of the target are scored:
//!   `compatibility * 10 + (3 - bpm_diff)`
//! - If no track is within the window, take the closest tempo
//!
//! ## Error Handling
//!
//! The core ([`camelot`], [`optimizer`]) is infallible: unknown keys score 0
//! and invalid tempos count as 0 BPM. File, decoding and configuration
//! failures surface as `anyhow::Error` with context.

pub mod analysis;
pub mod camelot;
pub mod cleaning;
pub mod cli;
pub mod completion;
pub mod config;
pub mod display;
pub mod export;
pub mod optimizer;
pub mod rekordbox;
pub mod track;
