//! # Command-Line Interface Module
//!
//! Defines the medley command line using Clap derive macros. The CLI is a
//! thin request layer: every invocation scans the music directory, builds
//! the in-memory catalog and answers one query against it.
//!
//! ## Commands
//!
//! - `list`: Display every catalogued song in ingestion order
//! - `genres`: List genres that currently hold songs
//! - `genre`: List the songs of one genre
//! - `search`: Case-insensitive title search (exact, then substring)
//! - `recommend`: Similar songs for a starting title
//! - `info`: Full record for one song id
//! - `completion`: Generate shell completion scripts
//!
//! ## Examples
//!
//! ```bash
//! medley list
//! medley search "one more time"
//! medley recommend "One More Time" --limit 3
//! medley --music-dir ~/Music genres
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
///
/// Uses Clap derive macros to generate argument parsing, help text, and
/// validation. Global flags apply to every subcommand.
#[derive(Parser)]
#[command(name = "medley")]
#[command(about = "Medley - in-memory multi-index music catalog")]
#[command(version)]
pub struct Args {
    /// Music directory to scan
    ///
    /// Defaults to the platform music directory (e.g. ~/Music). The
    /// catalog is rebuilt from this directory on every invocation.
    #[arg(long, global = true, env = "MEDLEY_MUSIC_DIR")]
    pub music_dir: Option<PathBuf>,

    /// Print results as JSON instead of human-readable text
    #[arg(long, global = true)]
    pub json: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
///
/// Command arguments are embedded directly in the enum variants for
/// type safety and automatic validation.
#[derive(Subcommand)]
pub enum Command {
    /// List all catalogued songs
    ///
    /// Displays every song in ingestion order with its id, title, artist,
    /// genre and play count.
    List,

    /// List genres that currently hold at least one song
    Genres,

    /// List the songs of one genre
    ///
    /// Genre names are matched exactly, including case.
    Genre {
        /// Genre name, e.g. "Rock"
        name: String,
    },

    /// Search songs by title
    ///
    /// Exact (case-insensitive) matches are returned when any exist;
    /// otherwise the query is treated as a substring.
    Search {
        /// Title or title fragment to look for
        #[arg(value_hint = clap::ValueHint::Other)]
        query: String,
    },

    /// Recommend songs similar to a starting song
    ///
    /// The starting song is found by title search; recommendations are
    /// ordered by how many criteria match (artist, genre, year proximity).
    Recommend {
        /// Title of the song to start from
        #[arg(value_hint = clap::ValueHint::Other)]
        song: String,

        /// Maximum number of recommendations
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Show the full record for one song
    Info {
        /// Song id as shown by `list`
        id: u32,
    },

    /// Generate shell completions
    ///
    /// Usage: medley completion bash > ~/.local/share/bash-completion/completions/medley
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}
