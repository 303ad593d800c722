//! In-memory multi-index music catalog.
//!
//! One master list owns every song; a set of derived structures answer
//! different access patterns over the same records, and the [`catalog`]
//! orchestrator keeps all of them consistent through every mutation.
//!
//! Core modules:
//! - [`catalog`] - Orchestrator: the only component that mutates indexes
//! - [`master`] - Singly linked master list, the authoritative owner
//! - [`genre`] - Genre buckets for exact-genre listing
//! - [`title_tree`] - Binary search tree over lowercased titles
//! - [`graph`] - Undirected weighted similarity graph
//! - [`playback`] - History stack and up-next queue
//! - [`playlist`] - Doubly linked playlists with a navigation cursor
//!
//! ### Supporting Modules
//!
//! - [`song`] - Song record and scan record types
//! - [`scan`] - Filesystem scan and filename metadata inference
//! - [`config`] - Catalog policy and default directory resolution
//! - [`error`] - Typed catalog errors
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use medley::catalog::Catalog;
//! use medley::config::CatalogConfig;
//! use medley::scan;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = CatalogConfig::default();
//! let records = scan::scan_dir(Path::new("/music"), &config)?;
//!
//! let mut catalog = Catalog::new(config);
//! let report = catalog.ingest_scan(records);
//! println!("Catalogued {} songs", report.added.len());
//!
//! for song in catalog.search_by_title("one more time") {
//!     println!("{} - {}", song.artist, song.title);
//!     for similar in catalog.recommend(song.id, 5) {
//!         println!("  similar: {}", similar.title);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod genre;
pub mod graph;
pub mod master;
pub mod playback;
pub mod playlist;
pub mod scan;
pub mod song;
pub mod title_tree;

pub use catalog::Catalog;
pub use error::{CatalogError, Result};
pub use song::{ScanRecord, Song, SongId};
