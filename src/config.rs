//! Catalog configuration and default directory resolution.
//!
//! Everything here is policy the catalog structures take as given: the
//! year proximity threshold for similarity edges, optional bounds on the
//! history stack and up-next queue, and what the scanner considers a
//! music file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Year gap (inclusive) within which two songs count as similar.
pub const DEFAULT_YEAR_THRESHOLD: u32 = 1;

/// How deep the scanner recurses into the music directory by default.
pub const DEFAULT_SCAN_DEPTH: u32 = 10;

/// Tunable policy for one catalog instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Maximum year distance that still counts as a similarity criterion.
    pub year_threshold: u32,
    /// Optional history bound; `None` keeps history unbounded. When
    /// bounded, overflow evicts the oldest entry.
    pub history_limit: Option<usize>,
    /// Optional up-next queue bound, same eviction policy as history.
    pub queue_limit: Option<usize>,
    /// Maximum directory depth the scanner recurses into.
    pub scan_depth: u32,
    /// File extensions (lower-case, no dot) treated as music.
    pub extensions: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            year_threshold: DEFAULT_YEAR_THRESHOLD,
            history_limit: None,
            queue_limit: None,
            scan_depth: DEFAULT_SCAN_DEPTH,
            extensions: ["mp3", "wav", "flac", "ogg", "m4a"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl CatalogConfig {
    /// Whether a file extension is one the scanner accepts. Comparison is
    /// case-insensitive (`Track.MP3` is music).
    #[must_use]
    pub fn is_music_extension(&self, ext: &str) -> bool {
        let ext = ext.to_lowercase();
        self.extensions.iter().any(|e| *e == ext)
    }
}

/// Returns the platform music directory (e.g. `~/Music` on Linux),
/// falling back to `<home>/Music` when the platform does not report one.
///
/// # Errors
///
/// Fails only when neither a music nor a home directory can be
/// determined for the current user.
pub fn default_music_dir() -> Result<PathBuf> {
    if let Some(dir) = dirs::audio_dir() {
        return Ok(dir);
    }
    let home = dirs::home_dir()
        .context("Could not determine a music directory: no platform audio or home directory")?;
    Ok(home.join("Music"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = CatalogConfig::default();
        assert_eq!(config.year_threshold, DEFAULT_YEAR_THRESHOLD);
        assert_eq!(config.scan_depth, DEFAULT_SCAN_DEPTH);
        assert!(config.history_limit.is_none());
        assert!(config.queue_limit.is_none());
        assert!(config.extensions.contains(&"mp3".to_string()));
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        let config = CatalogConfig::default();
        assert!(config.is_music_extension("mp3"));
        assert!(config.is_music_extension("FLAC"));
        assert!(!config.is_music_extension("txt"));
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = CatalogConfig {
            history_limit: Some(50),
            ..CatalogConfig::default()
        };
        let json = serde_json::to_string(&config).expect("serializes");
        let back: CatalogConfig = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back.history_limit, Some(50));
        assert_eq!(back.year_threshold, config.year_threshold);
    }
}
