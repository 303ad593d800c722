//! Song records and the raw records produced by a music scan.
//!
//! A [`Song`] is the canonical, id-identified value every index in the
//! catalog refers to. Ids are assigned once at ingestion and stay stable
//! for the whole process lifetime; they are never reused while the record
//! lives in the master list.

use serde::{Deserialize, Serialize};

/// Stable identifier for one catalogued song.
pub type SongId = u32;

/// Placeholder artist used when a scan cannot infer one.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Placeholder genre used when a scan record carries none.
pub const UNKNOWN_GENRE: &str = "Unknown";

/// Canonical data for one track in the catalog.
///
/// All secondary structures (genre buckets, the title tree, the similarity
/// graph, history, queue, playlists) store the `id`, never the value — the
/// master list is the single owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub artist: String,
    pub genre: String,
    /// Release year, when the scan collaborator could infer one.
    pub year: Option<u32>,
    /// Derived at playback time by the player, not authoritative here.
    pub duration_secs: Option<u32>,
    /// Path the embedding player can open. Unique across the catalog.
    pub path: String,
    /// Mutable, in-memory only. Lost on restart like everything else.
    pub favorite: bool,
    /// How many times playback of this song was started.
    pub play_count: u32,
}

impl Song {
    /// Builds a song from a validated scan record, filling the optional
    /// artist/genre fields with their documented placeholders.
    #[must_use]
    pub fn from_record(id: SongId, record: ScanRecord) -> Self {
        Self {
            id,
            title: record.title,
            artist: record
                .artist
                .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            genre: record.genre.unwrap_or_else(|| UNKNOWN_GENRE.to_string()),
            year: record.year,
            duration_secs: None,
            path: record.path,
            favorite: false,
            play_count: 0,
        }
    }

    /// Lower-cased title, the key the title search tree orders by.
    #[must_use]
    pub fn title_key(&self) -> String {
        self.title.to_lowercase()
    }
}

/// Raw record handed over by the filesystem-scan collaborator.
///
/// The scanner performs no deduplication; the catalog rejects duplicate
/// paths itself on ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub path: String,
    pub title: String,
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub year: Option<u32>,
}
