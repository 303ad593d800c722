//! Typed errors for catalog operations.
//!
//! Every index-mutating operation is atomic per call: validation happens
//! before any structure is touched, so a returned error means no partial
//! update is visible. Empty-structure reads (pop, dequeue, cursor steps)
//! are not errors — they return `None`.

use crate::song::SongId;
use thiserror::Error;

/// Errors the catalog surface can report to its callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The id does not refer to a live song in the master list.
    #[error("no song with id {0} in the catalog")]
    NotFound(SongId),

    /// A scan record was missing required fields and was rejected whole.
    #[error("invalid scan record for `{path}`: {reason}")]
    InvalidRecord { path: String, reason: String },

    /// The record's path is already catalogued. The scan collaborator does
    /// not deduplicate, so this is detected here.
    #[error("`{0}` is already catalogued")]
    DuplicatePath(String),

    /// No playlist is registered under this name.
    #[error("no playlist named `{0}`")]
    PlaylistNotFound(String),

    /// A playlist with this name already exists.
    #[error("playlist `{0}` already exists")]
    DuplicatePlaylist(String),
}

/// Convenience alias used throughout the catalog modules.
pub type Result<T> = std::result::Result<T, CatalogError>;
