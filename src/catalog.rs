//! Catalog orchestrator: the one component allowed to mutate the indexes.
//!
//! The orchestrator owns the master list and every derived structure, and
//! every mutation funnels through it, so after each call all indexes
//! reflect the master list exactly: no dangling references, no missing
//! entries. Each mutating method validates before touching any structure,
//! which makes every call all-or-nothing.
//!
//! The one documented exception is the history stack and up-next queue:
//! deleting a song leaves their entries stale, and reads filter those out
//! lazily (skip-and-continue) instead of paying for a reverse index.
//!
//! Every mutating method takes `&mut self`, so the borrow checker enforces
//! the whole-catalog critical section; an embedding request layer wraps
//! the catalog in a single coarse `Mutex` and gets the same guarantee
//! across threads.

use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};
use crate::genre::GenreIndex;
use crate::graph::{similarity, SimilarityGraph};
use crate::master::{self, MasterList};
use crate::playback::{HistoryStack, UpNextQueue};
use crate::playlist::Playlist;
use crate::song::{ScanRecord, Song, SongId};
use crate::title_tree::TitleTree;
use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Partial metadata update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SongUpdate {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub year: Option<u32>,
}

/// Outcome of ingesting a whole scan: rejections are per record and never
/// abort the rest of the batch.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub added: Vec<SongId>,
    pub rejected: Vec<(String, CatalogError)>,
}

/// The multi-index catalog. See the module docs for the consistency
/// contract.
pub struct Catalog {
    config: CatalogConfig,
    master: MasterList,
    genres: GenreIndex,
    titles: TitleTree,
    graph: SimilarityGraph,
    history: HistoryStack,
    up_next: UpNextQueue,
    playlists: BTreeMap<String, Playlist>,
    /// Reverse map from normalized path to id, for duplicate rejection.
    paths: HashMap<String, SongId>,
    active: Option<SongId>,
    next_id: SongId,
}

impl Catalog {
    #[must_use]
    pub fn new(config: CatalogConfig) -> Self {
        let history = HistoryStack::new(config.history_limit);
        let up_next = UpNextQueue::new(config.queue_limit);
        Self {
            config,
            master: MasterList::new(),
            genres: GenreIndex::new(),
            titles: TitleTree::new(),
            graph: SimilarityGraph::new(),
            history,
            up_next,
            playlists: BTreeMap::new(),
            paths: HashMap::new(),
            active: None,
            next_id: 1,
        }
    }

    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    // --------- ingestion ---------

    /// Ingests one scan record: assigns a fresh id, appends to the master
    /// list and derives the genre, title and graph entries in one step.
    ///
    /// Connecting the new song against every existing one is O(n), which
    /// makes a full scan O(n²) — accepted for in-memory catalog sizes.
    ///
    /// # Errors
    ///
    /// [`CatalogError::InvalidRecord`] for a missing title or path,
    /// [`CatalogError::DuplicatePath`] for an already-catalogued file.
    /// Rejected records leave every structure untouched.
    pub fn ingest(&mut self, record: ScanRecord) -> Result<SongId> {
        if record.title.trim().is_empty() {
            return Err(CatalogError::InvalidRecord {
                path: record.path,
                reason: "missing title".to_string(),
            });
        }
        if record.path.trim().is_empty() {
            return Err(CatalogError::InvalidRecord {
                path: record.path,
                reason: "missing path".to_string(),
            });
        }
        if self.paths.contains_key(&record.path) {
            return Err(CatalogError::DuplicatePath(record.path));
        }

        let id = self.next_id;
        let song = Song::from_record(id, record);

        // Similarity against all existing songs, computed before any
        // structure changes.
        let edges: Vec<(SongId, u8)> = self
            .master
            .iter()
            .map(|other| (other.id, similarity(&song, other, self.config.year_threshold)))
            .filter(|&(_, strength)| strength > 0)
            .collect();

        self.next_id += 1;
        self.paths.insert(song.path.clone(), id);
        self.genres.index(&song.genre, id);
        self.titles.insert(&song.title, id);
        self.graph.add_node(id);
        for (other, strength) in edges {
            self.graph.connect(id, other, strength);
        }
        debug!("Ingested song {id}: \"{}\"", song.title);
        self.master.append(song);
        Ok(id)
    }

    /// Ingests a whole scan, skipping (and reporting) rejected records.
    pub fn ingest_scan(&mut self, records: Vec<ScanRecord>) -> IngestReport {
        let mut report = IngestReport::default();
        for record in records {
            let path = record.path.clone();
            match self.ingest(record) {
                Ok(id) => report.added.push(id),
                Err(err) => {
                    warn!("Rejected scan record `{path}`: {err}");
                    report.rejected.push((path, err));
                }
            }
        }
        info!(
            "Ingested {} songs ({} rejected)",
            report.added.len(),
            report.rejected.len()
        );
        report
    }

    // --------- mutation ---------

    /// Applies a partial metadata update. Genre and title changes remove
    /// the old index entry and insert a fresh one — entries are never
    /// edited in place, which is what keeps the bucket and tree invariants
    /// intact. Similarity edges are recomputed when any edge-relevant
    /// field (artist, genre, year) changed.
    ///
    /// # Errors
    ///
    /// [`CatalogError::NotFound`] for an unknown id,
    /// [`CatalogError::InvalidRecord`] for an empty replacement title;
    /// both are checked before anything is modified.
    pub fn update_song(&mut self, id: SongId, update: SongUpdate) -> Result<()> {
        let old = self.master.get(id).cloned().ok_or(CatalogError::NotFound(id))?;
        if let Some(title) = &update.title {
            if title.trim().is_empty() {
                return Err(CatalogError::InvalidRecord {
                    path: old.path,
                    reason: "title cannot be empty".to_string(),
                });
            }
        }

        let title = update.title.unwrap_or_else(|| old.title.clone());
        let artist = update.artist.unwrap_or_else(|| old.artist.clone());
        let genre = update.genre.unwrap_or_else(|| old.genre.clone());
        let year = update.year.or(old.year);

        if title != old.title {
            self.titles.remove(&old.title, id);
            self.titles.insert(&title, id);
        }
        if genre != old.genre {
            self.genres.unindex(&old.genre, id);
            self.genres.index(&genre, id);
        }
        let edges_dirty = artist != old.artist || genre != old.genre || year != old.year;

        if let Some(song) = self.master.get_mut(id) {
            song.title = title;
            song.artist = artist;
            song.genre = genre;
            song.year = year;
        }
        if edges_dirty {
            self.recompute_edges(id);
        }
        debug!("Updated song {id}");
        Ok(())
    }

    /// Removes the song from the master list, its genre bucket, the title
    /// tree, the graph and every playlist in one call. History and queue
    /// entries go stale and are filtered on the next read.
    ///
    /// # Errors
    ///
    /// [`CatalogError::NotFound`] when the id is not live.
    pub fn delete_song(&mut self, id: SongId) -> Result<Song> {
        let song = self.master.remove(id).ok_or(CatalogError::NotFound(id))?;
        self.genres.unindex(&song.genre, id);
        self.titles.remove(&song.title, id);
        self.graph.remove_node(id);
        self.paths.remove(&song.path);
        for playlist in self.playlists.values_mut() {
            playlist.remove_song(id);
        }
        if self.active == Some(id) {
            self.active = None;
        }
        info!("Deleted song {id}: \"{}\"", song.title);
        Ok(song)
    }

    /// Flips the in-memory favorite flag.
    ///
    /// # Errors
    ///
    /// [`CatalogError::NotFound`] when the id is not live.
    pub fn set_favorite(&mut self, id: SongId, favorite: bool) -> Result<()> {
        let song = self.master.get_mut(id).ok_or(CatalogError::NotFound(id))?;
        song.favorite = favorite;
        Ok(())
    }

    fn recompute_edges(&mut self, id: SongId) {
        self.graph.remove_node(id);
        self.graph.add_node(id);
        let Some(song) = self.master.get(id) else {
            return;
        };
        let edges: Vec<(SongId, u8)> = self
            .master
            .iter()
            .filter(|other| other.id != id)
            .map(|other| (other.id, similarity(song, other, self.config.year_threshold)))
            .filter(|&(_, strength)| strength > 0)
            .collect();
        for (other, strength) in edges {
            self.graph.connect(id, other, strength);
        }
    }

    // --------- queries ---------

    /// Lazy traversal of all live songs in ingestion order.
    #[must_use]
    pub fn iter(&self) -> master::Iter<'_> {
        self.master.iter()
    }

    #[must_use]
    pub fn list_all(&self) -> Vec<&Song> {
        self.master.iter().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.master.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.master.is_empty()
    }

    #[must_use]
    pub fn find_by_id(&self, id: SongId) -> Option<&Song> {
        self.master.get(id)
    }

    /// Case-insensitive title search: exact matches come from the tree
    /// (O(log n) average on a balanced shape); when there are none, a
    /// substring pass runs over the in-order traversal — an explicit
    /// linear fallback, since a plain BST cannot answer substring queries
    /// by key comparison.
    #[must_use]
    pub fn search_by_title(&self, query: &str) -> Vec<&Song> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let exact: Vec<&Song> = self
            .titles
            .exact(query)
            .iter()
            .filter_map(|&id| self.master.get(id))
            .collect();
        if !exact.is_empty() {
            return exact;
        }
        let needle = query.to_lowercase();
        self.titles
            .in_order()
            .into_iter()
            .filter_map(|id| self.master.get(id))
            .filter(|song| song.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Genres that currently have at least one live song.
    #[must_use]
    pub fn list_genres(&self) -> Vec<&str> {
        self.genres.genres().collect()
    }

    /// Live songs in the genre's bucket, in insertion order.
    #[must_use]
    pub fn songs_in_genre(&self, genre: &str) -> Vec<&Song> {
        self.genres
            .songs_in(genre)
            .iter()
            .filter_map(|&id| self.master.get(id))
            .collect()
    }

    /// Similar songs ordered by how many criteria matched, then by
    /// ingestion order. Empty for unknown or isolated ids; never contains
    /// the song itself.
    #[must_use]
    pub fn recommend(&self, id: SongId, limit: usize) -> Vec<&Song> {
        self.graph
            .recommendations(id, limit)
            .into_iter()
            .filter_map(|neighbor| self.master.get(neighbor))
            .collect()
    }

    // --------- playback ---------

    /// Starts playback of a song: records it on the history stack (unless
    /// it is already the top), marks it active and bumps its play count.
    ///
    /// # Errors
    ///
    /// [`CatalogError::NotFound`] when the id is not live.
    pub fn play_song(&mut self, id: SongId) -> Result<&Song> {
        if !self.master.contains(id) {
            return Err(CatalogError::NotFound(id));
        }
        self.history.push(id);
        self.active = Some(id);
        if let Some(song) = self.master.get_mut(id) {
            song.play_count += 1;
            debug!("Playing \"{}\" (play #{})", song.title, song.play_count);
        }
        self.master.get(id).ok_or(CatalogError::NotFound(id))
    }

    /// Advances playback: first live entry of the up-next queue, else the
    /// strongest recommendation for the active song, else a random live
    /// song. Returns `None` only on an empty catalog.
    pub fn play_next(&mut self) -> Option<&Song> {
        let mut next = self.pop_queue_live();
        if next.is_none() {
            if let Some(current) = self.active {
                next = self.graph.recommendations(current, 1).first().copied();
            }
        }
        if next.is_none() {
            next = self.random_live();
        }
        let id = next?;
        self.play_song(id).ok()
    }

    /// Steps back: pops the current song off the history stack, re-queues
    /// it at the *front* of the up-next queue and resumes the previous
    /// entry. With nothing earlier, reports no movement (`None`) and
    /// leaves all state as it was. Stale ids are discarded along the way.
    pub fn play_previous(&mut self) -> Option<&Song> {
        let current = loop {
            let id = self.history.pop()?;
            if self.master.contains(id) {
                break id;
            }
            debug!("Discarding stale history entry {id}");
        };
        let previous = loop {
            match self.history.peek() {
                Some(id) if self.master.contains(id) => break Some(id),
                Some(id) => {
                    debug!("Discarding stale history entry {id}");
                    self.history.pop();
                }
                None => break None,
            }
        };
        match previous {
            Some(prev) => {
                self.up_next.requeue_front(current);
                self.active = Some(prev);
                self.master.get(prev)
            }
            None => {
                self.history.push(current);
                None
            }
        }
    }

    /// Appends a song to the up-next queue. Repeats are allowed.
    ///
    /// # Errors
    ///
    /// [`CatalogError::NotFound`] when the id is not live at enqueue time.
    pub fn enqueue(&mut self, id: SongId) -> Result<()> {
        if !self.master.contains(id) {
            return Err(CatalogError::NotFound(id));
        }
        self.up_next.enqueue(id);
        Ok(())
    }

    /// Removes and returns the next queued song, silently discarding
    /// entries whose song has since been deleted.
    pub fn dequeue(&mut self) -> Option<&Song> {
        let id = self.pop_queue_live()?;
        self.master.get(id)
    }

    /// Most recent plays first, stale entries skipped, at most `limit`.
    #[must_use]
    pub fn history(&self, limit: usize) -> Vec<&Song> {
        self.history
            .iter()
            .filter_map(|id| self.master.get(id))
            .take(limit)
            .collect()
    }

    /// Pending queue in play order, stale entries skipped.
    #[must_use]
    pub fn queued(&self) -> Vec<&Song> {
        self.up_next
            .iter()
            .filter_map(|id| self.master.get(id))
            .collect()
    }

    /// The song playback currently points at, if any.
    #[must_use]
    pub fn active(&self) -> Option<&Song> {
        self.active.and_then(|id| self.master.get(id))
    }

    fn pop_queue_live(&mut self) -> Option<SongId> {
        while let Some(id) = self.up_next.dequeue() {
            if self.master.contains(id) {
                return Some(id);
            }
            debug!("Discarding stale queue entry {id}");
        }
        None
    }

    fn random_live(&self) -> Option<SongId> {
        if self.master.is_empty() {
            return None;
        }
        let skip = rand::thread_rng().gen_range(0..self.master.len());
        self.master.iter().nth(skip).map(|song| song.id)
    }

    // --------- playlists ---------

    /// Registers an empty playlist.
    ///
    /// # Errors
    ///
    /// [`CatalogError::DuplicatePlaylist`] when the name is taken.
    pub fn create_playlist(&mut self, name: &str) -> Result<()> {
        if self.playlists.contains_key(name) {
            return Err(CatalogError::DuplicatePlaylist(name.to_string()));
        }
        self.playlists.insert(name.to_string(), Playlist::new(name));
        Ok(())
    }

    /// Drops a playlist; the songs themselves are untouched.
    ///
    /// # Errors
    ///
    /// [`CatalogError::PlaylistNotFound`] for an unknown name.
    pub fn delete_playlist(&mut self, name: &str) -> Result<()> {
        self.playlists
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| CatalogError::PlaylistNotFound(name.to_string()))
    }

    #[must_use]
    pub fn playlist_names(&self) -> Vec<&str> {
        self.playlists.keys().map(String::as_str).collect()
    }

    /// Appends a live song to the named playlist.
    ///
    /// # Errors
    ///
    /// [`CatalogError::PlaylistNotFound`] / [`CatalogError::NotFound`].
    pub fn add_to_playlist(&mut self, name: &str, id: SongId) -> Result<()> {
        if !self.master.contains(id) {
            return Err(CatalogError::NotFound(id));
        }
        let playlist = self
            .playlists
            .get_mut(name)
            .ok_or_else(|| CatalogError::PlaylistNotFound(name.to_string()))?;
        playlist.push_back(id);
        Ok(())
    }

    /// Inserts a live song before `pos` (positions past the end append).
    ///
    /// # Errors
    ///
    /// [`CatalogError::PlaylistNotFound`] / [`CatalogError::NotFound`].
    pub fn insert_in_playlist(&mut self, name: &str, pos: usize, id: SongId) -> Result<()> {
        if !self.master.contains(id) {
            return Err(CatalogError::NotFound(id));
        }
        let playlist = self
            .playlists
            .get_mut(name)
            .ok_or_else(|| CatalogError::PlaylistNotFound(name.to_string()))?;
        playlist.insert_at(pos, id);
        Ok(())
    }

    /// Removes the playlist entry at `pos`, returning its song id, or
    /// `None` when the position is out of range.
    ///
    /// # Errors
    ///
    /// [`CatalogError::PlaylistNotFound`] for an unknown name.
    pub fn remove_from_playlist(&mut self, name: &str, pos: usize) -> Result<Option<SongId>> {
        let playlist = self
            .playlists
            .get_mut(name)
            .ok_or_else(|| CatalogError::PlaylistNotFound(name.to_string()))?;
        Ok(playlist.remove_at(pos))
    }

    /// Steps the playlist cursor forward; `Ok(None)` means the cursor is
    /// at the end (no movement, not an error).
    ///
    /// # Errors
    ///
    /// [`CatalogError::PlaylistNotFound`] for an unknown name.
    pub fn playlist_next(&mut self, name: &str) -> Result<Option<&Song>> {
        let playlist = self
            .playlists
            .get_mut(name)
            .ok_or_else(|| CatalogError::PlaylistNotFound(name.to_string()))?;
        let id = playlist.next();
        Ok(id.and_then(|id| self.master.get(id)))
    }

    /// Steps the playlist cursor backward; `Ok(None)` means the cursor is
    /// at the start (no movement, not an error).
    ///
    /// # Errors
    ///
    /// [`CatalogError::PlaylistNotFound`] for an unknown name.
    pub fn playlist_prev(&mut self, name: &str) -> Result<Option<&Song>> {
        let playlist = self
            .playlists
            .get_mut(name)
            .ok_or_else(|| CatalogError::PlaylistNotFound(name.to_string()))?;
        let id = playlist.prev();
        Ok(id.and_then(|id| self.master.get(id)))
    }

    /// Playlist contents in forward order.
    ///
    /// # Errors
    ///
    /// [`CatalogError::PlaylistNotFound`] for an unknown name.
    pub fn playlist_songs(&self, name: &str) -> Result<Vec<&Song>> {
        let playlist = self
            .playlists
            .get(name)
            .ok_or_else(|| CatalogError::PlaylistNotFound(name.to_string()))?;
        Ok(playlist
            .to_vec()
            .into_iter()
            .filter_map(|id| self.master.get(id))
            .collect())
    }

    /// Playlist contents in reverse order.
    ///
    /// # Errors
    ///
    /// [`CatalogError::PlaylistNotFound`] for an unknown name.
    pub fn playlist_songs_rev(&self, name: &str) -> Result<Vec<&Song>> {
        let playlist = self
            .playlists
            .get(name)
            .ok_or_else(|| CatalogError::PlaylistNotFound(name.to_string()))?;
        Ok(playlist
            .to_rev_vec()
            .into_iter()
            .filter_map(|id| self.master.get(id))
            .collect())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}
