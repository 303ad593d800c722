//! Genre multi-list: a secondary, non-owning grouping of songs by genre.
//!
//! A chain of bucket headers (one per distinct genre string, exact match)
//! each carries the ids of its songs in insertion order. Buckets are
//! pruned as soon as they empty, so `genres()` only ever reports genres
//! that actually have live songs.

use crate::song::SongId;

struct GenreBucket {
    name: String,
    ids: Vec<SongId>,
}

/// Mapping from genre name to its insertion-ordered song chain.
#[derive(Default)]
pub struct GenreIndex {
    buckets: Vec<GenreBucket>,
}

impl GenreIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the song id to its genre's bucket, creating the bucket at
    /// the end of the header chain if this is the genre's first song.
    pub fn index(&mut self, genre: &str, id: SongId) {
        match self.buckets.iter_mut().find(|b| b.name == genre) {
            Some(bucket) => bucket.ids.push(id),
            None => self.buckets.push(GenreBucket {
                name: genre.to_string(),
                ids: vec![id],
            }),
        }
    }

    /// Removes the id from the named bucket, pruning the bucket when it
    /// empties. Returns whether anything was removed.
    pub fn unindex(&mut self, genre: &str, id: SongId) -> bool {
        let Some(pos) = self.buckets.iter().position(|b| b.name == genre) else {
            return false;
        };
        let bucket = &mut self.buckets[pos];
        let Some(idx) = bucket.ids.iter().position(|&s| s == id) else {
            return false;
        };
        bucket.ids.remove(idx);
        if bucket.ids.is_empty() {
            self.buckets.remove(pos);
        }
        true
    }

    /// Names of all non-empty buckets, in bucket creation order.
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|b| b.name.as_str())
    }

    /// Ids in the named bucket, in insertion order. Empty for unknown
    /// genres.
    #[must_use]
    pub fn songs_in(&self, genre: &str) -> &[SongId] {
        self.buckets
            .iter()
            .find(|b| b.name == genre)
            .map_or(&[], |b| b.ids.as_slice())
    }

    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}
