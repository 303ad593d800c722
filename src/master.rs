//! Singly linked master list: the authoritative, insertion-ordered
//! enumeration of every song in the catalog.
//!
//! The list owns the [`Song`] values. Nodes live in an arena keyed by song
//! id and link forward by id, which keeps appends O(1) via the tail link
//! while removal and positional lookup stay the documented O(n) walk.
//! Every other catalog structure stores bare ids into this arena, so a
//! removed song can never leave a dangling owner behind.

use crate::song::{Song, SongId};
use std::collections::HashMap;

struct MasterNode {
    song: Song,
    next: Option<SongId>,
}

/// Insertion-ordered, singly linked list of all live songs.
#[derive(Default)]
pub struct MasterList {
    nodes: HashMap<SongId, MasterNode>,
    head: Option<SongId>,
    tail: Option<SongId>,
    len: usize,
}

impl MasterList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a song at the tail in O(1).
    ///
    /// The song's id must be fresh; the orchestrator assigns ids and never
    /// reuses one while its record is live.
    pub fn append(&mut self, song: Song) {
        let id = song.id;
        debug_assert!(
            !self.nodes.contains_key(&id),
            "master list ids are unique"
        );
        self.nodes.insert(id, MasterNode { song, next: None });
        match self.tail {
            Some(tail) => {
                if let Some(node) = self.nodes.get_mut(&tail) {
                    node.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
    }

    /// Unlinks and returns the song with this id, walking the chain in
    /// O(n). Returns `None` when the id is not live.
    pub fn remove(&mut self, id: SongId) -> Option<Song> {
        if !self.nodes.contains_key(&id) {
            return None;
        }

        // Find the predecessor so the chain can be relinked.
        let mut prev: Option<SongId> = None;
        let mut cur = self.head;
        while let Some(cur_id) = cur {
            if cur_id == id {
                break;
            }
            prev = cur;
            cur = self.nodes.get(&cur_id).and_then(|n| n.next);
        }

        let node = self.nodes.remove(&id)?;
        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.nodes.get_mut(&prev_id) {
                    prev_node.next = node.next;
                }
            }
            None => self.head = node.next,
        }
        if self.tail == Some(id) {
            self.tail = prev;
        }
        self.len -= 1;
        Some(node.song)
    }

    /// Direct arena lookup. The id doubles as the owning index, so this is
    /// O(1) even though a positional find would be O(n).
    #[must_use]
    pub fn get(&self, id: SongId) -> Option<&Song> {
        self.nodes.get(&id).map(|n| &n.song)
    }

    pub fn get_mut(&mut self, id: SongId) -> Option<&mut Song> {
        self.nodes.get_mut(&id).map(|n| &mut n.song)
    }

    #[must_use]
    pub fn contains(&self, id: SongId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Lazy, restartable traversal in insertion order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Forward iterator over the master chain.
pub struct Iter<'a> {
    nodes: &'a HashMap<SongId, MasterNode>,
    cursor: Option<SongId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Song;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.nodes.get(&id)?;
        self.cursor = node.next;
        Some(&node.song)
    }
}

impl<'a> IntoIterator for &'a MasterList {
    type Item = &'a Song;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
