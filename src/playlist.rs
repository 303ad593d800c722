//! User-defined playlists backed by a doubly linked list with a cursor.
//!
//! Nodes live in an arena keyed by a playlist-local counter and link both
//! ways by key, so forward and backward traversal are both O(n) walks with
//! O(1) steps. The cursor marks the "current" entry for back/forward
//! navigation; stepping past either end reports no movement (`None`) and
//! leaves the cursor where it was.
//!
//! Playlists are independent of each other: a song may appear in zero,
//! one, or many playlists, any number of times in each.

use crate::song::SongId;
use std::collections::HashMap;

type NodeKey = usize;

struct PlaylistNode {
    song: SongId,
    prev: Option<NodeKey>,
    next: Option<NodeKey>,
}

/// One named, ordered sequence of song references.
pub struct Playlist {
    name: String,
    nodes: HashMap<NodeKey, PlaylistNode>,
    head: Option<NodeKey>,
    tail: Option<NodeKey>,
    cursor: Option<NodeKey>,
    next_key: NodeKey,
}

impl Playlist {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            nodes: HashMap::new(),
            head: None,
            tail: None,
            cursor: None,
            next_key: 0,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends a song reference at the tail.
    pub fn push_back(&mut self, song: SongId) {
        let key = self.fresh_key();
        let node = PlaylistNode {
            song,
            prev: self.tail,
            next: None,
        };
        self.nodes.insert(key, node);
        match self.tail {
            Some(tail) => {
                if let Some(t) = self.nodes.get_mut(&tail) {
                    t.next = Some(key);
                }
            }
            None => self.head = Some(key),
        }
        self.tail = Some(key);
    }

    /// Inserts a song reference before position `pos`; positions at or
    /// past the end append.
    pub fn insert_at(&mut self, pos: usize, song: SongId) {
        let Some(at) = self.key_at(pos) else {
            self.push_back(song);
            return;
        };
        let key = self.fresh_key();
        let before = self.nodes.get(&at).and_then(|n| n.prev);
        self.nodes.insert(
            key,
            PlaylistNode {
                song,
                prev: before,
                next: Some(at),
            },
        );
        if let Some(n) = self.nodes.get_mut(&at) {
            n.prev = Some(key);
        }
        match before {
            Some(b) => {
                if let Some(n) = self.nodes.get_mut(&b) {
                    n.next = Some(key);
                }
            }
            None => self.head = Some(key),
        }
    }

    /// Removes the entry at `pos`, returning its song id. The cursor, if
    /// it sat on the removed node, retreats to the predecessor so the next
    /// forward step lands on the removed node's successor.
    pub fn remove_at(&mut self, pos: usize) -> Option<SongId> {
        let key = self.key_at(pos)?;
        self.unlink(key)
    }

    /// Removes every occurrence of the song, returning how many entries
    /// were dropped. Used by the catalog's delete cascade.
    pub fn remove_song(&mut self, song: SongId) -> usize {
        let mut removed = 0;
        let mut cur = self.head;
        while let Some(key) = cur {
            cur = self.nodes.get(&key).and_then(|n| n.next);
            if self.nodes.get(&key).is_some_and(|n| n.song == song) {
                self.unlink(key);
                removed += 1;
            }
        }
        removed
    }

    /// Advances the cursor one step and returns the new current song. An
    /// unset cursor starts at the head. At the tail, returns `None` and
    /// does not move.
    pub fn next(&mut self) -> Option<SongId> {
        let target = match self.cursor {
            None => self.head,
            Some(c) => self.nodes.get(&c).and_then(|n| n.next),
        }?;
        self.cursor = Some(target);
        self.nodes.get(&target).map(|n| n.song)
    }

    /// Steps the cursor back one entry. At the head (or with an unset
    /// cursor), returns `None` and does not move.
    pub fn prev(&mut self) -> Option<SongId> {
        let target = self
            .cursor
            .and_then(|c| self.nodes.get(&c).and_then(|n| n.prev))?;
        self.cursor = Some(target);
        self.nodes.get(&target).map(|n| n.song)
    }

    /// Song under the cursor, if set.
    #[must_use]
    pub fn current(&self) -> Option<SongId> {
        self.cursor.and_then(|c| self.nodes.get(&c)).map(|n| n.song)
    }

    /// Resets the cursor to the unset state (before the head).
    pub fn rewind(&mut self) {
        self.cursor = None;
    }

    /// Forward traversal, head to tail.
    #[must_use]
    pub fn to_vec(&self) -> Vec<SongId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut cur = self.head;
        while let Some(key) = cur {
            let node = &self.nodes[&key];
            out.push(node.song);
            cur = node.next;
        }
        out
    }

    /// Backward traversal, tail to head.
    #[must_use]
    pub fn to_rev_vec(&self) -> Vec<SongId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut cur = self.tail;
        while let Some(key) = cur {
            let node = &self.nodes[&key];
            out.push(node.song);
            cur = node.prev;
        }
        out
    }

    fn fresh_key(&mut self) -> NodeKey {
        let key = self.next_key;
        self.next_key += 1;
        key
    }

    fn key_at(&self, pos: usize) -> Option<NodeKey> {
        let mut cur = self.head;
        for _ in 0..pos {
            cur = self.nodes.get(&cur?).and_then(|n| n.next);
        }
        cur
    }

    fn unlink(&mut self, key: NodeKey) -> Option<SongId> {
        let node = self.nodes.remove(&key)?;
        match node.prev {
            Some(p) => {
                if let Some(n) = self.nodes.get_mut(&p) {
                    n.next = node.next;
                }
            }
            None => self.head = node.next,
        }
        match node.next {
            Some(nx) => {
                if let Some(n) = self.nodes.get_mut(&nx) {
                    n.prev = node.prev;
                }
            }
            None => self.tail = node.prev,
        }
        if self.cursor == Some(key) {
            self.cursor = node.prev;
        }
        Some(node.song)
    }
}
