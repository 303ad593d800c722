//! Listening history (LIFO) and up-next queue (FIFO).
//!
//! Both structures hold bare song ids and deliberately do not check that
//! an id still refers to a live song: the orchestrator filters stale ids
//! lazily on read (skip-and-continue), which avoids a reverse index from
//! songs into these structures.
//!
//! Both are unbounded by default. When a bound is configured, overflow
//! evicts the oldest entry rather than rejecting the new one.

use crate::song::SongId;
use std::collections::VecDeque;

/// Most-recently-played ids, top of the stack last.
#[derive(Default)]
pub struct HistoryStack {
    items: Vec<SongId>,
    limit: Option<usize>,
}

impl HistoryStack {
    #[must_use]
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            items: Vec::new(),
            limit,
        }
    }

    /// Records a play transition. A push matching the current top is a
    /// no-op: the top is always the most recent *distinct* playback.
    pub fn push(&mut self, id: SongId) {
        if self.peek() == Some(id) {
            return;
        }
        if let Some(limit) = self.limit {
            if limit == 0 {
                return;
            }
            if self.items.len() >= limit {
                self.items.remove(0); // evict oldest
            }
        }
        self.items.push(id);
    }

    pub fn pop(&mut self) -> Option<SongId> {
        self.items.pop()
    }

    #[must_use]
    pub fn peek(&self) -> Option<SongId> {
        self.items.last().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Most recent first.
    pub fn iter(&self) -> impl Iterator<Item = SongId> + '_ {
        self.items.iter().rev().copied()
    }
}

/// Pending ids in strict FIFO order. Repeats are allowed.
#[derive(Default)]
pub struct UpNextQueue {
    items: VecDeque<SongId>,
    limit: Option<usize>,
}

impl UpNextQueue {
    #[must_use]
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            items: VecDeque::new(),
            limit,
        }
    }

    pub fn enqueue(&mut self, id: SongId) {
        if let Some(limit) = self.limit {
            if limit == 0 {
                return;
            }
            if self.items.len() >= limit {
                self.items.pop_front(); // evict oldest
            }
        }
        self.items.push_back(id);
    }

    /// Puts an id at the *front* of the queue, used when "previous"
    /// re-queues the formerly current song. When bounded and full, the
    /// newest entry makes room so the re-queued id is not lost.
    pub fn requeue_front(&mut self, id: SongId) {
        if let Some(limit) = self.limit {
            if limit == 0 {
                return;
            }
            if self.items.len() >= limit {
                self.items.pop_back();
            }
        }
        self.items.push_front(id);
    }

    pub fn dequeue(&mut self) -> Option<SongId> {
        self.items.pop_front()
    }

    #[must_use]
    pub fn peek(&self) -> Option<SongId> {
        self.items.front().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Front (next to play) first.
    pub fn iter(&self) -> impl Iterator<Item = SongId> + '_ {
        self.items.iter().copied()
    }
}
