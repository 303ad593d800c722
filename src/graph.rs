//! Similarity graph over song ids.
//!
//! Adjacency-list graph whose undirected edges connect songs that share an
//! artist, share a genre, or were released within a configurable number of
//! years of each other. Edge strength counts how many of those criteria
//! matched, and drives recommendation ordering.
//!
//! Edges are added incrementally: each newly ingested song is compared
//! against every existing song (O(n) per ingest, O(n²) across a full
//! scan). Metadata edits recompute the affected song's edges from scratch
//! rather than patching them.

use crate::song::{Song, SongId};
use std::collections::HashMap;

/// One directed half of an undirected similarity edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub to: SongId,
    /// Number of similarity criteria that matched (1..=3).
    pub strength: u8,
}

/// Non-owning adjacency index over live song ids.
#[derive(Default)]
pub struct SimilarityGraph {
    adjacency: HashMap<SongId, Vec<Edge>>,
}

impl SimilarityGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node with no edges. A node exists for every live song,
    /// neighbors or not.
    pub fn add_node(&mut self, id: SongId) {
        self.adjacency.entry(id).or_default();
    }

    /// Adds a symmetric edge of the given strength. Self-edges and
    /// duplicates are skipped; both endpoints must already be nodes.
    pub fn connect(&mut self, a: SongId, b: SongId, strength: u8) {
        if a == b || strength == 0 {
            return;
        }
        debug_assert!(
            self.adjacency.contains_key(&a) && self.adjacency.contains_key(&b),
            "edges may only connect registered nodes"
        );
        Self::attach(&mut self.adjacency, a, b, strength);
        Self::attach(&mut self.adjacency, b, a, strength);
    }

    fn attach(adjacency: &mut HashMap<SongId, Vec<Edge>>, from: SongId, to: SongId, strength: u8) {
        let edges = adjacency.entry(from).or_default();
        if !edges.iter().any(|e| e.to == to) {
            edges.push(Edge { to, strength });
        }
    }

    /// Drops the node and every edge touching it.
    pub fn remove_node(&mut self, id: SongId) {
        if self.adjacency.remove(&id).is_none() {
            return;
        }
        for edges in self.adjacency.values_mut() {
            edges.retain(|e| e.to != id);
        }
    }

    #[must_use]
    pub fn contains(&self, id: SongId) -> bool {
        self.adjacency.contains_key(&id)
    }

    /// Neighbors in edge insertion order (i.e. catalog ingestion order).
    #[must_use]
    pub fn neighbors(&self, id: SongId) -> &[Edge] {
        self.adjacency.get(&id).map_or(&[], |e| e.as_slice())
    }

    /// Neighbor ids ordered by strength (most matched criteria first),
    /// ties broken by edge insertion order, capped at `limit`. Empty when
    /// the id is unknown or isolated.
    #[must_use]
    pub fn recommendations(&self, id: SongId, limit: usize) -> Vec<SongId> {
        let mut edges: Vec<Edge> = self.neighbors(id).to_vec();
        // Stable sort preserves insertion order within a strength class.
        edges.sort_by(|a, b| b.strength.cmp(&a.strength));
        edges.into_iter().take(limit).map(|e| e.to).collect()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }
}

/// Counts how many similarity criteria two songs match: same artist,
/// same genre (both exact string matches), or years within `year_threshold`
/// of each other. Zero means no edge.
#[must_use]
pub fn similarity(a: &Song, b: &Song, year_threshold: u32) -> u8 {
    let mut strength = 0;
    if !a.artist.is_empty() && a.artist == b.artist {
        strength += 1;
    }
    if !a.genre.is_empty() && a.genre == b.genre {
        strength += 1;
    }
    if let (Some(ya), Some(yb)) = (a.year, b.year) {
        if ya.abs_diff(yb) <= year_threshold {
            strength += 1;
        }
    }
    strength
}
