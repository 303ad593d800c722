//! Binary search tree over lower-cased song titles.
//!
//! A plain, unbalanced BST: exact lookups are O(h), which degenerates to
//! O(n) on sorted-order insertion. That matches the documented contract —
//! no self-balancing is performed. Duplicate titles share one node and
//! keep their ids in insertion order instead of overwriting each other.
//!
//! Substring queries cannot be answered by key comparison on a BST; the
//! orchestrator runs them as an explicit linear scan over [`TitleTree::in_order`].
//!
//! Node removal replaces a two-child node with its in-order successor
//! (the minimum of the right subtree); that policy is used consistently.

use crate::song::SongId;
use std::cmp::Ordering;

struct TreeNode {
    key: String,
    ids: Vec<SongId>,
    left: Option<Box<TreeNode>>,
    right: Option<Box<TreeNode>>,
}

impl TreeNode {
    fn leaf(key: String, id: SongId) -> Box<Self> {
        Box::new(Self {
            key,
            ids: vec![id],
            left: None,
            right: None,
        })
    }
}

/// Case-insensitive title index over all live songs.
#[derive(Default)]
pub struct TitleTree {
    root: Option<Box<TreeNode>>,
    len: usize,
}

impl TitleTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an id under the lower-cased title. Ids sharing a key are
    /// kept in insertion order on one node.
    pub fn insert(&mut self, title: &str, id: SongId) {
        let key = title.to_lowercase();
        self.len += 1;

        let mut cursor = &mut self.root;
        loop {
            match cursor {
                None => {
                    *cursor = Some(TreeNode::leaf(key, id));
                    return;
                }
                Some(node) => match key.cmp(&node.key) {
                    Ordering::Equal => {
                        node.ids.push(id);
                        return;
                    }
                    Ordering::Less => cursor = &mut node.left,
                    Ordering::Greater => cursor = &mut node.right,
                },
            }
        }
    }

    /// Ids filed under this exact title, case-insensitively. Empty when
    /// the title is unknown.
    #[must_use]
    pub fn exact(&self, title: &str) -> &[SongId] {
        let key = title.to_lowercase();
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            match key.cmp(&node.key) {
                Ordering::Equal => return &node.ids,
                Ordering::Less => cursor = node.left.as_deref(),
                Ordering::Greater => cursor = node.right.as_deref(),
            }
        }
        &[]
    }

    /// Removes one id filed under the title. The node is unlinked once its
    /// last id is gone. Returns whether the id was present.
    pub fn remove(&mut self, title: &str, id: SongId) -> bool {
        let key = title.to_lowercase();
        let mut removed = false;
        self.root = delete(self.root.take(), &key, id, &mut removed);
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// All ids in case-insensitive lexicographic title order; ids sharing
    /// a title stay in insertion order.
    #[must_use]
    pub fn in_order(&self) -> Vec<SongId> {
        let mut out = Vec::with_capacity(self.len);
        collect(self.root.as_deref(), &mut out);
        out
    }

    /// Number of ids (not distinct titles) in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

fn collect(node: Option<&TreeNode>, out: &mut Vec<SongId>) {
    let Some(node) = node else { return };
    collect(node.left.as_deref(), out);
    out.extend_from_slice(&node.ids);
    collect(node.right.as_deref(), out);
}

fn delete(
    node: Option<Box<TreeNode>>,
    key: &str,
    id: SongId,
    removed: &mut bool,
) -> Option<Box<TreeNode>> {
    let mut node = node?;
    match key.cmp(&node.key) {
        Ordering::Less => {
            node.left = delete(node.left.take(), key, id, removed);
            Some(node)
        }
        Ordering::Greater => {
            node.right = delete(node.right.take(), key, id, removed);
            Some(node)
        }
        Ordering::Equal => {
            if let Some(pos) = node.ids.iter().position(|&s| s == id) {
                node.ids.remove(pos);
                *removed = true;
            }
            if !node.ids.is_empty() {
                return Some(node);
            }
            // Last id under this title: standard BST unlink.
            match (node.left.take(), node.right.take()) {
                (None, None) => None,
                (Some(child), None) | (None, Some(child)) => Some(child),
                (Some(left), Some(right)) => {
                    let (mut successor, rest) = detach_min(right);
                    successor.left = Some(left);
                    successor.right = rest;
                    Some(successor)
                }
            }
        }
    }
}

/// Splits off the minimum node of a subtree, returning it together with
/// the remaining subtree.
fn detach_min(mut node: Box<TreeNode>) -> (Box<TreeNode>, Option<Box<TreeNode>>) {
    match node.left.take() {
        Some(left) => {
            let (min, rest) = detach_min(left);
            node.left = rest;
            (min, Some(node))
        }
        None => {
            let right = node.right.take();
            (node, right)
        }
    }
}
