//! Depth-first frontier with duplicate-plan detection.
//!
//! Uses a `BTreeSet`-based visited set (not `HashSet`) for deterministic
//! iteration order. The visited set is per round: a new deepening round
//! starts from a fresh frontier.

use std::collections::BTreeSet;

use crate::node::SearchNode;

/// Last-in first-out frontier.
///
/// Maintains:
/// - A `Vec` used as a stack of pending nodes
/// - A `BTreeSet<String>` of fingerprint hex digests already pushed
#[derive(Debug, Default)]
pub struct DepthFirstFrontier {
    stack: Vec<SearchNode>,
    visited: BTreeSet<String>,
    high_water: u64,
    dedup: bool,
}

impl DepthFirstFrontier {
    /// Create an empty frontier. With `dedup`, a fingerprint is accepted at
    /// most once.
    #[must_use]
    pub fn new(dedup: bool) -> Self {
        Self {
            dedup,
            ..Self::default()
        }
    }

    /// Push a node on top of the stack and mark its fingerprint as visited.
    ///
    /// Returns `false` if dedup is on and the fingerprint was already visited
    /// (node not added).
    pub fn push(&mut self, node: SearchNode) -> bool {
        let fresh = self
            .visited
            .insert(node.fingerprint.hex_digest().to_string());
        if self.dedup && !fresh {
            return false;
        }
        self.stack.push(node);
        let size = self.stack.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
        true
    }

    /// Push siblings so that the first of them is popped first.
    ///
    /// Returns how many were rejected as duplicates.
    pub fn push_siblings(&mut self, siblings: Vec<SearchNode>) -> u64 {
        let mut rejected = 0;
        for node in siblings.into_iter().rev() {
            if !self.push(node) {
                rejected += 1;
            }
        }
        rejected
    }

    /// Pop the most recently pushed node.
    #[must_use]
    pub fn pop(&mut self) -> Option<SearchNode> {
        self.stack.pop()
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}
