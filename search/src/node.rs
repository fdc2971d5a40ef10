//! Search nodes and the commitments that produce them.

use snlp_kernel::proof::hash::ContentHash;

use crate::plan::Plan;

/// The commitment that produced a node from its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Linked an open condition of `consumer` to `producer`. `fresh` is set
    /// when `producer` was instantiated for this link.
    Link {
        producer: usize,
        consumer: usize,
        fresh: bool,
    },
    /// Ordered `threatener` before the link's producer.
    Promote { threatener: usize, producer: usize },
    /// Ordered `threatener` after the link's consumer.
    Demote { threatener: usize, consumer: usize },
}

impl Choice {
    /// Short tag for logs and reports.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Link { fresh: true, .. } => "link_fresh",
            Self::Link { fresh: false, .. } => "link_existing",
            Self::Promote { .. } => "promote",
            Self::Demote { .. } => "demote",
        }
    }

    /// The ordering `(before, after)` this commitment added.
    #[must_use]
    pub const fn ordering(&self) -> (usize, usize) {
        match *self {
            Self::Link {
                producer, consumer, ..
            } => (producer, consumer),
            Self::Promote {
                threatener,
                producer,
            } => (threatener, producer),
            Self::Demote {
                threatener,
                consumer,
            } => (consumer, threatener),
        }
    }
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (before, after) = self.ordering();
        write!(f, "{} {before} < {after}", self.tag())
    }
}

/// One partial plan on the frontier.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Monotonic identifier within one search call.
    pub node_id: u64,
    pub plan: Plan,
    /// [`Plan::fingerprint`] of `plan`.
    pub fingerprint: ContentHash,
    /// Commitments from the round's root to this node, oldest first.
    pub trail: Vec<Choice>,
}

impl SearchNode {
    /// Commitments made since the root (root = 0).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.trail.len()
    }
}
