//! `SearchReport`: counters and per-round summaries of one search call.
//!
//! The report is deterministic for a given problem and policy: it contains
//! no timings, and its canonical JSON form is hashed for cross-run
//! comparison.

use snlp_kernel::proof::canon::{canonical_json_bytes, CanonError};
use snlp_kernel::proof::hash::{canonical_hash, ContentHash};
use snlp_kernel::proof::hash_domain::HashDomain;

use crate::node::Choice;
use crate::policy::SearchPolicy;

/// Why the search terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// A complete plan was popped from the frontier.
    PlanFound { node_id: u64 },
    /// A round emptied its frontier without ever being cut by its step
    /// budget, so no plan exists at any size.
    Exhausted,
    /// Every round emptied its frontier, and the last one (at `max_steps`)
    /// still had fresh steps withheld. A larger budget might find a plan.
    StepBudgetExhausted { max_steps: usize },
    /// `max_expansions` was hit.
    ExpansionBudgetExceeded,
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlanFound { node_id } => write!(f, "plan found at node {node_id}"),
            Self::Exhausted => write!(f, "search space exhausted"),
            Self::StepBudgetExhausted { max_steps } => {
                write!(f, "no plan within {max_steps} steps")
            }
            Self::ExpansionBudgetExceeded => write!(f, "expansion budget exceeded"),
        }
    }
}

/// Counters for one depth-first round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundSummary {
    /// The step budget of this round.
    pub step_budget: usize,
    pub expansions: u64,
    pub nodes_created: u64,
    pub duplicates_suppressed: u64,
    pub dead_ends: u64,
    /// Children dropped because their new ordering closed a cycle.
    pub cycle_prunes: u64,
    pub frontier_high_water: u64,
    /// Whether the step budget withheld any fresh step. A round that was
    /// never limited has explored everything a larger budget could.
    pub budget_limited: bool,
}

/// The complete search outcome summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    /// Hex fingerprint of the initial plan.
    pub root_fingerprint: String,
    /// Hex fingerprint of the returned plan, if any.
    pub plan_fingerprint: Option<String>,
    /// The commitments that built the returned plan from the root, oldest
    /// first. Empty when no plan was found.
    pub commitments: Vec<Choice>,
    pub termination_reason: TerminationReason,
    pub rounds: Vec<RoundSummary>,

    // Policy echo
    pub policy: SearchPolicy,
}

impl SearchReport {
    #[must_use]
    pub fn total_expansions(&self) -> u64 {
        self.rounds.iter().map(|r| r.expansions).sum()
    }

    #[must_use]
    pub fn total_nodes_created(&self) -> u64 {
        self.rounds.iter().map(|r| r.nodes_created).sum()
    }

    #[must_use]
    pub fn total_duplicates_suppressed(&self) -> u64 {
        self.rounds.iter().map(|r| r.duplicates_suppressed).sum()
    }

    #[must_use]
    pub fn total_dead_ends(&self) -> u64 {
        self.rounds.iter().map(|r| r.dead_ends).sum()
    }

    #[must_use]
    pub fn total_cycle_prunes(&self) -> u64 {
        self.rounds.iter().map(|r| r.cycle_prunes).sum()
    }

    #[must_use]
    pub fn frontier_high_water(&self) -> u64 {
        self.rounds
            .iter()
            .map(|r| r.frontier_high_water)
            .max()
            .unwrap_or(0)
    }

    /// Convert to a `serde_json::Value` for canonical serialization.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "commitments": self.commitments.iter().map(choice_to_json).collect::<Vec<_>>(),
            "plan_fingerprint": self.plan_fingerprint,
            "policy": policy_to_json(&self.policy),
            "root_fingerprint": self.root_fingerprint,
            "rounds": self.rounds.iter().map(round_to_json).collect::<Vec<_>>(),
            "termination_reason": termination_reason_to_json(&self.termination_reason),
            "totals": {
                "cycle_prunes": self.total_cycle_prunes(),
                "dead_ends": self.total_dead_ends(),
                "duplicates_suppressed": self.total_duplicates_suppressed(),
                "expansions": self.total_expansions(),
                "frontier_high_water": self.frontier_high_water(),
                "nodes_created": self.total_nodes_created(),
            },
        })
    }

    /// Serialize the report to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content hash of the canonical JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(HashDomain::SearchReport, &bytes))
    }
}

fn policy_to_json(p: &SearchPolicy) -> serde_json::Value {
    serde_json::json!({
        "dedup": p.dedup,
        "deepening": p.deepening,
        "max_expansions": p.max_expansions,
        "max_steps": p.max_steps,
        "min_steps": p.min_steps,
    })
}

fn choice_to_json(c: &Choice) -> serde_json::Value {
    let (before, after) = c.ordering();
    serde_json::json!({
        "after": after,
        "before": before,
        "type": c.tag(),
    })
}

fn round_to_json(r: &RoundSummary) -> serde_json::Value {
    serde_json::json!({
        "budget_limited": r.budget_limited,
        "cycle_prunes": r.cycle_prunes,
        "dead_ends": r.dead_ends,
        "duplicates_suppressed": r.duplicates_suppressed,
        "expansions": r.expansions,
        "frontier_high_water": r.frontier_high_water,
        "nodes_created": r.nodes_created,
        "step_budget": r.step_budget,
    })
}

fn termination_reason_to_json(r: &TerminationReason) -> serde_json::Value {
    match r {
        TerminationReason::PlanFound { node_id } => {
            serde_json::json!({"node_id": node_id, "type": "plan_found"})
        }
        TerminationReason::Exhausted => serde_json::json!({"type": "exhausted"}),
        TerminationReason::StepBudgetExhausted { max_steps } => {
            serde_json::json!({"max_steps": max_steps, "type": "step_budget_exhausted"})
        }
        TerminationReason::ExpansionBudgetExceeded => {
            serde_json::json!({"type": "expansion_budget_exceeded"})
        }
    }
}
