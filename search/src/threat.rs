//! Threat Manager: detection and resolution of link clobbering.
//!
//! A step `t` threatens link `s --P--> c` when `t` deletes `P` and the
//! orderings do not already force `t < s` or `c < t`. The stored threat set
//! is maintained incrementally after each commitment but always equals what
//! [`scan_all`] would compute.

use std::collections::BTreeSet;

use snlp_kernel::order::{self, CycleError};

use crate::plan::{CausalLink, Plan, Threat};

/// Transitive "strictly before" matrix of a plan.
fn before_matrix(plan: &Plan) -> Result<Vec<Vec<bool>>, CycleError> {
    order::reachability(plan.orderings(), plan.steps().len())
}

fn threatens(plan: &Plan, reach: &[Vec<bool>], t: usize, link: &CausalLink) -> bool {
    t != link.producer
        && t != link.consumer
        && plan.steps()[t].deletes(&link.predicate)
        && !reach[t][link.producer]
        && !reach[link.consumer][t]
}

/// Whether step `threatener` threatens `link` under the current orderings.
///
/// # Errors
///
/// [`CycleError`] if the plan's orderings name a missing step.
pub fn is_threat(plan: &Plan, threatener: usize, link: &CausalLink) -> Result<bool, CycleError> {
    let reach = before_matrix(plan)?;
    Ok(threatens(plan, &reach, threatener, link))
}

/// Every (step, link) threat in the plan.
///
/// # Errors
///
/// [`CycleError`] if the plan's orderings name a missing step.
pub fn scan_all(plan: &Plan) -> Result<BTreeSet<Threat>, CycleError> {
    let reach = before_matrix(plan)?;
    let mut out = BTreeSet::new();
    for link in plan.links() {
        for t in 0..plan.steps().len() {
            if threatens(plan, &reach, t, link) {
                out.insert(Threat {
                    threatener: t,
                    link: *link,
                });
            }
        }
    }
    Ok(out)
}

/// What changed since the stored threat set was last exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreatScope {
    /// Existing steps or links may have changed; rescan everything.
    Full,
    /// Only orderings were added; drop threats they resolved.
    Orderings,
    /// One link (and possibly one new step) was added on top of ordering
    /// changes. Existing steps and links are otherwise untouched.
    Around {
        step: Option<usize>,
        link: CausalLink,
    },
}

/// Bring `plan.threats` back in line with a full scan.
///
/// # Errors
///
/// [`CycleError`] if the plan's orderings name a missing step.
pub fn refresh_threats(plan: &mut Plan, scope: ThreatScope) -> Result<(), CycleError> {
    if scope == ThreatScope::Full {
        plan.threats = scan_all(plan)?;
        return Ok(());
    }

    let reach = before_matrix(plan)?;
    let mut threats: BTreeSet<Threat> = plan
        .threats
        .iter()
        .filter(|t| threatens(plan, &reach, t.threatener, &t.link))
        .copied()
        .collect();

    if let ThreatScope::Around { step, link } = scope {
        for t in 0..plan.steps().len() {
            if threatens(plan, &reach, t, &link) {
                threats.insert(Threat { threatener: t, link });
            }
        }
        if let Some(step) = step {
            for existing in plan.links() {
                if threatens(plan, &reach, step, existing) {
                    threats.insert(Threat {
                        threatener: step,
                        link: *existing,
                    });
                }
            }
        }
    }

    plan.threats = threats;
    Ok(())
}

/// One way to defuse a threat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Order the threatener before the link's producer.
    Promote,
    /// Order the threatener after the link's consumer.
    Demote,
}

impl Resolution {
    /// Both resolutions, in the order they are tried.
    pub const ALL: [Self; 2] = [Self::Promote, Self::Demote];

    /// The ordering `(before, after)` this resolution adds for `threat`.
    #[must_use]
    pub const fn ordering(self, threat: &Threat) -> (usize, usize) {
        match self {
            Self::Promote => (threat.threatener, threat.link.producer),
            Self::Demote => (threat.link.consumer, threat.threatener),
        }
    }
}
