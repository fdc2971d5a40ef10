//! Search entry point and expansion loop.
//!
//! Depth-first search over partial plans. Each expansion picks one flaw and
//! branches over every way to resolve it:
//!
//! - threats first (the smallest in the threat set): promote or demote;
//! - otherwise the open condition with the lowest consumer step id (first
//!   inserted on ties): link it to every existing step that can add it, and
//!   to a fresh instance of every schema that can add it.
//!
//! Fresh steps are only instantiated while the plan is below the round's
//! step budget. Rounds run with growing budgets (see
//! [`SearchPolicy::step_budgets`]) until a plan is found, the expansion budget
//! runs out, or a round finishes without the step budget ever withholding a
//! fresh step (a larger budget would explore nothing new).

use snlp_kernel::carrier::tags::ActionKind;
use snlp_kernel::operators::action::Action;
use snlp_kernel::operators::unify::{self, Binding};
use tracing::{debug, info, warn};

use crate::error::SearchError;
use crate::frontier::DepthFirstFrontier;
use crate::node::{Choice, SearchNode};
use crate::plan::{verify_plan, CausalLink, Plan, Threat};
use crate::policy::SearchPolicy;
use crate::report::{RoundSummary, SearchReport, TerminationReason};
use crate::threat::{refresh_threats, Resolution, ThreatScope};

/// Result of a search execution.
///
/// Always contains a [`SearchReport`] regardless of how the search
/// terminated.
#[derive(Debug)]
pub struct SearchResult {
    /// The complete plan (if found).
    pub plan: Option<Plan>,
    pub report: SearchReport,
}

impl SearchResult {
    /// Returns `true` if the search terminated because a plan was found.
    #[must_use]
    pub fn is_plan_found(&self) -> bool {
        matches!(
            self.report.termination_reason,
            TerminationReason::PlanFound { .. }
        )
    }

    /// The plan, or why there is none.
    ///
    /// # Errors
    ///
    /// [`SearchError::PlanNotFound`] if the search ended without a plan.
    pub fn into_plan(self) -> Result<Plan, SearchError> {
        let expansions = self.report.total_expansions();
        self.plan.ok_or(SearchError::PlanNotFound {
            termination: self.report.termination_reason,
            expansions,
        })
    }
}

/// Node id and expansion counters shared by every round.
#[derive(Debug, Default)]
struct Counters {
    next_node_id: u64,
    expansions: u64,
}

impl Counters {
    fn node(
        &mut self,
        parent: Option<&SearchNode>,
        plan: Plan,
        choice: Option<Choice>,
    ) -> Result<SearchNode, SearchError> {
        let fingerprint = plan.fingerprint()?;
        let mut trail = parent.map_or_else(Vec::new, |p| p.trail.clone());
        trail.extend(choice);
        let node = SearchNode {
            node_id: self.next_node_id,
            plan,
            fingerprint,
            trail,
        };
        self.next_node_id += 1;
        Ok(node)
    }
}

enum RoundEnd {
    Found(SearchNode),
    Exhausted,
    BudgetExceeded,
}

/// Search for a complete plan refining `root`.
///
/// Runtime terminations (plan found, exhausted, expansion budget) all
/// return `Ok(SearchResult)`.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] if `policy` fails validation, and
/// [`SearchError::Ordering`] / [`SearchError::Fingerprint`] if a plan's
/// bookkeeping is corrupt.
pub fn search(root: Plan, policy: &SearchPolicy) -> Result<SearchResult, SearchError> {
    policy.validate()?;

    let root_fingerprint = root.fingerprint()?.hex_digest().to_string();
    let mut counters = Counters::default();
    let mut rounds: Vec<RoundSummary> = Vec::new();
    let mut termination = TerminationReason::Exhausted;
    let mut found: Option<SearchNode> = None;

    for budget in policy.step_budgets() {
        debug!(step_budget = budget, "starting round");
        let mut summary = RoundSummary {
            step_budget: budget,
            ..RoundSummary::default()
        };
        let end = run_round(&root, budget, policy, &mut counters, &mut summary)?;
        let limited = summary.budget_limited;
        rounds.push(summary);
        match end {
            RoundEnd::Found(node) => {
                termination = TerminationReason::PlanFound {
                    node_id: node.node_id,
                };
                found = Some(node);
                break;
            }
            RoundEnd::BudgetExceeded => {
                warn!(
                    max_expansions = policy.max_expansions,
                    "expansion budget exhausted"
                );
                termination = TerminationReason::ExpansionBudgetExceeded;
                break;
            }
            RoundEnd::Exhausted if !limited => {
                debug!(step_budget = budget, "round exhausted without hitting its step budget");
                break;
            }
            RoundEnd::Exhausted => {}
        }
    }
    if found.is_none()
        && termination == TerminationReason::Exhausted
        && rounds.last().is_some_and(|r| r.budget_limited)
    {
        termination = TerminationReason::StepBudgetExhausted {
            max_steps: policy.max_steps,
        };
    }

    let plan_fingerprint = found
        .as_ref()
        .map(|n| n.fingerprint.hex_digest().to_string());
    let commitments = found.as_ref().map_or_else(Vec::new, |n| n.trail.clone());
    let report = SearchReport {
        root_fingerprint,
        plan_fingerprint,
        commitments,
        termination_reason: termination,
        rounds,
        policy: policy.clone(),
    };
    info!(
        termination = %report.termination_reason,
        expansions = report.total_expansions(),
        rounds = report.rounds.len(),
        "search finished"
    );
    Ok(SearchResult {
        plan: found.map(|n| n.plan),
        report,
    })
}

fn run_round(
    root: &Plan,
    budget: usize,
    policy: &SearchPolicy,
    counters: &mut Counters,
    summary: &mut RoundSummary,
) -> Result<RoundEnd, SearchError> {
    let mut frontier = DepthFirstFrontier::new(policy.dedup);
    let root_node = counters.node(None, root.clone(), None)?;
    summary.nodes_created += 1;
    frontier.push(root_node);

    let end = loop {
        let Some(node) = frontier.pop() else {
            break RoundEnd::Exhausted;
        };
        if node.plan.is_complete() {
            debug_assert!(
                verify_plan(&node.plan).is_ok(),
                "search accepted an unsound plan: {:?}",
                verify_plan(&node.plan)
            );
            break RoundEnd::Found(node);
        }
        if counters.expansions >= policy.max_expansions {
            break RoundEnd::BudgetExceeded;
        }
        counters.expansions += 1;
        summary.expansions += 1;

        let children = expand(&node.plan, budget, summary)?;
        debug!(
            node_id = node.node_id,
            depth = node.depth(),
            steps = node.plan.steps().len(),
            open = node.plan.open().len(),
            threats = node.plan.threats().len(),
            children = children.len(),
            "expanded"
        );
        if children.is_empty() {
            summary.dead_ends += 1;
            continue;
        }

        let mut siblings = Vec::with_capacity(children.len());
        for (plan, choice) in children {
            siblings.push(counters.node(Some(&node), plan, Some(choice))?);
        }
        summary.nodes_created += siblings.len() as u64;
        summary.duplicates_suppressed += frontier.push_siblings(siblings);
    };

    summary.frontier_high_water = frontier.high_water();
    Ok(end)
}

/// Every child of `plan`, in the order they should be explored.
fn expand(
    plan: &Plan,
    budget: usize,
    summary: &mut RoundSummary,
) -> Result<Vec<(Plan, Choice)>, SearchError> {
    if let Some(threat) = plan.threats().iter().next().copied() {
        return resolve_threat(plan, threat, summary);
    }
    let Some(index) = select_open(plan) else {
        return Ok(Vec::new());
    };
    resolve_open(plan, index, budget, summary)
}

/// Lowest consumer step id; first inserted on ties.
fn select_open(plan: &Plan) -> Option<usize> {
    plan.open()
        .iter()
        .enumerate()
        .min_by_key(|(_, o)| o.consumer)
        .map(|(i, _)| i)
}

fn resolve_threat(
    plan: &Plan,
    threat: Threat,
    summary: &mut RoundSummary,
) -> Result<Vec<(Plan, Choice)>, SearchError> {
    let mut children = Vec::with_capacity(2);
    for resolution in Resolution::ALL {
        let (before, after) = resolution.ordering(&threat);
        let mut child = plan.clone();
        if !child.add_ordering(before, after) {
            summary.cycle_prunes += 1;
            continue;
        }
        refresh_threats(&mut child, ThreatScope::Orderings)?;
        debug_assert!(!child.threats().contains(&threat));
        let choice = match resolution {
            Resolution::Promote => Choice::Promote {
                threatener: threat.threatener,
                producer: threat.link.producer,
            },
            Resolution::Demote => Choice::Demote {
                threatener: threat.threatener,
                consumer: threat.link.consumer,
            },
        };
        children.push((child, choice));
    }
    Ok(children)
}

fn resolve_open(
    plan: &Plan,
    index: usize,
    budget: usize,
    summary: &mut RoundSummary,
) -> Result<Vec<(Plan, Choice)>, SearchError> {
    let open = plan.open()[index];
    let space = *plan.space();
    let mut children = Vec::new();

    for (producer, step) in plan.steps().iter().enumerate() {
        if producer == open.consumer {
            continue;
        }
        for bindings in step.adds(&open.predicate, &space) {
            if let Some(child) = commit(plan, index, None, producer, &bindings, summary)? {
                children.push((
                    child,
                    Choice::Link {
                        producer,
                        consumer: open.consumer,
                        fresh: false,
                    },
                ));
            }
        }
    }

    let producer = plan.steps().len();
    for kind in ActionKind::SCHEMAS {
        if !kind.may_add(open.predicate.kind) {
            continue;
        }
        let (action, _) = Action::instantiate(kind, plan.next_var());
        let alternatives = action.adds(&open.predicate, &space);
        if alternatives.is_empty() {
            continue;
        }
        if producer >= budget {
            summary.budget_limited = true;
            continue;
        }
        for bindings in alternatives {
            if let Some(child) = commit(
                plan,
                index,
                Some(action.clone()),
                producer,
                &bindings,
                summary,
            )? {
                children.push((
                    child,
                    Choice::Link {
                        producer,
                        consumer: open.consumer,
                        fresh: true,
                    },
                ));
            }
        }
    }
    Ok(children)
}

/// Build the child that links open condition `index` of `parent` to
/// `producer` under `bindings`. `fresh` is the new step when `producer` is
/// being instantiated. `None` if the link ordering would close a cycle.
fn commit(
    parent: &Plan,
    index: usize,
    fresh: Option<Action>,
    producer: usize,
    bindings: &[Binding],
    summary: &mut RoundSummary,
) -> Result<Option<Plan>, SearchError> {
    let mut child = parent.clone();
    let open = child.take_open(index);
    let step = fresh.map(|action| child.insert_step(action));
    debug_assert!(step.map_or(true, |s| s == producer));

    child.apply_bindings(bindings);
    let predicate = unify::apply_bindings(&open.predicate, bindings);
    if !child.add_ordering(producer, open.consumer) {
        summary.cycle_prunes += 1;
        return Ok(None);
    }
    let link = CausalLink {
        producer,
        predicate,
        consumer: open.consumer,
    };
    child.add_link(link);
    let dropped = child.normalize();

    // Bindings on variables older than this commitment can change existing
    // steps and links.
    let rebinds_existing = bindings.iter().any(|b| b.from < parent.next_var());
    let scope = if rebinds_existing || dropped {
        ThreatScope::Full
    } else {
        ThreatScope::Around { step, link }
    };
    refresh_threats(&mut child, scope)?;
    Ok(Some(child))
}
