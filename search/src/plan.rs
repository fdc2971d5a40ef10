//! Partial plans: the search state.
//!
//! A [`Plan`] is a value. Every search step clones its parent and modifies
//! the clone, so abandoning a branch is simply dropping it.
//!
//! Step ids are indices into `steps`; step 0 is START and step 1 is FINISH.
//! `orderings` always contains `START < s < FINISH` for every other step `s`
//! and is kept acyclic by [`Plan::add_ordering`].

use std::collections::{BTreeMap, BTreeSet};

use snlp_kernel::carrier::ids::{Id, IdSpace};
use snlp_kernel::carrier::predicate::Predicate;
use snlp_kernel::operators::action::Action;
use snlp_kernel::operators::unify::Binding;
use snlp_kernel::order::{self, CycleError, Ordering};
use snlp_kernel::proof::canon::{canonical_json_bytes, CanonError};
use snlp_kernel::proof::hash::{canonical_hash, ContentHash};
use snlp_kernel::proof::hash_domain::HashDomain;

/// Step id of the synthetic start step.
pub const START: usize = 0;
/// Step id of the synthetic finish step.
pub const FINISH: usize = 1;

/// `producer --predicate--> consumer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CausalLink {
    pub producer: usize,
    pub predicate: Predicate,
    pub consumer: usize,
}

/// `threatener` may delete `link.predicate` between producer and consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Threat {
    pub threatener: usize,
    pub link: CausalLink,
}

/// A precondition of `consumer` not yet backed by a causal link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpenCondition {
    pub predicate: Predicate,
    pub consumer: usize,
}

/// A partially ordered plan under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub(crate) space: IdSpace,
    pub(crate) steps: Vec<Action>,
    pub(crate) links: BTreeSet<CausalLink>,
    pub(crate) orderings: BTreeSet<Ordering>,
    pub(crate) threats: BTreeSet<Threat>,
    pub(crate) open: Vec<OpenCondition>,
    pub(crate) next_var: Id,
}

impl Plan {
    /// The initial plan: START adds `initial`, FINISH requires `goal`, and
    /// every goal condition is open against FINISH.
    #[must_use]
    pub fn new(space: IdSpace, initial: Vec<Predicate>, goal: Vec<Predicate>) -> Self {
        let mut plan = Self {
            space,
            steps: vec![Action::start(initial), Action::finish(goal.clone())],
            links: BTreeSet::new(),
            orderings: BTreeSet::from([(START, FINISH)]),
            threats: BTreeSet::new(),
            open: Vec::new(),
            next_var: space.first_variable(),
        };
        for predicate in goal {
            plan.push_open(predicate, FINISH);
        }
        plan.bump_next_var();
        plan
    }

    #[must_use]
    pub fn space(&self) -> &IdSpace {
        &self.space
    }

    #[must_use]
    pub fn steps(&self) -> &[Action] {
        &self.steps
    }

    #[must_use]
    pub fn links(&self) -> &BTreeSet<CausalLink> {
        &self.links
    }

    #[must_use]
    pub fn orderings(&self) -> &BTreeSet<Ordering> {
        &self.orderings
    }

    #[must_use]
    pub fn threats(&self) -> &BTreeSet<Threat> {
        &self.threats
    }

    #[must_use]
    pub fn open(&self) -> &[OpenCondition] {
        &self.open
    }

    /// The next unused variable id.
    #[must_use]
    pub fn next_var(&self) -> Id {
        self.next_var
    }

    /// No open conditions and no threats.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.open.is_empty() && self.threats.is_empty()
    }

    fn push_open(&mut self, predicate: Predicate, consumer: usize) {
        let candidate = OpenCondition {
            predicate,
            consumer,
        };
        if !self.open.contains(&candidate) {
            self.open.push(candidate);
        }
    }

    fn bump_next_var(&mut self) {
        let highest = self
            .steps
            .iter()
            .flat_map(Action::ids)
            .filter(|&id| self.space.is_variable(id))
            .max();
        if let Some(highest) = highest {
            if highest >= self.next_var {
                self.next_var = highest.next();
            }
        }
    }

    /// Append a step, order it between START and FINISH, and open its
    /// preconditions. Returns the new step id.
    ///
    /// Threats are not rescanned; see [`Plan::refresh_threats`].
    pub fn insert_step(&mut self, action: Action) -> usize {
        let id = self.steps.len();
        let prereqs = action.prereq_list();
        self.steps.push(action);
        self.orderings.insert((START, id));
        self.orderings.insert((id, FINISH));
        for predicate in prereqs {
            self.push_open(predicate, id);
        }
        self.bump_next_var();
        id
    }

    /// Remove and return the open condition at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn take_open(&mut self, index: usize) -> OpenCondition {
        self.open.remove(index)
    }

    /// Record a causal link.
    pub fn add_link(&mut self, link: CausalLink) {
        self.links.insert(link);
    }

    /// Add `before < after` if the ordering set stays acyclic.
    ///
    /// Returns `false` (and leaves the plan unchanged) if it would close a
    /// cycle.
    pub fn add_ordering(&mut self, before: usize, after: usize) -> bool {
        if self.orderings.contains(&(before, after)) {
            return true;
        }
        let consistent = order::is_order_consistent(
            self.orderings.iter().chain(std::iter::once(&(before, after))),
            self.steps.len(),
        );
        if consistent {
            self.orderings.insert((before, after));
        }
        consistent
    }

    /// Replace `former` with `newval` in every step, link, threat, and open
    /// condition.
    pub fn substitute(&mut self, former: Id, newval: Id) {
        for step in &mut self.steps {
            step.substitute(former, newval);
        }
        self.links = self
            .links
            .iter()
            .map(|l| CausalLink {
                predicate: l.predicate.substituted(former, newval),
                ..*l
            })
            .collect();
        self.threats = self
            .threats
            .iter()
            .map(|t| Threat {
                link: CausalLink {
                    predicate: t.link.predicate.substituted(former, newval),
                    ..t.link
                },
                ..*t
            })
            .collect();
        for open in &mut self.open {
            open.predicate = open.predicate.substituted(former, newval);
        }
    }

    /// Apply every binding of one unifier alternative plan-wide.
    pub fn apply_bindings(&mut self, bindings: &[Binding]) {
        for b in bindings {
            debug_assert!(b.from > b.to, "binding {b:?} is not canonical");
            self.substitute(b.from, b.to);
        }
    }

    /// Restore the bookkeeping invariants after bindings or a new link:
    /// open conditions are distinct and not already linked, and no two links
    /// support the same precondition of the same consumer (the one with the
    /// lowest producer id is kept).
    ///
    /// Returns `true` if a link was dropped.
    pub fn normalize(&mut self) -> bool {
        let before = self.links.len();
        let mut supported: BTreeSet<(usize, Predicate)> = BTreeSet::new();
        self.links
            .retain(|l| supported.insert((l.consumer, l.predicate)));
        let dropped = self.links.len() != before;

        let mut kept: Vec<OpenCondition> = Vec::with_capacity(self.open.len());
        for open in std::mem::take(&mut self.open) {
            if !supported.contains(&(open.consumer, open.predicate)) && !kept.contains(&open) {
                kept.push(open);
            }
        }
        self.open = kept;
        dropped
    }

    /// A topological order of the steps.
    ///
    /// # Errors
    ///
    /// [`CycleError`] if the orderings are cyclic (never true for a plan
    /// built through [`Plan::add_ordering`]).
    pub fn linearize(&self) -> Result<Vec<usize>, CycleError> {
        order::topological_sort(&self.orderings, self.steps.len())
    }

    /// Canonical JSON form with variables renamed by first appearance.
    ///
    /// Literals keep their raw id; the k-th distinct variable met while
    /// walking the steps in order becomes `"v<k>"`. Two plans that differ
    /// only in variable names have the same value.
    #[must_use]
    pub fn canonical_value(&self) -> serde_json::Value {
        let mut names = Renamer {
            space: &self.space,
            seen: BTreeMap::new(),
        };

        let steps: Vec<serde_json::Value> = self
            .steps
            .iter()
            .map(|s| {
                let args: Vec<serde_json::Value> =
                    s.args().iter().map(|&id| names.term(id)).collect();
                let seeded: Vec<serde_json::Value> =
                    s.seeded().iter().map(|p| names.predicate(p)).collect();
                serde_json::json!([s.kind.name(), args, seeded])
            })
            .collect();
        let mut links: Vec<serde_json::Value> = self
            .links
            .iter()
            .map(|l| serde_json::json!([l.producer, names.predicate(&l.predicate), l.consumer]))
            .collect();
        links.sort_by_key(ToString::to_string);
        let open: Vec<serde_json::Value> = self
            .open
            .iter()
            .map(|o| serde_json::json!([names.predicate(&o.predicate), o.consumer]))
            .collect();
        let orderings: Vec<[usize; 2]> = self.orderings.iter().map(|&(a, b)| [a, b]).collect();

        serde_json::json!({
            "steps": steps,
            "links": links,
            "orderings": orderings,
            "open": open,
        })
    }

    /// Content hash of [`Plan::canonical_value`].
    ///
    /// # Errors
    ///
    /// Propagates [`CanonError`] from canonical serialization.
    pub fn fingerprint(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.canonical_value())?;
        Ok(canonical_hash(HashDomain::Plan, &bytes))
    }
}

struct Renamer<'a> {
    space: &'a IdSpace,
    seen: BTreeMap<Id, usize>,
}

impl Renamer<'_> {
    fn term(&mut self, id: Id) -> serde_json::Value {
        if self.space.is_literal(id) {
            return serde_json::Value::from(id.raw());
        }
        let next = self.seen.len();
        let k = *self.seen.entry(id).or_insert(next);
        serde_json::Value::from(format!("v{k}"))
    }

    fn predicate(&mut self, p: &Predicate) -> serde_json::Value {
        let args: Vec<serde_json::Value> = p.ids().map(|id| self.term(id)).collect();
        serde_json::json!([p.kind.name(), args])
    }
}

/// A violation of the accepted-plan invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanDefect {
    #[error("{count} open conditions remain")]
    OpenConditions { count: usize },
    #[error("{count} threats remain")]
    UnresolvedThreats { count: usize },
    #[error("orderings are inconsistent: {0}")]
    Inconsistent(#[from] CycleError),
    #[error("link {link:?} is not justified: {detail}")]
    BadLink { link: CausalLink, detail: &'static str },
    #[error("precondition {predicate:?} of step {consumer} is backed by {links} links")]
    Support {
        predicate: Predicate,
        consumer: usize,
        links: usize,
    },
    #[error("step {threatener} can delete {link:?} inside its span")]
    LatentThreat { threatener: usize, link: CausalLink },
}

/// Check the accepted-plan invariant: no open conditions or threats,
/// acyclic orderings, each precondition backed by exactly one link whose
/// producer adds it and is ordered before its consumer, and no step able to
/// delete a link's predicate inside the link's span.
///
/// # Errors
///
/// The first [`PlanDefect`] found.
pub fn verify_plan(plan: &Plan) -> Result<(), PlanDefect> {
    if !plan.open.is_empty() {
        return Err(PlanDefect::OpenConditions {
            count: plan.open.len(),
        });
    }
    if !plan.threats.is_empty() {
        return Err(PlanDefect::UnresolvedThreats {
            count: plan.threats.len(),
        });
    }
    plan.linearize()?;
    let reach = order::reachability(&plan.orderings, plan.steps.len())?;

    for link in &plan.links {
        let (Some(producer), Some(consumer)) =
            (plan.steps.get(link.producer), plan.steps.get(link.consumer))
        else {
            return Err(PlanDefect::BadLink {
                link: *link,
                detail: "names a missing step",
            });
        };
        if !producer.add_list().contains(&link.predicate) {
            return Err(PlanDefect::BadLink {
                link: *link,
                detail: "producer does not add the predicate",
            });
        }
        if !consumer.prereq_list().contains(&link.predicate) {
            return Err(PlanDefect::BadLink {
                link: *link,
                detail: "consumer does not require the predicate",
            });
        }
        if !reach[link.producer][link.consumer] {
            return Err(PlanDefect::BadLink {
                link: *link,
                detail: "producer is not ordered before consumer",
            });
        }
    }

    for (consumer, step) in plan.steps.iter().enumerate() {
        for predicate in step.prereq_list() {
            let links = plan
                .links
                .iter()
                .filter(|l| l.consumer == consumer && l.predicate == predicate)
                .count();
            if links != 1 {
                return Err(PlanDefect::Support {
                    predicate,
                    consumer,
                    links,
                });
            }
        }
    }

    if let Some(threat) = crate::threat::scan_all(plan)?.into_iter().next() {
        return Err(PlanDefect::LatentThreat {
            threatener: threat.threatener,
            link: threat.link,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use snlp_kernel::carrier::tags::{ActionKind, PredicateKind as P};

    // l0 l1 | r0 | G ; variables from 4
    fn space() -> IdSpace {
        IdSpace::new(2, 1, 0, 0, 0)
    }

    fn at(s: &IdSpace, r: &str, l: &str) -> Predicate {
        Predicate::binary(P::At, s.parse(r).unwrap(), s.parse(l).unwrap())
    }

    #[test]
    fn initial_plan_shape() {
        let s = space();
        let plan = Plan::new(s, vec![at(&s, "r0", "l0")], vec![at(&s, "r0", "l1")]);
        assert_eq!(plan.steps().len(), 2);
        assert_eq!(plan.steps()[START].kind, ActionKind::Start);
        assert_eq!(plan.steps()[FINISH].kind, ActionKind::Finish);
        assert_eq!(plan.orderings(), &BTreeSet::from([(START, FINISH)]));
        assert_eq!(
            plan.open(),
            &[OpenCondition {
                predicate: at(&s, "r0", "l1"),
                consumer: FINISH
            }]
        );
        assert_eq!(plan.next_var(), s.first_variable());
        assert!(!plan.is_complete());
    }

    #[test]
    fn next_var_skips_variables_named_in_the_problem() {
        let s = space();
        let goal = Predicate::binary(P::At, s.parse("r0").unwrap(), s.variable(3));
        let plan = Plan::new(s, vec![], vec![goal]);
        assert_eq!(plan.next_var(), s.variable(4));
    }

    #[test]
    fn insert_step_orders_and_opens_preconditions() {
        let s = space();
        let mut plan = Plan::new(s, vec![], vec![]);
        let (mv, _) = Action::instantiate(ActionKind::Move, plan.next_var());
        let id = plan.insert_step(mv);
        assert_eq!(id, 2);
        assert!(plan.orderings().contains(&(START, 2)));
        assert!(plan.orderings().contains(&(2, FINISH)));
        assert_eq!(plan.open().len(), 3);
        assert!(plan.open().iter().all(|o| o.consumer == 2));
        assert_eq!(plan.next_var(), s.variable(3));
    }

    #[test]
    fn cyclic_ordering_is_refused() {
        let s = space();
        let mut plan = Plan::new(s, vec![], vec![]);
        let (mv, _) = Action::instantiate(ActionKind::Move, plan.next_var());
        plan.insert_step(mv);
        assert!(!plan.add_ordering(FINISH, 2));
        assert!(!plan.add_ordering(2, START));
        assert_eq!(plan.orderings().len(), 3);
        assert!(plan.add_ordering(START, FINISH));
    }

    #[test]
    fn substitution_reaches_steps_links_and_open() {
        let s = space();
        let x = s.variable(0);
        let goal = Predicate::binary(P::At, s.parse("r0").unwrap(), x);
        let mut plan = Plan::new(s, vec![], vec![goal]);
        plan.add_link(CausalLink {
            producer: START,
            predicate: goal,
            consumer: FINISH,
        });
        let l1 = s.parse("l1").unwrap();
        plan.substitute(x, l1);

        assert_eq!(plan.open()[0].predicate, at(&s, "r0", "l1"));
        assert_eq!(plan.steps()[FINISH].prereq_list(), vec![at(&s, "r0", "l1")]);
        assert_eq!(
            plan.links().iter().next().unwrap().predicate,
            at(&s, "r0", "l1")
        );
    }

    #[test]
    fn bindings_collapse_duplicate_open_conditions() {
        let s = space();
        let r0 = s.parse("r0").unwrap();
        let goal = vec![
            Predicate::binary(P::At, r0, s.variable(0)),
            Predicate::binary(P::At, r0, s.variable(1)),
        ];
        let mut plan = Plan::new(s, vec![], goal);
        assert_eq!(plan.open().len(), 2);
        plan.apply_bindings(&[Binding {
            from: s.variable(1),
            to: s.variable(0),
        }]);
        assert_eq!(plan.open().len(), 2);
        assert!(!plan.normalize());
        assert_eq!(plan.open().len(), 1);
    }

    #[test]
    fn normalize_keeps_one_link_per_precondition() {
        let s = space();
        let r0 = s.parse("r0").unwrap();
        let (x0, x1) = (s.variable(0), s.variable(1));
        let goal = vec![
            Predicate::binary(P::At, r0, x0),
            Predicate::binary(P::At, r0, x1),
        ];
        let mut plan = Plan::new(s, vec![], goal.clone());
        plan.take_open(0);
        plan.take_open(0);
        plan.add_link(CausalLink {
            producer: START,
            predicate: goal[1],
            consumer: FINISH,
        });
        let (mv, _) = Action::instantiate(ActionKind::Move, plan.next_var());
        let mover = plan.insert_step(mv);
        plan.add_link(CausalLink {
            producer: mover,
            predicate: goal[0],
            consumer: FINISH,
        });

        plan.apply_bindings(&[Binding { from: x1, to: x0 }]);
        assert!(plan.normalize());
        assert_eq!(plan.links().len(), 1);
        assert_eq!(plan.links().iter().next().unwrap().producer, START);
    }

    #[test]
    fn fingerprint_ignores_variable_names() {
        let s = space();
        let mut a = Plan::new(s, vec![], vec![]);
        let mut b = Plan::new(s, vec![], vec![]);
        let (mv_a, _) = Action::instantiate(ActionKind::Move, s.variable(0));
        let (mv_b, _) = Action::instantiate(ActionKind::Move, s.variable(40));
        a.insert_step(mv_a);
        b.insert_step(mv_b);
        assert_ne!(a, b);
        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());

        let (take, _) = Action::instantiate(ActionKind::Take, s.variable(0));
        let mut c = Plan::new(s, vec![], vec![]);
        c.insert_step(take);
        assert_ne!(a.fingerprint().unwrap(), c.fingerprint().unwrap());
    }

    #[test]
    fn fingerprint_distinguishes_shared_from_distinct_variables() {
        let s = space();
        let r0 = s.parse("r0").unwrap();
        let same = Plan::new(
            s,
            vec![],
            vec![Predicate::binary(P::Adjacent, s.variable(0), s.variable(0))],
        );
        let distinct = Plan::new(
            s,
            vec![],
            vec![Predicate::binary(P::Adjacent, s.variable(0), s.variable(1))],
        );
        assert_ne!(same.fingerprint().unwrap(), distinct.fingerprint().unwrap());
        let ground = Plan::new(s, vec![], vec![Predicate::binary(P::At, r0, s.variable(0))]);
        assert_ne!(same.fingerprint().unwrap(), ground.fingerprint().unwrap());
    }

    #[test]
    fn verify_rejects_incomplete_plans() {
        let s = space();
        let plan = Plan::new(s, vec![], vec![at(&s, "r0", "l0")]);
        assert_eq!(
            verify_plan(&plan),
            Err(PlanDefect::OpenConditions { count: 1 })
        );
    }

    #[test]
    fn verify_accepts_goal_linked_from_start() {
        let s = space();
        let fact = at(&s, "r0", "l0");
        let mut plan = Plan::new(s, vec![fact], vec![fact]);
        let open = plan.take_open(0);
        plan.add_link(CausalLink {
            producer: START,
            predicate: open.predicate,
            consumer: FINISH,
        });
        assert_eq!(verify_plan(&plan), Ok(()));
    }

    #[test]
    fn verify_rejects_link_from_non_producer() {
        let s = space();
        let fact = at(&s, "r0", "l0");
        let mut plan = Plan::new(s, vec![], vec![fact]);
        plan.take_open(0);
        plan.add_link(CausalLink {
            producer: START,
            predicate: fact,
            consumer: FINISH,
        });
        assert!(matches!(
            verify_plan(&plan),
            Err(PlanDefect::BadLink { .. })
        ));
    }
}
