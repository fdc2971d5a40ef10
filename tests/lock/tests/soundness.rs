//! Soundness locks: every returned plan satisfies the accepted-plan
//! invariant, and the unifier keeps its binding direction on every schema.

use std::collections::BTreeSet;

use snlp_harness::runner::run_world;
use snlp_harness::worlds;
use snlp_kernel::carrier::ids::IdSpace;
use snlp_kernel::carrier::predicate::Predicate;
use snlp_kernel::carrier::tags::{ActionKind, PredicateKind};
use snlp_kernel::operators::action::Action;
use snlp_kernel::operators::unify::apply_bindings;
use snlp_search::plan::verify_plan;
use snlp_search::policy::SearchPolicy;
use snlp_search::threat::scan_all;

fn policies() -> Vec<(&'static str, SearchPolicy)> {
    vec![
        ("default", SearchPolicy::default()),
        (
            "no_dedup",
            SearchPolicy {
                dedup: false,
                ..SearchPolicy::default()
            },
        ),
        (
            "single_round",
            SearchPolicy {
                max_steps: 6,
                deepening: false,
                ..SearchPolicy::default()
            },
        ),
    ]
}

#[test]
fn every_world_plan_is_sound_under_every_policy() {
    for world in worlds::all() {
        for (label, policy) in policies() {
            let outcome = run_world(world.as_ref(), &policy)
                .unwrap_or_else(|e| panic!("{} / {label}: {e}", world.world_id()));
            let plan = &outcome.plan;
            assert_eq!(verify_plan(plan), Ok(()), "{} / {label}", world.world_id());
            assert!(plan.open().is_empty());
            assert!(plan.threats().is_empty());
            assert!(scan_all(plan).unwrap().is_empty());
        }
    }
}

#[test]
fn every_precondition_has_exactly_one_link() {
    for world in worlds::all() {
        let plan = run_world(world.as_ref(), &SearchPolicy::default())
            .unwrap()
            .plan;
        for (consumer, step) in plan.steps().iter().enumerate() {
            for predicate in step.prereq_list() {
                let supporting = plan
                    .links()
                    .iter()
                    .filter(|l| l.consumer == consumer && l.predicate == predicate)
                    .count();
                assert_eq!(supporting, 1, "{}: step {consumer}", world.world_id());
            }
        }
    }
}

/// Query each schema's add effects with a fully-variable predicate whose
/// variables are newer than the schema's own.
#[test]
fn bindings_always_point_from_larger_to_smaller() {
    let space = IdSpace::new(2, 1, 1, 1, 2);
    for kind in ActionKind::SCHEMAS {
        let (action, next) = Action::instantiate(kind, space.first_variable());
        for effect in action.add_list() {
            let (x, y) = (next, next.next());
            let query = Predicate {
                kind: effect.kind,
                args: [Some(x), effect.args[1].map(|_| y)],
            };
            let alternatives = action.adds(&query, &space);
            assert!(!alternatives.is_empty(), "{kind:?} adds {effect:?}");
            for bindings in alternatives {
                let targets: BTreeSet<_> = bindings.iter().map(|b| b.to).collect();
                for b in &bindings {
                    assert!(b.from > b.to, "{kind:?}: {b:?}");
                    assert!(!targets.contains(&b.from), "{kind:?}: chained {b:?}");
                }
                let bound_query = apply_bindings(&query, &bindings);
                assert!(action
                    .add_list()
                    .iter()
                    .any(|e| apply_bindings(e, &bindings) == bound_query));
            }
        }
    }
}

#[test]
fn take_binds_holding_to_its_crane_and_container() {
    let space = IdSpace::new(1, 1, 1, 1, 1);
    let name = |s: &str| space.parse(s).unwrap();
    let take = Action::new(
        ActionKind::Take,
        vec![name("k0"), name("l0"), name("c0"), name("G"), name("p0")],
    );
    let (x, y) = (space.variable(0), space.variable(1));
    let query = Predicate::binary(PredicateKind::Holding, x, y);

    let alternatives = take.adds(&query, &space);
    assert_eq!(alternatives.len(), 1);
    let bound = apply_bindings(&query, &alternatives[0]);
    assert_eq!(bound, Predicate::binary(PredicateKind::Holding, name("k0"), name("c0")));
}
