//! End-to-end acceptance scenarios: problem text in, plan out.

use snlp_harness::problem::Problem;
use snlp_harness::render::render_plan;
use snlp_harness::runner::run_problem;
use snlp_kernel::carrier::tags::ActionKind;
use snlp_kernel::order::{is_order_consistent, topological_sort, CycleError};
use snlp_search::plan::{verify_plan, FINISH, START};
use snlp_search::policy::SearchPolicy;

const STATIONARY: &str = "\
locations 1
robots 1
cranes 0
piles 0
containers 0
at r0 l0
goal
at r0 l0
";

const SHUTTLE: &str = "\
locations 2
robots 1
cranes 0
piles 0
containers 0
at r0 l0
free l1
adjacent l0 l1
adjacent l1 l0
goal
at r0 l1
";

const STACK_REVERSAL: &str = "\
locations 1
robots 0
cranes 1
piles 2
containers 2
belong k0 l0
empty k0
attached p0 l0
attached p1 l0
in c0 p0
in c1 p0
top c0 p0
on c0 c1
on c1 G
top G p1
goal
on c1 c0
";

#[test]
fn goal_already_true_needs_only_start_and_finish() {
    let problem = Problem::parse(STATIONARY).unwrap();
    let outcome = run_problem(&problem, &SearchPolicy::default()).unwrap();
    let plan = &outcome.plan;

    assert_eq!(plan.steps().len(), 2);
    assert!(plan
        .steps()
        .iter()
        .all(|s| s.kind != ActionKind::Move));
    assert_eq!(plan.links().len(), 1);
    assert_eq!(verify_plan(plan), Ok(()));
}

#[test]
fn one_move_reaches_the_adjacent_location() {
    let problem = Problem::parse(SHUTTLE).unwrap();
    let outcome = run_problem(&problem, &SearchPolicy::default()).unwrap();
    let plan = &outcome.plan;

    let moves: Vec<usize> = (0..plan.steps().len())
        .filter(|&i| plan.steps()[i].kind == ActionKind::Move)
        .collect();
    assert_eq!(moves.len(), 1);
    let mv = moves[0];
    assert_eq!(plan.steps()[mv].display(&problem.space), "move r0 l0 l1");

    let order = plan.linearize().unwrap();
    let position = |step: usize| order.iter().position(|&s| s == step).unwrap();
    assert!(position(START) < position(mv));
    assert!(position(mv) < position(FINISH));

    assert_eq!(
        render_plan(plan),
        "actions\n0 start\n1 finish\n2 move r0 l0 l1\n\nconstraints\n"
    );
}

#[test]
fn three_cycle_has_no_topological_order() {
    let orderings = [(0, 1), (1, 2), (2, 0)];
    assert!(!is_order_consistent(&orderings, 3));
    assert!(matches!(
        topological_sort(&orderings, 3),
        Err(CycleError::Cycle { .. })
    ));
}

#[test]
fn returned_plans_never_hold_a_cycle() {
    for text in [STATIONARY, SHUTTLE] {
        let problem = Problem::parse(text).unwrap();
        let plan = run_problem(&problem, &SearchPolicy::default())
            .unwrap()
            .plan;
        assert!(is_order_consistent(plan.orderings(), plan.steps().len()));
    }
}

#[test]
fn problem_text_round_trips_through_the_writer() {
    let problem = Problem::parse(SHUTTLE).unwrap();
    let again = Problem::parse(&problem.to_text()).unwrap();
    assert_eq!(problem, again);
    assert_eq!(problem.digest().unwrap(), again.digest().unwrap());
}

#[test]
fn one_crane_reverses_a_stack_through_a_spare_pile() {
    let problem = Problem::parse(STACK_REVERSAL).unwrap();
    let outcome = run_problem(&problem, &SearchPolicy::default()).unwrap();
    let plan = &outcome.plan;
    assert_eq!(verify_plan(plan), Ok(()));

    let text = render_plan(plan);
    assert!(text.starts_with(
        "actions\n0 start\n1 finish\n\
         2 put k0 l0 c1 c0 p1\n\
         3 take k0 l0 c1 G p0\n\
         4 put k0 l0 c0 G p1\n\
         5 take k0 l0 c0 c1 p0\n\nconstraints\n"
    ));
    for line in ["3 < 2\n", "4 < 2\n", "4 < 3\n", "5 < 3\n", "5 < 4\n"] {
        assert!(text.contains(line), "missing constraint {line:?} in\n{text}");
    }
    assert_eq!(
        topological_sort(plan.orderings(), plan.steps().len()).unwrap(),
        vec![0, 5, 4, 3, 2, 1]
    );
}
