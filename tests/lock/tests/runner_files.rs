//! File-level runner locks: what lands on disk for each built-in world.

use snlp_harness::problem::Problem;
use snlp_harness::runner::{run_file, RunError, RunOptions};
use snlp_harness::worlds;
use snlp_kernel::proof::canon::canonical_json_bytes;
use snlp_search::error::SearchError;
use snlp_search::policy::SearchPolicy;

#[test]
fn plan_and_report_files_are_byte_stable() {
    let dir = tempfile::tempdir().unwrap();
    for world in worlds::all() {
        let input = dir.path().join(format!("{}.problem", world.world_id()));
        std::fs::write(&input, world.problem_text()).unwrap();

        let mut outputs = Vec::new();
        for run in 0..2 {
            let output = dir.path().join(format!("{}.{run}.plan", world.world_id()));
            let report = dir.path().join(format!("{}.{run}.json", world.world_id()));
            let options = RunOptions {
                links: true,
                report: Some(report.clone()),
                ..RunOptions::default()
            };
            let outcome = run_file(&input, &output, &options).unwrap();

            let report_bytes = std::fs::read(&report).unwrap();
            assert_eq!(report_bytes, outcome.report.to_canonical_json_bytes().unwrap());
            let parsed: serde_json::Value = serde_json::from_slice(&report_bytes).unwrap();
            assert_eq!(canonical_json_bytes(&parsed).unwrap(), report_bytes);

            outputs.push((std::fs::read(&output).unwrap(), report_bytes));
        }
        assert_eq!(outputs[0], outputs[1], "{}", world.world_id());
    }
}

#[test]
fn rewritten_problem_yields_the_same_plan() {
    let dir = tempfile::tempdir().unwrap();
    let world = worlds::by_id("dock_transfer").unwrap();
    let authored = dir.path().join("authored.problem");
    let rewritten = dir.path().join("rewritten.problem");
    std::fs::write(&authored, world.problem_text()).unwrap();
    std::fs::write(&rewritten, world.problem().unwrap().to_text()).unwrap();

    let options = RunOptions::default();
    let a = dir.path().join("a.plan");
    let b = dir.path().join("b.plan");
    run_file(&authored, &a, &options).unwrap();
    run_file(&rewritten, &b, &options).unwrap();
    assert_eq!(
        std::fs::read_to_string(&a).unwrap(),
        std::fs::read_to_string(&b).unwrap()
    );
    assert_eq!(
        std::fs::read_to_string(&a).unwrap(),
        "actions\n0 start\n1 finish\n2 load k0 l0 c0 r0\n3 take k0 l0 c0 G p0\n\nconstraints\n3 < 2\n"
    );
}

#[test]
fn malformed_input_stops_before_search() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.problem");
    std::fs::write(
        &input,
        "locations 1\nrobots 1\ncranes 0\npiles 0\ncontainers 0\nparked r0 l0\ngoal\n",
    )
    .unwrap();
    let report = dir.path().join("report.json");
    let options = RunOptions {
        report: Some(report.clone()),
        ..RunOptions::default()
    };

    let err = run_file(&input, &dir.path().join("out.plan"), &options).unwrap_err();
    assert!(matches!(err, RunError::Problem(_)), "{err}");
    assert!(!report.exists(), "no search, so no report");
}

#[test]
fn invalid_policy_is_reported_as_a_search_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("shuttle.problem");
    let problem = worlds::by_id("shuttle").unwrap().problem().unwrap();
    std::fs::write(&input, problem.to_text()).unwrap();
    assert_eq!(Problem::read(&input).unwrap(), problem);

    let options = RunOptions {
        policy: SearchPolicy {
            max_expansions: 0,
            ..SearchPolicy::default()
        },
        ..RunOptions::default()
    };
    let err = run_file(&input, &dir.path().join("out.plan"), &options).unwrap_err();
    assert!(matches!(
        err,
        RunError::Search(SearchError::InvalidPolicy { .. })
    ));
}
