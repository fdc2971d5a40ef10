//! Binary that solves every built-in world with the default policy and
//! prints deterministic output lines for cross-process verification.
//!
//! Usage: `plan_fixture`
//!
//! Output: one block of key=value lines per world, in `worlds::all()` order.

use snlp_harness::runner::{render_output, run_world};
use snlp_harness::worlds;
use snlp_kernel::proof::hash::canonical_hash;
use snlp_kernel::proof::hash_domain::HashDomain;
use snlp_search::policy::SearchPolicy;

fn main() {
    let policy = SearchPolicy::default();
    for world in worlds::all() {
        let outcome = run_world(world.as_ref(), &policy)
            .unwrap_or_else(|e| panic!("{} failed: {e}", world.world_id()));
        let output = render_output(&outcome.plan, true);
        let output_digest = canonical_hash(HashDomain::PlanOutput, output.as_bytes());
        let report_digest = outcome.report.digest().expect("report digest");

        println!("world={}", world.world_id());
        println!("problem_digest={}", outcome.problem_digest.as_str());
        println!("report_digest={}", report_digest.as_str());
        println!("plan_output_digest={}", output_digest.as_str());
        println!("termination_reason={}", outcome.report.termination_reason);
        println!("rounds={}", outcome.report.rounds.len());
        println!("total_expansions={}", outcome.report.total_expansions());
        println!("steps={}", outcome.plan.steps().len());
    }
}
