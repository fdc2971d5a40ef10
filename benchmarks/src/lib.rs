//! Shared helpers for snlp benchmark suites.

use snlp_harness::problem::Problem;
use snlp_harness::worlds;
use snlp_search::policy::SearchPolicy;
use snlp_search::search::{search, SearchResult};

/// A named problem plus the policy it is benchmarked under.
pub struct Regime {
    pub name: String,
    pub problem: Problem,
    pub policy: SearchPolicy,
}

/// Two locations, no adjacency: every branch dies on an unsupportable
/// `adjacent` precondition, so each round runs to exhaustion.
const STRANDED: &str = "\
locations 2
robots 1
cranes 0
piles 0
containers 0
at r0 l0
free l1
goal
at r0 l1
";

/// Every built-in world under the default policy, plus one exhaustive
/// dead end capped at a small step budget.
///
/// # Panics
///
/// Panics if a built-in problem fails to parse. Benchmark setup failures are fatal.
#[must_use]
pub fn regimes() -> Vec<Regime> {
    let mut out: Vec<Regime> = worlds::all()
        .iter()
        .map(|world| Regime {
            name: world.world_id().to_string(),
            problem: world.problem().expect("built-in world parses"),
            policy: SearchPolicy::default(),
        })
        .collect();
    out.push(Regime {
        name: "stranded_dead_end".to_string(),
        problem: Problem::parse(STRANDED).expect("stranded problem parses"),
        policy: SearchPolicy {
            max_steps: 5,
            ..SearchPolicy::default()
        },
    });
    out
}

/// Run `search()` alone on a regime, skipping digest and rendering work.
///
/// # Panics
///
/// Panics if the policy is invalid.
#[must_use]
pub fn search_only(regime: &Regime) -> SearchResult {
    search(regime.problem.initial_plan(), &regime.policy).expect("valid policy")
}
