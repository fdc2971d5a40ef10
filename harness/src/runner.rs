//! Runner: problem in, rendered plan out.
//!
//! # Pipeline
//!
//! ```text
//! Problem::read() → initial_plan() → search() → [write report]
//!   → into_plan() → render_plan() (+ render_links()) → write output
//! ```

use std::path::{Path, PathBuf};

use snlp_kernel::proof::canon::CanonError;
use snlp_kernel::proof::hash::ContentHash;
use snlp_search::error::SearchError;
use snlp_search::plan::Plan;
use snlp_search::policy::SearchPolicy;
use snlp_search::report::SearchReport;
use snlp_search::search::{search, SearchResult};
use tracing::info;

use crate::contract::PlanningWorld;
use crate::problem::{Problem, ProblemError};
use crate::render::{render_links, render_plan};

/// Error during a run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The problem could not be read.
    #[error(transparent)]
    Problem(#[from] ProblemError),
    /// Invalid policy, or no plan found.
    #[error(transparent)]
    Search(#[from] SearchError),
    /// An output file could not be written.
    #[error("cannot write {path}: {detail}")]
    Io { path: String, detail: String },
    /// The report could not be serialized.
    #[error("report serialization failed: {0}")]
    Canon(#[from] CanonError),
}

/// What `run_file` writes besides the plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub policy: SearchPolicy,
    /// Append the `links` section to the output.
    pub links: bool,
    /// Write the canonical JSON search report here.
    pub report: Option<PathBuf>,
}

/// A successful run.
#[derive(Debug)]
pub struct RunOutcome {
    pub plan: Plan,
    pub report: SearchReport,
    pub problem_digest: ContentHash,
}

fn solve(problem: &Problem, policy: &SearchPolicy) -> Result<SearchResult, RunError> {
    info!(
        facts = problem.initial.len(),
        goals = problem.goal.len(),
        "searching"
    );
    Ok(search(problem.initial_plan(), policy)?)
}

fn finish(problem: &Problem, result: SearchResult) -> Result<RunOutcome, RunError> {
    let report = result.report.clone();
    let plan = result.into_plan()?;
    let problem_digest = problem.digest()?;
    info!(problem = %problem_digest.as_str(), steps = plan.steps().len(), "plan found");
    Ok(RunOutcome {
        plan,
        report,
        problem_digest,
    })
}

/// Search for a plan for `problem`.
///
/// # Errors
///
/// [`RunError::Search`] for an invalid policy or when no plan exists
/// within the policy's budgets.
pub fn run_problem(problem: &Problem, policy: &SearchPolicy) -> Result<RunOutcome, RunError> {
    let result = solve(problem, policy)?;
    finish(problem, result)
}

/// Search for a plan for a built-in world.
///
/// # Errors
///
/// As [`run_problem`], plus [`RunError::Problem`] if the world's text is
/// malformed.
pub fn run_world(
    world: &dyn PlanningWorld,
    policy: &SearchPolicy,
) -> Result<RunOutcome, RunError> {
    let problem = world.problem()?;
    info!(world = world.world_id(), "running world");
    run_problem(&problem, policy)
}

/// The output file contents for a plan.
#[must_use]
pub fn render_output(plan: &Plan, links: bool) -> String {
    let mut out = render_plan(plan);
    if links {
        out.push_str(&render_links(plan));
    }
    out
}

fn write(path: &Path, bytes: &[u8]) -> Result<(), RunError> {
    std::fs::write(path, bytes).map_err(|e| RunError::Io {
        path: path.display().to_string(),
        detail: e.to_string(),
    })
}

/// Read `input`, search, and write the plan to `output`.
///
/// The report (if requested) is written whether or not a plan was found.
/// The output file is only written on success.
///
/// # Errors
///
/// [`RunError::Problem`] if `input` cannot be read or parsed,
/// [`RunError::Search`] if no plan is found, [`RunError::Io`] if an output
/// cannot be written.
pub fn run_file(
    input: &Path,
    output: &Path,
    options: &RunOptions,
) -> Result<RunOutcome, RunError> {
    let problem = Problem::read(input)?;
    let result = solve(&problem, &options.policy)?;
    if let Some(path) = &options.report {
        write(path, &result.report.to_canonical_json_bytes()?)?;
    }
    let outcome = finish(&problem, result)?;
    write(output, render_output(&outcome.plan, options.links).as_bytes())?;
    info!(output = %output.display(), "plan written");
    Ok(outcome)
}
