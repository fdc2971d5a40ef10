//! `snlp <input> <output>`: read a problem file, write a plan.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use snlp_harness::render::{render_commitments, render_verbose};
use snlp_harness::runner::{run_file, RunError, RunOptions};
use snlp_search::error::SearchError;
use snlp_search::policy::SearchPolicy;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Partial-order planner for the container-transport domain.
#[derive(Debug, Parser)]
#[command(name = "snlp", version)]
struct Args {
    /// Problem file to read.
    input: PathBuf,
    /// Plan file to write.
    output: PathBuf,
    /// Largest number of steps (START and FINISH included) a plan may have.
    #[arg(long, default_value_t = SearchPolicy::default().max_steps)]
    max_steps: usize,
    /// Total expansion budget across all rounds.
    #[arg(long, default_value_t = SearchPolicy::default().max_expansions)]
    max_expansions: u64,
    /// Search once at --max-steps instead of deepening toward it.
    #[arg(long)]
    no_deepening: bool,
    /// Keep plans already seen instead of discarding them.
    #[arg(long)]
    no_dedup: bool,
    /// Append the causal links to the plan file.
    #[arg(long)]
    links: bool,
    /// Debug logging, plus a full dump of the plan and the commitments that
    /// built it on stdout.
    #[arg(long, short)]
    verbose: bool,
    /// Write the search report (canonical JSON) here.
    #[arg(long)]
    report: Option<PathBuf>,
}

impl Args {
    fn options(&self) -> RunOptions {
        RunOptions {
            policy: SearchPolicy {
                max_steps: self.max_steps,
                max_expansions: self.max_expansions,
                deepening: !self.no_deepening,
                dedup: !self.no_dedup,
                ..SearchPolicy::default()
            },
            links: self.links,
            report: self.report.clone(),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run_file(&args.input, &args.output, &args.options()) {
        Ok(outcome) => {
            if args.verbose {
                print!("{}", render_verbose(&outcome.plan));
                print!("{}", render_commitments(&outcome.report.commitments));
            }
            ExitCode::SUCCESS
        }
        Err(RunError::Problem(e)) => {
            eprintln!("Could not read file: {e}");
            ExitCode::from(2)
        }
        Err(RunError::Search(SearchError::PlanNotFound {
            termination,
            expansions,
        })) => {
            eprintln!("Plan not found ({termination} after {expansions} expansions)");
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(3)
        }
    }
}
