//! Plan renderers: the output file format and the verbose debugging dump.

use std::fmt::Write;

use snlp_search::node::Choice;
use snlp_search::plan::{Plan, FINISH, START};

/// The `actions` and `constraints` sections.
///
/// Orderings that start at START or end at FINISH are implied and omitted.
#[must_use]
pub fn render_plan(plan: &Plan) -> String {
    let space = plan.space();
    let mut out = String::from("actions\n");
    for (i, step) in plan.steps().iter().enumerate() {
        let _ = writeln!(out, "{i} {}", step.display(space));
    }
    out.push_str("\nconstraints\n");
    for &(before, after) in plan.orderings() {
        if before == START || after == FINISH {
            continue;
        }
        let _ = writeln!(out, "{before} < {after}");
    }
    out
}

/// The optional `links` section: `<producer> <consumer> <predicate>`.
#[must_use]
pub fn render_links(plan: &Plan) -> String {
    let space = plan.space();
    let mut out = String::from("\nlinks\n");
    for link in plan.links() {
        let _ = writeln!(
            out,
            "{} {} {}",
            link.producer,
            link.consumer,
            link.predicate.display(space)
        );
    }
    out
}

/// Every field of the plan plus one linearization. Not a stable format.
#[must_use]
pub fn render_verbose(plan: &Plan) -> String {
    let space = plan.space();
    let mut out = String::from("#Steps\n");
    for (i, step) in plan.steps().iter().enumerate() {
        let _ = writeln!(out, "{i} {}", step.display(space));
    }

    out.push_str("\n#Orderings\n");
    for (before, after) in plan.orderings() {
        let _ = writeln!(out, "{before} < {after}");
    }

    out.push_str("\n#Causal Links\n");
    for l in plan.links() {
        let _ = writeln!(
            out,
            "{} , {} , {}",
            l.producer,
            l.predicate.display(space),
            l.consumer
        );
    }

    out.push_str("\n#Threats\n");
    for t in plan.threats() {
        let _ = writeln!(
            out,
            "{} , ({} , {} , {})",
            t.threatener,
            t.link.producer,
            t.link.predicate.display(space),
            t.link.consumer
        );
    }

    out.push_str("\n#Open Preconditions\n");
    for o in plan.open() {
        let _ = writeln!(out, "{} (step {})", o.predicate.display(space), o.consumer);
    }

    out.push_str("\n#Linearization\n");
    match plan.linearize() {
        Ok(order) => {
            let order: Vec<String> = order.iter().map(ToString::to_string).collect();
            let _ = writeln!(out, "{}", order.join(" "));
        }
        Err(e) => {
            let _ = writeln!(out, "none: {e}");
        }
    }
    out
}

/// The commitments that built a plan, oldest first, for the verbose dump.
#[must_use]
pub fn render_commitments(commitments: &[Choice]) -> String {
    let mut out = String::from("\n#Commitments\n");
    for (i, choice) in commitments.iter().enumerate() {
        let _ = writeln!(out, "{i} {choice}");
    }
    out
}
