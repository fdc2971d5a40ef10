//! `StackReversal`: one crane turns a two-container stack upside down by
//! moving it onto a second pile.
//!
//! Expected plan, by step id: `put k0 l0 c1 c0 p1` (2), `take k0 l0 c1 G p0`
//! (3), `put k0 l0 c0 G p1` (4), `take k0 l0 c0 c1 p0` (5). Both takes
//! delete `empty k0`, so every link that carries it has a clobberer the
//! orderings must keep outside the link.

use crate::contract::PlanningWorld;

/// `c0` sits on `c1` in `p0`, `p1` is empty; the goal wants `c1` on `c0`.
pub struct StackReversal;

const TEXT: &str = "\
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

impl PlanningWorld for StackReversal {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "stack_reversal"
    }

    #[allow(clippy::unnecessary_literal_bound)]
    fn problem_text(&self) -> &str {
        TEXT
    }
}
