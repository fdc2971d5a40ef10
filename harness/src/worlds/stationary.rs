//! `Stationary`: the goal already holds in the initial state.

use crate::contract::PlanningWorld;

/// One robot at its goal location. The plan is START and FINISH only.
pub struct Stationary;

const TEXT: &str = "\
locations 1
robots 1
cranes 0
piles 0
containers 0
at r0 l0
goal
at r0 l0
";

impl PlanningWorld for Stationary {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "stationary"
    }

    #[allow(clippy::unnecessary_literal_bound)]
    fn problem_text(&self) -> &str {
        TEXT
    }
}
