//! `Shuttle`: one robot drives to the neighbouring location.

use crate::contract::PlanningWorld;

/// Two adjacent locations; the robot must move from `l0` to `l1`.
pub struct Shuttle;

const TEXT: &str = "\
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

impl PlanningWorld for Shuttle {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "shuttle"
    }

    #[allow(clippy::unnecessary_literal_bound)]
    fn problem_text(&self) -> &str {
        TEXT
    }
}
