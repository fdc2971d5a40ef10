//! `DockTransfer`: a crane lifts the top container off a pile and loads it
//! onto the waiting robot.
//!
//! Expected plan: `load k0 l0 c0 r0` (step 2) supported by an earlier
//! `take k0 l0 c0 G p0` (step 3), so the only constraint is `3 < 2`.

use crate::contract::PlanningWorld;

/// One location with a crane, a pile holding one container, and an
/// unloaded robot.
pub struct DockTransfer;

const TEXT: &str = "\
locations 1
robots 1
cranes 1
piles 1
containers 1
at r0 l0
occupied l0
unloaded r0
belong k0 l0
empty k0
attached p0 l0
in c0 p0
top c0 p0
on c0 G
goal
loaded r0 c0
";

impl PlanningWorld for DockTransfer {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "dock_transfer"
    }

    #[allow(clippy::unnecessary_literal_bound)]
    fn problem_text(&self) -> &str {
        TEXT
    }
}
