//! Built-in planning worlds used by tests, fixtures, and benchmarks.

pub mod dock_transfer;
pub mod shuttle;
pub mod stack_reversal;
pub mod stationary;

use crate::contract::PlanningWorld;

/// Every built-in world, in a fixed order.
#[must_use]
pub fn all() -> Vec<Box<dyn PlanningWorld>> {
    vec![
        Box::new(stationary::Stationary),
        Box::new(shuttle::Shuttle),
        Box::new(dock_transfer::DockTransfer),
        Box::new(stack_reversal::StackReversal),
    ]
}

/// Look up a built-in world by id.
#[must_use]
pub fn by_id(world_id: &str) -> Option<Box<dyn PlanningWorld>> {
    all().into_iter().find(|w| w.world_id() == world_id)
}
