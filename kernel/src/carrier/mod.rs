//! Carrier module: identifiers, closed tag sets, and predicates.
//!
//! This is the foundational layer. No other kernel module is imported here.

pub mod ids;
pub mod predicate;
pub mod tags;
