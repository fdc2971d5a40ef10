//! SNLP search: partial plans, threat bookkeeping, and the depth-first
//! plan-space search driver.
//!
//! This crate depends only on `snlp_kernel`; it does NOT depend on
//! `snlp_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! snlp_kernel  ←  snlp_search  ←  snlp_harness
//! (ids, actions,    (plans, threats,   (problem files, rendering,
//!  unifier, order)   driver, report)    runner, worlds, CLI)
//! ```
//!
//! # Key types
//!
//! - [`plan::Plan`] -- a partial plan (the search state)
//! - [`threat::refresh_threats`] -- keeps the threat set equal to a full scan
//! - [`policy::SearchPolicy`] -- step and expansion budgets
//! - [`search::search`] -- the search driver
//! - [`report::SearchReport`] -- deterministic counters for one search call

#![forbid(unsafe_code)]

pub mod error;
pub mod frontier;
pub mod node;
pub mod plan;
pub mod policy;
pub mod report;
pub mod search;
pub mod threat;
