//! SNLP kernel: the domain model of the container-transport planner.
//!
//! # API Surface
//!
//! - [`carrier`] -- identifier space, closed tag sets, predicates
//! - [`operators`] -- action schema instances and the unifier ([`operators::action::Action::adds`])
//! - [`order`] -- the acyclicity oracle over ordering constraints
//! - [`proof`] -- canonical JSON and domain-separated hashing
//!
//! # Module Dependency Direction
//!
//! `carrier` ← `operators`; `order` and `proof` are standalone.
//!
//! One-way only. No cycles.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod carrier;
pub mod operators;
pub mod order;
pub mod proof;
