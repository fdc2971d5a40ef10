//! Operators module: action schema instances and the unifier.
//!
//! Depends on `carrier`. Does not import from `proof` or `order`.

pub mod action;
pub mod unify;
