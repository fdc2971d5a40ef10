//! World contract: the minimal trait a built-in planning world implements.
//!
//! Worlds provide problem text only. Worlds may NOT search, render, or
//! verify; those are search-crate and runner concerns.

use crate::problem::{Problem, ProblemError};

/// A named, fixed planning problem.
pub trait PlanningWorld {
    /// Unique world identifier (e.g., `"shuttle"`).
    fn world_id(&self) -> &str;

    /// The problem in file format.
    fn problem_text(&self) -> &str;

    /// The parsed problem.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError`] if the world's text is malformed.
    fn problem(&self) -> Result<Problem, ProblemError> {
        Problem::parse(self.problem_text())
    }
}
