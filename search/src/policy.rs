//! Search policy: budgets and switches for the search driver.

use crate::error::SearchError;

/// Budgets and switches for one [`crate::search::search`] call.
///
/// The step budget counts every step including START and FINISH, so
/// `max_steps = 2` admits only plans that need no new action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Largest plan (in steps) any round may build.
    pub max_steps: usize,
    /// Step budget of the first round when `deepening` is set.
    pub min_steps: usize,
    /// Hard cap on node expansions across all rounds.
    pub max_expansions: u64,
    /// Run rounds with budgets `min_steps..=max_steps`; otherwise one round
    /// at `max_steps`.
    pub deepening: bool,
    /// Skip plans whose fingerprint was already seen in the current round.
    pub dedup: bool,
}

impl SearchPolicy {
    /// Largest accepted `max_steps`. Each step brings at most five fresh
    /// variables, so a plan within this limit never runs out of ids above
    /// [`snlp_kernel::carrier::ids::Id::LIMIT`].
    pub const STEP_LIMIT: usize = 4096;

    /// Check budget sanity.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if a step budget is below 2 or
    /// above [`Self::STEP_LIMIT`], if `min_steps > max_steps`, or if
    /// `max_expansions` is zero.
    pub fn validate(&self) -> Result<(), SearchError> {
        let detail = if self.max_steps < 2 {
            format!("max_steps must be at least 2, got {}", self.max_steps)
        } else if self.max_steps > Self::STEP_LIMIT {
            format!(
                "max_steps must be at most {}, got {}",
                Self::STEP_LIMIT,
                self.max_steps
            )
        } else if self.min_steps < 2 {
            format!("min_steps must be at least 2, got {}", self.min_steps)
        } else if self.min_steps > self.max_steps {
            format!(
                "min_steps ({}) exceeds max_steps ({})",
                self.min_steps, self.max_steps
            )
        } else if self.max_expansions == 0 {
            "max_expansions must be positive".to_string()
        } else {
            return Ok(());
        };
        Err(SearchError::InvalidPolicy { detail })
    }

    /// Step budgets of the rounds this policy runs, in order.
    pub fn step_budgets(&self) -> impl Iterator<Item = usize> {
        let first = if self.deepening {
            self.min_steps
        } else {
            self.max_steps
        };
        first..=self.max_steps
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            max_steps: 16,
            min_steps: 2,
            max_expansions: 2_000_000,
            deepening: true,
            dedup: true,
        }
    }
}
