//! Typed search errors.
//!
//! `SearchError` covers pre-flight failures (an invalid policy) and the
//! caller-facing "no plan" outcome of [`crate::search::SearchResult::into_plan`].
//! Runtime terminations themselves are expressed via
//! [`crate::report::TerminationReason`] and always produce a
//! [`crate::report::SearchReport`].

use snlp_kernel::order::CycleError;
use snlp_kernel::proof::canon::CanonError;

use crate::report::TerminationReason;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The policy fails [`crate::policy::SearchPolicy::validate`].
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },
    /// The search finished without a complete plan.
    #[error("plan not found ({termination} after {expansions} expansions)")]
    PlanNotFound {
        termination: TerminationReason,
        expansions: u64,
    },
    /// A plan's orderings named a step it does not have.
    #[error("corrupt plan orderings: {0}")]
    Ordering(#[from] CycleError),
    /// A plan could not be fingerprinted.
    #[error("plan fingerprint failed: {0}")]
    Fingerprint(#[from] CanonError),
}
