//! Planner error types.
//!
//! Only input validation and oracle failures are errors. A plan that cannot
//! meet the closing deadline is a normal outcome, reported through
//! `feasible = false` on the result instead.

use thiserror::Error;

use crate::model::ActivityId;

/// Failure raised by a wait-time oracle.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("oracle has no model for activity {0}")]
    UnknownActivity(ActivityId),

    #[error("remote oracle request failed: {0}")]
    Remote(#[from] reqwest::Error),

    #[error("oracle returned an invalid prediction: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("no candidate activities were given")]
    EmptyCandidates,

    #[error("activity {0} is listed more than once")]
    DuplicateCandidate(ActivityId),

    #[error("activity {0} not found in catalog")]
    UnknownActivity(ActivityId),

    #[error("no utility given for activity {0}")]
    MissingUtility(ActivityId),

    #[error("utility for activity {0} must be finite and non-negative")]
    InvalidUtility(ActivityId),

    #[error("activity {0} does not offer priority access")]
    PriorityNotOffered(ActivityId),

    #[error("{what} must not be negative (got {value})")]
    NegativeTime { what: String, value: i32 },

    #[error("{what} runs past the end of the minute clock")]
    TimeOverflow { what: String },

    #[error("{count} candidates exceed the exhaustive search limit of {limit}")]
    TooManyCandidates { count: usize, limit: usize },

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PlannerResult<T> = Result<T, PlannerError>;
