//! Errors that can occur while building or running an evaluator.

use super::query::MatchError;

/// Evaluator construction failed. Raised before any event is accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("requires at least one query")]
    NoQueries,
}

/// Processing one event failed.
///
/// The event is abandoned: nothing it produced is emitted and the job
/// collection is left as it was before the event.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// A match function returned an error.
    #[error("query failed on event {event_index}")]
    QueryFailed {
        event_index: u64,
        #[source]
        source: MatchError,
    },

    /// Execution fuel exhausted (too many match function invocations).
    #[error("runtime execution limit exceeded ({0} invocations)")]
    ExecFuelExhausted(u64),

    /// Too many live jobs after an event.
    #[error("runtime job limit exceeded ({0} jobs)")]
    JobLimitExceeded(usize),
}
