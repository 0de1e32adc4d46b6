use thiserror::Error;

/// Errors surfaced to the caller.
///
/// All failures are local and recoverable; the engine never enters an
/// unusable state and `reset()` always restores a valid baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The reported elapsed time is negative. Rejected before any state
    /// mutation so running averages stay sane.
    #[error("invalid attempt: negative elapsed time {0}ms")]
    InvalidAttempt(i64),
    /// An outcome was reported while no problem was outstanding.
    #[error("no active problem: request a problem before reporting an outcome")]
    NoActiveProblem,
}
