//! Error types for timer operations

use thiserror::Error;

use crate::record::{TimerAction, TimerId};

/// A malformed or inconsistent creation request.
///
/// Reported synchronously to the caller and never retried.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid target time {value:?}")]
    InvalidTargetTime {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("unknown timer action {value:?}")]
    UnknownAction { value: String },

    #[error("popup timers require a non-empty message")]
    MissingMessage,

    #[error("{action} timers do not take a message")]
    UnexpectedMessage { action: TimerAction },
}

/// Errors surfaced by `TimerService` operations.
#[derive(Debug, Error)]
pub enum TimerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The id does not name a pending timer. Never-existed, already-fired,
    /// and already-canceled are indistinguishable here: removal is terminal.
    #[error("no pending timer with id {id}")]
    NotFound { id: TimerId },

    /// Store-level id collision. Ids are freshly generated, so this is a
    /// defensive invariant rather than an expected failure.
    #[error("timer id {id} is already present in the store")]
    IdConflict { id: TimerId },
}

/// Failure delivering a fired timer's action.
///
/// The scheduler logs these and moves on: the fire is not rolled back and
/// delivery is not retried.
#[derive(Debug, Error)]
#[error("failed to deliver {action} notification: {reason}")]
pub struct NotifierError {
    pub action: TimerAction,
    pub reason: String,
}

impl NotifierError {
    pub fn new(action: TimerAction, reason: impl Into<String>) -> Self {
        Self {
            action,
            reason: reason.into(),
        }
    }
}
