//! Timer lifecycle operations
//!
//! [`TimerService`] owns the store behind a single mutex and enforces the
//! creation rules: a parseable RFC 3339 target time, a known action, and a
//! message exactly when the action is a popup. All mutations (`create`,
//! `cancel`, the removal inside `take_due`) serialize through that mutex,
//! so a cancel racing a tick on the same id resolves to exactly one winner.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::clock::Clock;
use crate::error::{TimerError, ValidationError};
use crate::record::{CreateTimerRequest, TimerAction, TimerId, TimerRecord};
use crate::store::TimerStore;

/// Validates requests, creates records, lists them, cancels them, and hands
/// due timers to the scheduler.
pub struct TimerService<S, C> {
    store: Mutex<S>,
    clock: C,
}

impl<S: TimerStore, C: Clock> TimerService<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self {
            store: Mutex::new(store),
            clock,
        }
    }

    /// Current instant from the injected clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Validate the request, assign a fresh id, and persist the record.
    ///
    /// A past `target_time` is accepted; the timer is simply due on the
    /// next scheduler tick.
    pub fn create(&self, request: CreateTimerRequest) -> Result<TimerRecord, TimerError> {
        let action: TimerAction = request.action.parse()?;
        let target_time = parse_target_time(&request.target_time)?;
        let message = validate_message(action, request.message)?;

        let record = TimerRecord {
            id: TimerId::generate(),
            action,
            target_time,
            message,
            created_at: self.clock.now(),
        };

        self.store().insert(record.clone())?;
        tracing::debug!(
            id = %record.id,
            action = %record.action,
            target_time = %record.target_time,
            "timer created"
        );

        Ok(record)
    }

    /// Snapshot of all pending timers, in creation order.
    pub fn list(&self) -> Vec<TimerRecord> {
        self.store().list_all()
    }

    /// Cancel the pending timer with the given id.
    ///
    /// Fails with `TimerError::NotFound` if the id is not pending. A second
    /// cancel of the same id fails the same way.
    pub fn cancel(&self, id: &TimerId) -> Result<(), TimerError> {
        if self.store().remove(id) {
            tracing::debug!(id = %id, "timer canceled");
            Ok(())
        } else {
            Err(TimerError::NotFound { id: id.clone() })
        }
    }

    /// Atomically remove and return every timer due at `now`, in creation
    /// order. Returned records count as fired: they no longer list and can
    /// no longer be canceled.
    pub fn take_due(&self, now: DateTime<Utc>) -> Vec<TimerRecord> {
        self.store().remove_where(&mut |r| r.target_time <= now)
    }

    fn store(&self) -> MutexGuard<'_, S> {
        // A poisoning panic cannot leave a record half-written, so keep
        // serving from the inner state.
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn parse_target_time(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|source| ValidationError::InvalidTargetTime {
            value: value.to_string(),
            source,
        })
}

fn validate_message(
    action: TimerAction,
    message: Option<String>,
) -> Result<Option<String>, ValidationError> {
    if action.requires_message() {
        let trimmed = message.as_deref().map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingMessage);
        }
        Ok(Some(trimmed.to_string()))
    } else if message.is_some() {
        Err(ValidationError::UnexpectedMessage { action })
    } else {
        Ok(None)
    }
}
