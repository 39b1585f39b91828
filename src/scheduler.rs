//! Recurring tick loop that fires due timers
//!
//! Every tick the scheduler reads the clock through the service, takes the
//! due records, and dispatches each one to the [`Notifier`] exactly once.
//! `take_due` removes records atomically, so a record can never fire twice
//! even with cancels racing the tick. Notifier calls happen after the store
//! lock is released; a slow or failing notifier never stalls create, cancel,
//! or list.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::clock::Clock;
use crate::error::NotifierError;
use crate::record::TimerAction;
use crate::service::TimerService;
use crate::store::TimerStore;

/// One-second ticks give sub-minute countdowns their accuracy without
/// excessive wakeups.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// Performs the user-visible action of a fired timer.
///
/// Implemented by the embedding application (popup dialog, screen lock,
/// shutdown command). Delivery is at-most-once: an error is logged and the
/// fire is not retried.
pub trait Notifier: Send + Sync {
    fn notify(&self, action: TimerAction, message: Option<&str>) -> Result<(), NotifierError>;
}

/// Polls the service on a fixed period and dispatches due timers.
pub struct Scheduler<S, C, N> {
    service: Arc<TimerService<S, C>>,
    notifier: N,
    period: Duration,
}

impl<S, C, N> Scheduler<S, C, N>
where
    S: TimerStore + Send + 'static,
    C: Clock + 'static,
    N: Notifier + 'static,
{
    pub fn new(service: Arc<TimerService<S, C>>, notifier: N) -> Self {
        Self {
            service,
            notifier,
            period: DEFAULT_TICK_PERIOD,
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Run the tick loop on the current task until aborted.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            self.dispatch_due();
        }
    }

    /// Spawn the tick loop as a background task.
    pub fn spawn(self) -> SchedulerHandle {
        SchedulerHandle {
            handle: tokio::spawn(self.run()),
        }
    }

    fn dispatch_due(&self) {
        let now = self.service.now();
        let due = self.service.take_due(now);

        for record in due {
            tracing::info!(id = %record.id, action = %record.action, "timer fired");
            if let Err(error) = self
                .notifier
                .notify(record.action, record.message.as_deref())
            {
                // Per-record isolation: keep dispatching the rest.
                tracing::warn!(id = %record.id, error = %error, "notifier failed");
            }
        }
    }
}

/// Handle to a spawned scheduler. Dropping it stops the loop.
pub struct SchedulerHandle {
    handle: JoinHandle<()>,
}

impl SchedulerHandle {
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
