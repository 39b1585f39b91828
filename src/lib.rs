//! Timer lifecycle core for LockPilot
//!
//! This crate provides:
//! - **Records**: the timer data model exchanged with the view
//! - **Service**: validated create / list / cancel / take-due operations
//! - **Scheduler**: a tick loop that fires due timers through a [`Notifier`]
//!
//! The view (form + list UI) and the notifier (popup dialog, screen lock,
//! shutdown) are external collaborators; this crate owns the state and the
//! rules. Timers are one-shot: once fired or canceled, a record is gone.

pub mod clock;
pub mod error;
pub mod record;
pub mod scheduler;
pub mod service;
pub mod store;


pub use clock::{Clock, SystemClock};
pub use error::{NotifierError, TimerError, ValidationError};
pub use record::{CreateTimerRequest, TimerAction, TimerId, TimerRecord};
pub use scheduler::{DEFAULT_TICK_PERIOD, Notifier, Scheduler, SchedulerHandle};
pub use service::TimerService;
pub use store::{MemoryStore, TimerStore};
