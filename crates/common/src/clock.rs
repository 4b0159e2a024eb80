//! Time source passed explicitly into aggregate factories and mutators.
//!
//! Aggregates take a `&dyn mockable::Clock` and never read the system time
//! themselves. Production wiring hands them [`DefaultClock`]; tests use
//! [`FixedClock`].

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Local, Utc};

pub use mockable::{Clock, DefaultClock};

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock(Mutex<DateTime<Utc>>);

impl FixedClock {
    /// Creates a clock frozen at `instant`.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(Mutex::new(instant))
    }

    /// Moves the clock to `instant`.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.lock() = instant;
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        *self.lock() += by;
    }

    fn lock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock()
    }
}
