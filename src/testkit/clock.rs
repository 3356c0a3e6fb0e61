//! Manually driven [`Clock`] for cooldown and rollover tests.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

use super::domain::fixed_time;
use crate::port::outbound::clock::Clock;

/// A clock that only moves when told to.
///
/// Defaults to [`fixed_time`].
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(fixed_time())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
