//! Time source for note timestamps.

use chrono::{Duration, Local, NaiveDateTime};
use std::cell::Cell;

/// Supplies the current local time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Manually driven clock for deterministic callers and tests.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    pub fn advance_secs(&self, secs: i64) {
        self.now.set(self.now.get() + Duration::seconds(secs));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}
