//! Time sources for note timestamps.

use chrono::{DateTime, Utc};
use std::cell::Cell;
use std::rc::Rc;

/// Supplies the current time to the store.
///
/// Implementations return whole milliseconds so that a timestamp survives a
/// storage round trip unchanged.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time, truncated to milliseconds.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        let now = Utc::now();
        DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle and give the
/// other to a store.
#[derive(Debug, Clone)]
pub struct ManualClock {
    millis: Rc<Cell<i64>>,
}

impl ManualClock {
    /// Starts the clock at `millis` since the Unix epoch.
    pub fn starting_at(millis: i64) -> Self {
        Self {
            millis: Rc::new(Cell::new(millis)),
        }
    }

    /// Moves the clock forward (or backward, for negative `millis`).
    pub fn advance(&self, millis: i64) {
        self.millis.set(self.millis.get() + millis);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.millis.get()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_has_no_sub_millisecond_part() {
        let now = SystemClock.now();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::starting_at(1_000);
        let handle = clock.clone();
        handle.advance(500);
        assert_eq!(clock.now().timestamp_millis(), 1_500);
    }
}
