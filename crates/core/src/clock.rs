//! Clock seam
//!
//! Everything time-dependent reads the current instant through
//! [`mockable::Clock`] so tests can pin it.

use chrono::{DateTime, Local, Utc};

pub use mockable::{Clock, DefaultClock};

/// A clock frozen at a single instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_returns_pinned_instant() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let clock = FixedClock::new(instant);

        assert_eq!(clock.utc(), instant);
        assert_eq!(clock.utc(), clock.utc());
        assert_eq!(clock.local().with_timezone(&Utc), instant);
    }
}
