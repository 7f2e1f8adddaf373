//! Deadline urgency labels
//!
//! The hour delta is truncated toward zero, so anything under a full hour on
//! either side of the deadline reads as "deadline is now".

use std::fmt;

use chrono::{DateTime, Utc};

/// Where `now` falls relative to a deadline, in whole hours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineStatus {
    Now,
    Remaining { hours: u64 },
    Overdue { hours: u64 },
}

impl DeadlineStatus {
    pub fn is_overdue(self) -> bool {
        matches!(self, Self::Overdue { .. })
    }

    /// Unsigned distance from the deadline
    pub fn hours(self) -> u64 {
        match self {
            Self::Now => 0,
            Self::Remaining { hours } | Self::Overdue { hours } => hours,
        }
    }
}

/// Compute the urgency of `deadline` as seen at `now`
pub fn status(now: DateTime<Utc>, deadline: DateTime<Utc>) -> DeadlineStatus {
    let hours = deadline.signed_duration_since(now).num_hours();
    match hours {
        0 => DeadlineStatus::Now,
        h if h > 0 => DeadlineStatus::Remaining {
            hours: h.unsigned_abs(),
        },
        h => DeadlineStatus::Overdue {
            hours: h.unsigned_abs(),
        },
    }
}

fn plural(hours: u64) -> &'static str {
    if hours == 1 {
        "hour"
    } else {
        "hours"
    }
}

impl fmt::Display for DeadlineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Now => f.write_str("deadline is now"),
            Self::Remaining { hours } => write!(f, "{hours} {} remaining", plural(hours)),
            Self::Overdue { hours } => write!(f, "overdue by {hours} {}", plural(hours)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    fn deadline() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()
    }

    #[rstest]
    #[case::exact(0, DeadlineStatus::Now)]
    #[case::two_hours_before(-120, DeadlineStatus::Remaining { hours: 2 })]
    #[case::two_hours_after(120, DeadlineStatus::Overdue { hours: 2 })]
    #[case::one_point_nine_before(-114, DeadlineStatus::Remaining { hours: 1 })]
    #[case::one_point_nine_after(114, DeadlineStatus::Overdue { hours: 1 })]
    #[case::just_under_an_hour_before(-59, DeadlineStatus::Now)]
    #[case::just_under_an_hour_after(59, DeadlineStatus::Now)]
    #[case::one_hour_before(-60, DeadlineStatus::Remaining { hours: 1 })]
    #[case::days_overdue(3 * 24 * 60 + 30, DeadlineStatus::Overdue { hours: 72 })]
    fn test_status_truncates_toward_zero(
        #[case] minutes_after_deadline: i64,
        #[case] expected: DeadlineStatus,
    ) {
        let now = deadline() + Duration::minutes(minutes_after_deadline);
        assert_eq!(status(now, deadline()), expected);
    }

    #[rstest]
    #[case(DeadlineStatus::Now, "deadline is now")]
    #[case(DeadlineStatus::Remaining { hours: 2 }, "2 hours remaining")]
    #[case(DeadlineStatus::Remaining { hours: 1 }, "1 hour remaining")]
    #[case(DeadlineStatus::Overdue { hours: 2 }, "overdue by 2 hours")]
    #[case(DeadlineStatus::Overdue { hours: 1 }, "overdue by 1 hour")]
    fn test_status_labels(#[case] status: DeadlineStatus, #[case] label: &str) {
        assert_eq!(status.to_string(), label);
    }

    #[test]
    fn test_hours_is_unsigned_in_both_directions() {
        let before = status(deadline() - Duration::hours(5), deadline());
        let after = status(deadline() + Duration::hours(5), deadline());

        assert_eq!(before.hours(), 5);
        assert_eq!(after.hours(), 5);
        assert!(!before.is_overdue());
        assert!(after.is_overdue());
    }
}
