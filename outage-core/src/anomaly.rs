//! Date anomaly detection.
//!
//! Flags outages whose dates are implausible as of "now". The current time
//! comes from a [`Clock`] so callers can pin it; production code uses
//! [`SystemClock`].

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Clock
// ============================================================================

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// ============================================================================
// Anomalies
// ============================================================================

/// An implausible date relationship on an outage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anomaly {
    /// `end` is earlier than `begin`.
    NegativeDuration,
    /// `begin` is later than now.
    FutureBegin,
    /// `end` is later than now.
    FutureEnd,
}

impl Anomaly {
    /// Human-readable warning text.
    pub fn message(self) -> &'static str {
        match self {
            Self::NegativeDuration => "Negative duration detected",
            Self::FutureBegin => "Outage has future begin date",
            Self::FutureEnd => "Outage has future end date",
        }
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The set of anomalies found on one outage, in declaration order.
pub type Anomalies = BTreeSet<Anomaly>;

/// Checks a begin/end pair against each other and against `clock`.
///
/// Each tag is evaluated independently; all three may be present at once.
pub fn detect_anomalies(
    begin: DateTime<Utc>,
    end: DateTime<Utc>,
    clock: &dyn Clock,
) -> Anomalies {
    let now = clock.now();
    let mut found = Anomalies::new();

    if end < begin {
        found.insert(Anomaly::NegativeDuration);
    }
    if begin > now {
        found.insert(Anomaly::FutureBegin);
    }
    if end > now {
        found.insert(Anomaly::FutureEnd);
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap())
    }

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_no_warnings() {
        let found = detect_anomalies(day(2023, 1, 1), day(2023, 1, 9), &clock());
        assert!(found.is_empty());
    }

    #[test]
    fn test_negative_duration() {
        let found = detect_anomalies(day(2023, 1, 9), day(2023, 1, 1), &clock());
        assert_eq!(found.into_iter().collect::<Vec<_>>(), [Anomaly::NegativeDuration]);
    }

    #[test]
    fn test_zero_duration_is_not_negative() {
        let found = detect_anomalies(day(2023, 1, 1), day(2023, 1, 1), &clock());
        assert!(found.is_empty());
    }

    #[test]
    fn test_future_begin_implies_negative_when_end_in_past() {
        let clock = clock();
        let begin = clock.now() + TimeDelta::days(7);
        let found = detect_anomalies(begin, day(2022, 1, 1), &clock);

        assert!(found.contains(&Anomaly::FutureBegin));
        assert!(found.contains(&Anomaly::NegativeDuration));
        assert!(!found.contains(&Anomaly::FutureEnd));
    }

    #[test]
    fn test_future_end() {
        let clock = clock();
        let end = clock.now() + TimeDelta::days(7);
        let found = detect_anomalies(day(2023, 1, 9), end, &clock);

        assert_eq!(found.into_iter().collect::<Vec<_>>(), [Anomaly::FutureEnd]);
    }

    #[test]
    fn test_all_warnings() {
        let clock = clock();
        let begin = clock.now() + TimeDelta::days(8);
        let end = clock.now() + TimeDelta::days(7);
        let found = detect_anomalies(begin, end, &clock);

        assert_eq!(
            found.into_iter().collect::<Vec<_>>(),
            [Anomaly::NegativeDuration, Anomaly::FutureBegin, Anomaly::FutureEnd]
        );
    }

    #[test]
    fn test_exactly_now_is_not_future() {
        let clock = clock();
        let found = detect_anomalies(clock.now(), clock.now(), &clock);
        assert!(found.is_empty());
    }

    #[test]
    fn test_anomaly_serializes_kebab_case() {
        let json = serde_json::to_string(&Anomaly::NegativeDuration).unwrap();
        assert_eq!(json, r#""negative-duration""#);
    }
}
