//! Timestamp newtype: microsecond precision since the Unix epoch, matching
//! the import record's "started-at µs-precision" requirement exactly
//! rather than widening into a calendar type at the data-model layer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimestampUs(pub i64);

pub const ZERO: TimestampUs = TimestampUs(0);
pub const HOUR_US: i64 = 3_600_000_000;
pub const DAY_US: i64 = 24 * HOUR_US;

impl TimestampUs {
    #[must_use]
    pub fn now() -> Self {
        let dur = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();
        Self(dur.as_micros() as i64)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Convert a filesystem modification time into microsecond-since-epoch
    /// precision, saturating to zero for times before the epoch.
    #[must_use]
    pub fn from_system_time(t: std::time::SystemTime) -> Self {
        match t.duration_since(std::time::UNIX_EPOCH) {
            Ok(dur) => Self(dur.as_micros() as i64),
            Err(_) => ZERO,
        }
    }

    #[must_use]
    pub fn saturating_sub_us(&self, micros: i64) -> Self {
        Self(self.0.saturating_sub(micros))
    }

    /// Truncate to the start of the containing hour, matching the
    /// `import_hour` bucketing used by hourly aggregate TTLs.
    #[must_use]
    pub fn start_of_hour(&self) -> Self {
        Self(self.0 - self.0.rem_euclid(HOUR_US))
    }
}

impl std::ops::Sub for TimestampUs {
    type Output = i64;
    fn sub(self, rhs: Self) -> i64 {
        self.0 - rhs.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_of_hour_truncates() {
        let t = TimestampUs(HOUR_US + HOUR_US / 2);
        assert_eq!(t.start_of_hour(), TimestampUs(HOUR_US));
    }
}
