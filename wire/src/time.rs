//! DIS timestamp encoding.
//!
//! The header timestamp counts time since the top of the current hour in
//! units of one hour divided by `2^31 - 1`, shifted left one bit. The least
//! significant bit marks the timestamp as absolute (1, host synchronised to
//! UTC) or relative (0). Timestamps roll over every hour.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// DIS time units in one hour.
pub const UNITS_PER_HOUR: u32 = i32::MAX as u32;

const HOUR_NANOS: u128 = 3_600 * 1_000_000_000;
const ABSOLUTE_BIT: u32 = 1;

/// A header timestamp value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DisTimestamp(u32);

impl DisTimestamp {
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Absolute timestamp for an offset into the hour. Offsets of an hour or
    /// more wrap.
    #[must_use]
    pub fn absolute(since_hour: Duration) -> Self {
        Self((units_since_hour(since_hour) << 1) | ABSOLUTE_BIT)
    }

    /// Relative timestamp for an offset into the hour.
    #[must_use]
    pub fn relative(since_hour: Duration) -> Self {
        Self((units_since_hour(since_hour) << 1) & !ABSOLUTE_BIT)
    }

    /// Absolute timestamp for the current system time.
    #[must_use]
    pub fn now_absolute() -> Self {
        Self::absolute(since_top_of_hour(SystemTime::now()))
    }

    /// Relative timestamp for the current system time.
    #[must_use]
    pub fn now_relative() -> Self {
        Self::relative(since_top_of_hour(SystemTime::now()))
    }

    #[must_use]
    pub const fn is_absolute(self) -> bool {
        self.0 & ABSOLUTE_BIT != 0
    }

    /// DIS time units since the top of the hour.
    #[must_use]
    pub const fn units(self) -> u32 {
        self.0 >> 1
    }

    /// Converts back to an offset into the hour.
    #[must_use]
    pub fn since_hour(self) -> Duration {
        let nanos = u128::from(self.units()) * HOUR_NANOS / u128::from(UNITS_PER_HOUR);
        // Bounded by one hour, so it always fits in u64.
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }
}

/// Converts an offset into the hour to DIS time units, rounding to nearest.
#[must_use]
pub fn units_since_hour(since_hour: Duration) -> u32 {
    let nanos = since_hour.as_nanos() % HOUR_NANOS;
    let units = (nanos * u128::from(UNITS_PER_HOUR) + HOUR_NANOS / 2) / HOUR_NANOS;
    u32::try_from(units).unwrap_or(UNITS_PER_HOUR)
}

/// Time elapsed since the top of the UTC hour containing `now`.
#[must_use]
pub fn since_top_of_hour(now: SystemTime) -> Duration {
    let since_epoch = now.duration_since(UNIX_EPOCH).unwrap_or_default();
    let nanos = since_epoch.as_nanos() % HOUR_NANOS;
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}
