//! Calendar moments and their epoch-second encoding

use serde::{Deserialize, Serialize};

use super::calendar::{
    day_of_week, days_in_month, days_in_year, SECONDS_PER_DAY, SECONDS_PER_HOUR,
    SECONDS_PER_MINUTE,
};

/// Seconds since 2000-01-01 00:00:00, the only persisted form of time
pub type EpochSeconds = u32;

/// First representable year
pub const EPOCH_YEAR: u16 = 2000;

/// Last year accepted by the clamping constructor
pub const MAX_YEAR: u16 = 9999;

/// 2000-01-01 was a Saturday
const EPOCH_DAY_OF_WEEK: u32 = 6;

/// Extended seconds of 9999-12-31 23:59:59
const MAX_EXTENDED_SECONDS: u64 = 252_455_615_999;

/// Seconds from the Unix epoch (1970-01-01) to our epoch (2000-01-01)
pub const UNIX_EPOCH_OFFSET: i64 = 946_684_800;

/// A date and time of day with second resolution
///
/// Every value is valid for its own year and month: the constructor clamps
/// instead of rejecting. The derived ordering compares year, month, day,
/// hour, minute and second in turn; `day_of_week` is a function of the date
/// and never decides a comparison on its own.
///
/// Serialized as its [`EpochSeconds`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "EpochSeconds", into = "EpochSeconds")]
pub struct CalendarMoment {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    day_of_week: u8,
}

impl CalendarMoment {
    /// The epoch, 2000-01-01 00:00:00
    pub const EPOCH: CalendarMoment = CalendarMoment {
        year: EPOCH_YEAR,
        month: 1,
        day: 1,
        hour: 0,
        minute: 0,
        second: 0,
        day_of_week: EPOCH_DAY_OF_WEEK as u8,
    };

    /// The last moment the clamping constructor can produce, 9999-12-31 23:59:59
    pub const MAX: CalendarMoment = CalendarMoment {
        year: MAX_YEAR,
        month: 12,
        day: 31,
        hour: 23,
        minute: 59,
        second: 59,
        day_of_week: 5,
    };

    /// Build a moment, clamping every field into its legal range.
    ///
    /// The day is clamped against the length of the (already clamped)
    /// month, so February 30 becomes February 29 or 28.
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        let year = year.clamp(EPOCH_YEAR, MAX_YEAR);
        let month = month.clamp(1, 12);
        let day = day.clamp(1, days_in_month(year, month));

        Self {
            year,
            month,
            day,
            hour: hour.min(23),
            minute: minute.min(59),
            second: second.min(59),
            day_of_week: day_of_week(year, month, day),
        }
    }

    /// Decode an epoch-second value. Exact: no clamping is needed.
    pub fn from_epoch_seconds(seconds: EpochSeconds) -> Self {
        Self::from_extended_seconds(seconds as u64)
    }

    /// Encode as seconds since the epoch.
    ///
    /// Moments after 2136-02-07 06:28:15 do not fit in 32 bits and wrap.
    pub fn to_epoch_seconds(&self) -> EpochSeconds {
        self.to_extended_seconds() as EpochSeconds
    }

    /// Decode a 64-bit seconds-since-epoch value.
    ///
    /// Covers the whole year range; values past 9999-12-31 23:59:59 clamp
    /// to that moment.
    pub fn from_extended_seconds(seconds: u64) -> Self {
        let seconds = seconds.min(MAX_EXTENDED_SECONDS);

        // Time of day
        let mut since_midnight = (seconds % SECONDS_PER_DAY as u64) as u32;
        let hour = since_midnight / SECONDS_PER_HOUR;
        since_midnight %= SECONDS_PER_HOUR;
        let minute = since_midnight / SECONDS_PER_MINUTE;
        let second = since_midnight % SECONDS_PER_MINUTE;

        // Date: strip whole years, then whole months
        let days_since_epoch = seconds / SECONDS_PER_DAY as u64;
        let mut days = days_since_epoch;

        let mut year = EPOCH_YEAR;
        while days >= days_in_year(year) as u64 {
            days -= days_in_year(year) as u64;
            year += 1;
        }

        let mut month = 1u8;
        while days >= days_in_month(year, month) as u64 {
            days -= days_in_month(year, month) as u64;
            month += 1;
        }

        Self {
            year,
            month,
            day: days as u8 + 1,
            hour: hour as u8,
            minute: minute as u8,
            second: second as u8,
            day_of_week: ((days_since_epoch + EPOCH_DAY_OF_WEEK as u64) % 7) as u8,
        }
    }

    /// Encode as 64-bit seconds since the epoch, exact for every year
    pub fn to_extended_seconds(&self) -> u64 {
        let mut days: u64 = 0;
        for year in EPOCH_YEAR..self.year {
            days += days_in_year(year) as u64;
        }
        for month in 1..self.month {
            days += days_in_month(self.year, month) as u64;
        }
        days += (self.day - 1) as u64;

        days * SECONDS_PER_DAY as u64
            + self.hour as u64 * SECONDS_PER_HOUR as u64
            + self.minute as u64 * SECONDS_PER_MINUTE as u64
            + self.second as u64
    }

    /// Convert host wall-clock time, clamped to the representable range
    pub fn from_unix_seconds(unix: i64) -> Self {
        let since_epoch = unix
            .saturating_sub(UNIX_EPOCH_OFFSET)
            .clamp(0, EpochSeconds::MAX as i64);
        Self::from_epoch_seconds(since_epoch as EpochSeconds)
    }

    /// Seconds since the Unix epoch
    pub fn to_unix_seconds(&self) -> i64 {
        self.to_epoch_seconds() as i64 + UNIX_EPOCH_OFFSET
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    /// Shift by a signed number of seconds, wrapping around the 32-bit range
    pub fn add_seconds(&self, seconds: i64) -> Self {
        let shifted = (self.to_epoch_seconds() as i64)
            .wrapping_add(seconds)
            .rem_euclid(1i64 << 32);
        Self::from_epoch_seconds(shifted as EpochSeconds)
    }

    /// Shift by a signed number of whole days
    pub fn add_days(&self, days: i64) -> Self {
        self.add_seconds(days.wrapping_mul(SECONDS_PER_DAY as i64))
    }

    /// Signed number of seconds from `self` to `other`
    pub fn seconds_to(&self, other: &CalendarMoment) -> i64 {
        other.to_epoch_seconds() as i64 - self.to_epoch_seconds() as i64
    }

    /// True for 2000-01-01 00:00:00
    pub fn is_epoch(&self) -> bool {
        *self == Self::EPOCH
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    /// 0 = Sunday .. 6 = Saturday
    pub fn day_of_week(&self) -> u8 {
        self.day_of_week
    }
}

impl Default for CalendarMoment {
    fn default() -> Self {
        Self::EPOCH
    }
}

impl From<EpochSeconds> for CalendarMoment {
    fn from(seconds: EpochSeconds) -> Self {
        Self::from_epoch_seconds(seconds)
    }
}

impl From<CalendarMoment> for EpochSeconds {
    fn from(moment: CalendarMoment) -> Self {
        moment.to_epoch_seconds()
    }
}
