//! Gregorian calendar arithmetic
//!
//! Leap years, month lengths and day-of-week for years from the epoch on.

/// Days per month for a common year, indexed by month (1-based)
const DAYS_PER_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub(crate) const SECONDS_PER_MINUTE: u32 = 60;
pub(crate) const SECONDS_PER_HOUR: u32 = 3600;
pub(crate) const SECONDS_PER_DAY: u32 = 86_400;

const DAYS_PER_COMMON_YEAR: u32 = 365;

/// Gregorian leap year rule
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`; `month` must be 1..=12
pub fn days_in_month(year: u16, month: u8) -> u8 {
    if month == 2 && is_leap_year(year) {
        return 29;
    }
    DAYS_PER_MONTH[month as usize]
}

/// Number of days in `year`
pub fn days_in_year(year: u16) -> u32 {
    if is_leap_year(year) {
        DAYS_PER_COMMON_YEAR + 1
    } else {
        DAYS_PER_COMMON_YEAR
    }
}

/// Day of the week, 0 = Sunday .. 6 = Saturday.
///
/// Tøndering's formula; month and day must already be valid.
pub fn day_of_week(year: u16, month: u8, day: u8) -> u8 {
    let a = (14 - month as i32) / 12;
    let y = year as i32 - a;
    let m = month as i32 + 12 * a - 2;
    let d = (day as i32 + y + y / 4 - y / 100 + y / 400 + (31 * m) / 12) % 7;
    d as u8
}
