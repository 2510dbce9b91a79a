//! Time Module
//!
//! Canonical calendar moments and their lossless conversion to the 32-bit
//! epoch-second time base stored in log records.
//!
//! ## Responsibilities
//! - Clamped construction (never rejects input)
//! - Leap-year aware conversion to and from [`EpochSeconds`]
//! - Ordering and duration arithmetic
//! - Text formats for display and export
//!
//! ## Time Base
//! ```text
//!   0            = 2000-01-01 00:00:00 (Saturday)
//!   u32::MAX     = 2136-02-07 06:28:15
//! ```

mod calendar;
mod format;
mod moment;

pub use calendar::{day_of_week, days_in_month, days_in_year, is_leap_year};
pub use format::DateFormat;
pub use moment::{CalendarMoment, EpochSeconds, EPOCH_YEAR, MAX_YEAR, UNIX_EPOCH_OFFSET};
