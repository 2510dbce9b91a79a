//! Log record definitions
//!
//! The logical, in-memory form of one sample.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::time::CalendarMoment;

/// Lowest temperature a record can hold (absolute zero, °C)
pub const MIN_TEMPERATURE: f32 = -273.15;

/// Highest temperature a record can hold (°C)
pub const MAX_TEMPERATURE: f32 = 100.0;

/// Lowest relative humidity a record can hold (%)
pub const MIN_HUMIDITY: f32 = 0.0;

/// Highest relative humidity a record can hold (%)
pub const MAX_HUMIDITY: f32 = 100.0;

/// One timestamped temperature/humidity sample
///
/// The default value is the *empty* record: epoch timestamp, both readings
/// zero. It is what [`LogStore::get`](super::LogStore::get) returns for
/// indices past the end of the log.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LogRecord {
    /// When the sample was taken
    pub timestamp: CalendarMoment,

    /// Temperature in °C, within [-273.15, 100.0]
    pub temperature: f32,

    /// Relative humidity in %, within [0.0, 100.0]
    pub humidity: f32,
}

impl LogRecord {
    /// Create a record, clamping both readings into range
    pub fn new(timestamp: CalendarMoment, temperature: f32, humidity: f32) -> Self {
        Self {
            timestamp,
            temperature: temperature.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE),
            humidity: humidity.clamp(MIN_HUMIDITY, MAX_HUMIDITY),
        }
    }

    /// True for the default record (epoch, 0 °C, 0 %)
    pub fn is_empty(&self) -> bool {
        self.timestamp.is_epoch() && self.temperature == 0.0 && self.humidity == 0.0
    }
}

/// CSV line as written by the serial dump: `yyyy-MM-dd hh:mm:ss,21.50,47.20`
impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{:.2},{:.2}",
            self.timestamp, self.temperature, self.humidity
        )
    }
}
