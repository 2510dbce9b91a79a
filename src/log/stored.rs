//! On-medium record layout
//!
//! Fixed 14-byte slots, packed, little-endian:
//!
//! ```text
//! ┌──────────┬──────────────┬─────────────────┬─────────┐
//! │ Time (4) │ Humidity (4) │ Temperature (4) │ CRC (2) │
//! └──────────┴──────────────┴─────────────────┴─────────┘
//! ```

use crate::checksum::crc16;
use crate::time::{CalendarMoment, EpochSeconds};

use super::record::{LogRecord, MAX_HUMIDITY, MAX_TEMPERATURE, MIN_HUMIDITY, MIN_TEMPERATURE};

/// Size of one slot in bytes
pub const RECORD_SIZE: usize = 14;

const TIME_OFFSET: usize = 0;
const HUMIDITY_OFFSET: usize = 4;
const TEMPERATURE_OFFSET: usize = 8;
const CRC_OFFSET: usize = 12;

/// Raw contents of one slot
pub type SlotBytes = [u8; RECORD_SIZE];

/// What the recovery scan finds in a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// Every byte is zero: the end of the log
    Null,
    /// Readings in range and checksum matches
    Valid,
    /// Non-null but failing validation (torn write or stale garbage)
    Corrupt,
}

/// A record as laid out on the medium
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoredRecord {
    pub time: EpochSeconds,
    pub humidity: f32,
    pub temperature: f32,
    pub crc: u16,
}

impl StoredRecord {
    /// Encode a log record and seal it with its checksum
    pub fn seal(record: &LogRecord) -> Self {
        let mut stored = Self {
            time: record.timestamp.to_epoch_seconds(),
            humidity: record.humidity,
            temperature: record.temperature,
            crc: 0,
        };
        stored.crc = stored.compute_crc();
        stored
    }

    /// Decode back into a log record (readings are re-clamped, a no-op for valid slots)
    pub fn to_log_record(&self) -> LogRecord {
        LogRecord::new(
            CalendarMoment::from_epoch_seconds(self.time),
            self.temperature,
            self.humidity,
        )
    }

    /// Serialize to slot bytes
    pub fn encode(&self) -> SlotBytes {
        let mut bytes = [0u8; RECORD_SIZE];
        bytes[TIME_OFFSET..HUMIDITY_OFFSET].copy_from_slice(&self.time.to_le_bytes());
        bytes[HUMIDITY_OFFSET..TEMPERATURE_OFFSET].copy_from_slice(&self.humidity.to_le_bytes());
        bytes[TEMPERATURE_OFFSET..CRC_OFFSET].copy_from_slice(&self.temperature.to_le_bytes());
        bytes[CRC_OFFSET..].copy_from_slice(&self.crc.to_le_bytes());
        bytes
    }

    /// Deserialize from slot bytes. Any bit pattern decodes.
    pub fn decode(bytes: &SlotBytes) -> Self {
        let word = |at: usize| [bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]];
        Self {
            time: u32::from_le_bytes(word(TIME_OFFSET)),
            humidity: f32::from_le_bytes(word(HUMIDITY_OFFSET)),
            temperature: f32::from_le_bytes(word(TEMPERATURE_OFFSET)),
            crc: u16::from_le_bytes([bytes[CRC_OFFSET], bytes[CRC_OFFSET + 1]]),
        }
    }

    /// CRC-16 over all 14 bytes with the crc field zeroed
    pub fn compute_crc(&self) -> u16 {
        let unsealed = Self { crc: 0, ..*self };
        crc16(&unsealed.encode())
    }

    /// Readings within their physical ranges.
    ///
    /// NaN compares false against both bounds and therefore passes; the
    /// checksum still has to match.
    pub fn readings_in_range(&self) -> bool {
        !(self.humidity < MIN_HUMIDITY
            || self.humidity > MAX_HUMIDITY
            || self.temperature < MIN_TEMPERATURE
            || self.temperature > MAX_TEMPERATURE)
    }

    /// In range and carrying a matching checksum
    pub fn is_valid(&self) -> bool {
        self.readings_in_range() && self.compute_crc() == self.crc
    }
}

/// True if every byte of the slot is zero
pub fn is_null_slot(bytes: &SlotBytes) -> bool {
    bytes.iter().all(|&b| b == 0)
}

/// Classify raw slot contents
pub fn classify_slot(bytes: &SlotBytes) -> SlotState {
    if is_null_slot(bytes) {
        SlotState::Null
    } else if StoredRecord::decode(bytes).is_valid() {
        SlotState::Valid
    } else {
        SlotState::Corrupt
    }
}
