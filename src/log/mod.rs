//! Record Log Module
//!
//! Durable, append-only storage of samples on the nonvolatile medium.
//!
//! ## Responsibilities
//! - Fixed-size checksummed slots after the settings block
//! - Boot-time recovery scan that terminates on any power-up contents
//! - Crash-safe append ("zero ahead, then write")
//! - Indexed reads and a cheap erase
//!
//! ## Region Format
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Slot 0                                  │
//! │ ┌────────┬──────────┬──────────┬──────┐ │
//! │ │Time (4)│ Hum (4)  │ Temp (4) │CRC(2)│ │
//! │ └────────┴──────────┴──────────┴──────┘ │
//! ├─────────────────────────────────────────┤
//! │ Slot 1 ...                              │
//! ├─────────────────────────────────────────┤
//! │ Slot count: all zero (end of log)       │
//! └─────────────────────────────────────────┘
//! ```

mod record;
mod store;
mod stored;

pub use record::{LogRecord, MAX_HUMIDITY, MAX_TEMPERATURE, MIN_HUMIDITY, MIN_TEMPERATURE};
pub use store::{LogStore, Records, ScanReport, ScanStop};
pub use stored::{classify_slot, is_null_slot, SlotBytes, SlotState, StoredRecord, RECORD_SIZE};
