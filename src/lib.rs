//! # climalog
//!
//! The persistent data layer of a battery-powered temperature/humidity
//! logger:
//! - Append-only record log on a small byte-addressable FRAM chip
//! - Recovery scan that survives power loss at any byte
//! - Calendar codec with a 32-bit seconds-since-2000 time base
//! - Settings block, recording scheduler and bulk export
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Recorder / Export / CLI                         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  LogStore   │─────────▶│    time     │
//!   │ (scan/append│          │ (calendar   │
//!   │  /get)      │          │  codec)     │
//!   └──────┬──────┘          └─────────────┘
//!          │
//!          ▼
//!   ┌─────────────────────────────┐
//!   │   NonvolatileStore (medium) │
//!   │ [settings │ slot 0 │ ... ]  │
//!   └─────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod checksum;
pub mod medium;
pub mod time;
pub mod log;
pub mod settings;
pub mod export;
pub mod recorder;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ClimaError, Result};
pub use config::Config;
pub use log::{LogRecord, LogStore};
pub use medium::NonvolatileStore;
pub use settings::Settings;
pub use time::CalendarMoment;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of climalog
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
