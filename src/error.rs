//! Error types for climalog
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using ClimaError
pub type Result<T> = std::result::Result<T, ClimaError>;

/// Unified error type for climalog operations
#[derive(Debug, Error)]
pub enum ClimaError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Medium Errors
    // -------------------------------------------------------------------------
    /// The availability probe failed at startup. Fatal for the store.
    #[error("Nonvolatile medium is not available")]
    MediumUnavailable,

    #[error("Address out of range: {len} bytes at {address:#06x} (medium size {size})")]
    AddressOutOfRange { address: u32, len: usize, size: u32 },

    // -------------------------------------------------------------------------
    // Log Errors
    // -------------------------------------------------------------------------
    /// Every slot of the log region holds a record.
    #[error("Log is full: all {capacity} record slots are in use")]
    CapacityExhausted { capacity: u32 },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Parse error: {0}")]
    Parse(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<bincode::Error> for ClimaError {
    fn from(err: bincode::Error) -> Self {
        ClimaError::Serialization(err.to_string())
    }
}
