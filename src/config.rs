//! Configuration for climalog
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{ClimaError, Result};
use crate::settings::Settings;

/// Size of the MB85RC256 FRAM chip the logger ships with (32 KiB)
pub const DEFAULT_MEDIUM_SIZE: u32 = 32 * 1024;

/// Main configuration for a logger instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Medium Configuration
    // -------------------------------------------------------------------------
    /// Image file standing in for the nonvolatile chip
    pub image_path: PathBuf,

    /// Total size of the medium in bytes
    pub medium_size: u32,

    // -------------------------------------------------------------------------
    // Log Configuration
    // -------------------------------------------------------------------------
    /// Bytes at the start of the medium owned by the settings block.
    /// The log region starts right after them.
    pub reserved_prefix: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_path: PathBuf::from("./climalog.img"),
            medium_size: DEFAULT_MEDIUM_SIZE,
            reserved_prefix: Settings::SIZE as u32,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the reserved prefix leaves room on the medium
    pub fn validate(&self) -> Result<()> {
        if self.medium_size == 0 {
            return Err(ClimaError::Config("medium size must be non-zero".to_string()));
        }
        if self.reserved_prefix > self.medium_size {
            return Err(ClimaError::Config(format!(
                "reserved prefix ({} bytes) exceeds medium size ({} bytes)",
                self.reserved_prefix, self.medium_size
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the chip image path
    pub fn image_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.image_path = path.into();
        self
    }

    /// Set the medium size (in bytes)
    pub fn medium_size(mut self, size: u32) -> Self {
        self.config.medium_size = size;
        self
    }

    /// Set the number of bytes reserved ahead of the log region
    pub fn reserved_prefix(mut self, bytes: u32) -> Self {
        self.config.reserved_prefix = bytes;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
