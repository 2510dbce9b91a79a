//! In-memory medium
//!
//! A RAM-backed stand-in for the FRAM chip, used by tests and benchmarks.
//! It can simulate a power cut: after a configured number of byte writes,
//! every further write is silently lost, exactly like a chip whose supply
//! collapsed halfway through a burst.

use crate::error::Result;

use super::{check_range, NonvolatileStore};

/// Vec-backed nonvolatile medium with power-cut injection
#[derive(Debug, Clone)]
pub struct MemoryMedium {
    /// Raw medium contents
    bytes: Vec<u8>,
    /// Result of the availability probe
    present: bool,
    /// Byte writes still allowed before power is lost (None = unlimited)
    write_budget: Option<usize>,
    /// Total byte writes that actually reached the medium
    bytes_written: u64,
}

impl MemoryMedium {
    /// Create a zero-filled medium of `size` bytes
    pub fn new(size: u32) -> Self {
        Self::from_bytes(vec![0u8; size as usize])
    }

    /// Create a medium with the given contents (e.g. random power-up garbage)
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            present: true,
            write_budget: None,
            bytes_written: 0,
        }
    }

    /// Create a medium whose availability probe fails
    pub fn unavailable(size: u32) -> Self {
        let mut medium = Self::new(size);
        medium.present = false;
        medium
    }

    /// Lose power after `bytes` more byte writes.
    ///
    /// Writes beyond the budget are dropped without an error.
    pub fn cut_power_after(&mut self, bytes: usize) {
        self.write_budget = Some(bytes);
    }

    /// Restore power: writes reach the medium again
    pub fn restore_power(&mut self) {
        self.write_budget = None;
    }

    /// Whether a power cut has already swallowed writes
    pub fn is_powered(&self) -> bool {
        self.write_budget != Some(0)
    }

    /// Number of byte writes that reached the medium
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Raw view of the contents
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Raw mutable view, for planting corruption
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Consume the medium and return its contents
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    fn store(&mut self, address: u32, value: u8) {
        match self.write_budget {
            Some(0) => return,
            Some(ref mut left) => *left -= 1,
            None => {}
        }
        self.bytes[address as usize] = value;
        self.bytes_written += 1;
    }
}

impl NonvolatileStore for MemoryMedium {
    fn available(&mut self) -> bool {
        self.present
    }

    fn size(&self) -> u32 {
        self.bytes.len() as u32
    }

    fn read_byte(&mut self, address: u32) -> Result<u8> {
        check_range(self.size(), address, 1)?;
        Ok(self.bytes[address as usize])
    }

    fn write_byte(&mut self, address: u32, value: u8) -> Result<()> {
        check_range(self.size(), address, 1)?;
        self.store(address, value);
        Ok(())
    }

    fn read_range(&mut self, address: u32, buf: &mut [u8]) -> Result<()> {
        check_range(self.size(), address, buf.len())?;
        let start = address as usize;
        buf.copy_from_slice(&self.bytes[start..start + buf.len()]);
        Ok(())
    }

    fn write_range(&mut self, address: u32, bytes: &[u8]) -> Result<()> {
        check_range(self.size(), address, bytes.len())?;
        for (offset, byte) in bytes.iter().enumerate() {
            self.store(address + offset as u32, *byte);
        }
        Ok(())
    }
}
