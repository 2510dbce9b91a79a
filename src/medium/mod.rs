//! Nonvolatile Medium Module
//!
//! Byte-addressable storage the log and settings live on.
//!
//! ## Responsibilities
//! - One-time availability probe at startup
//! - Fixed total size
//! - Byte and range reads/writes, bounds-checked
//!
//! The medium offers no transactions. A single byte write is the only
//! atomic unit; anything larger can be torn by a power cut.

mod file;
mod memory;

pub use file::FileMedium;
pub use memory::MemoryMedium;

use crate::error::{ClimaError, Result};

/// Capability of a byte-addressable nonvolatile memory chip
///
/// Implementors provide the byte operations; the range operations default to
/// byte loops and can be overridden where the medium supports bursts.
pub trait NonvolatileStore {
    /// Probe whether the chip answers. Called once, before first use.
    fn available(&mut self) -> bool;

    /// Total size of the medium in bytes
    fn size(&self) -> u32;

    /// Read the byte at `address`
    fn read_byte(&mut self, address: u32) -> Result<u8>;

    /// Write `value` at `address`
    fn write_byte(&mut self, address: u32, value: u8) -> Result<()>;

    /// Fill `buf` with the bytes starting at `address`
    fn read_range(&mut self, address: u32, buf: &mut [u8]) -> Result<()> {
        check_range(self.size(), address, buf.len())?;
        for (offset, byte) in buf.iter_mut().enumerate() {
            *byte = self.read_byte(address + offset as u32)?;
        }
        Ok(())
    }

    /// Write `bytes` starting at `address`, lowest address first
    fn write_range(&mut self, address: u32, bytes: &[u8]) -> Result<()> {
        check_range(self.size(), address, bytes.len())?;
        for (offset, byte) in bytes.iter().enumerate() {
            self.write_byte(address + offset as u32, *byte)?;
        }
        Ok(())
    }
}

impl<T: NonvolatileStore + ?Sized> NonvolatileStore for &mut T {
    fn available(&mut self) -> bool {
        (**self).available()
    }

    fn size(&self) -> u32 {
        (**self).size()
    }

    fn read_byte(&mut self, address: u32) -> Result<u8> {
        (**self).read_byte(address)
    }

    fn write_byte(&mut self, address: u32, value: u8) -> Result<()> {
        (**self).write_byte(address, value)
    }

    fn read_range(&mut self, address: u32, buf: &mut [u8]) -> Result<()> {
        (**self).read_range(address, buf)
    }

    fn write_range(&mut self, address: u32, bytes: &[u8]) -> Result<()> {
        (**self).write_range(address, bytes)
    }
}

/// Reject accesses that do not fit entirely inside `[0, size)`
pub(crate) fn check_range(size: u32, address: u32, len: usize) -> Result<()> {
    let end = address as u64 + len as u64;
    if end > size as u64 {
        return Err(ClimaError::AddressOutOfRange { address, len, size });
    }
    Ok(())
}
