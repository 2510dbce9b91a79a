//! File-backed medium
//!
//! Keeps a byte-for-byte image of the nonvolatile chip in a regular file,
//! so the command-line tool can work on dumps pulled off a device.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ClimaError, Result};

use super::{check_range, NonvolatileStore};

/// Chip image stored in a file of fixed size
pub struct FileMedium {
    /// Image file path (for diagnostics)
    path: PathBuf,
    /// Open image file, read/write
    file: File,
    /// Declared medium size in bytes
    size: u32,
}

impl FileMedium {
    /// Create a new zero-filled image of `size` bytes, replacing any file at `path`
    pub fn create(path: &Path, size: u32) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        file.set_len(size as u64)?;
        file.sync_all()?;

        debug!(path = %path.display(), size, "created medium image");

        Ok(Self {
            path: path.to_path_buf(),
            file,
            size,
        })
    }

    /// Open an existing image of `size` bytes
    ///
    /// The length is not checked here; `available()` reports a mismatch.
    pub fn open(path: &Path, size: u32) -> Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            size,
        })
    }

    /// Image file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Force all written bytes to disk
    pub fn sync(&mut self) -> Result<()> {
        self.file.sync_data()?;
        Ok(())
    }
}

impl NonvolatileStore for FileMedium {
    fn available(&mut self) -> bool {
        match self.file.metadata() {
            Ok(meta) => meta.len() == self.size as u64,
            Err(_) => false,
        }
    }

    fn size(&self) -> u32 {
        self.size
    }

    fn read_byte(&mut self, address: u32) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read_range(address, &mut buf)?;
        Ok(buf[0])
    }

    fn write_byte(&mut self, address: u32, value: u8) -> Result<()> {
        self.write_range(address, &[value])
    }

    fn read_range(&mut self, address: u32, buf: &mut [u8]) -> Result<()> {
        check_range(self.size, address, buf.len())?;
        self.file.seek(SeekFrom::Start(address as u64))?;
        self.file.read_exact(buf).map_err(|e| {
            ClimaError::Io(std::io::Error::new(
                e.kind(),
                format!("short read from {}: {}", self.path.display(), e),
            ))
        })?;
        Ok(())
    }

    fn write_range(&mut self, address: u32, bytes: &[u8]) -> Result<()> {
        check_range(self.size, address, bytes.len())?;
        self.file.seek(SeekFrom::Start(address as u64))?;
        self.file.write_all(bytes)?;
        Ok(())
    }
}
