//! Bulk export
//!
//! Reads the whole log in index order and writes it out, either as the CSV
//! text the device sends over its serial port or as a compact bincode dump.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ClimaError, Result};
use crate::log::{LogRecord, LogStore};
use crate::medium::NonvolatileStore;

/// Version tag of the binary dump format
pub const DUMP_FORMAT_VERSION: u16 = 1;

/// Header line of the CSV export
pub const CSV_HEADER: &str = "time,temperature,humidity";

/// Output format for [`export`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// One `yyyy-MM-dd hh:mm:ss,temp,hum` line per record
    Csv,
    /// [`ExportDump`] encoded with bincode
    Bincode,
}

/// Complete binary snapshot of a log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDump {
    /// Format version, see [`DUMP_FORMAT_VERSION`]
    pub format_version: u16,

    /// Slot capacity of the log the dump was taken from
    pub capacity: u32,

    /// Records in index order
    pub records: Vec<LogRecord>,
}

/// Export every record of `store` to `out`, returning the number written
pub fn export<M, W>(store: &mut LogStore<M>, format: ExportFormat, out: W) -> Result<u32>
where
    M: NonvolatileStore,
    W: Write,
{
    match format {
        ExportFormat::Csv => write_csv(store, out),
        ExportFormat::Bincode => write_dump(store, out),
    }
}

/// Write the CSV export
pub fn write_csv<M: NonvolatileStore, W: Write>(store: &mut LogStore<M>, mut out: W) -> Result<u32> {
    writeln!(out, "{CSV_HEADER}")?;

    let mut written = 0;
    for record in store.records() {
        writeln!(out, "{}", record?)?;
        written += 1;
    }
    out.flush()?;

    info!(records = written, "csv export complete");
    Ok(written)
}

/// Write the binary dump
pub fn write_dump<M: NonvolatileStore, W: Write>(store: &mut LogStore<M>, mut out: W) -> Result<u32> {
    let capacity = store.capacity();
    let records = store.records().collect::<Result<Vec<_>>>()?;
    let written = records.len() as u32;

    let dump = ExportDump {
        format_version: DUMP_FORMAT_VERSION,
        capacity,
        records,
    };
    bincode::serialize_into(&mut out, &dump)?;
    out.flush()?;

    info!(records = written, "binary export complete");
    Ok(written)
}

/// Load a binary dump written by [`write_dump`]
pub fn read_dump<R: Read>(input: R) -> Result<ExportDump> {
    let dump: ExportDump = bincode::deserialize_from(input)?;
    if dump.format_version != DUMP_FORMAT_VERSION {
        return Err(ClimaError::Serialization(format!(
            "unsupported dump format version {}",
            dump.format_version
        )));
    }
    Ok(dump)
}
