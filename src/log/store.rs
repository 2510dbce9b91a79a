//! Record Store
//!
//! The crash-tolerant append-only log over a nonvolatile medium.

use tracing::{debug, info, warn};

use crate::error::{ClimaError, Result};
use crate::medium::NonvolatileStore;

use super::stored::{classify_slot, SlotBytes, SlotState, StoredRecord, RECORD_SIZE};
use super::LogRecord;

/// Why the recovery scan stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStop {
    /// Reached an all-zero slot: the clean end of the log
    NullSlot,
    /// Reached a non-null slot that failed validation; it and everything
    /// after it was discarded
    CorruptSlot,
    /// Every slot of the region holds a valid record
    EndOfRegion,
}

/// Result of a recovery scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    /// Number of valid records found (the new record count)
    pub records_recovered: u32,

    /// Condition that ended the scan
    pub stop: ScanStop,
}

impl ScanReport {
    /// Whether corrupt tail data was dropped
    pub fn was_truncated(&self) -> bool {
        self.stop == ScanStop::CorruptSlot
    }
}

/// Append-only log of fixed-size checksummed records
///
/// ## Layout
/// ```text
/// ┌──────────────────┬────────┬────────┬─────┬──────────────┬───────┐
/// │ reserved prefix  │ slot 0 │ slot 1 │ ... │ slot cap-1   │ spare │
/// └──────────────────┴────────┴────────┴─────┴──────────────┴───────┘
/// ```
///
/// Slots `[0, count)` hold valid records; slot `count`, when it exists, is
/// null. [`append`](Self::append) keeps that true across power loss by
/// zeroing slot `count + 1` *before* writing slot `count`.
///
/// ## Residual risk
/// The ordering is a heuristic. If power fails between zeroing the next slot
/// and finishing the current one, the current slot is torn and the scan
/// stops there, which is the intended outcome. What it does not rule out is
/// a torn slot whose leftover bytes happen to form a valid record; the
/// checksum makes that unlikely, not impossible.
pub struct LogStore<M: NonvolatileStore> {
    /// Medium holding the settings block and the log region
    medium: M,

    /// Bytes before the first slot
    reserved_prefix: u32,

    /// Number of slots in the region
    capacity: u32,

    /// Number of valid records, slots `[0, count)`
    count: u32,

    /// Outcome of the last recovery scan
    last_scan: Option<ScanReport>,
}

impl<M: NonvolatileStore> LogStore<M> {
    /// Wrap a medium without touching it.
    ///
    /// The store is empty with zero capacity until
    /// [`initialize`](Self::initialize) runs.
    pub fn new(medium: M) -> Self {
        Self {
            medium,
            reserved_prefix: 0,
            capacity: 0,
            count: 0,
            last_scan: None,
        }
    }

    /// Probe the medium and run the recovery scan
    ///
    /// On startup:
    /// 1. Check the medium answers (fatal if not, never retried)
    /// 2. Size the log region after `reserved_prefix`
    /// 3. Scan for the current record count
    pub fn open(mut medium: M, reserved_prefix: u32) -> Result<Self> {
        if !medium.available() {
            return Err(ClimaError::MediumUnavailable);
        }

        let mut store = Self::new(medium);
        store.initialize(reserved_prefix)?;
        Ok(store)
    }

    /// Size the log region and run the recovery scan
    ///
    /// Walks the slots from index 0 and stops at the first null slot, at the
    /// first corrupt slot, or at the end of the region. The index reached is
    /// the record count, which is also returned.
    pub fn initialize(&mut self, reserved_prefix: u32) -> Result<u32> {
        self.reserved_prefix = reserved_prefix;
        self.capacity = self.medium.size().saturating_sub(reserved_prefix) / RECORD_SIZE as u32;
        self.count = 0;

        let mut stop = ScanStop::EndOfRegion;
        let mut index = 0;
        while index < self.capacity {
            let bytes = self.read_slot(index)?;
            match classify_slot(&bytes) {
                SlotState::Valid => index += 1,
                SlotState::Null => {
                    stop = ScanStop::NullSlot;
                    break;
                }
                SlotState::Corrupt => {
                    warn!(slot = index, "corrupt log slot, discarding tail");
                    stop = ScanStop::CorruptSlot;
                    break;
                }
            }
        }

        self.count = index;
        self.last_scan = Some(ScanReport {
            records_recovered: index,
            stop,
        });

        info!(
            records = self.count,
            capacity = self.capacity,
            stop = ?stop,
            "log recovery scan complete"
        );

        Ok(self.count)
    }

    /// Re-run the recovery scan with the current reserved prefix
    pub fn rescan(&mut self) -> Result<u32> {
        self.initialize(self.reserved_prefix)
    }

    /// Append a record and return its index
    ///
    /// Fails with [`ClimaError::CapacityExhausted`] when every slot is used;
    /// nothing is written in that case.
    ///
    /// Steps:
    /// 1. Zero the following slot, if the region has one
    /// 2. Write the sealed record into slot `count`
    /// 3. Bump the count
    pub fn append(&mut self, record: &LogRecord) -> Result<u32> {
        if self.count >= self.capacity {
            return Err(ClimaError::CapacityExhausted {
                capacity: self.capacity,
            });
        }

        // The null sentinel must exist before the current slot is committed
        let index = self.count;
        if index + 1 < self.capacity {
            self.zero_slot(index + 1)?;
        }

        let stored = StoredRecord::seal(record);
        let address = self.slot_address(index);
        self.medium.write_range(address, &stored.encode())?;
        self.count += 1;

        debug!(index, time = stored.time, crc = stored.crc, "appended log record");

        Ok(index)
    }

    /// Read the record at `index`
    ///
    /// Returns the empty record for indices at or past [`count`](Self::count).
    /// The checksum is not re-validated; the scan or the append that put the
    /// record there already did.
    pub fn get(&mut self, index: u32) -> Result<LogRecord> {
        if index >= self.count {
            return Ok(LogRecord::default());
        }
        let bytes = self.read_slot(index)?;
        Ok(StoredRecord::decode(&bytes).to_log_record())
    }

    /// Erase the log by zeroing slots 0 and 1.
    ///
    /// The scan stops at the first null slot, so this is enough to make the
    /// log appear empty whatever stale data lies further in. The in-memory
    /// count is left alone; call [`initialize`](Self::initialize) or
    /// [`rescan`](Self::rescan) afterwards.
    pub fn format(&mut self) -> Result<()> {
        for index in 0..2.min(self.capacity) {
            self.zero_slot(index)?;
        }
        info!("log formatted");
        Ok(())
    }

    /// Iterate over all records in index order (bulk export)
    pub fn records(&mut self) -> Records<'_, M> {
        Records {
            store: self,
            next: 0,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of valid records
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Number of slots in the log region
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Whether another append would fail
    pub fn is_full(&self) -> bool {
        self.count >= self.capacity
    }

    /// Bytes reserved ahead of the log region
    pub fn reserved_prefix(&self) -> u32 {
        self.reserved_prefix
    }

    /// Outcome of the last recovery scan, if one ran
    pub fn last_scan(&self) -> Option<ScanReport> {
        self.last_scan
    }

    /// Borrow the underlying medium
    pub fn medium(&self) -> &M {
        &self.medium
    }

    /// Mutably borrow the underlying medium
    pub fn medium_mut(&mut self) -> &mut M {
        &mut self.medium
    }

    /// Release the underlying medium
    pub fn into_medium(self) -> M {
        self.medium
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Medium address of slot `index`
    fn slot_address(&self, index: u32) -> u32 {
        self.reserved_prefix + index * RECORD_SIZE as u32
    }

    fn read_slot(&mut self, index: u32) -> Result<SlotBytes> {
        let mut bytes = [0u8; RECORD_SIZE];
        let address = self.slot_address(index);
        self.medium.read_range(address, &mut bytes)?;
        Ok(bytes)
    }

    fn zero_slot(&mut self, index: u32) -> Result<()> {
        let address = self.slot_address(index);
        self.medium.write_range(address, &[0u8; RECORD_SIZE])
    }
}

/// Iterator over the records of a [`LogStore`], by repeated `get`
pub struct Records<'a, M: NonvolatileStore> {
    store: &'a mut LogStore<M>,
    next: u32,
}

impl<M: NonvolatileStore> Iterator for Records<'_, M> {
    type Item = Result<LogRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.store.count() {
            return None;
        }
        let record = self.store.get(self.next);
        self.next += 1;
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.store.count().saturating_sub(self.next) as usize;
        (left, Some(left))
    }
}
