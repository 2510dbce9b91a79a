//! Recorder
//!
//! Scheduling for recording mode: decides when a sample is due, takes it,
//! appends it to the log and says how long the device may sleep.
//!
//! ## Responsibilities
//! - Keep the next record time on a fixed grid of `interval` seconds
//! - Turn a full log into a normal outcome, not an error
//! - Bound sleeps by the interval's power-save duration

use tracing::{debug, warn};

use crate::error::{ClimaError, Result};
use crate::log::{LogRecord, LogStore};
use crate::medium::NonvolatileStore;
use crate::settings::Interval;
use crate::time::CalendarMoment;

/// Delay between entering recording mode and the first sample
pub const START_DELAY_SECONDS: i64 = 10;

/// One temperature/humidity reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub temperature: f32,
    pub humidity: f32,
}

/// Source of measurements (the DHT22 on the device)
pub trait Sensor {
    fn measure(&mut self) -> Result<Measurement>;
}

/// What a call to [`Recorder::poll`] did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordOutcome {
    /// No sample due yet
    Waiting,
    /// A sample was stored at `index`
    Recorded { index: u32, record: LogRecord },
    /// A sample was due but the log is full; recording should stop
    MemoryFull,
}

/// Sampling schedule for recording mode
#[derive(Debug, Clone)]
pub struct Recorder {
    interval: Interval,
    next_record_time: CalendarMoment,
}

impl Recorder {
    /// Enter recording mode at `now`; the first sample is due shortly after
    pub fn start(now: CalendarMoment, interval: Interval) -> Self {
        Self {
            interval,
            next_record_time: now.add_seconds(START_DELAY_SECONDS),
        }
    }

    /// Take and store a sample if one is due at `now`
    ///
    /// The schedule advances by one interval per sample taken, full log or
    /// not, so a slow loop catches up on the grid instead of drifting.
    pub fn poll<M, S>(
        &mut self,
        now: CalendarMoment,
        store: &mut LogStore<M>,
        sensor: &mut S,
    ) -> Result<RecordOutcome>
    where
        M: NonvolatileStore,
        S: Sensor,
    {
        if now < self.next_record_time {
            return Ok(RecordOutcome::Waiting);
        }

        let measurement = sensor.measure()?;
        let record = LogRecord::new(now, measurement.temperature, measurement.humidity);
        self.next_record_time = self
            .next_record_time
            .add_seconds(self.interval.seconds() as i64);

        match store.append(&record) {
            Ok(index) => {
                debug!(index, at = %now, next = %self.next_record_time, "sample recorded");
                Ok(RecordOutcome::Recorded { index, record })
            }
            Err(ClimaError::CapacityExhausted { capacity }) => {
                warn!(capacity, "log full, recording stopped");
                Ok(RecordOutcome::MemoryFull)
            }
            Err(e) => Err(e),
        }
    }

    /// Seconds the device may sleep at `now`: until the next sample, but
    /// never longer than the power-save duration and never less than one
    pub fn sleep_seconds(&self, now: CalendarMoment) -> u32 {
        let until_next = now.seconds_to(&self.next_record_time);
        let bounded = until_next.min(self.interval.power_save_seconds() as i64);
        if bounded > 0 {
            bounded as u32
        } else {
            1
        }
    }

    /// When the next sample is due
    pub fn next_record_time(&self) -> CalendarMoment {
        self.next_record_time
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }
}
