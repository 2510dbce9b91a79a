//! Tests for the recording scheduler
//!
//! These tests verify:
//! - Start delay and fixed sampling grid
//! - Records land in the log with the sample time
//! - Full log becomes an outcome, not an error
//! - Sleep bounds

use climalog::log::LogStore;
use climalog::medium::MemoryMedium;
use climalog::recorder::{Measurement, RecordOutcome, Recorder, Sensor, START_DELAY_SECONDS};
use climalog::settings::Interval;
use climalog::time::CalendarMoment;
use climalog::{ClimaError, Result};

// =============================================================================
// Helper Functions
// =============================================================================

/// Sensor returning a fixed sequence of readings
struct ScriptedSensor {
    readings: Vec<Measurement>,
    taken: usize,
}

impl ScriptedSensor {
    fn constant(temperature: f32, humidity: f32) -> Self {
        Self {
            readings: vec![Measurement {
                temperature,
                humidity,
            }],
            taken: 0,
        }
    }
}

impl Sensor for ScriptedSensor {
    fn measure(&mut self) -> Result<Measurement> {
        let reading = self.readings[self.taken % self.readings.len()];
        self.taken += 1;
        Ok(reading)
    }
}

/// Sensor that always fails
struct BrokenSensor;

impl Sensor for BrokenSensor {
    fn measure(&mut self) -> Result<Measurement> {
        Err(ClimaError::Parse("sensor timeout".to_string()))
    }
}

fn start_time() -> CalendarMoment {
    CalendarMoment::new(2023, 6, 15, 12, 0, 0)
}

fn store_with_slots(slots: u32) -> LogStore<MemoryMedium> {
    LogStore::open(MemoryMedium::new(7 + slots * 14), 7).unwrap()
}

// =============================================================================
// Scheduling Tests
// =============================================================================

#[test]
fn test_first_sample_after_start_delay() {
    let mut store = store_with_slots(10);
    let mut sensor = ScriptedSensor::constant(20.0, 50.0);
    let mut recorder = Recorder::start(start_time(), Interval::Minute1);

    assert_eq!(
        recorder.next_record_time(),
        start_time().add_seconds(START_DELAY_SECONDS)
    );

    let early = start_time().add_seconds(START_DELAY_SECONDS - 1);
    assert_eq!(
        recorder.poll(early, &mut store, &mut sensor).unwrap(),
        RecordOutcome::Waiting
    );
    assert_eq!(sensor.taken, 0);

    let due = start_time().add_seconds(START_DELAY_SECONDS);
    let outcome = recorder.poll(due, &mut store, &mut sensor).unwrap();
    assert!(matches!(outcome, RecordOutcome::Recorded { index: 0, .. }));
    assert_eq!(store.count(), 1);
}

#[test]
fn test_samples_follow_fixed_grid() {
    let mut store = store_with_slots(10);
    let mut sensor = ScriptedSensor::constant(20.0, 50.0);
    let mut recorder = Recorder::start(start_time(), Interval::Seconds30);
    let first = recorder.next_record_time();

    // Late poll: the sample is stamped with the actual time, the grid is kept
    let late = first.add_seconds(7);
    recorder.poll(late, &mut store, &mut sensor).unwrap();

    assert_eq!(recorder.next_record_time(), first.add_seconds(30));
    assert_eq!(store.get(0).unwrap().timestamp, late);
}

#[test]
fn test_recorded_values_reach_the_log() {
    let mut store = store_with_slots(10);
    let mut sensor = ScriptedSensor {
        readings: vec![
            Measurement {
                temperature: 21.5,
                humidity: 47.2,
            },
            Measurement {
                temperature: 150.0,
                humidity: -1.0,
            },
        ],
        taken: 0,
    };
    let mut recorder = Recorder::start(start_time(), Interval::Seconds10);

    let mut now = recorder.next_record_time();
    for _ in 0..2 {
        recorder.poll(now, &mut store, &mut sensor).unwrap();
        now = now.add_seconds(10);
    }

    let first = store.get(0).unwrap();
    assert_eq!((first.temperature, first.humidity), (21.5, 47.2));

    // Out-of-range readings are clamped on the way in
    let second = store.get(1).unwrap();
    assert_eq!((second.temperature, second.humidity), (100.0, 0.0));
}

#[test]
fn test_simulated_day_of_hourly_samples() {
    let mut store = store_with_slots(100);
    let mut sensor = ScriptedSensor::constant(18.0, 60.0);
    let mut recorder = Recorder::start(start_time(), Interval::Hour1);

    let mut now = start_time();
    let end = start_time().add_days(1);
    while now < end {
        recorder.poll(now, &mut store, &mut sensor).unwrap();
        now = now.add_seconds(recorder.sleep_seconds(now) as i64);
    }

    assert_eq!(store.count(), 24);
    for i in 1..24 {
        let gap = store
            .get(i - 1)
            .unwrap()
            .timestamp
            .seconds_to(&store.get(i).unwrap().timestamp);
        assert_eq!(gap, 3600);
    }
}

// =============================================================================
// Full Log Tests
// =============================================================================

#[test]
fn test_full_log_is_an_outcome() {
    let mut store = store_with_slots(2);
    let mut sensor = ScriptedSensor::constant(20.0, 50.0);
    let mut recorder = Recorder::start(start_time(), Interval::Seconds10);

    let mut now = recorder.next_record_time();
    let mut outcomes = Vec::new();
    for _ in 0..3 {
        outcomes.push(recorder.poll(now, &mut store, &mut sensor).unwrap());
        now = now.add_seconds(10);
    }

    assert!(matches!(outcomes[0], RecordOutcome::Recorded { index: 0, .. }));
    assert!(matches!(outcomes[1], RecordOutcome::Recorded { index: 1, .. }));
    assert_eq!(outcomes[2], RecordOutcome::MemoryFull);
    assert_eq!(store.count(), 2);
}

#[test]
fn test_sensor_error_propagates() {
    let mut store = store_with_slots(2);
    let mut recorder = Recorder::start(start_time(), Interval::Seconds10);
    let due = recorder.next_record_time();

    assert!(recorder.poll(due, &mut store, &mut BrokenSensor).is_err());
    assert_eq!(store.count(), 0);
    // A failed measurement does not consume the slot on the grid
    assert_eq!(recorder.next_record_time(), due);
}

// =============================================================================
// Sleep Tests
// =============================================================================

#[test]
fn test_sleep_bounded_by_power_save() {
    let recorder = Recorder::start(start_time(), Interval::Hour1);
    // 10 s to the first sample, power save allows 60 s
    assert_eq!(recorder.sleep_seconds(start_time()), 10);

    let mut store = store_with_slots(2);
    let mut sensor = ScriptedSensor::constant(20.0, 50.0);
    let mut recorder = recorder;
    let due = recorder.next_record_time();
    recorder.poll(due, &mut store, &mut sensor).unwrap();

    assert_eq!(recorder.sleep_seconds(due), 60);
}

#[test]
fn test_sleep_at_least_one_second() {
    let recorder = Recorder::start(start_time(), Interval::Seconds10);
    let overdue = recorder.next_record_time().add_seconds(5);

    assert_eq!(recorder.sleep_seconds(overdue), 1);
    assert_eq!(recorder.sleep_seconds(recorder.next_record_time()), 1);
}

#[test]
fn test_short_interval_sleeps() {
    let recorder = Recorder::start(start_time(), Interval::Seconds10);
    assert_eq!(recorder.sleep_seconds(start_time()), 2);
    assert_eq!(recorder.interval(), Interval::Seconds10);
}
