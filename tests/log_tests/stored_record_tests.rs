//! Tests for the on-medium record layout
//!
//! These tests verify:
//! - Bit-exact 14-byte layout
//! - CRC sealing and validation
//! - Single-bit corruption detection
//! - Range checks on decoded readings
//! - Slot classification (null / valid / corrupt)

use climalog::checksum::crc16;
use climalog::log::{
    classify_slot, is_null_slot, LogRecord, SlotState, StoredRecord, RECORD_SIZE,
};
use climalog::time::CalendarMoment;

// =============================================================================
// Helper Functions
// =============================================================================

fn sample_record() -> LogRecord {
    LogRecord::new(CalendarMoment::new(2023, 6, 15, 12, 0, 0), 21.5, 47.2)
}

// =============================================================================
// Layout Tests
// =============================================================================

#[test]
fn test_record_size() {
    assert_eq!(RECORD_SIZE, 14);
    assert_eq!(StoredRecord::seal(&sample_record()).encode().len(), 14);
}

#[test]
fn test_layout_is_little_endian_packed() {
    let stored = StoredRecord::seal(&sample_record());
    let bytes = stored.encode();

    assert_eq!(&bytes[0..4], &740_145_600u32.to_le_bytes());
    assert_eq!(&bytes[4..8], &47.2f32.to_le_bytes());
    assert_eq!(&bytes[8..12], &21.5f32.to_le_bytes());
    assert_eq!(&bytes[12..14], &stored.crc.to_le_bytes());
}

#[test]
fn test_crc_covers_zeroed_crc_field() {
    let stored = StoredRecord::seal(&sample_record());
    let mut bytes = stored.encode();
    bytes[12] = 0;
    bytes[13] = 0;

    assert_eq!(crc16(&bytes), stored.crc);
}

#[test]
fn test_decode_inverts_encode() {
    let stored = StoredRecord::seal(&sample_record());
    assert_eq!(StoredRecord::decode(&stored.encode()), stored);
}

#[test]
fn test_to_log_record_is_exact() {
    let record = sample_record();
    assert_eq!(StoredRecord::seal(&record).to_log_record(), record);
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_sealed_record_is_valid() {
    assert!(StoredRecord::seal(&sample_record()).is_valid());
}

#[test]
fn test_empty_record_is_valid_and_not_null() {
    let stored = StoredRecord::seal(&LogRecord::default());
    let bytes = stored.encode();

    assert!(stored.is_valid());
    assert!(!is_null_slot(&bytes));
    assert_eq!(classify_slot(&bytes), SlotState::Valid);
}

#[test]
fn test_wrong_crc_is_invalid() {
    let mut stored = StoredRecord::seal(&sample_record());
    stored.crc ^= 0x0001;
    assert!(!stored.is_valid());
}

#[test]
fn test_single_bit_flip_in_payload_invalidates() {
    let bytes = StoredRecord::seal(&sample_record()).encode();

    for byte in 0..12 {
        for bit in 0..8 {
            let mut corrupted = bytes;
            corrupted[byte] ^= 1 << bit;
            assert!(
                !StoredRecord::decode(&corrupted).is_valid(),
                "flip of byte {} bit {} went undetected",
                byte,
                bit
            );
        }
    }
}

#[test]
fn test_out_of_range_readings_invalid_even_with_good_crc() {
    let cases = [(20.0f32, -0.5f32), (20.0, 100.5), (-300.0, 50.0), (100.01, 50.0)];

    for (temperature, humidity) in cases {
        let mut stored = StoredRecord {
            time: 1000,
            humidity,
            temperature,
            crc: 0,
        };
        stored.crc = stored.compute_crc();

        assert!(!stored.readings_in_range());
        assert!(!stored.is_valid());
    }
}

#[test]
fn test_range_bounds_are_inclusive() {
    let record = LogRecord::new(CalendarMoment::default(), -273.15, 100.0);
    assert!(StoredRecord::seal(&record).is_valid());

    let record = LogRecord::new(CalendarMoment::default(), 100.0, 0.0);
    assert!(StoredRecord::seal(&record).is_valid());
}

// =============================================================================
// Slot Classification Tests
// =============================================================================

#[test]
fn test_classify_null_slot() {
    let bytes = [0u8; RECORD_SIZE];
    assert!(is_null_slot(&bytes));
    assert_eq!(classify_slot(&bytes), SlotState::Null);
}

#[test]
fn test_classify_garbage_as_corrupt() {
    let bytes = [0xFFu8; RECORD_SIZE];
    assert_eq!(classify_slot(&bytes), SlotState::Corrupt);

    let mut bytes = [0u8; RECORD_SIZE];
    bytes[7] = 0x01;
    assert_eq!(classify_slot(&bytes), SlotState::Corrupt);
}

#[test]
fn test_classify_torn_write_as_corrupt() {
    let full = StoredRecord::seal(&sample_record()).encode();

    // Power lost after only the first n bytes reached the chip
    for n in 1..RECORD_SIZE {
        let mut torn = [0u8; RECORD_SIZE];
        torn[..n].copy_from_slice(&full[..n]);
        assert_ne!(
            classify_slot(&torn),
            SlotState::Valid,
            "torn write of {} bytes classified valid",
            n
        );
    }
}
