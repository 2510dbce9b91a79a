//! CRC-16 checksums for on-medium structures
//!
//! Both the settings block and every log record carry a CRC-16 computed with
//! the reflected 0xA001 polynomial, seeded with 0xFFFF and no final xor
//! (the parameters published as CRC-16/MODBUS). The checksum field itself is
//! part of the input and must be zero while the CRC is computed.

use crc::{Crc, CRC_16_MODBUS};

const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_MODBUS);

/// Compute the CRC-16 of `bytes`
pub fn crc16(bytes: &[u8]) -> u16 {
    CRC16.checksum(bytes)
}
