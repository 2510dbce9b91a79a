//! Settings block
//!
//! The small configuration record stored at the very start of the medium,
//! ahead of the log region. It uses the same CRC-16 as the log records but
//! has no scan: a checksum mismatch simply means "use the defaults".
//!
//! ## Layout
//! ```text
//! ┌──────────────┬──────────────────┬─────────┐
//! │ Interval (1) │ Serial speed (4) │ CRC (2) │
//! └──────────────┴──────────────────┴─────────┘
//! ```

use tracing::{debug, warn};

use crate::checksum::crc16;
use crate::error::{ClimaError, Result};
use crate::medium::NonvolatileStore;

/// Recording interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Interval {
    Seconds10 = 0,
    Seconds30 = 1,
    Minute1 = 2,
    Minutes10 = 3,
    #[default]
    Hour1 = 4,
    Hours8 = 5,
    Hours24 = 6,
}

impl Interval {
    /// All intervals, shortest first
    pub const ALL: [Interval; 7] = [
        Interval::Seconds10,
        Interval::Seconds30,
        Interval::Minute1,
        Interval::Minutes10,
        Interval::Hour1,
        Interval::Hours8,
        Interval::Hours24,
    ];

    /// Length of the interval in seconds
    pub fn seconds(self) -> u32 {
        match self {
            Interval::Seconds10 => 10,
            Interval::Seconds30 => 30,
            Interval::Minute1 => 60,
            Interval::Minutes10 => 600,
            Interval::Hour1 => 3600,
            Interval::Hours8 => 28_800,
            Interval::Hours24 => 86_400,
        }
    }

    /// Longest power-save sleep that still keeps the schedule
    pub fn power_save_seconds(self) -> u32 {
        match self {
            Interval::Seconds10 => 2,
            Interval::Seconds30 => 5,
            Interval::Minute1 => 10,
            _ => 60,
        }
    }

    /// Short label: `10s`, `30s`, `1m`, `10m`, `1h`, `8h`, `24h`
    pub fn label(self) -> &'static str {
        match self {
            Interval::Seconds10 => "10s",
            Interval::Seconds30 => "30s",
            Interval::Minute1 => "1m",
            Interval::Minutes10 => "10m",
            Interval::Hour1 => "1h",
            Interval::Hours8 => "8h",
            Interval::Hours24 => "24h",
        }
    }
}

impl TryFrom<u8> for Interval {
    type Error = ClimaError;

    fn try_from(value: u8) -> Result<Self> {
        Interval::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| ClimaError::Parse(format!("unknown interval code {value}")))
    }
}

impl std::str::FromStr for Interval {
    type Err = ClimaError;

    fn from_str(s: &str) -> Result<Self> {
        Interval::ALL
            .into_iter()
            .find(|interval| interval.label() == s)
            .ok_or_else(|| ClimaError::Parse(format!("unknown interval {s:?}")))
    }
}

/// Baud rate of the serial export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum SerialSpeed {
    B300 = 300,
    B600 = 600,
    B1200 = 1200,
    B2400 = 2400,
    B4800 = 4800,
    #[default]
    B9600 = 9600,
    B14400 = 14_400,
    B19200 = 19_200,
    B28800 = 28_800,
    B38400 = 38_400,
    B57600 = 57_600,
    B115200 = 115_200,
}

impl SerialSpeed {
    pub const ALL: [SerialSpeed; 12] = [
        SerialSpeed::B300,
        SerialSpeed::B600,
        SerialSpeed::B1200,
        SerialSpeed::B2400,
        SerialSpeed::B4800,
        SerialSpeed::B9600,
        SerialSpeed::B14400,
        SerialSpeed::B19200,
        SerialSpeed::B28800,
        SerialSpeed::B38400,
        SerialSpeed::B57600,
        SerialSpeed::B115200,
    ];

    pub fn baud(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for SerialSpeed {
    type Error = ClimaError;

    fn try_from(baud: u32) -> Result<Self> {
        SerialSpeed::ALL
            .into_iter()
            .find(|speed| speed.baud() == baud)
            .ok_or_else(|| ClimaError::Parse(format!("unsupported serial speed {baud}")))
    }
}

/// Persistent device settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    pub interval: Interval,
    pub serial_speed: SerialSpeed,
}

impl Settings {
    /// Bytes occupied on the medium, starting at address 0
    pub const SIZE: usize = 7;

    const CRC_OFFSET: usize = 5;

    /// Read the block from the medium.
    ///
    /// Power-up garbage, a checksum mismatch or an unknown field value all
    /// fall back to the defaults.
    pub fn load<M: NonvolatileStore>(medium: &mut M) -> Result<Self> {
        let mut bytes = [0u8; Self::SIZE];
        medium.read_range(0, &mut bytes)?;

        let stored_crc = u16::from_le_bytes([bytes[Self::CRC_OFFSET], bytes[Self::CRC_OFFSET + 1]]);
        if Self::checksum(&bytes) != stored_crc {
            warn!("settings checksum mismatch, using defaults");
            return Ok(Self::default());
        }

        let baud = u32::from_le_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]);
        match (Interval::try_from(bytes[0]), SerialSpeed::try_from(baud)) {
            (Ok(interval), Ok(serial_speed)) => Ok(Self {
                interval,
                serial_speed,
            }),
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "settings out of range, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Write the block, with a fresh checksum, to the start of the medium
    pub fn save<M: NonvolatileStore>(&self, medium: &mut M) -> Result<()> {
        let bytes = self.encode();
        medium.write_range(0, &bytes)?;
        debug!(interval = self.interval.label(), baud = self.serial_speed.baud(), "settings saved");
        Ok(())
    }

    /// Serialize with the checksum filled in
    pub fn encode(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0] = self.interval as u8;
        bytes[1..Self::CRC_OFFSET].copy_from_slice(&self.serial_speed.baud().to_le_bytes());
        let crc = Self::checksum(&bytes);
        bytes[Self::CRC_OFFSET..].copy_from_slice(&crc.to_le_bytes());
        bytes
    }

    /// CRC-16 over the block with its crc field zeroed
    fn checksum(bytes: &[u8; Self::SIZE]) -> u16 {
        let mut unsealed = *bytes;
        unsealed[Self::CRC_OFFSET..].fill(0);
        crc16(&unsealed)
    }
}
