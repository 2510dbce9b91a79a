//! Text formats for calendar moments
//!
//! Rendering for the display, exports and the command-line tool, plus a
//! lenient parser that clamps like the constructor does.

use std::fmt;
use std::str::FromStr;

use crate::error::ClimaError;

use super::CalendarMoment;

/// Output formats for [`CalendarMoment::format`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `yyyy-MM-ddThh:mm:ss`
    Iso,
    /// `yyyy-MM-dd hh:mm:ss`
    Long,
    /// `yyyy-MM-dd`
    IsoDate,
    /// `yyyyMMdd`
    IsoBasicDate,
    /// `hh:mm:ss`
    IsoTime,
    /// `hhmmss`
    IsoBasicTime,
    /// `dd.MM.`
    ShortDate,
    /// `hh:mm`
    ShortTime,
}

impl CalendarMoment {
    /// Render in the given format
    pub fn format(&self, format: DateFormat) -> String {
        let (y, mo, d) = (self.year(), self.month(), self.day());
        let (h, mi, s) = (self.hour(), self.minute(), self.second());
        match format {
            DateFormat::Iso => format!("{y:04}-{mo:02}-{d:02}T{h:02}:{mi:02}:{s:02}"),
            DateFormat::Long => format!("{y:04}-{mo:02}-{d:02} {h:02}:{mi:02}:{s:02}"),
            DateFormat::IsoDate => format!("{y:04}-{mo:02}-{d:02}"),
            DateFormat::IsoBasicDate => format!("{y:04}{mo:02}{d:02}"),
            DateFormat::IsoTime => format!("{h:02}:{mi:02}:{s:02}"),
            DateFormat::IsoBasicTime => format!("{h:02}{mi:02}{s:02}"),
            DateFormat::ShortDate => format!("{d:02}.{mo:02}."),
            DateFormat::ShortTime => format!("{h:02}:{mi:02}"),
        }
    }
}

impl fmt::Display for CalendarMoment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(DateFormat::Long))
    }
}

/// Parses `yyyy-MM-dd`, `yyyy-MM-dd hh:mm:ss` or `yyyy-MM-ddThh:mm:ss`.
///
/// Fields must be numeric; their values are clamped, so `2023-02-30` yields
/// February 28th.
impl FromStr for CalendarMoment {
    type Err = ClimaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (date, time) = match s.split_once(|c: char| c == 'T' || c == ' ') {
            Some((date, time)) => (date, Some(time.trim())),
            None => (s, None),
        };

        let date = parse_fields::<3>(date, '-', s)?;
        let time = match time {
            Some(time) => parse_fields::<3>(time, ':', s)?,
            None => [0, 0, 0],
        };

        let narrow = |value: u32| value.min(u8::MAX as u32) as u8;
        Ok(CalendarMoment::new(
            date[0].min(u16::MAX as u32) as u16,
            narrow(date[1]),
            narrow(date[2]),
            narrow(time[0]),
            narrow(time[1]),
            narrow(time[2]),
        ))
    }
}

fn parse_fields<const N: usize>(
    text: &str,
    separator: char,
    input: &str,
) -> Result<[u32; N], ClimaError> {
    let mut fields = [0u32; N];
    let mut parts = text.split(separator);

    for field in fields.iter_mut() {
        let part = parts
            .next()
            .ok_or_else(|| ClimaError::Parse(format!("incomplete date/time: {input:?}")))?;
        *field = part
            .parse()
            .map_err(|_| ClimaError::Parse(format!("invalid number {part:?} in {input:?}")))?;
    }

    if parts.next().is_some() {
        return Err(ClimaError::Parse(format!("trailing fields in {input:?}")));
    }
    Ok(fields)
}
