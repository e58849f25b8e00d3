//! Samples and their one-line wire form
//!
//! A record is `MM/DD/YY,HH:MM,<humidity>,<temperature>` with both readings
//! printed to one decimal place. The collector proves receipt by echoing the
//! exact same bytes back, so the encoding here must be deterministic.
//!
//! Rounding is Rust's `{:.1}`: the exact binary value of the `f32` is rounded
//! half-to-even. `39.95_f32` is slightly above 39.95 and prints `40.0`; an
//! exactly representable tie such as `0.25` prints `0.2`.

use core::fmt::{self, Write};

use heapless::String;
use weather_hal::{CalendarTime, RawMeasurement};

/// Placeholder for a measurement the sensor could not deliver
pub const SENTINEL: f32 = -999.0;

/// Capacity of a formatted timestamp (`MM/DD/YY,HH:MM` is 14 bytes)
pub const STAMP_LEN: usize = 16;

/// Capacity of an encoded record
///
/// Two `f32` values at one decimal place need at most 42 bytes each, so any
/// reading fits alongside the timestamp.
pub const RECORD_CAPACITY: usize = 128;

/// Timestamp already formatted for transmission: `MM/DD/YY,HH:MM`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp(String<STAMP_LEN>);

impl Stamp {
    /// Format a calendar time; the year is reduced to two digits
    pub fn from_calendar(t: &CalendarTime) -> Self {
        let mut s = String::new();
        // 14 ASCII bytes always fit in STAMP_LEN
        let _ = write!(
            s,
            "{:02}/{:02}/{:02},{:02}:{:02}",
            t.month,
            t.day,
            t.year % 100,
            t.hour,
            t.minute
        );
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Stamp {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.0.as_str())
    }
}

/// Physical reading in transmission units
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    pub temperature_c: f32,
    /// Read but not transmitted
    pub pressure_hpa: f32,
    pub humidity_rh: f32,
}

impl Reading {
    /// All three fields set to [`SENTINEL`]
    pub const UNAVAILABLE: Reading = Reading {
        temperature_c: SENTINEL,
        pressure_hpa: SENTINEL,
        humidity_rh: SENTINEL,
    };

    pub fn is_unavailable(&self) -> bool {
        *self == Self::UNAVAILABLE
    }
}

impl From<RawMeasurement> for Reading {
    fn from(raw: RawMeasurement) -> Self {
        Self {
            temperature_c: raw.temperature_c,
            pressure_hpa: raw.pressure_pa / 100.0,
            humidity_rh: raw.humidity_rh,
        }
    }
}

/// One firing's worth of data, consumed by the sender and then dropped
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub stamp: Stamp,
    pub reading: Reading,
}

impl Sample {
    pub fn new(stamp: Stamp, reading: Reading) -> Self {
        Self { stamp, reading }
    }

    /// Canonical wire form of this sample
    pub fn encode(&self) -> Result<Record, RecordError> {
        let mut line = String::new();
        write!(
            line,
            "{},{:.1},{:.1}",
            self.stamp.as_str(),
            self.reading.humidity_rh,
            self.reading.temperature_c
        )
        .map_err(|_| RecordError::Overflow)?;
        Ok(Record(line))
    }
}

/// Encoded record; the bytes sent and the bytes expected back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record(String<RECORD_CAPACITY>);

impl Record {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Record {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.0.as_str())
    }
}

/// Record encoding errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordError {
    /// Formatted line exceeded [`RECORD_CAPACITY`]
    Overflow,
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow => write!(f, "Record exceeds {} bytes", RECORD_CAPACITY),
        }
    }
}

impl core::error::Error for RecordError {}
