//! Local time-of-day and network time synchronization

/// Broken-down local calendar time as reported by the board clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalendarTime {
    pub year: u16,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    /// 0-23
    pub hour: u8,
    /// 0-59
    pub minute: u8,
    /// 0-59
    pub second: u8,
}

impl CalendarTime {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }
}

/// Source of the current local time
///
/// Reads are assumed cheap and non-blocking. A clock that has never been
/// synchronized still answers; the station does not second-guess it.
pub trait Clock {
    fn now(&mut self) -> CalendarTime;
}

/// Network time synchronization (SNTP or similar)
///
/// Called once after the link comes up. On success the board clock reports
/// wall-clock time from then on.
pub trait TimeSource {
    type Error: core::fmt::Debug;

    fn synchronize(&mut self) -> Result<(), Self::Error>;
}
