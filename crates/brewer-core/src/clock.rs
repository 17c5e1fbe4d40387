use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClockError {
    #[error("no such calendar date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("invalid time of day {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: u32, minute: u32, second: u32 },

    #[error("UTC offset out of range: {0}s")]
    InvalidOffset(i32),
}

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall-clock time in the host's local offset.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    instant: DateTime<FixedOffset>,
}

impl FixedClock {
    const YEAR: i32 = 2025;
    const HOUR: u32 = 10;

    /// Frozen at 10:00:00 UTC on the given month and day of 2025.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidDate`] if `month`/`day` is not a real date.
    pub fn new(month: u32, day: u32) -> Result<Self, ClockError> {
        Self::with_time(Self::YEAR, month, day, Self::HOUR, 0, 0, 0)
    }

    /// Frozen at an arbitrary wall time and UTC offset (in seconds).
    ///
    /// # Errors
    ///
    /// Returns a [`ClockError`] if the date, time, or offset is out of range.
    pub fn with_time(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        offset_secs: i32,
    ) -> Result<Self, ClockError> {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(ClockError::InvalidDate { year, month, day })?;
        let naive = date
            .and_hms_opt(hour, minute, second)
            .ok_or(ClockError::InvalidTime {
                hour,
                minute,
                second,
            })?;
        let offset =
            FixedOffset::east_opt(offset_secs).ok_or(ClockError::InvalidOffset(offset_secs))?;
        let instant = offset
            .from_local_datetime(&naive)
            .single()
            .ok_or(ClockError::InvalidOffset(offset_secs))?;

        Ok(Self { instant })
    }

    #[must_use]
    pub fn at(instant: DateTime<FixedOffset>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.instant
    }
}
