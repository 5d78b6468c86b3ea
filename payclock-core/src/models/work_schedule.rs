use std::fmt;

use chrono::{NaiveTime, Timelike};
use rust_decimal::Decimal;

use crate::error::CalculationError;

/// A daily work window, start inclusive to end inclusive.
///
/// The end is always strictly after the start; windows crossing midnight
/// are not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkSchedule {
    start: NaiveTime,
    end: NaiveTime,
}

impl WorkSchedule {
    /// # Errors
    ///
    /// Returns [`CalculationError::InvalidArgument`] when `end` is not after
    /// `start`.
    pub fn new(
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Self, CalculationError> {
        if end <= start {
            return Err(CalculationError::invalid(format!(
                "work end {} must be after work start {}",
                end.format("%H:%M:%S"),
                start.format("%H:%M:%S")
            )));
        }
        Ok(Self { start, end })
    }

    /// Parses `"HH:MM"` (or `"HH:MM:SS"`) start and end times.
    pub fn parse(
        start: &str,
        end: &str,
    ) -> Result<Self, CalculationError> {
        Self::new(parse_time_of_day(start)?, parse_time_of_day(end)?)
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn start_minutes(&self) -> Decimal {
        minutes_since_midnight(self.start)
    }

    pub fn end_minutes(&self) -> Decimal {
        minutes_since_midnight(self.end)
    }

    /// Length of the window in minutes. Always positive.
    pub fn total_minutes(&self) -> Decimal {
        self.end_minutes() - self.start_minutes()
    }
}

impl fmt::Display for WorkSchedule {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Minutes since midnight, with seconds as a fractional part.
///
/// Sub-second precision is dropped.
pub(crate) fn minutes_since_midnight(time: impl Timelike) -> Decimal {
    let whole = Decimal::from(time.hour() * 60 + time.minute());
    whole + Decimal::from(time.second()) / Decimal::from(60)
}

fn parse_time_of_day(raw: &str) -> Result<NaiveTime, CalculationError> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|e| CalculationError::invalid(format!("invalid time of day \"{raw}\": {e}")))
}
