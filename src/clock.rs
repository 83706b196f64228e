//! Simulated calendar clock for status reports.
//!
//! The device has no RTC source; timestamps are a fixed reference date plus
//! the uptime. Days are added to the day-of-month without rolling the month
//! over, so these are labels, not wall-clock time.

use core::fmt;

const SECS_PER_DAY: u64 = 86_400;

/// Calendar date that uptime zero maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReferenceDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl ReferenceDate {
    pub const DEFAULT: Self = Self {
        year: 2025,
        month: 2,
        day: 25,
    };
}

/// Timestamp rendered as `YYYY-MM-DDThh:mm:ssZ`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timestamp {
    year: u16,
    month: u8,
    day: u64,
    hour: u8,
    minute: u8,
    second: u8,
}

impl Timestamp {
    pub fn from_elapsed(elapsed_secs: u64, reference: &ReferenceDate) -> Self {
        let days = elapsed_secs / SECS_PER_DAY;
        let rest = elapsed_secs % SECS_PER_DAY;
        Self {
            year: reference.year,
            month: reference.month,
            day: u64::from(reference.day) + days,
            hour: (rest / 3600) as u8,
            minute: ((rest % 3600) / 60) as u8,
            second: (rest % 60) as u8,
        }
    }

    pub fn day(&self) -> u64 {
        self.day
    }

    pub fn time_of_day(&self) -> (u8, u8, u8) {
        (self.hour, self.minute, self.second)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}
