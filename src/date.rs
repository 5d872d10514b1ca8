/// Packed on-disk dates

use crate::error::{ApexError, Result};
use chrono::Datelike;
use std::fmt;

/// First representable year; stored years are an offset from this
pub const EPOCH_YEAR: u16 = 1976;

/// An Apex date packed into 16 bits
///
/// The raw value is `((year - 1976) << 9) | (month << 5) | day`, stored
/// little-endian on disk. Seven bits of year offset give a range of
/// 1976 through 2103. Days are only range checked 1-31; the directory
/// format does not validate days against the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date {
    raw: u16,
}

impl Date {
    /// Create a date from year, month and day
    ///
    /// Fails with [`ApexError::InvalidDate`] if year is outside 1976-2103,
    /// month is outside 1-12 or day is outside 1-31.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self> {
        if !(EPOCH_YEAR..=EPOCH_YEAR + 127).contains(&year) {
            return Err(ApexError::date(format!("invalid year {}", year)));
        }
        if !(1..=12).contains(&month) {
            return Err(ApexError::date(format!("invalid month {}", month)));
        }
        if !(1..=31).contains(&day) {
            return Err(ApexError::date(format!("invalid day {}", day)));
        }
        Ok(Self {
            raw: ((year - EPOCH_YEAR) << 9) | ((month as u16) << 5) | day as u16,
        })
    }

    /// Create a date from its raw on-disk value
    pub fn from_raw(raw: u16) -> Self {
        Self { raw }
    }

    /// Today's date from the host clock
    pub fn today() -> Self {
        let now = chrono::Local::now();
        // The host clock is assumed to be within the representable range.
        Self::new(now.year() as u16, now.month() as u8, now.day() as u8)
            .unwrap_or_else(|_| Self::from_raw(0))
    }

    /// Get the raw on-disk value
    pub fn raw(&self) -> u16 {
        self.raw
    }

    /// Get the year (1976-2103)
    pub fn year(&self) -> u16 {
        (self.raw >> 9) + EPOCH_YEAR
    }

    /// Get the month (1-12 for valid dates)
    pub fn month(&self) -> u8 {
        ((self.raw >> 5) & 0xf) as u8
    }

    /// Get the day of month (1-31 for valid dates)
    pub fn day(&self) -> u8 {
        (self.raw & 0x1f) as u8
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pack() {
        let date = Date::new(1979, 6, 12).unwrap();
        assert_eq!(date.raw(), (3 << 9) | (6 << 5) | 12);
        assert_eq!(date.year(), 1979);
        assert_eq!(date.month(), 6);
        assert_eq!(date.day(), 12);
    }

    #[test]
    fn test_epoch_boundaries() {
        assert!(Date::new(1976, 1, 1).is_ok());
        assert!(Date::new(2103, 12, 31).is_ok());
        assert!(Date::new(1975, 1, 1).is_err());
        assert!(Date::new(2104, 1, 1).is_err());
    }

    #[test]
    fn test_component_ranges() {
        assert!(Date::new(1980, 0, 1).is_err());
        assert!(Date::new(1980, 13, 1).is_err());
        assert!(Date::new(1980, 1, 0).is_err());
        assert!(Date::new(1980, 1, 32).is_err());
        // Days are not checked against the month
        assert!(Date::new(1980, 2, 31).is_ok());
    }

    #[test]
    fn test_display() {
        let date = Date::new(1984, 2, 3).unwrap();
        assert_eq!(date.to_string(), "1984-02-03");
    }

    proptest! {
        #[test]
        fn prop_round_trip(year in 1976u16..=2103, month in 1u8..=12, day in 1u8..=31) {
            let date = Date::new(year, month, day).unwrap();
            let again = Date::from_raw(date.raw());
            prop_assert_eq!(again.year(), year);
            prop_assert_eq!(again.month(), month);
            prop_assert_eq!(again.day(), day);
        }
    }
}
