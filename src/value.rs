use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_HOUR, MAX_MINUTE, MAX_MONTH, MAX_YEAR,
};
use crate::prelude::*;
use crate::CultureError;
use std::str::FromStr;

/// A complete local wall-clock date-time value on the proleptic Gregorian
/// calendar. All fields are validated at construction, so a `DateTime` can
/// always be formatted without range checks.
///
/// No timezone is attached; this is the value a person reads off a clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(
    fmt = "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
    year,
    month,
    day,
    hour,
    minute,
    second
)]
pub struct DateTime {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

impl DateTime {
    /// Creates a validated date-time.
    ///
    /// # Errors
    /// Returns `InvalidYear`, `InvalidMonth`, `InvalidDay` or `InvalidTime`
    /// when a field is out of range (day validity accounts for leap years).
    pub fn new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, CultureError> {
        if year == 0 || year > MAX_YEAR {
            return Err(CultureError::InvalidYear(year));
        }
        if month == 0 || month > MAX_MONTH {
            return Err(CultureError::InvalidMonth(month));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(CultureError::InvalidDay { year, month, day });
        }
        if hour > MAX_HOUR || minute > MAX_MINUTE || second > MAX_MINUTE {
            return Err(CultureError::InvalidTime {
                hour,
                minute,
                second,
            });
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Creates a validated date at midnight.
    ///
    /// # Errors
    /// Same as [`DateTime::new`].
    pub fn date(year: u16, month: u8, day: u8) -> Result<Self, CultureError> {
        Self::new(year, month, day, 0, 0, 0)
    }

    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }

    #[inline]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    #[inline]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    #[inline]
    pub const fn second(&self) -> u8 {
        self.second
    }
}

impl FromStr for DateTime {
    type Err = CultureError;

    /// Parses the canonical `"yyyy-MM-dd HH:mm:ss"` form; the time part may
    /// be omitted and defaults to midnight.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CultureError::EmptyInput);
        }

        let mismatch = || CultureError::FormatMismatch(trimmed.to_owned());

        let (date_part, time_part) = match trimmed.split_once(' ') {
            Some((date, time)) => (date, Some(time)),
            None => (trimmed, None),
        };

        let mut date_fields = date_part.split('-');
        let year = parse_field::<u16>(date_fields.next(), mismatch)?;
        let month = parse_field::<u8>(date_fields.next(), mismatch)?;
        let day = parse_field::<u8>(date_fields.next(), mismatch)?;
        if date_fields.next().is_some() {
            return Err(mismatch());
        }

        let (hour, minute, second) = match time_part {
            Some(time) => {
                let mut time_fields = time.split(':');
                let hour = parse_field::<u8>(time_fields.next(), mismatch)?;
                let minute = parse_field::<u8>(time_fields.next(), mismatch)?;
                let second = parse_field::<u8>(time_fields.next(), mismatch)?;
                if time_fields.next().is_some() {
                    return Err(mismatch());
                }
                (hour, minute, second)
            }
            None => (0, 0, 0),
        };

        Self::new(year, month, day, hour, minute, second)
    }
}

fn parse_field<T: FromStr>(
    field: Option<&str>,
    mismatch: impl Fn() -> CultureError,
) -> Result<T, CultureError> {
    field
        .and_then(|text| text.trim().parse::<T>().ok())
        .ok_or_else(mismatch)
}

impl serde::Serialize for DateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for DateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// Calendar helpers

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let dt = DateTime::new(1982, 12, 4, 17, 8, 9).unwrap();
        assert_eq!(dt.year(), 1982);
        assert_eq!(dt.month(), 12);
        assert_eq!(dt.day(), 4);
        assert_eq!(dt.hour(), 17);
        assert_eq!(dt.minute(), 8);
        assert_eq!(dt.second(), 9);
    }

    #[test]
    fn test_new_invalid_year() {
        assert!(matches!(
            DateTime::date(0, 1, 1),
            Err(CultureError::InvalidYear(0))
        ));
        assert!(matches!(
            DateTime::date(10000, 1, 1),
            Err(CultureError::InvalidYear(10000))
        ));
    }

    #[test]
    fn test_new_invalid_month() {
        assert!(matches!(
            DateTime::date(2024, 13, 1),
            Err(CultureError::InvalidMonth(13))
        ));
        assert!(matches!(
            DateTime::date(2024, 0, 1),
            Err(CultureError::InvalidMonth(0))
        ));
    }

    #[test]
    fn test_new_invalid_day_respects_leap_years() {
        assert!(DateTime::date(2020, 2, 29).is_ok());
        assert!(matches!(
            DateTime::date(2021, 2, 29),
            Err(CultureError::InvalidDay { .. })
        ));
        // 1900 is divisible by 100 but not 400
        assert!(matches!(
            DateTime::date(1900, 2, 29),
            Err(CultureError::InvalidDay { .. })
        ));
        assert!(DateTime::date(2000, 2, 29).is_ok());
    }

    #[test]
    fn test_new_invalid_time() {
        assert!(matches!(
            DateTime::new(2024, 1, 1, 24, 0, 0),
            Err(CultureError::InvalidTime { .. })
        ));
        assert!(matches!(
            DateTime::new(2024, 1, 1, 0, 60, 0),
            Err(CultureError::InvalidTime { .. })
        ));
        assert!(matches!(
            DateTime::new(2024, 1, 1, 0, 0, 60),
            Err(CultureError::InvalidTime { .. })
        ));
    }

    #[test]
    fn test_display() {
        let dt = DateTime::new(1982, 12, 4, 7, 8, 9).unwrap();
        assert_eq!(dt.to_string(), "1982-12-04 07:08:09");
    }

    #[test]
    fn test_from_str_full() {
        let dt = "1982-12-04 17:08:09".parse::<DateTime>().unwrap();
        assert_eq!(dt, DateTime::new(1982, 12, 4, 17, 8, 9).unwrap());
    }

    #[test]
    fn test_from_str_date_only_defaults_to_midnight() {
        let dt = "1982-12-04".parse::<DateTime>().unwrap();
        assert_eq!(dt, DateTime::date(1982, 12, 4).unwrap());
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!(matches!(
            "".parse::<DateTime>(),
            Err(CultureError::EmptyInput)
        ));
        assert!("1982-12".parse::<DateTime>().is_err());
        assert!("1982-12-04 17:08".parse::<DateTime>().is_err());
        assert!("1982-12-04-05".parse::<DateTime>().is_err());
        assert!("198X-12-04".parse::<DateTime>().is_err());
    }

    #[test]
    fn test_from_str_validates_ranges() {
        assert!(matches!(
            "2024-02-30".parse::<DateTime>(),
            Err(CultureError::InvalidDay { .. })
        ));
        assert!(matches!(
            "2024-01-01 25:00:00".parse::<DateTime>(),
            Err(CultureError::InvalidTime { .. })
        ));
    }

    #[test]
    fn test_ordering() {
        let earlier = DateTime::new(2000, 1, 1, 0, 0, 0).unwrap();
        let later = DateTime::new(2000, 1, 1, 0, 0, 1).unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn test_serde_round_trip() {
        let dt = DateTime::new(1982, 12, 4, 17, 8, 9).unwrap();
        let json = serde_json::to_string(&dt).unwrap();
        assert_eq!(json, r#""1982-12-04 17:08:09""#);
        let parsed: DateTime = serde_json::from_str(&json).unwrap();
        assert_eq!(dt, parsed);
    }

    #[test]
    fn test_serde_rejects_invalid() {
        let result: Result<DateTime, _> = serde_json::from_str(r#""2024-13-01""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_days_in_month_table() {
        let expected = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12 {
            assert_eq!(days_in_month(2023, month), expected[month as usize]);
        }
        assert_eq!(days_in_month(2024, 2), 29);
    }
}
