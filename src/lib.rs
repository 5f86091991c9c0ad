//! Locale-aware formatting and parsing of numbers and date/time values.
//!
//! A culture code (`"de"`, `"sr-latn"`, `"en"`) selects a set of
//! conventions: decimal and group separators, month and day names, and the
//! ordering of date/time components. [`NumberCulture`] and
//! [`DateTimeCulture`] bind to one culture at construction and then convert
//! between native values and culture-conventional text.
//!
//! Formatting a date takes a pattern that selects fields and widths
//! (`"yyyyMMdd"`, `"h:m:s A"`); the culture supplies ordering and
//! separators. Parsing is free-form and tolerant of partial input, with
//! missing components filled in by explicit defaulting rules.
//!
//! ```
//! use culture_format::{DateTime, DateTimeCulture, NumberCulture};
//!
//! let numbers = NumberCulture::new("de").unwrap();
//! assert_eq!(numbers.format(1234.5), "1.234,5");
//! assert_eq!(numbers.parse("1,1").unwrap(), 1.1);
//!
//! let dates = DateTimeCulture::new("sr-latn").unwrap();
//! let date = DateTime::date(1982, 12, 4).unwrap();
//! assert_eq!(dates.format(date, "yyyyMMdd").unwrap(), "04.12.1982.");
//! ```

mod consts;
mod datetime;
mod locale;
mod number;
mod pattern;
mod prelude;
mod value;

pub use consts::{DAYS_IN_MONTH, MAX_HOUR, MAX_MINUTE, MAX_MONTH, MAX_YEAR, MIN_DAY, MIN_MONTH};
pub use datetime::{DateComponents, DateTimeCulture, Meridiem, ParseOptions};
pub use locale::{CultureCode, LocaleDescriptor, LocaleTable};
pub use number::NumberCulture;
pub use pattern::{FormatPattern, HourStyle, MonthStyle, PatternToken, YearStyle};
pub use value::{days_in_month, is_leap_year, DateTime};

/// Everything that can go wrong across the crate.
///
/// `UnknownCulture` and `InvalidPattern` surface programming/configuration
/// mistakes; the parse-time kinds (`InvalidNumberFormat`, `FormatMismatch`,
/// `AmbiguousOrIncompleteMatch` and the range variants) are per-call and
/// recoverable — no state is retained between calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CultureError {
    #[error("Unknown culture: {0}")]
    UnknownCulture(String),
    #[error("Invalid format pattern: {0}")]
    InvalidPattern(String),
    #[error("Invalid number: {0:?}")]
    InvalidNumberFormat(String),
    #[error("Input does not match the expected format: {0:?}")]
    FormatMismatch(String),
    #[error("Ambiguous or incomplete input: {0:?}")]
    AmbiguousOrIncompleteMatch(String),
    #[error("Invalid year: {0} (must be 1-{limit})", limit = MAX_YEAR)]
    InvalidYear(u16),
    #[error("Invalid month: {0} (must be 1-{limit})", limit = MAX_MONTH)]
    InvalidMonth(u8),
    #[error("Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[error("Invalid time {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: u8, minute: u8, second: u8 },
    #[error("Empty input")]
    EmptyInput,
}
