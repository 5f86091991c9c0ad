/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for baselines
pub const MIN_DAY: u8 = 1;

/// First month of year, used for baselines
pub const MIN_MONTH: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Maximum valid hour (23:xx)
pub const MAX_HOUR: u8 = 23;

/// Maximum valid minute or second
pub const MAX_MINUTE: u8 = 59;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Two-digit years below the pivot resolve to the 2000s, the rest
/// to the 1900s ("82" -> 1982, "07" -> 2007).
pub(crate) const TWO_DIGIT_YEAR_PIVOT: u16 = 50;

/// Separator joining hour/minute/second runs in parsed input
pub(crate) const TIME_SEPARATOR: &str = ":";

/// Subtag separator in culture codes (`"sr-latn"`)
pub(crate) const SUBTAG_SEPARATOR: char = '-';
