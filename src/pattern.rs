//! The format-pattern mini-language.
//!
//! A pattern is a run-length encoded selection of date/time fields:
//! `y`/`yy` two-digit year, `yyyy` four-digit year, `M`/`MM` numeric month,
//! `MMM`/`MMMM` short/long month name, `d`/`dd` day, `h`/`hh` 12-hour,
//! `H`/`HH` 24-hour, `m`/`mm` minute, `s`/`ss` second, `A` meridiem marker,
//! `N` meridiem suppression. Any other character is a literal. The same
//! mini-language describes both caller-supplied selections ("which fields,
//! at which width") and the per-culture layout templates ("in which order,
//! with which separators").

use crate::CultureError;

/// Year rendering width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearStyle {
    /// `y` / `yy` — year modulo 100, zero-padded to two digits
    TwoDigit,
    /// `yyyy` — full year, zero-padded to four digits
    FourDigit,
}

/// Month rendering form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStyle {
    /// `M` — numeric, no padding
    Numeric,
    /// `MM` — numeric, zero-padded
    NumericPadded,
    /// `MMM` — localized short name
    ShortName,
    /// `MMMM` — localized long name
    LongName,
}

/// Hour rendering form. 12-hour forms display 0 and 12 as 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourStyle {
    /// `h` — 12-hour clock, no padding
    Clock12,
    /// `hh` — 12-hour clock, zero-padded
    Clock12Padded,
    /// `H` — 24-hour clock, no padding
    Clock24,
    /// `HH` — 24-hour clock, zero-padded
    Clock24Padded,
}

/// One unit of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternToken {
    Year(YearStyle),
    Month(MonthStyle),
    Day { padded: bool },
    Hour(HourStyle),
    Minute { padded: bool },
    Second { padded: bool },
    /// `A` — render/expect the localized AM/PM suffix
    Meridiem,
    /// `N` — suppress the AM/PM suffix on output
    NoMeridiem,
    /// Verbatim text between fields
    Literal(String),
}

impl PatternToken {
    fn from_run(letter: char, len: usize) -> Option<Self> {
        let token = match (letter, len) {
            ('y', 1 | 2) => Self::Year(YearStyle::TwoDigit),
            ('y', 4) => Self::Year(YearStyle::FourDigit),
            ('M', 1) => Self::Month(MonthStyle::Numeric),
            ('M', 2) => Self::Month(MonthStyle::NumericPadded),
            ('M', 3) => Self::Month(MonthStyle::ShortName),
            ('M', 4) => Self::Month(MonthStyle::LongName),
            ('d', 1) => Self::Day { padded: false },
            ('d', 2) => Self::Day { padded: true },
            ('h', 1) => Self::Hour(HourStyle::Clock12),
            ('h', 2) => Self::Hour(HourStyle::Clock12Padded),
            ('H', 1) => Self::Hour(HourStyle::Clock24),
            ('H', 2) => Self::Hour(HourStyle::Clock24Padded),
            ('m', 1) => Self::Minute { padded: false },
            ('m', 2) => Self::Minute { padded: true },
            ('s', 1) => Self::Second { padded: false },
            ('s', 2) => Self::Second { padded: true },
            ('A', 1) => Self::Meridiem,
            ('N', 1) => Self::NoMeridiem,
            _ => return None,
        };
        Some(token)
    }
}

/// Letters that start a field run; everything else is literal text.
const FIELD_LETTERS: [char; 9] = ['y', 'M', 'd', 'h', 'H', 'm', 's', 'A', 'N'];

/// A compiled, immutable sequence of pattern tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatPattern {
    tokens: Vec<PatternToken>,
}

impl FormatPattern {
    /// Compiles a pattern string.
    ///
    /// # Errors
    /// Returns `InvalidPattern` for unsupported run lengths (`yyy`,
    /// `MMMMM`, `ddd`, `AA`, ...). Detection happens here, at compile time,
    /// never during formatting or parsing.
    pub fn compile(pattern: &str) -> Result<Self, CultureError> {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let chars: Vec<char> = pattern.chars().collect();
        let mut pos = 0;

        while pos < chars.len() {
            let ch = chars[pos];
            if FIELD_LETTERS.contains(&ch) {
                if !literal.is_empty() {
                    tokens.push(PatternToken::Literal(std::mem::take(&mut literal)));
                }
                let mut len = 1;
                while pos + len < chars.len() && chars[pos + len] == ch {
                    len += 1;
                }
                let token = PatternToken::from_run(ch, len).ok_or_else(|| {
                    CultureError::InvalidPattern(format!(
                        "unsupported run '{}' in pattern {pattern:?}",
                        ch.to_string().repeat(len)
                    ))
                })?;
                tokens.push(token);
                pos += len;
            } else {
                literal.push(ch);
                pos += 1;
            }
        }
        if !literal.is_empty() {
            tokens.push(PatternToken::Literal(literal));
        }

        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[PatternToken] {
        &self.tokens
    }
}

/// The set of fields a caller's pattern selects, with their chosen variants.
/// Ordering and separators are the culture's business; the selection only
/// says which fields appear and how wide they render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct FieldSelection {
    pub year: Option<YearStyle>,
    pub month: Option<MonthStyle>,
    pub day_padded: Option<bool>,
    pub hour: Option<HourStyle>,
    pub minute_padded: Option<bool>,
    pub second_padded: Option<bool>,
    pub explicit_meridiem: bool,
    pub suppress_meridiem: bool,
}

impl FieldSelection {
    pub fn from_pattern(pattern: &FormatPattern) -> Self {
        let mut selection = Self::default();
        for token in pattern.tokens() {
            match token {
                PatternToken::Year(style) => selection.year = Some(*style),
                PatternToken::Month(style) => selection.month = Some(*style),
                PatternToken::Day { padded } => selection.day_padded = Some(*padded),
                PatternToken::Hour(style) => selection.hour = Some(*style),
                PatternToken::Minute { padded } => selection.minute_padded = Some(*padded),
                PatternToken::Second { padded } => selection.second_padded = Some(*padded),
                PatternToken::Meridiem => selection.explicit_meridiem = true,
                PatternToken::NoMeridiem => selection.suppress_meridiem = true,
                PatternToken::Literal(_) => {}
            }
        }
        selection
    }

    pub fn has_date(&self) -> bool {
        self.year.is_some() || self.month.is_some() || self.day_padded.is_some()
    }

    pub fn has_time(&self) -> bool {
        self.hour.is_some() || self.minute_padded.is_some() || self.second_padded.is_some()
    }

    /// The AM/PM suffix appears for 12-hour selections unless `N` asked for
    /// its suppression; `A` forces it.
    pub fn wants_meridiem(&self) -> bool {
        if self.suppress_meridiem {
            return false;
        }
        self.explicit_meridiem
            || matches!(
                self.hour,
                Some(HourStyle::Clock12 | HourStyle::Clock12Padded)
            )
    }

    pub fn uses_month_name(&self) -> bool {
        matches!(
            self.month,
            Some(MonthStyle::ShortName | MonthStyle::LongName)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_date_selection() {
        let pattern = FormatPattern::compile("yyyyMMdd").unwrap();
        assert_eq!(
            pattern.tokens(),
            &[
                PatternToken::Year(YearStyle::FourDigit),
                PatternToken::Month(MonthStyle::NumericPadded),
                PatternToken::Day { padded: true },
            ]
        );
    }

    #[test]
    fn test_compile_layout_with_literals() {
        let pattern = FormatPattern::compile("d.M.yyyy.").unwrap();
        assert_eq!(
            pattern.tokens(),
            &[
                PatternToken::Day { padded: false },
                PatternToken::Literal(".".to_owned()),
                PatternToken::Month(MonthStyle::Numeric),
                PatternToken::Literal(".".to_owned()),
                PatternToken::Year(YearStyle::FourDigit),
                PatternToken::Literal(".".to_owned()),
            ]
        );
    }

    #[test]
    fn test_compile_time_with_meridiem() {
        let pattern = FormatPattern::compile("h:mm:ss A").unwrap();
        assert_eq!(
            pattern.tokens(),
            &[
                PatternToken::Hour(HourStyle::Clock12),
                PatternToken::Literal(":".to_owned()),
                PatternToken::Minute { padded: true },
                PatternToken::Literal(":".to_owned()),
                PatternToken::Second { padded: true },
                PatternToken::Literal(" ".to_owned()),
                PatternToken::Meridiem,
            ]
        );
    }

    #[test]
    fn test_compile_month_name_forms() {
        let short = FormatPattern::compile("MMM").unwrap();
        assert_eq!(short.tokens(), &[PatternToken::Month(MonthStyle::ShortName)]);
        let long = FormatPattern::compile("MMMM").unwrap();
        assert_eq!(long.tokens(), &[PatternToken::Month(MonthStyle::LongName)]);
    }

    #[test]
    fn test_compile_two_digit_year_forms() {
        for pattern in ["y", "yy"] {
            let compiled = FormatPattern::compile(pattern).unwrap();
            assert_eq!(compiled.tokens(), &[PatternToken::Year(YearStyle::TwoDigit)]);
        }
    }

    #[test]
    fn test_compile_rejects_bad_run_lengths() {
        for pattern in ["yyy", "yyyyy", "MMMMM", "ddd", "hhh", "HHH", "mmm", "sss", "AA", "NN"] {
            assert!(
                matches!(
                    FormatPattern::compile(pattern),
                    Err(CultureError::InvalidPattern(_))
                ),
                "pattern {pattern:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_unknown_letters_are_literals() {
        let pattern = FormatPattern::compile("xyz").unwrap();
        // 'y' is a field letter, 'x' and 'z' are not
        assert_eq!(
            pattern.tokens(),
            &[
                PatternToken::Literal("x".to_owned()),
                PatternToken::Year(YearStyle::TwoDigit),
                PatternToken::Literal("z".to_owned()),
            ]
        );
    }

    #[test]
    fn test_selection_from_mixed_pattern() {
        let pattern = FormatPattern::compile("yyyyMd hhmm").unwrap();
        let selection = FieldSelection::from_pattern(&pattern);
        assert_eq!(selection.year, Some(YearStyle::FourDigit));
        assert_eq!(selection.month, Some(MonthStyle::Numeric));
        assert_eq!(selection.day_padded, Some(false));
        assert_eq!(selection.hour, Some(HourStyle::Clock12Padded));
        assert_eq!(selection.minute_padded, Some(true));
        assert!(selection.has_date());
        assert!(selection.has_time());
        assert!(selection.wants_meridiem());
    }

    #[test]
    fn test_selection_meridiem_rules() {
        let suppressed = FieldSelection::from_pattern(&FormatPattern::compile("h m s N").unwrap());
        assert!(!suppressed.wants_meridiem());

        let explicit = FieldSelection::from_pattern(&FormatPattern::compile("H:mm A").unwrap());
        assert!(explicit.wants_meridiem());

        let twenty_four = FieldSelection::from_pattern(&FormatPattern::compile("HH:mm").unwrap());
        assert!(!twenty_four.wants_meridiem());
    }
}
