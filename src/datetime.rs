//! Culture-bound date-time formatting and free-form parsing.
//!
//! Formatting: the caller's pattern selects fields and widths; the culture's
//! layout templates decide ordering and separators, so `"yyyyMd"` renders as
//! `"2/1/2000"` in `en` and `"1.2.2000."` in `sr`.
//!
//! Parsing is pattern-less and tolerant: the input is split into digit and
//! letter runs, letter runs are matched against month names and meridiem
//! markers, digit runs joined by `:` become the time of day, and the rest
//! fill date fields in the culture's own order. Missing components are
//! resolved by the defaulting rules of [`ParseOptions`].

use crate::consts::{MIN_DAY, MIN_MONTH, TIME_SEPARATOR, TWO_DIGIT_YEAR_PIVOT};
use crate::locale::{LocaleDescriptor, LocaleTable};
use crate::pattern::{FieldSelection, FormatPattern, HourStyle, MonthStyle, PatternToken, YearStyle};
use crate::value::DateTime;
use crate::{CultureCode, CultureError};
use chrono::{Datelike, Local};
use std::sync::Arc;

/// Half-day marker attached to a parsed 12-hour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

/// Fields recovered from a partial parse, before defaulting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateComponents {
    pub year: Option<u16>,
    pub month: Option<u8>,
    pub day: Option<u8>,
    pub hour: Option<u8>,
    pub minute: Option<u8>,
    pub second: Option<u8>,
    pub meridiem: Option<Meridiem>,
}

/// Controls how unset components are resolved after a partial parse.
///
/// With `use_current_date_for_defaults` an unset year/month/day falls back
/// to today's value — unless a more significant field was parsed, in which
/// case less significant fields take their baseline instead ("2" parsed as
/// a month means the 1st of that month, not today's day-of-month). Without
/// it, month and day fall back to 1 and the year to the current year.
/// Time-of-day fields always fall back to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub use_current_date_for_defaults: bool,
}

/// Formats and parses date-time values in one culture's conventions.
/// The descriptor is resolved once at construction and shared read-only.
#[derive(Debug, Clone)]
pub struct DateTimeCulture {
    code: CultureCode,
    descriptor: Arc<LocaleDescriptor>,
}

impl DateTimeCulture {
    /// Binds to a culture from the built-in table.
    ///
    /// # Errors
    /// Returns `UnknownCulture` when the code cannot be resolved.
    pub fn new(culture: &str) -> Result<Self, CultureError> {
        Self::with_table(culture, LocaleTable::builtin())
    }

    /// Binds to a culture from an explicit (possibly synthetic) table.
    ///
    /// # Errors
    /// Returns `UnknownCulture` when the code cannot be resolved.
    pub fn with_table(culture: &str, table: &LocaleTable) -> Result<Self, CultureError> {
        let code = CultureCode::new(culture)?;
        let descriptor = table.resolve(code.as_str())?;
        Ok(Self { code, descriptor })
    }

    pub fn culture(&self) -> &CultureCode {
        &self.code
    }

    pub fn descriptor(&self) -> &LocaleDescriptor {
        &self.descriptor
    }

    /// Renders `date` with the fields and widths selected by `pattern`,
    /// laid out in this culture's conventions.
    ///
    /// # Errors
    /// Returns `InvalidPattern` when the pattern does not compile or
    /// selects no fields.
    pub fn format(&self, date: DateTime, pattern: &str) -> Result<String, CultureError> {
        let selector = FormatPattern::compile(pattern)?;
        let selection = FieldSelection::from_pattern(&selector);
        if !selection.has_date() && !selection.has_time() {
            return Err(CultureError::InvalidPattern(format!(
                "pattern {pattern:?} selects no fields"
            )));
        }

        let mut parts = Vec::with_capacity(2);
        if selection.has_date() {
            let template_src = if selection.uses_month_name() {
                &self.descriptor.named_date_template
            } else {
                &self.descriptor.date_template
            };
            let template = FormatPattern::compile(template_src)?;
            let (text, _) = self.render_part(&template, date, &selection);
            parts.push(text);
        }
        if selection.has_time() {
            let template = FormatPattern::compile(&self.descriptor.time_template)?;
            let (mut text, meridiem_emitted) = self.render_part(&template, date, &selection);
            if selection.wants_meridiem() && !meridiem_emitted {
                // culture's time template has no meridiem slot of its own
                text.push(' ');
                text.push_str(self.meridiem_marker(date.hour()));
            }
            parts.push(text);
        }
        Ok(parts.join(&self.descriptor.datetime_joiner))
    }

    /// Parses free-form text with baseline defaults for unset components.
    ///
    /// # Errors
    /// `FormatMismatch` for unrecognizable words or malformed times,
    /// `AmbiguousOrIncompleteMatch` for surplus values, `EmptyInput` for
    /// blank text, and range errors from validating the resolved value.
    pub fn parse(&self, text: &str) -> Result<DateTime, CultureError> {
        self.parse_with(text, &ParseOptions::default())
    }

    /// Parses free-form text with explicit defaulting options.
    ///
    /// # Errors
    /// Same as [`DateTimeCulture::parse`].
    pub fn parse_with(&self, text: &str, options: &ParseOptions) -> Result<DateTime, CultureError> {
        self.parse_at(text, options, current_local_date())
    }

    /// Deterministic entry point: `today` supplies the current-date values
    /// the defaulting rules refer to.
    pub(crate) fn parse_at(
        &self,
        text: &str,
        options: &ParseOptions,
        today: (u16, u8, u8),
    ) -> Result<DateTime, CultureError> {
        let components = self.match_components(text)?;
        resolve_components(&components, options, today)
    }

    // -- formatting internals --

    /// Renders one template, substituting each field token's width from the
    /// selection and dropping unselected fields with their separators.
    fn render_part(
        &self,
        template: &FormatPattern,
        date: DateTime,
        selection: &FieldSelection,
    ) -> (String, bool) {
        let mut out = String::new();
        let mut pending = String::new();
        let mut last_rendered = false;
        let mut meridiem_emitted = false;

        for token in template.tokens() {
            if let PatternToken::Literal(text) = token {
                pending.push_str(text);
                continue;
            }
            match self.render_field(token, date, selection) {
                Some(text) => {
                    if !out.is_empty() {
                        out.push_str(&pending);
                    }
                    pending.clear();
                    if matches!(token, PatternToken::Meridiem) {
                        meridiem_emitted = true;
                    }
                    out.push_str(&text);
                    last_rendered = true;
                }
                None => {
                    pending.clear();
                    last_rendered = false;
                }
            }
        }
        if last_rendered {
            // trailing literal, e.g. the final '.' of "d.M.yyyy."
            out.push_str(&pending);
        }
        (out, meridiem_emitted)
    }

    fn render_field(
        &self,
        token: &PatternToken,
        date: DateTime,
        selection: &FieldSelection,
    ) -> Option<String> {
        match token {
            PatternToken::Year(_) => selection.year.map(|style| match style {
                YearStyle::TwoDigit => format!("{:02}", date.year() % 100),
                YearStyle::FourDigit => format!("{:04}", date.year()),
            }),
            PatternToken::Month(_) => selection.month.map(|style| {
                let index = usize::from(date.month() - 1);
                match style {
                    MonthStyle::Numeric => date.month().to_string(),
                    MonthStyle::NumericPadded => format!("{:02}", date.month()),
                    MonthStyle::ShortName => self.descriptor.short_months[index].clone(),
                    MonthStyle::LongName => self.descriptor.long_months[index].clone(),
                }
            }),
            PatternToken::Day { .. } => selection.day_padded.map(|padded| {
                if padded {
                    format!("{:02}", date.day())
                } else {
                    date.day().to_string()
                }
            }),
            PatternToken::Hour(_) => selection.hour.map(|style| {
                let clock12 = if date.hour() % 12 == 0 {
                    12
                } else {
                    date.hour() % 12
                };
                match style {
                    HourStyle::Clock12 => clock12.to_string(),
                    HourStyle::Clock12Padded => format!("{clock12:02}"),
                    HourStyle::Clock24 => date.hour().to_string(),
                    HourStyle::Clock24Padded => format!("{:02}", date.hour()),
                }
            }),
            PatternToken::Minute { .. } => selection.minute_padded.map(|padded| {
                if padded {
                    format!("{:02}", date.minute())
                } else {
                    date.minute().to_string()
                }
            }),
            PatternToken::Second { .. } => selection.second_padded.map(|padded| {
                if padded {
                    format!("{:02}", date.second())
                } else {
                    date.second().to_string()
                }
            }),
            PatternToken::Meridiem => selection
                .wants_meridiem()
                .then(|| self.meridiem_marker(date.hour()).to_owned()),
            PatternToken::NoMeridiem | PatternToken::Literal(_) => None,
        }
    }

    fn meridiem_marker(&self, hour: u8) -> &str {
        if hour >= 12 {
            &self.descriptor.pm
        } else {
            &self.descriptor.am
        }
    }

    // -- parsing internals --

    /// Matches input runs into partial components, without defaulting.
    fn match_components(&self, text: &str) -> Result<DateComponents, CultureError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CultureError::EmptyInput);
        }

        let mut components = DateComponents::default();
        let mut date_numbers: Vec<&str> = Vec::new();
        let mut time_values: Vec<u8> = Vec::new();
        let mut in_time = false;
        let mut pending_sep: Option<&str> = None;
        let mut prev_digits = false;

        for run in segment(trimmed) {
            match run {
                Run::Sep(sep) => pending_sep = Some(sep),
                Run::Letters(word) => {
                    self.match_word(word, &mut components, trimmed)?;
                    in_time = false;
                    prev_digits = false;
                    pending_sep = None;
                }
                Run::Digits(digits) => {
                    let time_joined =
                        prev_digits && pending_sep.is_some_and(|sep| sep.trim() == TIME_SEPARATOR);
                    if time_joined {
                        if !in_time {
                            let hour_text = date_numbers
                                .pop()
                                .ok_or_else(|| CultureError::FormatMismatch(trimmed.to_owned()))?;
                            time_values.push(small_value(hour_text)?);
                            in_time = true;
                        }
                        if time_values.len() == 3 {
                            return Err(CultureError::FormatMismatch(format!(
                                "too many time components in {trimmed:?}"
                            )));
                        }
                        time_values.push(small_value(digits)?);
                    } else {
                        in_time = false;
                        date_numbers.push(digits);
                    }
                    prev_digits = true;
                    pending_sep = None;
                }
            }
        }

        let order = self.date_field_order()?;
        for digits in date_numbers {
            // three or more digits can only be a year
            if digits.len() >= 3 {
                if components.year.is_some() {
                    return Err(CultureError::AmbiguousOrIncompleteMatch(trimmed.to_owned()));
                }
                components.year = Some(year_value(digits)?);
                continue;
            }
            let value = small_value(digits)?;
            let slot = order.iter().find(|field| match field {
                DateField::Year => components.year.is_none(),
                DateField::Month => components.month.is_none(),
                DateField::Day => components.day.is_none(),
            });
            match slot {
                Some(DateField::Year) => components.year = Some(expand_two_digit_year(value)),
                Some(DateField::Month) => components.month = Some(value),
                Some(DateField::Day) => components.day = Some(value),
                None => {
                    return Err(CultureError::AmbiguousOrIncompleteMatch(trimmed.to_owned()));
                }
            }
        }

        match time_values.len() {
            0 => {}
            2 | 3 => {
                components.hour = Some(time_values[0]);
                components.minute = Some(time_values[1]);
                components.second = time_values.get(2).copied();
            }
            _ => {
                return Err(CultureError::FormatMismatch(format!(
                    "incomplete time in {trimmed:?}"
                )));
            }
        }

        if components == DateComponents::default() {
            return Err(CultureError::AmbiguousOrIncompleteMatch(trimmed.to_owned()));
        }
        Ok(components)
    }

    /// Matches one letter run: a meridiem marker or a month name.
    fn match_word(
        &self,
        word: &str,
        components: &mut DateComponents,
        input: &str,
    ) -> Result<(), CultureError> {
        let word_lower = word.to_lowercase();
        if word_lower == self.descriptor.am.to_lowercase() {
            components.meridiem = Some(Meridiem::Am);
            return Ok(());
        }
        if word_lower == self.descriptor.pm.to_lowercase() {
            components.meridiem = Some(Meridiem::Pm);
            return Ok(());
        }

        let (month, matched_len) = self
            .match_month_name(&word_lower)
            .ok_or_else(|| CultureError::FormatMismatch(word.to_owned()))?;
        if matched_len < word_lower.len() {
            // a shorter name matched a prefix but letters remain
            return Err(CultureError::FormatMismatch(word.to_owned()));
        }
        if components.month.is_some() {
            return Err(CultureError::AmbiguousOrIncompleteMatch(input.to_owned()));
        }
        components.month = Some(month);
        Ok(())
    }

    /// Longest month name (short or long form, case-insensitive) that is a
    /// prefix of `word_lower`; longest-first so a short name never shadows
    /// a longer one sharing its prefix.
    fn match_month_name(&self, word_lower: &str) -> Option<(u8, usize)> {
        let mut best: Option<(u8, usize)> = None;
        let lists = [&self.descriptor.long_months, &self.descriptor.short_months];
        for list in lists {
            for (index, name) in list.iter().enumerate() {
                let name_lower = name.to_lowercase();
                if !word_lower.starts_with(&name_lower) {
                    continue;
                }
                let month = index as u8 + 1;
                if best.is_none_or(|(_, len)| name_lower.len() > len) {
                    best = Some((month, name_lower.len()));
                }
            }
        }
        best
    }

    /// Year/month/day ordering of this culture, read off its numeric date
    /// template.
    fn date_field_order(&self) -> Result<Vec<DateField>, CultureError> {
        let template = FormatPattern::compile(&self.descriptor.date_template)?;
        let mut order = Vec::with_capacity(3);
        for token in template.tokens() {
            let field = match token {
                PatternToken::Year(_) => DateField::Year,
                PatternToken::Month(_) => DateField::Month,
                PatternToken::Day { .. } => DateField::Day,
                _ => continue,
            };
            if !order.contains(&field) {
                order.push(field);
            }
        }
        Ok(order)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateField {
    Year,
    Month,
    Day,
}

enum Run<'a> {
    Digits(&'a str),
    Letters(&'a str),
    Sep(&'a str),
}

/// Splits input into maximal runs of digits, letters, and everything else.
fn segment(text: &str) -> Vec<Run<'_>> {
    #[derive(PartialEq, Clone, Copy)]
    enum Class {
        Digit,
        Letter,
        Sep,
    }
    fn classify(c: char) -> Class {
        if c.is_ascii_digit() {
            Class::Digit
        } else if c.is_alphabetic() {
            Class::Letter
        } else {
            Class::Sep
        }
    }

    fn make_run(class: Class, text: &str) -> Run<'_> {
        match class {
            Class::Digit => Run::Digits(text),
            Class::Letter => Run::Letters(text),
            Class::Sep => Run::Sep(text),
        }
    }

    let mut runs = Vec::new();
    let mut start = 0;
    let mut current: Option<Class> = None;
    for (at, ch) in text.char_indices() {
        let class = classify(ch);
        if current == Some(class) {
            continue;
        }
        if let Some(open) = current {
            runs.push(make_run(open, &text[start..at]));
        }
        current = Some(class);
        start = at;
    }
    if let Some(open) = current {
        runs.push(make_run(open, &text[start..]));
    }
    runs
}

fn small_value(digits: &str) -> Result<u8, CultureError> {
    digits
        .parse::<u8>()
        .map_err(|_| CultureError::FormatMismatch(digits.to_owned()))
}

fn year_value(digits: &str) -> Result<u16, CultureError> {
    digits
        .parse::<u16>()
        .map_err(|_| CultureError::FormatMismatch(digits.to_owned()))
}

fn expand_two_digit_year(value: u8) -> u16 {
    let value = u16::from(value);
    if value < TWO_DIGIT_YEAR_PIVOT {
        2000 + value
    } else {
        1900 + value
    }
}

/// Applies the defaulting rules and validates the resolved value.
fn resolve_components(
    components: &DateComponents,
    options: &ParseOptions,
    today: (u16, u8, u8),
) -> Result<DateTime, CultureError> {
    let (today_year, today_month, today_day) = today;
    let explicit_year = components.year.is_some();
    let explicit_month = components.month.is_some();
    let use_current = options.use_current_date_for_defaults;

    // The year baseline is the current year in both modes; month and day
    // track today only while no more significant field was parsed.
    let year = components.year.unwrap_or(today_year);
    let month = components.month.unwrap_or(if use_current && !explicit_year {
        today_month
    } else {
        MIN_MONTH
    });
    let day = components
        .day
        .unwrap_or(if use_current && !explicit_year && !explicit_month {
            today_day
        } else {
            MIN_DAY
        });

    let hour = match (components.hour, components.meridiem) {
        (Some(hour), Some(Meridiem::Pm)) if hour < 12 => hour + 12,
        (Some(12), Some(Meridiem::Am)) => 0,
        (Some(hour), _) => hour,
        (None, _) => 0,
    };
    let minute = components.minute.unwrap_or(0);
    let second = components.second.unwrap_or(0);

    DateTime::new(year, month, day, hour, minute, second)
}

/// Today's local calendar date, for the defaulting rules.
pub(crate) fn current_local_date() -> (u16, u8, u8) {
    let today = Local::now().date_naive();
    let year = u16::try_from(today.year()).unwrap_or(1970);
    let month = u8::try_from(today.month()).unwrap_or(1);
    let day = u8::try_from(today.day()).unwrap_or(1);
    (year, month, day)
}
