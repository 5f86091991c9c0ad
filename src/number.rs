//! Culture-bound decimal number formatting and parsing.

use crate::locale::{LocaleDescriptor, LocaleTable};
use crate::{CultureCode, CultureError};
use std::sync::Arc;

/// The pieces of a canonical decimal literal: sign, integer digits,
/// fractional digits (without the point), exponent suffix (verbatim,
/// including the `e`/`E`).
struct DecimalParts<'a> {
    sign: &'a str,
    integer: &'a str,
    fraction: &'a str,
    exponent: &'a str,
}

/// Splits a canonical (`.`-separated, ungrouped) decimal literal.
/// Returns `None` when the text is not a valid signed decimal with an
/// optional fraction and exponent.
fn split_decimal_literal(text: &str) -> Option<DecimalParts<'_>> {
    let (sign, rest) = match text.strip_prefix(['+', '-']) {
        Some(rest) => (&text[..1], rest),
        None => ("", text),
    };

    let (mantissa, exponent) = match rest.find(['e', 'E']) {
        Some(at) => (&rest[..at], &rest[at..]),
        None => (rest, ""),
    };

    let (integer, fraction) = match mantissa.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (mantissa, ""),
    };

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if integer.is_empty() || !all_digits(integer) || !all_digits(fraction) {
        return None;
    }
    if mantissa.contains('.') && fraction.is_empty() {
        return None;
    }
    if !exponent.is_empty() {
        let exp_digits = exponent[1..].strip_prefix(['+', '-']).unwrap_or(&exponent[1..]);
        if exp_digits.is_empty() || !all_digits(exp_digits) {
            return None;
        }
    }

    Some(DecimalParts {
        sign,
        integer,
        fraction,
        exponent,
    })
}

/// Formats and parses decimal numbers in one culture's conventions.
/// The descriptor is resolved once at construction and shared read-only.
#[derive(Debug, Clone)]
pub struct NumberCulture {
    code: CultureCode,
    descriptor: Arc<LocaleDescriptor>,
}

impl NumberCulture {
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

    /// Renders a value with the culture's group and decimal separators.
    /// Non-finite values render as their plain `Display` form.
    pub fn format(&self, value: f64) -> String {
        let canonical = value.to_string();
        self.format_str(&canonical).unwrap_or(canonical)
    }

    /// Renders an already-textual decimal value, preserving its fractional
    /// digits exactly (no re-rounding); this is the path for pre-rounded
    /// values like `"1234.500"`.
    ///
    /// # Errors
    /// Returns `InvalidNumberFormat` when the text is not a canonical
    /// signed decimal literal.
    pub fn format_str(&self, text: &str) -> Result<String, CultureError> {
        let trimmed = text.trim();
        let parts = split_decimal_literal(trimmed)
            .ok_or_else(|| CultureError::InvalidNumberFormat(text.to_owned()))?;

        let mut out = String::with_capacity(trimmed.len() + trimmed.len() / 3);
        out.push_str(parts.sign);
        let digits = parts.integer.len();
        for (i, ch) in parts.integer.chars().enumerate() {
            if i > 0 && (digits - i) % 3 == 0 {
                out.push(self.descriptor.group_separator);
            }
            out.push(ch);
        }
        if !parts.fraction.is_empty() {
            out.push(self.descriptor.decimal_separator);
            out.push_str(parts.fraction);
        }
        out.push_str(parts.exponent);
        Ok(out)
    }

    /// Parses culture-formatted text back into a number: group separators
    /// are stripped, the culture's decimal separator becomes `.`.
    ///
    /// # Errors
    /// Returns `InvalidNumberFormat` when the remaining text is not a valid
    /// signed decimal literal (optionally with exponent).
    pub fn parse(&self, text: &str) -> Result<f64, CultureError> {
        let invalid = || CultureError::InvalidNumberFormat(text.to_owned());

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(invalid());
        }

        let mut canonical = String::with_capacity(trimmed.len());
        for ch in trimmed.chars() {
            if ch == self.descriptor.group_separator {
                continue;
            }
            if ch == self.descriptor.decimal_separator {
                canonical.push('.');
            } else {
                canonical.push(ch);
            }
        }

        split_decimal_literal(&canonical).ok_or_else(invalid)?;
        canonical.parse::<f64>().map_err(|_| invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_de_decimal_comma() {
        let culture = NumberCulture::new("de").unwrap();
        assert_eq!(culture.parse("1,1").unwrap(), 1.1);
    }

    #[test]
    fn test_sr_decimal_comma() {
        let culture = NumberCulture::new("sr").unwrap();
        assert_eq!(culture.format(1.1), "1,1");
    }

    #[test]
    fn test_sr_dot_as_group_separator() {
        let culture = NumberCulture::new("sr").unwrap();
        assert_eq!(culture.format(1000.0), "1.000");
    }

    #[test]
    fn test_en_grouping() {
        let culture = NumberCulture::new("en").unwrap();
        assert_eq!(culture.format(1234567.25), "1,234,567.25");
        assert_eq!(culture.format(100.0), "100");
        assert_eq!(culture.format(-43210.5), "-43,210.5");
    }

    #[test]
    fn test_format_str_preserves_trailing_zeros() {
        let culture = NumberCulture::new("de").unwrap();
        assert_eq!(culture.format_str("1234.500").unwrap(), "1.234,500");
        assert_eq!(culture.format_str("-0.250").unwrap(), "-0,250");
    }

    #[test]
    fn test_format_str_passes_exponent_through() {
        let culture = NumberCulture::new("de").unwrap();
        assert_eq!(culture.format_str("1.5e10").unwrap(), "1,5e10");
        assert_eq!(culture.format_str("2E-3").unwrap(), "2E-3");
    }

    #[test]
    fn test_format_str_rejects_garbage() {
        let culture = NumberCulture::new("en").unwrap();
        for bad in ["", "abc", "1.2.3", "1.", "e5", "1e", "--1"] {
            assert!(
                matches!(
                    culture.format_str(bad),
                    Err(CultureError::InvalidNumberFormat(_))
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_strips_group_separators() {
        let culture = NumberCulture::new("de").unwrap();
        assert_eq!(culture.parse("1.234.567,25").unwrap(), 1234567.25);

        let culture = NumberCulture::new("fr").unwrap();
        assert_eq!(culture.parse("1\u{a0}234,5").unwrap(), 1234.5);
    }

    #[test]
    fn test_parse_signed_and_exponent_forms() {
        let culture = NumberCulture::new("en").unwrap();
        assert_eq!(culture.parse("-1,234.5").unwrap(), -1234.5);
        assert_eq!(culture.parse("+2.5e3").unwrap(), 2500.0);
    }

    #[test]
    fn test_parse_rejects_invalid() {
        let culture = NumberCulture::new("de").unwrap();
        for bad in ["", "  ", "1,2,3", "12a", "1,-5"] {
            assert!(
                matches!(
                    culture.parse(bad),
                    Err(CultureError::InvalidNumberFormat(_))
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_round_trip_three_decimal_values() {
        for code in ["sr", "de", "en", "fr"] {
            let culture = NumberCulture::new(code).unwrap();
            for value in [0.125, 9_876_543.25, -500_000.875, 0.0, 1000.0] {
                let text = culture.format(value);
                assert_eq!(
                    culture.parse(&text).unwrap(),
                    value,
                    "round trip failed for {value} in {code}"
                );
            }
        }
    }

    #[test]
    fn test_round_trip_pre_rounded_text() {
        // Mirrors the original suite: render toFixed(3)-style text and
        // expect the exact textual value back.
        let culture = NumberCulture::new("de").unwrap();
        let text = culture.format_str("9499999.912").unwrap();
        assert_eq!(text, "9.499.999,912");
        assert_eq!(culture.parse(&text).unwrap(), 9_499_999.912);
    }

    #[test]
    fn test_unknown_culture_at_construction() {
        assert!(matches!(
            NumberCulture::new("xx"),
            Err(CultureError::UnknownCulture(_))
        ));
    }

    #[test]
    fn test_non_finite_values_render_plainly() {
        let culture = NumberCulture::new("en").unwrap();
        assert_eq!(culture.format(f64::NAN), "NaN");
        assert_eq!(culture.format(f64::INFINITY), "inf");
    }
}
