//! Culture codes and the locale-descriptor table.
//!
//! The table replaces a runtime-provided internationalization registry with
//! an explicitly constructed, immutable lookup. A built-in table covers the
//! cultures the crate ships with; synthetic tables can be injected through
//! the `with_table` engine constructors.

use crate::consts::SUBTAG_SEPARATOR;
use crate::prelude::*;
use crate::CultureError;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// A normalized culture identifier: a primary subtag with optional
/// script/region subtags (`"de"`, `"sr-latn"`). Lowercased on construction,
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{}", _0)]
pub struct CultureCode(String);

impl CultureCode {
    /// Normalizes and validates a culture code.
    ///
    /// # Errors
    /// Returns `UnknownCulture` when the code is empty or contains
    /// characters outside `[A-Za-z0-9-]`.
    pub fn new(code: &str) -> Result<Self, CultureError> {
        let normalized = code.trim().to_ascii_lowercase();
        let well_formed = !normalized.is_empty()
            && !normalized.starts_with(SUBTAG_SEPARATOR)
            && !normalized.ends_with(SUBTAG_SEPARATOR)
            && normalized
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == SUBTAG_SEPARATOR);
        if !well_formed {
            return Err(CultureError::UnknownCulture(code.to_owned()));
        }
        Ok(Self(normalized))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Progressively shorter subtag prefixes, most specific first:
    /// `"sr-latn"` yields `["sr-latn", "sr"]`.
    pub fn fallback_chain(&self) -> Vec<&str> {
        let mut chain = vec![self.0.as_str()];
        let mut rest = self.0.as_str();
        while let Some(cut) = rest.rfind(SUBTAG_SEPARATOR) {
            rest = &rest[..cut];
            chain.push(rest);
        }
        chain
    }
}

/// The immutable per-culture conventions bundle: separators, name lists,
/// layout templates, meridiem markers. Shared read-only between engines.
///
/// Templates use the pattern mini-language. `date_template` carries the
/// culture's numeric-month layout, `named_date_template` its month-name
/// layout; the template chosen and the per-field widths come from the
/// caller's selection at format time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleDescriptor {
    pub decimal_separator: char,
    pub group_separator: char,
    /// Short month names, January first
    pub short_months: [String; 12],
    /// Long month names, January first
    pub long_months: [String; 12],
    /// Day names, Sunday first
    pub day_names: [String; 7],
    /// Numeric date layout, e.g. `"d.M.yyyy."`
    pub date_template: String,
    /// Month-name date layout, e.g. `"MMMM d, yyyy"`
    pub named_date_template: String,
    /// Time layout, e.g. `"h:mm:ss A"`
    pub time_template: String,
    /// Text joining the date and time parts of a combined rendering
    pub datetime_joiner: String,
    pub am: String,
    pub pm: String,
}

fn names<const N: usize>(values: [&str; N]) -> [String; N] {
    values.map(str::to_owned)
}

impl LocaleDescriptor {
    fn en() -> Self {
        Self {
            decimal_separator: '.',
            group_separator: ',',
            short_months: names([
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov",
                "Dec",
            ]),
            long_months: names([
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]),
            day_names: names([
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ]),
            date_template: "M/d/yyyy".to_owned(),
            named_date_template: "MMMM d, yyyy".to_owned(),
            time_template: "h:mm:ss A".to_owned(),
            datetime_joiner: ", ".to_owned(),
            am: "AM".to_owned(),
            pm: "PM".to_owned(),
        }
    }

    fn de() -> Self {
        Self {
            decimal_separator: ',',
            group_separator: '.',
            short_months: names([
                "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov",
                "Dez",
            ]),
            long_months: names([
                "Januar",
                "Februar",
                "März",
                "April",
                "Mai",
                "Juni",
                "Juli",
                "August",
                "September",
                "Oktober",
                "November",
                "Dezember",
            ]),
            day_names: names([
                "Sonntag",
                "Montag",
                "Dienstag",
                "Mittwoch",
                "Donnerstag",
                "Freitag",
                "Samstag",
            ]),
            date_template: "d.M.yyyy".to_owned(),
            named_date_template: "d. MMMM yyyy".to_owned(),
            time_template: "HH:mm:ss".to_owned(),
            datetime_joiner: ", ".to_owned(),
            am: "AM".to_owned(),
            pm: "PM".to_owned(),
        }
    }

    fn fr() -> Self {
        Self {
            decimal_separator: ',',
            group_separator: '\u{a0}',
            short_months: names([
                "janv", "févr", "mars", "avr", "mai", "juin", "juil", "août", "sept", "oct",
                "nov", "déc",
            ]),
            long_months: names([
                "janvier",
                "février",
                "mars",
                "avril",
                "mai",
                "juin",
                "juillet",
                "août",
                "septembre",
                "octobre",
                "novembre",
                "décembre",
            ]),
            day_names: names([
                "dimanche",
                "lundi",
                "mardi",
                "mercredi",
                "jeudi",
                "vendredi",
                "samedi",
            ]),
            date_template: "d/M/yyyy".to_owned(),
            named_date_template: "d MMMM yyyy".to_owned(),
            time_template: "HH:mm:ss".to_owned(),
            datetime_joiner: " ".to_owned(),
            am: "AM".to_owned(),
            pm: "PM".to_owned(),
        }
    }

    fn sr() -> Self {
        Self {
            decimal_separator: ',',
            group_separator: '.',
            short_months: names([
                "jan", "feb", "mar", "apr", "maj", "jun", "jul", "avg", "sep", "okt", "nov",
                "dec",
            ]),
            long_months: names([
                "januar",
                "februar",
                "mart",
                "april",
                "maj",
                "jun",
                "jul",
                "avgust",
                "septembar",
                "oktobar",
                "novembar",
                "decembar",
            ]),
            day_names: names([
                "nedelja",
                "ponedeljak",
                "utorak",
                "sreda",
                "četvrtak",
                "petak",
                "subota",
            ]),
            date_template: "d.M.yyyy.".to_owned(),
            named_date_template: "d. MMMM yyyy.".to_owned(),
            time_template: "HH:mm:ss".to_owned(),
            datetime_joiner: " ".to_owned(),
            am: "AM".to_owned(),
            pm: "PM".to_owned(),
        }
    }
}

/// Read-only lookup from culture code to descriptor. Populated up front,
/// never mutated during lookups (initialize-once, read-many).
#[derive(Debug, Clone, Default)]
pub struct LocaleTable {
    entries: HashMap<String, Arc<LocaleDescriptor>>,
}

impl LocaleTable {
    /// An empty table, for callers assembling synthetic cultures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a descriptor under a culture code. Descriptors are
    /// immutable after registration; re-registering a code replaces it.
    pub fn register(&mut self, code: CultureCode, descriptor: LocaleDescriptor) {
        self.entries
            .insert(code.as_str().to_owned(), Arc::new(descriptor));
    }

    // Builtin codes are lowercase literals, no normalization needed.
    fn register_static(&mut self, code: &str, descriptor: LocaleDescriptor) {
        self.entries.insert(code.to_owned(), Arc::new(descriptor));
    }

    /// Resolves a culture code to its descriptor, walking the subtag
    /// fallback chain (`"sr-latn"` → `"sr-latn"` → `"sr"`).
    ///
    /// # Errors
    /// Returns `UnknownCulture` when the code is malformed or no prefix of
    /// it is registered.
    pub fn resolve(&self, code: &str) -> Result<Arc<LocaleDescriptor>, CultureError> {
        let code = CultureCode::new(code)?;
        for candidate in code.fallback_chain() {
            if let Some(descriptor) = self.entries.get(candidate) {
                return Ok(Arc::clone(descriptor));
            }
        }
        Err(CultureError::UnknownCulture(code.to_string()))
    }

    /// The shared table of built-in cultures (en, de, fr, sr).
    pub fn builtin() -> &'static Self {
        static BUILTIN: OnceLock<LocaleTable> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let mut table = Self::new();
            table.register_static("en", LocaleDescriptor::en());
            table.register_static("de", LocaleDescriptor::de());
            table.register_static("fr", LocaleDescriptor::fr());
            table.register_static("sr", LocaleDescriptor::sr());
            table
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_culture_code_normalizes_case() {
        let code = CultureCode::new("  Sr-Latn ").unwrap();
        assert_eq!(code.as_str(), "sr-latn");
        assert_eq!(code.to_string(), "sr-latn");
    }

    #[test]
    fn test_culture_code_rejects_malformed() {
        assert!(CultureCode::new("").is_err());
        assert!(CultureCode::new("  ").is_err());
        assert!(CultureCode::new("de_DE").is_err());
        assert!(CultureCode::new("-de").is_err());
        assert!(CultureCode::new("de-").is_err());
    }

    #[test]
    fn test_fallback_chain() {
        let code = CultureCode::new("sr-latn-rs").unwrap();
        assert_eq!(code.fallback_chain(), vec!["sr-latn-rs", "sr-latn", "sr"]);

        let bare = CultureCode::new("en").unwrap();
        assert_eq!(bare.fallback_chain(), vec!["en"]);
    }

    #[test]
    fn test_resolve_exact_and_case_insensitive() {
        let table = LocaleTable::builtin();
        assert!(table.resolve("de").is_ok());
        assert!(table.resolve("DE").is_ok());
    }

    #[test]
    fn test_resolve_walks_fallback_chain() {
        let table = LocaleTable::builtin();
        let via_script = table.resolve("sr-latn").unwrap();
        let direct = table.resolve("sr").unwrap();
        assert_eq!(via_script, direct);
    }

    #[test]
    fn test_resolve_unknown_culture() {
        let table = LocaleTable::builtin();
        assert!(matches!(
            table.resolve("xx-yy"),
            Err(CultureError::UnknownCulture(_))
        ));
    }

    #[test]
    fn test_name_list_lengths() {
        for code in ["en", "de", "fr", "sr"] {
            let descriptor = LocaleTable::builtin().resolve(code).unwrap();
            assert_eq!(descriptor.short_months.len(), 12);
            assert_eq!(descriptor.long_months.len(), 12);
            assert_eq!(descriptor.day_names.len(), 7);
        }
    }

    #[test]
    fn test_synthetic_table_registration() {
        let mut table = LocaleTable::new();
        let mut descriptor = LocaleDescriptor::en();
        descriptor.decimal_separator = '!';
        table.register(CultureCode::new("zz").unwrap(), descriptor);

        let resolved = table.resolve("zz").unwrap();
        assert_eq!(resolved.decimal_separator, '!');
        assert!(table.resolve("en").is_err());
    }
}
