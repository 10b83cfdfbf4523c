//! Format-driven date input engine: masking, parsing, validation, and
//! conversion for form components that accept a configurable date format.
//!
//! Given a format string such as `DD/MM/YYYY`, `YY.MM.DD`, or `MM-YYYY-DD`,
//! the crate tokenizes it once ([`tokenize`], cacheable via [`FormatCache`]),
//! then offers pure transforms over it:
//!
//! - [`auto_format`] inserts separators live as raw digits are typed
//! - [`parse`] turns a completed string into a [`CalendarDate`], honoring the
//!   format's token order
//! - [`validate`] checks calendar correctness (leap-year aware) plus any
//!   supplied [`Rule`]s, accumulating messages instead of failing fast
//! - [`convert`] re-serializes a validated date into an independent return
//!   format
//! - [`parse_range`] applies the pipeline to a `[start, end]` pair and
//!   enforces chronological ordering
//!
//! Every function is a synchronous, re-entrant transform over small values;
//! user-input problems come back as structured results, never panics. Only a
//! malformed format string, a host configuration mistake, is worth treating
//! as fatal.

mod consts;
mod format;
mod mask;
mod parse;
mod prelude;
mod range;
mod types;
mod validate;

pub use consts::*;
pub use format::{Field, FormatCache, FormatError, Token, TokenizedFormat, convert, tokenize};
pub use mask::{Masked, auto_format};
pub use parse::{ParseError, parse};
pub use range::{Bound, DateRange, RangeError, parse_range};
pub use types::{CalendarDate, Day, Month, Weekday, Year, days_in_month, is_leap_year};
pub use validate::{Rule, RuleKind, Severity, ValidationReport, validate, validate_missing};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_single_date() {
        // Raw keystrokes through the whole pipeline: display format
        // DD/MM/YYYY, return format YYYY-MM-DD.
        let display = tokenize("DD/MM/YYYY").unwrap();
        let returned = tokenize("YYYY-MM-DD").unwrap();

        let masked = auto_format("15032023", &display);
        assert_eq!(masked.text, "15/03/2023");
        assert!(masked.complete);

        let date = parse(&masked.text, &display).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2023, 3, 15));

        let report = validate(date, &[]);
        assert!(report.is_ok());

        assert_eq!(convert(date, &display, &returned), "2023-03-15");
    }

    #[test]
    fn test_end_to_end_invalid_day() {
        // Structurally fine, calendar-invalid: parsing succeeds, validation
        // carries the message.
        let display = tokenize("DD/MM/YYYY").unwrap();
        let date = parse("31/02/2023", &display).unwrap();
        let report = validate(date, &[]);
        assert!(!report.is_ok());
    }

    #[test]
    fn test_end_to_end_with_rules() {
        let display = tokenize("DD/MM/YYYY").unwrap();
        let today = CalendarDate::new(2023, 3, 20).unwrap();
        let rules = [
            Rule::required("date is required"),
            Rule::not_after(today, "date cannot be in the future"),
            Rule::not_weekend("falls on a weekend").as_warning(),
        ];

        // 18/03/2023 was a Saturday before "today": passes, with a warning.
        let date = parse("18/03/2023", &display).unwrap();
        let report = validate(date, &rules);
        assert!(report.is_ok());
        assert_eq!(report.warnings, vec!["falls on a weekend"]);

        // Empty submitted value trips only the required rule.
        let report = validate_missing(&rules);
        assert_eq!(report.errors, vec!["date is required"]);
    }

    #[test]
    fn test_end_to_end_range() {
        let display = tokenize("DD/MM/YYYY").unwrap();
        let result = parse_range(["15/03/2023", "10/03/2023"], &display, &[]);
        assert!(matches!(result, Err(RangeError::OutOfOrder { .. })));

        let range = parse_range(["10/03/2023", "15/03/2023"], &display, &[]).unwrap();
        assert_eq!(range.render(&display), ["10/03/2023", "15/03/2023"]);
    }

    #[test]
    fn test_round_trip_law() {
        // parse then convert through the same format reproduces the
        // normalized input, including the short-year pivot window.
        for (format_str, input) in [
            ("DD/MM/YYYY", "15/03/2023"),
            ("MM-YYYY-DD", "03-2023-15"),
            ("YY.MM.DD", "99.12.31"),
            ("YY.MM.DD", "49.01.01"),
        ] {
            let format = tokenize(format_str).unwrap();
            let date = parse(input, &format).unwrap();
            assert_eq!(convert(date, &format, &format), input);
        }
    }

    #[test]
    fn test_cached_format_feeds_pipeline() {
        let mut cache = FormatCache::new();
        let format = cache.resolve("DD/MM/YYYY").unwrap();
        let date = parse(&auto_format("01012024", &format).text, &format).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 1, 1));
    }
}
