use std::fmt;

use crate::format::TokenizedFormat;
use crate::parse::{ParseError, parse};
use crate::prelude::*;
use crate::types::CalendarDate;
use crate::validate::{Rule, validate};

/// Which boundary of a range an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Bound {
    #[display(fmt = "start")]
    Start,
    #[display(fmt = "end")]
    End,
}

/// A two-boundary date range.
///
/// Either boundary may be absent while the user is still typing the other;
/// the chronological ordering invariant `start <= end` is enforced only once
/// both are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateRange {
    start: Option<CalendarDate>,
    end: Option<CalendarDate>,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Whole-range ordering failure, reported distinctly from either
    /// boundary's own errors.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    OutOfOrder {
        start: CalendarDate,
        end: CalendarDate,
    },

    /// One boundary failed to parse.
    #[error("{bound} date: {source}")]
    Boundary { bound: Bound, source: ParseError },

    /// One boundary parsed but failed validation.
    #[error("{bound} date invalid: {}", .messages.join("; "))]
    Rejected { bound: Bound, messages: Vec<String> },
}

impl DateRange {
    /// Creates a range, enforcing ordering when both boundaries are present.
    ///
    /// # Errors
    /// Returns `RangeError::OutOfOrder` if start > end.
    pub fn new(
        start: Option<CalendarDate>,
        end: Option<CalendarDate>,
    ) -> Result<Self, RangeError> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(RangeError::OutOfOrder { start: s, end: e });
            }
        }
        Ok(Self { start, end })
    }

    /// Returns the start boundary, if typed
    pub const fn start(&self) -> Option<CalendarDate> {
        self.start
    }

    /// Returns the end boundary, if typed
    pub const fn end(&self) -> Option<CalendarDate> {
        self.end
    }

    /// True when both boundaries are present
    pub const fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// True when a complete range contains `date` (inclusive on both ends).
    /// A partial range contains nothing.
    pub fn contains(&self, date: CalendarDate) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= date && date <= end,
            _ => false,
        }
    }

    /// Serializes both boundaries independently through `format`; an absent
    /// boundary renders as the empty string.
    pub fn render(&self, format: &TokenizedFormat) -> [String; 2] {
        let side = |boundary: Option<CalendarDate>| {
            boundary.map_or_else(String::new, |date| format.render(date))
        };
        [side(self.start), side(self.end)]
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |boundary: Option<CalendarDate>| {
            boundary.map_or_else(String::new, |date| date.to_string())
        };
        write!(f, "{}/{}", side(self.start), side(self.end))
    }
}

/// Parses and validates a `[start, end]` input pair against one format.
///
/// Each half runs through parse + validate independently; an empty half is a
/// legal absent boundary (the user may still be typing it) and triggers no
/// rule evaluation. Only when both halves individually pass is the
/// chronological ordering invariant checked.
///
/// # Errors
/// Returns a per-boundary `Boundary`/`Rejected` error, or `OutOfOrder` when
/// both boundaries are valid but reversed.
pub fn parse_range(
    inputs: [&str; 2],
    format: &TokenizedFormat,
    rules: &[Rule],
) -> Result<DateRange, RangeError> {
    let start = parse_boundary(Bound::Start, inputs[0], format, rules)?;
    let end = parse_boundary(Bound::End, inputs[1], format, rules)?;
    DateRange::new(start, end)
}

fn parse_boundary(
    bound: Bound,
    input: &str,
    format: &TokenizedFormat,
    rules: &[Rule],
) -> Result<Option<CalendarDate>, RangeError> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    let date = parse(input, format).map_err(|source| RangeError::Boundary { bound, source })?;
    let report = validate(date, rules);
    if !report.is_ok() {
        return Err(RangeError::Rejected {
            bound,
            messages: report.errors,
        });
    }
    Ok(Some(date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::tokenize;

    fn fmt(format: &str) -> TokenizedFormat {
        tokenize(format).unwrap()
    }

    fn date(year: u16, month: u8, day: u8) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    #[test]
    fn test_new_enforces_ordering() {
        let early = date(2023, 3, 10);
        let late = date(2023, 3, 15);

        assert!(DateRange::new(Some(early), Some(late)).is_ok());
        assert!(DateRange::new(Some(early), Some(early)).is_ok());
        assert!(matches!(
            DateRange::new(Some(late), Some(early)),
            Err(RangeError::OutOfOrder { .. })
        ));
    }

    #[test]
    fn test_partial_ranges_skip_ordering() {
        let late = date(2023, 3, 15);
        assert!(DateRange::new(Some(late), None).is_ok());
        assert!(DateRange::new(None, Some(late)).is_ok());
        assert!(DateRange::new(None, None).is_ok());
    }

    #[test]
    fn test_parse_range_ok() {
        let range = parse_range(["10/03/2023", "15/03/2023"], &fmt("DD/MM/YYYY"), &[]).unwrap();
        assert_eq!(range.start(), Some(date(2023, 3, 10)));
        assert_eq!(range.end(), Some(date(2023, 3, 15)));
        assert!(range.is_complete());
    }

    #[test]
    fn test_parse_range_out_of_order() {
        let result = parse_range(["15/03/2023", "10/03/2023"], &fmt("DD/MM/YYYY"), &[]);
        assert!(matches!(result, Err(RangeError::OutOfOrder { .. })));

        // Swapping the inputs succeeds.
        let swapped = parse_range(["10/03/2023", "15/03/2023"], &fmt("DD/MM/YYYY"), &[]);
        assert!(swapped.is_ok());
    }

    #[test]
    fn test_equal_boundaries_are_ordered() {
        let range = parse_range(["15/03/2023", "15/03/2023"], &fmt("DD/MM/YYYY"), &[]).unwrap();
        assert_eq!(range.start(), range.end());
    }

    #[test]
    fn test_partial_inputs_are_intermediate_states() {
        let format = fmt("DD/MM/YYYY");

        let range = parse_range(["15/03/2023", ""], &format, &[]).unwrap();
        assert_eq!(range.start(), Some(date(2023, 3, 15)));
        assert_eq!(range.end(), None);
        assert!(!range.is_complete());

        let range = parse_range(["", "10/03/2023"], &format, &[]).unwrap();
        assert_eq!(range.start(), None);
        assert_eq!(range.end(), Some(date(2023, 3, 10)));
    }

    #[test]
    fn test_empty_boundary_skips_rules() {
        // Rules never run against an absent boundary; required-ness for a
        // submitted empty field is the host's call via validate_missing.
        let rules = [Rule::custom(|_| false, "always fails")];
        let range = parse_range(["", ""], &fmt("DD/MM/YYYY"), &rules).unwrap();
        assert!(!range.is_complete());
    }

    #[test]
    fn test_boundary_parse_error_names_the_side() {
        let format = fmt("DD/MM/YYYY");

        let err = parse_range(["99/99/xxxx", "15/03/2023"], &format, &[]).unwrap_err();
        assert!(matches!(
            err,
            RangeError::Boundary {
                bound: Bound::Start,
                ..
            }
        ));

        let err = parse_range(["15/03/2023", "99/99/xxxx"], &format, &[]).unwrap_err();
        assert!(matches!(
            err,
            RangeError::Boundary {
                bound: Bound::End,
                ..
            }
        ));
    }

    #[test]
    fn test_boundary_validation_failure() {
        // 31 February parses structurally but fails calendar validation.
        let err = parse_range(["31/02/2023", "15/03/2023"], &fmt("DD/MM/YYYY"), &[]).unwrap_err();
        match err {
            RangeError::Rejected { bound, messages } => {
                assert_eq!(bound, Bound::Start);
                assert_eq!(messages, vec!["Invalid day 31 for month 2023-02"]);
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_boundary_rule_failure() {
        let rules = [Rule::min_date(date(2023, 3, 12), "too early")];
        let err =
            parse_range(["10/03/2023", "15/03/2023"], &fmt("DD/MM/YYYY"), &rules).unwrap_err();
        assert!(matches!(
            err,
            RangeError::Rejected {
                bound: Bound::Start,
                ..
            }
        ));
    }

    #[test]
    fn test_ordering_not_checked_until_both_present() {
        // A lone start later than a hypothetical end is fine while the end is
        // still empty.
        let range = parse_range(["15/03/2023", ""], &fmt("DD/MM/YYYY"), &[]).unwrap();
        assert_eq!(range.start(), Some(date(2023, 3, 15)));
    }

    #[test]
    fn test_contains() {
        let range = DateRange::new(Some(date(2023, 3, 10)), Some(date(2023, 3, 15))).unwrap();
        assert!(range.contains(date(2023, 3, 10)));
        assert!(range.contains(date(2023, 3, 12)));
        assert!(range.contains(date(2023, 3, 15)));
        assert!(!range.contains(date(2023, 3, 16)));

        let partial = DateRange::new(Some(date(2023, 3, 10)), None).unwrap();
        assert!(!partial.contains(date(2023, 3, 12)));
    }

    #[test]
    fn test_render_each_boundary_independently() {
        let format = fmt("DD/MM/YYYY");
        let range = DateRange::new(Some(date(2023, 3, 10)), Some(date(2023, 3, 15))).unwrap();
        assert_eq!(range.render(&format), ["10/03/2023", "15/03/2023"]);

        let partial = DateRange::new(Some(date(2023, 3, 10)), None).unwrap();
        assert_eq!(partial.render(&format), ["10/03/2023", ""]);
    }

    #[test]
    fn test_display() {
        let range = DateRange::new(Some(date(2023, 3, 10)), Some(date(2023, 3, 15))).unwrap();
        assert_eq!(range.to_string(), "2023-03-10/2023-03-15");

        let partial = DateRange::new(None, Some(date(2023, 3, 15))).unwrap();
        assert_eq!(partial.to_string(), "/2023-03-15");
    }
}
