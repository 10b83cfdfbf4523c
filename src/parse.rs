use crate::consts::{MAX_DAY, MAX_MONTH, MAX_YEAR};
use crate::format::{Token, TokenizedFormat};
use crate::prelude::*;
use crate::types::{CalendarDate, Day, Month, Year};

/// Error type for parse failures on user input.
///
/// Structural variants report a string that does not match the format's
/// shape; range variants report a numeric component outside its field range.
/// Neither panics: every parse failure is a returned value the host renders
/// as an inline field message.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Empty date string")]
    EmptyInput,
    #[display(fmt = "Expected {expected} date segments, found {found}")]
    SegmentCount { expected: usize, found: usize },
    #[display(fmt = "Non-numeric date segment: {_0}")]
    NonNumericSegment(String),
    #[display(fmt = "Segment {value} does not fill the {token} token ({expected} digits)")]
    SegmentWidth {
        token: Token,
        value: String,
        expected: usize,
    },
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    YearOutOfRange(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    MonthOutOfRange(u8),
    #[display(fmt = "Invalid day: {} (must be 1-{})", "_0", MAX_DAY)]
    DayOutOfRange(u8),
}

impl std::error::Error for ParseError {}

impl ParseError {
    /// True for failures of the string's shape rather than a numeric range
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput
                | Self::SegmentCount { .. }
                | Self::NonNumericSegment(_)
                | Self::SegmentWidth { .. }
        )
    }
}

/// Parses a fully typed string against a tokenized format.
///
/// Segments are matched strictly: each must be all digits at exactly its
/// token's width (single-digit values must be zero-padded by the caller; the
/// parser does not guess), separated by the format's recorded separators.
/// Component values are range-checked per field (month `01-12`, day `01-31`),
/// and a two-digit year resolves through the fixed pivot. Whether the day
/// exists in the month is deliberately left to [`crate::validate`].
///
/// Token order in the format decides which segment feeds which component, so
/// `"31/12/2023"` under `DD/MM/YYYY` and `"12/31/2023"` under `MM/DD/YYYY`
/// produce the same date.
///
/// # Errors
/// Returns a [`ParseError`] describing the first structural or range failure.
pub fn parse(input: &str, format: &TokenizedFormat) -> Result<CalendarDate, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let fields = format.fields();
    let mut segments = Vec::with_capacity(fields.len());
    let mut rest = trimmed;
    for field in fields {
        match field.separator {
            Some(sep) => {
                let (segment, tail) = rest.split_once(sep).ok_or(ParseError::SegmentCount {
                    expected: fields.len(),
                    found: segments.len() + 1,
                })?;
                segments.push(segment);
                rest = tail;
            }
            None => {
                segments.push(rest);
                rest = "";
            }
        }
    }

    let mut year: Option<Year> = None;
    let mut month: Option<Month> = None;
    let mut day: Option<Day> = None;

    for (field, segment) in fields.iter().zip(&segments) {
        let value = read_segment(segment, field.token)?;
        match field.token {
            Token::Day => day = Some(Day::new(clamp_u8(value))?),
            Token::Month => month = Some(Month::new(clamp_u8(value))?),
            Token::Year2 => year = Some(Year::from_two_digit(clamp_u8(value))?),
            Token::Year4 => year = Some(Year::new(value)?),
        }
    }

    match (year, month, day) {
        (Some(year), Some(month), Some(day)) => Ok(CalendarDate::from_parts(year, month, day)),
        // Tokenization guarantees one of each component.
        _ => Err(ParseError::SegmentCount {
            expected: fields.len(),
            found: segments.len(),
        }),
    }
}

fn read_segment(segment: &str, token: Token) -> Result<u16, ParseError> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::NonNumericSegment(segment.to_owned()));
    }
    if segment.len() != token.width() {
        return Err(ParseError::SegmentWidth {
            token,
            value: segment.to_owned(),
            expected: token.width(),
        });
    }
    segment
        .parse::<u16>()
        .map_err(|_| ParseError::NonNumericSegment(segment.to_owned()))
}

/// Two-digit segments always fit in u8; the width check above guarantees it.
const fn clamp_u8(value: u16) -> u8 {
    debug_assert!(value <= u8::MAX as u16);
    value as u8
}
