use crate::consts::{FULL_YEAR_WIDTH, SHORT_WIDTH, SHORT_YEAR_MAX, SHORT_YEAR_MIN};
use crate::prelude::*;
use crate::types::CalendarDate;
use std::collections::HashMap;
use std::sync::Arc;

/// A date component placeholder within a format string.
///
/// `D`/`DD` and `M`/`MM` both denote a zero-padded two-digit field; years are
/// either two digits (pivot-resolved) or four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Token {
    #[display(fmt = "DD")]
    Day,
    #[display(fmt = "MM")]
    Month,
    #[display(fmt = "YY")]
    Year2,
    #[display(fmt = "YYYY")]
    Year4,
}

impl Token {
    /// Number of digits this token occupies
    pub const fn width(self) -> usize {
        match self {
            Self::Day | Self::Month | Self::Year2 => SHORT_WIDTH,
            Self::Year4 => FULL_YEAR_WIDTH,
        }
    }

    fn from_run(letter: char, len: usize) -> Result<Self, FormatError> {
        match (letter, len) {
            ('D', 1 | 2) => Ok(Self::Day),
            ('M', 1 | 2) => Ok(Self::Month),
            ('Y', 2) => Ok(Self::Year2),
            ('Y', 4) => Ok(Self::Year4),
            _ => Err(FormatError::BadTokenRun { letter, len }),
        }
    }
}

/// One token plus the literal separator that must follow its digits.
/// The last field of a format carries no separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub token: Token,
    pub separator: Option<char>,
}

/// A format string broken into an ordered field list.
///
/// Immutable after construction; safe to share between any number of
/// concurrent consumers (two pickers on one page reading the same format).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedFormat {
    fields: Vec<Field>,
    source: String,
}

impl TokenizedFormat {
    /// The ordered fields of this format
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// The format string this was derived from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Total number of digits a fully typed value contains
    pub fn capacity(&self) -> usize {
        self.fields.iter().map(|f| f.token.width()).sum()
    }

    /// True when the year field is the two-digit, pivot-resolved kind
    pub fn has_short_year(&self) -> bool {
        self.fields.iter().any(|f| f.token == Token::Year2)
    }

    /// Serializes a date into this format's token order, widths, and
    /// separators. Two-digit year fields emit `year % 100`.
    pub fn render(&self, date: CalendarDate) -> String {
        let mut out = String::with_capacity(self.source.len());
        for field in &self.fields {
            match field.token {
                Token::Day => out.push_str(&format!("{:02}", date.day())),
                Token::Month => out.push_str(&format!("{:02}", date.month())),
                Token::Year2 => out.push_str(&format!("{:02}", date.year() % 100)),
                Token::Year4 => out.push_str(&format!("{:04}", date.year())),
            }
            if let Some(sep) = field.separator {
                out.push(sep);
            }
        }
        out
    }
}

/// Error type for malformed format strings.
///
/// These indicate a host configuration mistake rather than end-user input, so
/// unlike parse failures they are reasonable to treat as fatal at setup time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The format string is empty or whitespace.
    #[error("Empty format string")]
    Empty,

    /// A character that is neither a token letter nor a separator.
    #[error("Unexpected character {0:?} in format string")]
    UnexpectedCharacter(char),

    /// A token run of unsupported length, e.g. `DDD` or `YYY`.
    #[error("Unsupported token run: {len} repetitions of {letter:?}")]
    BadTokenRun { letter: char, len: usize },

    /// Two distinct separator characters within a single gap, e.g. `DD/-MM`.
    #[error("Ambiguous separator: {first:?} followed by {second:?} in one gap")]
    MixedSeparators { first: char, second: char },

    /// Two token runs with no separator between them, e.g. `DDMM/YYYY`.
    #[error("Missing separator between {left} and {right} tokens")]
    MissingSeparator { left: Token, right: Token },

    /// A separator with no token on one side of it.
    #[error("Dangling separator {0:?}")]
    DanglingSeparator(char),

    /// The same date component appears twice.
    #[error("Duplicate {0} token")]
    DuplicateToken(&'static str),

    /// A required date component never appears.
    #[error("Missing {0} token")]
    MissingToken(&'static str),
}

const fn component_name(token: Token) -> &'static str {
    match token {
        Token::Day => "day",
        Token::Month => "month",
        Token::Year2 | Token::Year4 => "year",
    }
}

/// Parses a format string such as `DD/MM/YYYY` into an ordered field list.
///
/// Maximal runs of `Y`, `M`, `D` become tokens; any single non-alphanumeric
/// character between two tokens is that gap's separator. A repeated identical
/// separator (`DD--MM`) collapses to one occurrence; each gap is tracked
/// independently, so `DD-MM/YYYY` is legal.
///
/// # Errors
/// Returns a [`FormatError`] for an empty format, unknown characters,
/// unsupported run lengths, mixed separators within one gap, missing or
/// duplicate components, or dangling separators.
pub fn tokenize(format: &str) -> Result<TokenizedFormat, FormatError> {
    let trimmed = format.trim();
    if trimmed.is_empty() {
        return Err(FormatError::Empty);
    }

    let chars: Vec<char> = trimmed.chars().collect();
    let mut tokens: Vec<Token> = Vec::new();
    let mut separators: Vec<Option<char>> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if matches!(c, 'Y' | 'M' | 'D') {
            let start = i;
            while i < chars.len() && chars[i] == c {
                i += 1;
            }
            let token = Token::from_run(c, i - start)?;
            if let Some(&previous) = tokens.last() {
                // A separator slot must exist between two tokens.
                if separators.len() < tokens.len() {
                    return Err(FormatError::MissingSeparator {
                        left: previous,
                        right: token,
                    });
                }
            }
            tokens.push(token);
        } else if c.is_alphanumeric() {
            return Err(FormatError::UnexpectedCharacter(c));
        } else {
            if tokens.is_empty() {
                return Err(FormatError::DanglingSeparator(c));
            }
            // Collapse a repeated identical separator; distinct characters in
            // one gap are ambiguous.
            while i < chars.len() && !chars[i].is_alphanumeric() {
                if chars[i] != c {
                    return Err(FormatError::MixedSeparators {
                        first: c,
                        second: chars[i],
                    });
                }
                i += 1;
            }
            if i == chars.len() {
                return Err(FormatError::DanglingSeparator(c));
            }
            if separators.len() == tokens.len() {
                // Second separator run after the same token, unreachable via
                // the collapse loop but kept as a structural guard.
                return Err(FormatError::DanglingSeparator(c));
            }
            separators.push(Some(c));
        }
    }

    check_components(&tokens)?;

    let mut fields = Vec::with_capacity(tokens.len());
    for (index, token) in tokens.iter().enumerate() {
        let separator = separators.get(index).copied().flatten();
        fields.push(Field {
            token: *token,
            separator,
        });
    }

    Ok(TokenizedFormat {
        fields,
        source: trimmed.to_owned(),
    })
}

fn check_components(tokens: &[Token]) -> Result<(), FormatError> {
    let mut seen_day = false;
    let mut seen_month = false;
    let mut seen_year = false;
    for token in tokens {
        let seen = match token {
            Token::Day => &mut seen_day,
            Token::Month => &mut seen_month,
            Token::Year2 | Token::Year4 => &mut seen_year,
        };
        if *seen {
            return Err(FormatError::DuplicateToken(component_name(*token)));
        }
        *seen = true;
    }
    if !seen_day {
        return Err(FormatError::MissingToken("day"));
    }
    if !seen_month {
        return Err(FormatError::MissingToken("month"));
    }
    if !seen_year {
        return Err(FormatError::MissingToken("year"));
    }
    Ok(())
}

/// Re-serializes a validated date from one format into another.
///
/// `from` is consulted only for two-digit-year pivot fidelity: a date that
/// arrived through a `YY` format always lies inside the pivot window, so
/// rendering it back through `YY` is lossless.
pub fn convert(date: CalendarDate, from: &TokenizedFormat, to: &TokenizedFormat) -> String {
    debug_assert!(
        !from.has_short_year()
            || (SHORT_YEAR_MIN..=SHORT_YEAR_MAX).contains(&date.year()),
        "a short-year source format cannot have produced a year outside the pivot window"
    );
    to.render(date)
}

/// Cache of tokenized formats keyed by format string.
///
/// Consumers call in on every keystroke; tokenizing once per distinct format
/// string keeps that path allocation-light. Entries are shared via `Arc`, so
/// several live pickers using the same format read one tokenization.
#[derive(Debug, Default)]
pub struct FormatCache {
    entries: HashMap<String, Arc<TokenizedFormat>>,
}

impl FormatCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached tokenization for `format`, tokenizing on first use.
    ///
    /// # Errors
    /// Returns `FormatError` for a malformed format string; failures are not
    /// cached, so a corrected string re-tokenizes normally.
    pub fn resolve(&mut self, format: &str) -> Result<Arc<TokenizedFormat>, FormatError> {
        if let Some(cached) = self.entries.get(format) {
            return Ok(Arc::clone(cached));
        }
        let tokenized = Arc::new(tokenize(format)?);
        self.entries
            .insert(format.to_owned(), Arc::clone(&tokenized));
        Ok(tokenized)
    }

    /// Number of distinct formats tokenized so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
