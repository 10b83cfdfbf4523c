use crate::format::TokenizedFormat;

/// Result of masking raw keystrokes against a format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Masked {
    /// The separator-delimited text to show in the input
    pub text: String,
    /// True when every field of the format is fully typed. A range-mode
    /// caller uses this to advance focus to the second boundary input.
    pub complete: bool,
}

/// Reformats raw input live as the user types, inserting each gap's separator
/// once enough digits exist to cross it.
///
/// Masking is purely cosmetic and never rejects: non-digit characters are
/// stripped (which makes the function idempotent on already-masked text),
/// digits beyond the format's capacity are truncated, and out-of-range values
/// such as a day of `"40"` pass through uninterpreted for validation to
/// reject later. A separator is appended only when more digits follow, so
/// partial input never ends in a dangling separator.
pub fn auto_format(raw: &str, format: &TokenizedFormat) -> Masked {
    let mut digits = raw.chars().filter(char::is_ascii_digit).peekable();
    let mut text = String::with_capacity(format.source().len());
    let mut complete = true;

    for field in format.fields() {
        let mut taken = 0;
        while taken < field.token.width() {
            match digits.next() {
                Some(d) => {
                    text.push(d);
                    taken += 1;
                }
                None => break,
            }
        }
        if taken < field.token.width() || digits.peek().is_none() {
            // Field underfilled, or nothing left to place after it. Complete
            // only when this was the last field and it filled exactly.
            complete = taken == field.token.width() && field.separator.is_none();
            break;
        }
        if let Some(sep) = field.separator {
            text.push(sep);
        }
    }

    Masked { text, complete }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::tokenize;

    fn fmt(format: &str) -> TokenizedFormat {
        tokenize(format).unwrap()
    }

    #[test]
    fn test_masks_raw_digits() {
        let format = fmt("DD/MM/YYYY");
        let masked = auto_format("15032023", &format);
        assert_eq!(masked.text, "15/03/2023");
        assert!(masked.complete);
    }

    #[test]
    fn test_partial_input_has_no_trailing_separator() {
        let format = fmt("DD/MM/YYYY");
        assert_eq!(auto_format("1", &format).text, "1");
        assert_eq!(auto_format("15", &format).text, "15");
        assert_eq!(auto_format("150", &format).text, "15/0");
        assert_eq!(auto_format("1503", &format).text, "15/03");
        assert_eq!(auto_format("15032", &format).text, "15/03/2");
    }

    #[test]
    fn test_partial_input_is_incomplete() {
        let format = fmt("DD/MM/YYYY");
        assert!(!auto_format("15", &format).complete);
        assert!(!auto_format("15032", &format).complete);
        assert!(!auto_format("1503202", &format).complete);
        assert!(auto_format("15032023", &format).complete);
    }

    #[test]
    fn test_idempotent_on_masked_text() {
        let format = fmt("DD/MM/YYYY");
        for raw in ["1", "150", "1503", "150320", "15032023", "15/03/2023"] {
            let once = auto_format(raw, &format);
            let twice = auto_format(&once.text, &format);
            assert_eq!(once, twice, "auto_format not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_strips_foreign_characters() {
        let format = fmt("DD/MM/YYYY");
        assert_eq!(auto_format("15.03.2023", &format).text, "15/03/2023");
        assert_eq!(auto_format("a1b5c", &format).text, "15");
    }

    #[test]
    fn test_truncates_excess_digits() {
        // Documented clamp policy: digits beyond the format's capacity are
        // dropped, never rolled into a neighboring field.
        let format = fmt("DD/MM/YYYY");
        let masked = auto_format("150320231", &format);
        assert_eq!(masked.text, "15/03/2023");
        assert!(masked.complete);
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        // "99" is not a valid day, but masking is cosmetic; the validator owns
        // the rejection.
        let format = fmt("DD/MM/YYYY");
        assert_eq!(auto_format("99", &format).text, "99");
        assert_eq!(auto_format("4013", &format).text, "40/13");
    }

    #[test]
    fn test_respects_per_gap_separators() {
        let format = fmt("DD-MM/YYYY");
        assert_eq!(auto_format("15032023", &format).text, "15-03/2023");
    }

    #[test]
    fn test_short_year_format() {
        let format = fmt("YY.MM.DD");
        let masked = auto_format("230315", &format);
        assert_eq!(masked.text, "23.03.15");
        assert!(masked.complete);
        assert_eq!(auto_format("2303", &format).text, "23.03");
    }

    #[test]
    fn test_empty_input() {
        let format = fmt("DD/MM/YYYY");
        let masked = auto_format("", &format);
        assert_eq!(masked.text, "");
        assert!(!masked.complete);
    }
}
