/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Maximum structurally valid day; calendar validation narrows this per month
pub const MAX_DAY: u8 = 31;

/// Month number for February
pub const FEBRUARY: u8 = 2;

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

/// Two-digit years below this value resolve to the 2000s, the rest to the 1900s
pub const SHORT_YEAR_PIVOT: u8 = 50;
/// Earliest year representable by a two-digit year token
pub const SHORT_YEAR_MIN: u16 = 1950;
/// Latest year representable by a two-digit year token
pub const SHORT_YEAR_MAX: u16 = 2049;

/// Digit width of `DD`, `MM`, and `YY` tokens
pub const SHORT_WIDTH: usize = 2;
/// Digit width of the `YYYY` token
pub const FULL_YEAR_WIDTH: usize = 4;
