/// Earliest year whose days are checked against the calendar (inclusive).
/// Years before this are assumed to exist.
pub const MIN_CHECKED_YEAR: i64 = -271_820;

/// Latest year whose days are checked against the calendar (inclusive).
/// Years after this are assumed to exist.
pub const MAX_CHECKED_YEAR: i64 = 275_759;

/// Maximum valid calendar month (December)
pub const MAX_MONTH: u8 = 12;

/// First season code (spring)
pub const FIRST_SEASON: u8 = 21;
/// Last season code (winter)
pub const LAST_SEASON: u8 = 24;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;
/// Largest day number any month can have
pub const MAX_DAY: u8 = 31;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Day of month used as the representative date of a season
pub const SEASON_DAY: u8 = 22;

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
pub(crate) const LEAP_YEAR_CYCLE: i64 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i64 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i64 = 400;

/// Date component separator
pub const DATE_SEPARATOR: char = '-';
/// Interval separator
pub const INTERVAL_SEPARATOR: char = '/';
/// Trailing marker for a doubtful date
pub const UNCERTAIN_MARKER: char = '?';
/// Trailing marker for an approximate date
pub const APPROXIMATE_MARKER: char = '~';
/// Unspecified digit placeholder
pub const UNSPECIFIED_DIGIT: char = 'u';
/// A fully unspecified month or day
pub const UNSPECIFIED_PART: &str = "uu";
/// Prefix for years needing more than four digits
pub const EXTENDED_YEAR_PREFIX: char = 'y';

/// Literal for an open-ended interval endpoint
pub const OPEN: &str = "open";
/// Literal for an interval endpoint whose value is not stated
pub const UNKNOWN: &str = "unknown";
