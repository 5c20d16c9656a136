/// Number of months in a Gregorian (and Jalali) year
pub const MONTHS_IN_YEAR: u8 = 12;

/// Number of months in a Coptic or Ethiopian year, counting the epagomenal month
pub const MONTHS_IN_EPAGOMENAL_YEAR: u8 = 13;

/// Upper bound for a month number in any supported calendar
pub const MAX_MONTH: u8 = 13;

/// Upper bound for a day-of-month in any supported calendar
pub const MAX_DAY: u8 = 31;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each Gregorian month (index 0 is unused, months are 1-indexed)
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

/// Days elapsed in a common Gregorian year before the first of each month
pub(crate) const DAYS_BEFORE_MONTH: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

// Closed-form Jalali arithmetic. Day counts are anchored so that both directions
// share the same origin; the two anchors differ by the Gregorian/Jalali offset.

/// Day-count anchor applied to a Gregorian date
pub(crate) const GREGORIAN_DAY_ANCHOR: i64 = 355_666;
/// Day-count anchor applied to a Jalali date
pub(crate) const JALALI_DAY_ANCHOR: i64 = -355_668;
/// Jalali year corresponding to day zero of the anchored count
pub(crate) const JALALI_YEAR_ORIGIN: i64 = -1595;
/// Days in one 33-year Jalali leap cycle
pub(crate) const JALALI_CYCLE_DAYS: i64 = 12_053;
/// Years in one Jalali leap cycle
pub(crate) const JALALI_CYCLE_YEARS: i64 = 33;
/// Leap years in one Jalali leap cycle
pub(crate) const JALALI_CYCLE_LEAPS: i64 = 8;
/// Days in a 4-year sub-cycle (shared by both calendars)
pub(crate) const QUADRENNIUM_DAYS: i64 = 1461;
/// Days in a common year
pub(crate) const COMMON_YEAR_DAYS: i64 = 365;
/// Day-of-year where the 31-day Jalali months end
pub(crate) const JALALI_LONG_MONTHS_DAYS: i64 = 186;
/// Days in each of the first six Jalali months
pub(crate) const JALALI_LONG_MONTH: i64 = 31;
/// Days in each of the months seven through eleven
pub(crate) const JALALI_SHORT_MONTH: i64 = 30;
/// Days in a 400-year Gregorian cycle
pub(crate) const GREGORIAN_CYCLE_DAYS: i64 = 146_097;
/// Days in a 100-year Gregorian cycle whose century year is not leap
pub(crate) const CENTURY_DAYS: i64 = 36_524;

/// Milliseconds in one civil day
pub const MS_PER_DAY: i64 = 86_400_000;

/// Days from 0000-03-01 (proleptic Gregorian) to 1970-01-01
pub(crate) const UNIX_EPOCH_SHIFT: i64 = 719_468;

/// Rata Die of 1970-01-01
pub(crate) const UNIX_EPOCH_RATA_DIE: i64 = 719_163;

/// Years between the Buddhist Era and the Common Era
pub(crate) const BUDDHIST_ERA_OFFSET: i32 = 543;

/// Offset between the Chinese extended year and the related ISO year
pub(crate) const CHINESE_EXTENDED_YEAR_OFFSET: i32 = 2637;

/// Related ISO years the astronomical Chinese calendar is computed for
pub(crate) const CHINESE_RELATED_YEAR_RANGE: core::ops::RangeInclusive<i32> = -9999..=9999;

/// Default Persian decimal mark (U+066B ARABIC DECIMAL SEPARATOR)
pub const PERSIAN_DECIMAL_MARK: &str = "\u{066B}";

/// Persian thousands separator (U+066C ARABIC THOUSANDS SEPARATOR)
pub const PERSIAN_THOUSANDS_MARK: char = '\u{066C}';

/// Arabic comma, accepted as a thousands separator on input
pub const ARABIC_COMMA: char = '\u{060C}';

/// Extended Arabic-Indic (Persian) digits, zero through nine
pub const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

/// Arabic-Indic digits, zero through nine
pub const ARABIC_INDIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// Separators accepted when parsing or rendering calendar dates as text
pub const DATE_SEPARATORS: [char; 3] = ['-', '/', '.'];

/// Separator used when a requested one is not accepted
pub const DEFAULT_DATE_SEPARATOR: &str = "-";

/// Placeholder value that stands for "no date"
pub const ZERO_DATE: &str = "0000-00-00";

/// Default bound on memoized Chinese leap-month flags
pub const DEFAULT_LEAP_CACHE_CAPACITY: usize = 4096;
