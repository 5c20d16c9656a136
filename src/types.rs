use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_DAY, MIN_DAY, MONTHS_IN_EPAGOMENAL_YEAR, MONTHS_IN_YEAR, MS_PER_DAY, UNIX_EPOCH_RATA_DIE,
    UNIX_EPOCH_SHIFT,
};
use crate::error::{ConversionError, ParseError};
use crate::jalali;
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A year/month/day triple in some calendar system.
///
/// The triple carries no calendar of its own and is not validated on
/// construction; see [`CalendarSystem::check_range`]. Ordering is
/// lexicographic, which is chronological within a single calendar.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{:04}-{:02}-{:02}", year, month, day)]
pub struct CalendarDate {
    pub year:  i32,
    pub month: u8,
    pub day:   u8,
}

impl CalendarDate {
    pub const fn new(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Formats as `YYYY{sep}MM{sep}DD`, zero padded.
    pub fn format_with(&self, sep: &str) -> String {
        format!("{:04}{sep}{:02}{sep}{:02}", self.year, self.month, self.day)
    }

    /// Returns the bare triple for an empty separator, the formatted string otherwise.
    pub fn with_separator(self, sep: &str) -> DateOutput {
        if sep.is_empty() {
            DateOutput::Parts(self)
        } else {
            DateOutput::Text(self.format_with(sep))
        }
    }

    pub const fn to_tuple(self) -> (i32, u8, u8) {
        (self.year, self.month, self.day)
    }
}

impl From<(i32, u8, u8)> for CalendarDate {
    fn from((year, month, day): (i32, u8, u8)) -> Self {
        Self::new(year, month, day)
    }
}

impl From<CalendarDate> for (i32, u8, u8) {
    fn from(date: CalendarDate) -> Self {
        date.to_tuple()
    }
}

/// Result of a conversion that may have been asked for a formatted string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub enum DateOutput {
    /// Bare triple, produced when no separator was supplied
    #[display(fmt = "{_0}")]
    Parts(CalendarDate),
    /// `YYYY{sep}MM{sep}DD`
    #[display(fmt = "{_0}")]
    Text(String),
}

impl DateOutput {
    pub const fn as_parts(&self) -> Option<CalendarDate> {
        match self {
            Self::Parts(date) => Some(*date),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Parts(_) => None,
            Self::Text(text) => Some(text),
        }
    }
}

/// A supported calendar system, identified by its canonical key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum CalendarSystem {
    #[display(fmt = "gregorian")]
    Gregorian,
    #[display(fmt = "jalali")]
    Jalali,
    #[display(fmt = "hijri")]
    Hijri,
    #[display(fmt = "hebrew")]
    Hebrew,
    #[display(fmt = "buddhist")]
    Buddhist,
    #[display(fmt = "coptic")]
    Coptic,
    #[display(fmt = "ethiopian")]
    Ethiopian,
    #[display(fmt = "chinese")]
    Chinese,
}

impl CalendarSystem {
    pub const ALL: [Self; 8] = [
        Self::Gregorian,
        Self::Jalali,
        Self::Hijri,
        Self::Hebrew,
        Self::Buddhist,
        Self::Coptic,
        Self::Ethiopian,
        Self::Chinese,
    ];

    /// Resolves a calendar key or alias, case-insensitively.
    ///
    /// # Errors
    /// Returns `ConversionError::UnsupportedCalendar` carrying the raw key when
    /// nothing matches.
    pub fn normalize(raw: &str) -> Result<Self, ConversionError> {
        let key = raw.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|system| system.aliases().contains(&key.as_str()))
            .ok_or_else(|| ConversionError::UnsupportedCalendar(raw.to_owned()))
    }

    pub const fn canonical_key(self) -> &'static str {
        match self {
            Self::Gregorian => "gregorian",
            Self::Jalali => "jalali",
            Self::Hijri => "hijri",
            Self::Hebrew => "hebrew",
            Self::Buddhist => "buddhist",
            Self::Coptic => "coptic",
            Self::Ethiopian => "ethiopian",
            Self::Chinese => "chinese",
        }
    }

    /// Every key that resolves to this calendar, canonical key first.
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Gregorian => &["gregorian"],
            Self::Jalali => &["jalali", "persian"],
            Self::Hijri => &["hijri", "islamic"],
            Self::Hebrew => &["hebrew"],
            Self::Buddhist => &["buddhist"],
            Self::Coptic => &["coptic"],
            Self::Ethiopian => &["ethiopian", "ethiopic"],
            Self::Chinese => &["chinese", "dangi"],
        }
    }

    /// Highest month number a date in this calendar may carry.
    pub const fn max_month(self) -> u8 {
        match self {
            Self::Hebrew | Self::Coptic | Self::Ethiopian => MONTHS_IN_EPAGOMENAL_YEAR,
            Self::Gregorian
            | Self::Jalali
            | Self::Hijri
            | Self::Buddhist
            | Self::Chinese => MONTHS_IN_YEAR,
        }
    }

    /// Cyclical calendars number years continuously instead of by cycle label.
    pub const fn uses_extended_year(self) -> bool {
        matches!(self, Self::Chinese)
    }

    /// Whether `(year, month, day)` alone is ambiguous because of leap months.
    pub const fn has_repeating_month_numbers(self) -> bool {
        matches!(self, Self::Chinese)
    }

    /// Coarse range check of a date in this calendar.
    ///
    /// Solar calendars with closed-form month lengths are checked exactly;
    /// the rest are bounded by their longest month.
    ///
    /// # Errors
    /// Returns `ConversionError::InvalidDate` when the month or day is out of range.
    pub fn check_range(self, date: CalendarDate) -> Result<(), ConversionError> {
        let invalid = || ConversionError::InvalidDate {
            calendar: self,
            date,
        };
        if date.month < 1 || date.month > self.max_month() || date.day < MIN_DAY {
            return Err(invalid());
        }
        let max_day = match self {
            Self::Gregorian => days_in_month(date.year, date.month),
            Self::Buddhist => {
                days_in_month(date.year.saturating_sub(crate::consts::BUDDHIST_ERA_OFFSET), date.month)
            }
            Self::Jalali => jalali::days_in_month(date.year, date.month),
            Self::Coptic | Self::Ethiopian if date.month == MONTHS_IN_EPAGOMENAL_YEAR => 6,
            Self::Hijri | Self::Hebrew | Self::Coptic | Self::Ethiopian | Self::Chinese => 30,
        };
        if date.day > max_day.min(MAX_DAY) {
            return Err(invalid());
        }
        Ok(())
    }
}

impl FromStr for CalendarSystem {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}

impl TryFrom<String> for CalendarSystem {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::normalize(&value)
    }
}

impl From<CalendarSystem> for String {
    fn from(system: CalendarSystem) -> Self {
        system.canonical_key().to_owned()
    }
}

/// Calendar fields as read from or written to a provider.
///
/// `is_leap_month` is only meaningful for calendars with repeating month
/// numbers and is `false` everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarFields {
    pub date:          CalendarDate,
    pub is_leap_month: bool,
}

impl CalendarFields {
    pub const fn new(date: CalendarDate) -> Self {
        Self {
            date,
            is_leap_month: false,
        }
    }

    pub const fn leap(date: CalendarDate) -> Self {
        Self {
            date,
            is_leap_month: true,
        }
    }
}

/// Milliseconds since 1970-01-01T00:00:00Z, always at a UTC midnight.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, Serialize, Deserialize,
)]
#[display(fmt = "{_0}")]
pub struct AbsoluteInstant(i64);

impl AbsoluteInstant {
    /// Midnight UTC of the given day, counted from the Unix epoch, or `None`
    /// when the day lies outside the millisecond range.
    pub const fn from_epoch_days(days: i64) -> Option<Self> {
        match days.checked_mul(MS_PER_DAY) {
            Some(ms) => Some(Self(ms)),
            None => None,
        }
    }

    /// Midnight UTC of the given Rata Die day (0001-01-01 is day 1).
    pub const fn from_rata_die(rd: i64) -> Option<Self> {
        match rd.checked_sub(UNIX_EPOCH_RATA_DIE) {
            Some(days) => Self::from_epoch_days(days),
            None => None,
        }
    }

    /// Whole days since the Unix epoch; sub-day remainders are floored away.
    pub const fn epoch_days(self) -> i64 {
        self.0.div_euclid(MS_PER_DAY)
    }

    pub const fn rata_die(self) -> i64 {
        self.epoch_days() + UNIX_EPOCH_RATA_DIE
    }

    pub const fn millis(self) -> i64 {
        self.0
    }
}

/// One of the three numeral alphabets handled by digit transliteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitAlphabet {
    /// ASCII digits, `.` decimal mark, `,` thousands separator
    #[default]
    #[display(fmt = "en")]
    En,
    /// Persian digits, `٫` decimal mark, `٬` thousands separator
    #[display(fmt = "fa")]
    Fa,
    /// Arabic-Indic digits
    #[display(fmt = "ar")]
    Ar,
}

impl FromStr for DigitAlphabet {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Self::En),
            "fa" => Ok(Self::Fa),
            "ar" => Ok(Self::Ar),
            _ => Err(ParseError::InvalidAlphabet(s.to_owned())),
        }
    }
}

// Helper functions

pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Days in a Gregorian month, or 0 for a month outside `1..=12`.
pub const fn days_in_month(year: i32, month: u8) -> u8 {
    if month == 0 || month > MONTHS_IN_YEAR {
        return 0;
    }
    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Days from 1970-01-01 to a proleptic Gregorian date.
pub const fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let y = if month <= 2 {
        year as i64 - 1
    } else {
        year as i64
    };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let m = month as i64;
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - UNIX_EPOCH_SHIFT
}

/// Proleptic Gregorian date of a day counted from 1970-01-01.
#[allow(clippy::cast_possible_truncation)]
pub const fn civil_from_days(days: i64) -> CalendarDate {
    let z = days + UNIX_EPOCH_SHIFT;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    CalendarDate::new(year as i32, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_aliases() {
        struct TestCase {
            key:      &'static str,
            expected: CalendarSystem,
        }

        let cases = [
            TestCase { key: "gregorian", expected: CalendarSystem::Gregorian },
            TestCase { key: "jalali", expected: CalendarSystem::Jalali },
            TestCase { key: "persian", expected: CalendarSystem::Jalali },
            TestCase { key: "Persian", expected: CalendarSystem::Jalali },
            TestCase { key: "hijri", expected: CalendarSystem::Hijri },
            TestCase { key: "ISLAMIC", expected: CalendarSystem::Hijri },
            TestCase { key: "hebrew", expected: CalendarSystem::Hebrew },
            TestCase { key: "buddhist", expected: CalendarSystem::Buddhist },
            TestCase { key: "coptic", expected: CalendarSystem::Coptic },
            TestCase { key: "ethiopian", expected: CalendarSystem::Ethiopian },
            TestCase { key: "ethiopic", expected: CalendarSystem::Ethiopian },
            TestCase { key: "chinese", expected: CalendarSystem::Chinese },
            TestCase { key: "dangi", expected: CalendarSystem::Chinese },
        ];

        for case in &cases {
            assert_eq!(
                CalendarSystem::normalize(case.key),
                Ok(case.expected),
                "key {} should resolve",
                case.key
            );
        }
    }

    #[test]
    fn test_normalize_unknown_key() {
        let result = CalendarSystem::normalize("klingon");
        assert_eq!(
            result,
            Err(ConversionError::UnsupportedCalendar("klingon".to_owned()))
        );
        assert!("".parse::<CalendarSystem>().is_err());
    }

    #[test]
    fn test_canonical_key_round_trips() {
        for system in CalendarSystem::ALL {
            assert_eq!(system.to_string(), system.canonical_key());
            assert_eq!(system.aliases()[0], system.canonical_key());
            assert_eq!(CalendarSystem::normalize(system.canonical_key()), Ok(system));
        }
    }

    #[test]
    fn test_calendar_system_serde() {
        let json = serde_json::to_string(&CalendarSystem::Jalali).unwrap();
        assert_eq!(json, r#""jalali""#);

        let parsed: CalendarSystem = serde_json::from_str(r#""persian""#).unwrap();
        assert_eq!(parsed, CalendarSystem::Jalali);

        let result: Result<CalendarSystem, _> = serde_json::from_str(r#""klingon""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_with_separator() {
        let date = CalendarDate::new(1404, 5, 22);
        assert_eq!(date.format_with("/"), "1404/05/22");
        assert_eq!(date.to_string(), "1404-05-22");
        assert_eq!(CalendarDate::new(622, 1, 1).format_with("."), "0622.01.01");

        assert_eq!(date.with_separator(""), DateOutput::Parts(date));
        assert_eq!(
            date.with_separator("/"),
            DateOutput::Text("1404/05/22".to_owned())
        );
        assert_eq!(date.with_separator("").as_parts(), Some(date));
        assert_eq!(date.with_separator("-").as_text(), Some("1404-05-22"));
    }

    #[test]
    fn test_tuple_conversions() {
        let date: CalendarDate = (2025, 8, 13).into();
        assert_eq!(date, CalendarDate::new(2025, 8, 13));
        let tuple: (i32, u8, u8) = date.into();
        assert_eq!(tuple, (2025, 8, 13));
    }

    #[test]
    fn test_ordering_is_chronological() {
        assert!(CalendarDate::new(2024, 12, 31) < CalendarDate::new(2025, 1, 1));
        assert!(CalendarDate::new(2025, 1, 31) < CalendarDate::new(2025, 2, 1));
        assert!(CalendarDate::new(2025, 2, 1) < CalendarDate::new(2025, 2, 2));
    }

    #[test]
    fn test_check_range() {
        use CalendarSystem::*;

        assert!(Gregorian.check_range(CalendarDate::new(2024, 2, 29)).is_ok());
        assert!(Gregorian.check_range(CalendarDate::new(2023, 2, 29)).is_err());
        assert!(Gregorian.check_range(CalendarDate::new(2025, 13, 1)).is_err());
        assert!(Gregorian.check_range(CalendarDate::new(2025, 0, 1)).is_err());
        assert!(Gregorian.check_range(CalendarDate::new(2025, 1, 0)).is_err());
        assert!(Buddhist.check_range(CalendarDate::new(2567, 2, 29)).is_ok());
        assert!(Buddhist.check_range(CalendarDate::new(i32::MIN, 1, 1)).is_ok());
        assert!(Coptic.check_range(CalendarDate::new(1741, 13, 5)).is_ok());
        assert!(Coptic.check_range(CalendarDate::new(1741, 13, 7)).is_err());
        assert!(Ethiopian.check_range(CalendarDate::new(2017, 13, 6)).is_ok());
        assert!(Ethiopian.check_range(CalendarDate::new(2017, 14, 1)).is_err());
        assert!(Jalali.check_range(CalendarDate::new(1399, 12, 30)).is_ok());
        assert!(Jalali.check_range(CalendarDate::new(1400, 12, 30)).is_err());
        assert!(Jalali.check_range(CalendarDate::new(1404, 1, 31)).is_ok());
        assert!(Jalali.check_range(CalendarDate::new(1404, 7, 31)).is_err());
        assert!(Hijri.check_range(CalendarDate::new(1447, 12, 31)).is_err());
        assert!(Chinese.check_range(CalendarDate::new(4662, 13, 1)).is_err());
    }

    #[test]
    fn test_absolute_instant() {
        assert_eq!(AbsoluteInstant::from_epoch_days(0).unwrap().millis(), 0);
        assert_eq!(AbsoluteInstant::from_epoch_days(1).unwrap().millis(), MS_PER_DAY);
        assert_eq!(AbsoluteInstant::from_epoch_days(-1).unwrap().epoch_days(), -1);
        assert_eq!(AbsoluteInstant::from(-1_i64).epoch_days(), -1);
        assert_eq!(AbsoluteInstant::from_rata_die(719_163).unwrap().millis(), 0);
        assert_eq!(AbsoluteInstant::from_epoch_days(20_000).unwrap().rata_die(), 739_163);
    }

    #[test]
    fn test_absolute_instant_out_of_range() {
        let last_day = i64::MAX / MS_PER_DAY;
        assert!(AbsoluteInstant::from_epoch_days(last_day).is_some());
        assert_eq!(AbsoluteInstant::from_epoch_days(last_day + 1), None);
        assert_eq!(AbsoluteInstant::from_epoch_days(i64::MIN), None);
        assert_eq!(AbsoluteInstant::from_rata_die(i64::MIN), None);
        // A far-future Gregorian year still has a day count but no instant.
        assert_eq!(AbsoluteInstant::from_epoch_days(days_from_civil(300_000_000, 1, 1)), None);
    }

    #[test]
    fn test_days_from_civil() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(days_from_civil(1969, 12, 31), -1);
        assert_eq!(days_from_civil(2000, 3, 1), 11_017);
        assert_eq!(days_from_civil(2025, 8, 13), 20_313);
    }

    #[test]
    fn test_civil_from_days_inverts() {
        for (y, m, d) in [
            (1600, 3, 1),
            (1700, 2, 28),
            (1900, 3, 1),
            (1969, 12, 31),
            (1970, 1, 1),
            (2000, 2, 29),
            (2025, 8, 13),
            (3001, 12, 31),
        ] {
            let days = days_from_civil(y, m, d);
            assert_eq!(civil_from_days(days), CalendarDate::new(y, m, d));
        }
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year:        i32,
            is_leap:     bool,
            description: &'static str,
        }

        let cases = [
            TestCase { year: 2020, is_leap: true, description: "divisible by 4" },
            TestCase { year: 2023, is_leap: false, description: "not divisible by 4" },
            TestCase { year: 1700, is_leap: false, description: "century not divisible by 400" },
            TestCase { year: 1900, is_leap: false, description: "century not divisible by 400" },
            TestCase { year: 2100, is_leap: false, description: "century not divisible by 400" },
            TestCase { year: 1600, is_leap: true, description: "divisible by 400" },
            TestCase { year: 2000, is_leap: true, description: "divisible by 400" },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
        }
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 12), 31);
        assert_eq!(days_in_month(2025, 13), 0);
    }

    #[test]
    fn test_digit_alphabet_parse() {
        assert_eq!("fa".parse::<DigitAlphabet>(), Ok(DigitAlphabet::Fa));
        assert_eq!(" AR ".parse::<DigitAlphabet>(), Ok(DigitAlphabet::Ar));
        assert_eq!("en".parse::<DigitAlphabet>(), Ok(DigitAlphabet::En));
        assert!(matches!(
            "de".parse::<DigitAlphabet>(),
            Err(ParseError::InvalidAlphabet(_))
        ));
        assert_eq!(DigitAlphabet::default(), DigitAlphabet::En);
        assert_eq!(DigitAlphabet::Fa.to_string(), "fa");
    }
}
