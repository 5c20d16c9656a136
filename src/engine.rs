//! The conversion engine.
//!
//! Every conversion between two calendars goes through a single pivot: the
//! source fields are encoded to an [`AbsoluteInstant`] at UTC midnight and
//! decoded in the target calendar. Jalali and Gregorian additionally have a
//! closed-form path that bypasses the provider altogether.

use crate::config::EngineConfig;
use crate::consts::{DATE_SEPARATORS, DEFAULT_DATE_SEPARATOR, ZERO_DATE};
use crate::digits;
use crate::error::{ConversionError, ParseError, Result};
use crate::jalali;
use crate::leap_cache::LeapMonthCache;
use crate::provider::{self, CalendarProvider};
use crate::types::{
    AbsoluteInstant, CalendarDate, CalendarFields, CalendarSystem, DateOutput, DigitAlphabet,
};
use std::sync::Arc;
use tracing::{debug, trace};

/// A Gregorian date read from calendar-first text, with whatever followed the
/// date (usually a time of day) kept as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDate {
    pub gregorian: CalendarDate,
    pub time:      Option<String>,
}

/// One reading of an ambiguous Chinese date.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    instant:   AbsoluteInstant,
    gregorian: CalendarDate,
}

pub struct CalendarEngine<P = Box<dyn CalendarProvider>> {
    provider:     P,
    leap_cache:   Arc<LeapMonthCache>,
    decimal_mark: String,
}

impl CalendarEngine {
    /// Engine over the most capable provider in this build.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_config(provider::provider_for(config), config)
    }
}

impl Default for CalendarEngine {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl<P: CalendarProvider> CalendarEngine<P> {
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, &EngineConfig::default())
    }

    pub fn with_config(provider: P, config: &EngineConfig) -> Self {
        Self {
            provider,
            leap_cache: Arc::new(LeapMonthCache::new(config.leap_cache_capacity)),
            decimal_mark: config.decimal_mark.clone(),
        }
    }

    /// Replaces the leap-month memo, e.g. to share one between engines.
    #[must_use]
    pub fn with_leap_cache(mut self, cache: Arc<LeapMonthCache>) -> Self {
        self.leap_cache = cache;
        self
    }

    pub const fn provider(&self) -> &P {
        &self.provider
    }

    pub fn leap_cache(&self) -> &LeapMonthCache {
        &self.leap_cache
    }

    /// Resolves a calendar key or alias.
    ///
    /// # Errors
    /// `UnsupportedCalendar` when the key is unknown.
    #[allow(clippy::unused_self)]
    pub fn resolve(&self, raw: &str) -> Result<CalendarSystem> {
        CalendarSystem::normalize(raw)
    }

    /// Converts `year-month-day` between two calendars named by key.
    ///
    /// Both keys are resolved before any conversion work happens. The result
    /// is formatted as `YYYY{sep}MM{sep}DD` unless `sep` is empty.
    ///
    /// For Chinese the month is taken as the ordinary (non-leap) occurrence;
    /// [`chinese_to_gregorian`](Self::chinese_to_gregorian) resolves leap
    /// months.
    ///
    /// # Errors
    /// `UnsupportedCalendar` for an unknown key, `MissingCapability` when the
    /// provider lacks either calendar, `InvalidDate` when the source fields
    /// name no day.
    pub fn convert(
        &self,
        from: &str,
        year: i32,
        month: u8,
        day: u8,
        to: &str,
        sep: &str,
    ) -> Result<DateOutput> {
        let date = self.convert_date(from, CalendarDate::new(year, month, day), to)?;
        Ok(date.with_separator(sep))
    }

    /// [`convert`](Self::convert) without formatting.
    ///
    /// # Errors
    /// See [`convert`](Self::convert).
    pub fn convert_date(&self, from: &str, date: CalendarDate, to: &str) -> Result<CalendarDate> {
        let from = self.resolve(from)?;
        let to = self.resolve(to)?;
        self.convert_between(from, to, date)
    }

    /// Converts between two resolved calendars through the pivot.
    ///
    /// # Errors
    /// `MissingCapability` or `InvalidDate`, as for [`convert`](Self::convert).
    pub fn convert_between(
        &self,
        from: CalendarSystem,
        to: CalendarSystem,
        date: CalendarDate,
    ) -> Result<CalendarDate> {
        self.ensure_supported(from)?;
        self.ensure_supported(to)?;

        let pivot = self.pivot(from, CalendarFields::new(date))?;
        Ok(self.provider.decode(to, pivot)?.date)
    }

    /// Converts a Gregorian date into `calendar`.
    ///
    /// Chinese conversions record the observed leap-month flag.
    ///
    /// # Errors
    /// `MissingCapability` or `InvalidDate`.
    pub fn from_gregorian(&self, calendar: CalendarSystem, date: CalendarDate) -> Result<CalendarDate> {
        match calendar {
            CalendarSystem::Chinese => self.gregorian_to_chinese_date(date),
            _ => self.convert_between(CalendarSystem::Gregorian, calendar, date),
        }
    }

    /// Converts a date in `calendar` to Gregorian.
    ///
    /// Chinese months are disambiguated as in
    /// [`chinese_to_gregorian`](Self::chinese_to_gregorian).
    ///
    /// # Errors
    /// `MissingCapability` or `InvalidDate`.
    pub fn to_gregorian(&self, calendar: CalendarSystem, date: CalendarDate) -> Result<CalendarDate> {
        match calendar {
            CalendarSystem::Chinese => self.chinese_to_gregorian_date(date),
            _ => self.convert_between(calendar, CalendarSystem::Gregorian, date),
        }
    }

    /// Closed-form Gregorian to Jalali; never consults the provider.
    #[allow(clippy::unused_self)]
    pub fn gregorian_to_jalali(&self, gy: i32, gm: u8, gd: u8, sep: &str) -> DateOutput {
        jalali::gregorian_to_jalali(gy, gm, gd).with_separator(sep)
    }

    /// Closed-form Jalali to Gregorian; never consults the provider.
    #[allow(clippy::unused_self)]
    pub fn jalali_to_gregorian(&self, jy: i32, jm: u8, jd: u8, sep: &str) -> DateOutput {
        jalali::jalali_to_gregorian(jy, jm, jd).with_separator(sep)
    }

    /// Gregorian to Chinese with an extended year.
    ///
    /// The leap-month flag is not part of the result; it is remembered so
    /// that [`chinese_to_gregorian`](Self::chinese_to_gregorian) can return
    /// to the same day.
    ///
    /// # Errors
    /// `MissingCapability` or `InvalidDate`.
    pub fn gregorian_to_chinese(&self, gy: i32, gm: u8, gd: u8, sep: &str) -> Result<DateOutput> {
        let date = self.gregorian_to_chinese_date(CalendarDate::new(gy, gm, gd))?;
        Ok(date.with_separator(sep))
    }

    /// Chinese to Gregorian, choosing between the ordinary and the leap
    /// occurrence of the month.
    ///
    /// In order of precedence: the flag remembered from an earlier forward
    /// conversion of this exact date; the only candidate whose forward probe
    /// reports a leap month; the later of the two candidates.
    ///
    /// # Errors
    /// `MissingCapability`, or `InvalidDate` when neither reading names a day.
    pub fn chinese_to_gregorian(&self, cy: i32, cm: u8, cd: u8, sep: &str) -> Result<DateOutput> {
        let date = self.chinese_to_gregorian_date(CalendarDate::new(cy, cm, cd))?;
        Ok(date.with_separator(sep))
    }

    /// Digit transliteration with the engine's configured decimal mark.
    pub fn translate_digits(&self, input: &str, target: DigitAlphabet) -> String {
        digits::translate(input, target, &self.decimal_mark)
    }

    /// Renders a Gregorian date in `calendar` with the requested numerals.
    ///
    /// `sep` must be one of `-`, `/` or `.`; anything else renders with `-`.
    ///
    /// # Errors
    /// As for [`from_gregorian`](Self::from_gregorian).
    pub fn render_from_gregorian(
        &self,
        calendar: CalendarSystem,
        date: CalendarDate,
        sep: &str,
        digits: DigitAlphabet,
    ) -> Result<String> {
        let sep = if is_date_separator(sep) {
            sep
        } else {
            DEFAULT_DATE_SEPARATOR
        };
        let text = self.from_gregorian(calendar, date)?.format_with(sep);
        Ok(self.translate_digits(&text, digits))
    }

    /// Reads `Y{sep}M{sep}D[ rest]` as a date in `calendar` and converts it
    /// to Gregorian.
    ///
    /// Separators may be `-`, `/` or `.`, and digits may be Latin, Persian or
    /// Arabic-Indic. Empty input and the zero date give `Ok(None)`.
    ///
    /// # Errors
    /// `Parse` for malformed text, otherwise as for
    /// [`to_gregorian`](Self::to_gregorian).
    pub fn parse_to_gregorian(&self, calendar: CalendarSystem, input: &str) -> Result<Option<ParsedDate>> {
        let raw = input.trim();
        if raw.is_empty() || raw.starts_with(ZERO_DATE) {
            return Ok(None);
        }

        let (date_part, rest) = match raw.split_once(char::is_whitespace) {
            Some((date, rest)) => (date, Some(rest.trim())),
            None => (raw, None),
        };
        let date = parse_date_part(&digits::translate_default(date_part, DigitAlphabet::En))?;
        let time = rest
            .filter(|rest| !rest.is_empty())
            .map(|rest| digits::translate_default(rest, DigitAlphabet::En));

        let gregorian = self.to_gregorian(calendar, date)?;
        Ok(Some(ParsedDate { gregorian, time }))
    }

    fn ensure_supported(&self, calendar: CalendarSystem) -> Result<()> {
        if self.provider.supports(calendar) {
            Ok(())
        } else {
            Err(ConversionError::MissingCapability {
                calendar,
                provider: self.provider.name(),
            })
        }
    }

    fn pivot(&self, calendar: CalendarSystem, fields: CalendarFields) -> Result<AbsoluteInstant> {
        let instant = self.provider.encode(calendar, fields)?;
        trace!(
            %calendar,
            date = %fields.date,
            leap = fields.is_leap_month,
            %instant,
            provider = self.provider.name(),
            "built pivot"
        );
        Ok(instant)
    }

    fn gregorian_to_chinese_date(&self, date: CalendarDate) -> Result<CalendarDate> {
        self.ensure_supported(CalendarSystem::Gregorian)?;
        self.ensure_supported(CalendarSystem::Chinese)?;

        let pivot = self.pivot(CalendarSystem::Gregorian, CalendarFields::new(date))?;
        let fields = self.provider.decode(CalendarSystem::Chinese, pivot)?;
        self.leap_cache.record(fields.date, fields.is_leap_month);
        Ok(fields.date)
    }

    fn chinese_to_gregorian_date(&self, date: CalendarDate) -> Result<CalendarDate> {
        self.ensure_supported(CalendarSystem::Chinese)?;
        self.ensure_supported(CalendarSystem::Gregorian)?;

        let ordinary = self.candidate(CalendarFields::new(date));
        let leap = self.candidate(CalendarFields::leap(date));

        let (ordinary, leap) = match (ordinary, leap) {
            (Ok(ordinary), Ok(leap)) => (ordinary, leap),
            (Ok(only), Err(_)) | (Err(_), Ok(only)) => {
                debug!(chinese = %date, gregorian = %only.gregorian, rule = "only candidate", "resolved chinese month");
                return Ok(only.gregorian);
            }
            (Err(err), Err(_)) => return Err(err),
        };

        if let Some(is_leap_month) = self.leap_cache.get(date) {
            let chosen = if is_leap_month { leap } else { ordinary };
            debug!(chinese = %date, gregorian = %chosen.gregorian, is_leap_month, rule = "memoized", "resolved chinese month");
            return Ok(chosen.gregorian);
        }

        let ordinary_probe = self.probe(ordinary)?;
        let leap_probe = self.probe(leap)?;
        let (chosen, rule) = match (ordinary_probe, leap_probe) {
            (false, true) => (leap, "single leap probe"),
            (true, false) => (ordinary, "single leap probe"),
            _ if leap.instant > ordinary.instant => (leap, "later date"),
            _ => (ordinary, "later date"),
        };
        debug!(
            chinese = %date,
            gregorian = %chosen.gregorian,
            ordinary_probe,
            leap_probe,
            rule,
            "resolved chinese month"
        );
        Ok(chosen.gregorian)
    }

    fn candidate(&self, fields: CalendarFields) -> Result<Candidate> {
        let instant = self.pivot(CalendarSystem::Chinese, fields)?;
        let gregorian = self.provider.decode(CalendarSystem::Gregorian, instant)?.date;
        Ok(Candidate { instant, gregorian })
    }

    /// Leap flag of the Chinese month containing the candidate's day.
    fn probe(&self, candidate: Candidate) -> Result<bool> {
        Ok(self
            .provider
            .decode(CalendarSystem::Chinese, candidate.instant)?
            .is_leap_month)
    }
}

fn is_date_separator(sep: &str) -> bool {
    let mut chars = sep.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if DATE_SEPARATORS.contains(&c))
}

fn parse_date_part(text: &str) -> Result<CalendarDate, ParseError> {
    let parts: Vec<&str> = text.split(DATE_SEPARATORS).collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(ParseError::InvalidFormat(text.to_owned()));
    };

    let year = year
        .parse::<i32>()
        .map_err(|_| ParseError::InvalidComponent((*year).to_owned()))?;
    let month = month
        .parse::<u8>()
        .map_err(|_| ParseError::InvalidComponent((*month).to_owned()))?;
    let day = day
        .parse::<u8>()
        .map_err(|_| ParseError::InvalidComponent((*day).to_owned()))?;

    Ok(CalendarDate::new(year, month, day))
}
