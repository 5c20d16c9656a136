//! Calendar providers: the calendar-aware arithmetic behind generic conversion.
//!
//! A provider turns calendar fields into an [`AbsoluteInstant`] and back. The
//! engine never talks to a calendar library directly; it asks the provider
//! whether it [`supports`](CalendarProvider::supports) a calendar first and
//! reports `MissingCapability` otherwise.

mod arithmetic;
#[cfg(feature = "icu")]
mod icu;

pub use arithmetic::ArithmeticProvider;
#[cfg(feature = "icu")]
pub use icu::IcuCalendarProvider;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::types::{AbsoluteInstant, CalendarFields, CalendarSystem};

pub trait CalendarProvider: Send + Sync {
    /// Short name used in error messages and logs.
    fn name(&self) -> &'static str;

    fn supports(&self, calendar: CalendarSystem) -> bool;

    /// Encodes the fields at 00:00:00.000 UTC.
    ///
    /// Months are 1-based ordinals, except for calendars with repeating month
    /// numbers where `month` is the month number and `is_leap_month` picks
    /// the intercalary occurrence. Hebrew months are fixed slots 1..=13, with
    /// slot 6 (Adar I) present only in leap years. Years are extended years
    /// for calendars that use them.
    ///
    /// # Errors
    /// `MissingCapability` for an unsupported calendar, `InvalidDate` when the
    /// fields do not name a day in that calendar.
    fn encode(&self, calendar: CalendarSystem, fields: CalendarFields) -> Result<AbsoluteInstant>;

    /// Decodes the day containing `instant` into fields of `calendar`.
    ///
    /// # Errors
    /// `MissingCapability` for an unsupported calendar.
    fn decode(&self, calendar: CalendarSystem, instant: AbsoluteInstant) -> Result<CalendarFields>;
}

impl<P: CalendarProvider + ?Sized> CalendarProvider for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn supports(&self, calendar: CalendarSystem) -> bool {
        (**self).supports(calendar)
    }

    fn encode(&self, calendar: CalendarSystem, fields: CalendarFields) -> Result<AbsoluteInstant> {
        (**self).encode(calendar, fields)
    }

    fn decode(&self, calendar: CalendarSystem, instant: AbsoluteInstant) -> Result<CalendarFields> {
        (**self).decode(calendar, instant)
    }
}

/// The most capable provider compiled into this build, set up from `config`.
#[cfg(feature = "icu")]
pub fn provider_for(config: &EngineConfig) -> Box<dyn CalendarProvider> {
    Box::new(IcuCalendarProvider::new(config.hijri))
}

/// The most capable provider compiled into this build, set up from `config`.
#[cfg(not(feature = "icu"))]
pub fn provider_for(_config: &EngineConfig) -> Box<dyn CalendarProvider> {
    Box::new(ArithmeticProvider)
}

pub fn default_provider() -> Box<dyn CalendarProvider> {
    provider_for(&EngineConfig::default())
}
