//! Date conversion between Gregorian and Jalali, Hijri, Hebrew, Buddhist,
//! Coptic, Ethiopian and Chinese calendars.
//!
//! ```
//! use tavim::{CalendarDate, CalendarEngine, CalendarSystem, DateOutput};
//!
//! let engine = CalendarEngine::default();
//! let jalali = engine.convert("gregorian", 2025, 8, 13, "persian", "/")?;
//! assert_eq!(jalali, DateOutput::Text("1404/05/22".to_owned()));
//!
//! let buddhist = engine.from_gregorian(CalendarSystem::Buddhist, CalendarDate::new(2025, 8, 13))?;
//! assert_eq!(buddhist, CalendarDate::new(2568, 8, 13));
//! # Ok::<(), tavim::ConversionError>(())
//! ```

mod config;
mod consts;
mod digits;
mod engine;
mod error;
pub mod jalali;
mod leap_cache;
mod prelude;
mod provider;
mod types;

pub use config::{EngineConfig, HijriVariant};
pub use consts::*;
pub use digits::{translate, translate_default};
pub use engine::{CalendarEngine, ParsedDate};
pub use error::{ConversionError, ParseError, Result};
pub use jalali::{gregorian_to_jalali, jalali_to_gregorian};
pub use leap_cache::LeapMonthCache;
#[cfg(feature = "icu")]
pub use provider::IcuCalendarProvider;
pub use provider::{ArithmeticProvider, CalendarProvider, default_provider, provider_for};
pub use types::{
    AbsoluteInstant, CalendarDate, CalendarFields, CalendarSystem, DateOutput, DigitAlphabet,
    civil_from_days, days_from_civil, days_in_month, is_leap_year,
};

