use crate::prelude::*;
use crate::types::{CalendarDate, CalendarSystem};

/// Error type for calendar conversions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// The calendar key does not name a supported calendar system.
    #[error("Unsupported calendar: {0}")]
    UnsupportedCalendar(String),

    /// The active provider cannot serve this calendar system.
    #[error("Calendar {calendar} is not available from the {provider} provider")]
    MissingCapability {
        calendar: CalendarSystem,
        provider: &'static str,
    },

    /// The provider rejected the date fields.
    #[error("Invalid {calendar} date: {date}")]
    InvalidDate {
        calendar: CalendarSystem,
        date:     CalendarDate,
    },

    /// Error reading a date from text.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Error reading a calendar date from text.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid date component: {_0}")]
    InvalidComponent(String),
    #[display(fmt = "Invalid digit alphabet: {_0} (expected en, fa or ar)")]
    InvalidAlphabet(String),
}

impl std::error::Error for ParseError {}

pub type Result<T, E = ConversionError> = std::result::Result<T, E>;
