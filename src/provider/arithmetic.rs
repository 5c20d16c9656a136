use crate::consts::BUDDHIST_ERA_OFFSET;
use crate::error::{ConversionError, Result};
use crate::jalali;
use crate::types::{
    civil_from_days, days_from_civil, AbsoluteInstant, CalendarDate, CalendarFields, CalendarSystem,
};

/// Closed-form provider for the solar calendars that need no calendar data:
/// Gregorian, Jalali and Buddhist.
///
/// Available in every build; it is what the engine falls back to when the
/// crate is built without ICU.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArithmeticProvider;

impl ArithmeticProvider {
    const fn missing(self, calendar: CalendarSystem) -> ConversionError {
        ConversionError::MissingCapability {
            calendar,
            provider: "arithmetic",
        }
    }
}

impl super::CalendarProvider for ArithmeticProvider {
    fn name(&self) -> &'static str {
        "arithmetic"
    }

    fn supports(&self, calendar: CalendarSystem) -> bool {
        matches!(
            calendar,
            CalendarSystem::Gregorian | CalendarSystem::Jalali | CalendarSystem::Buddhist
        )
    }

    fn encode(&self, calendar: CalendarSystem, fields: CalendarFields) -> Result<AbsoluteInstant> {
        let date = fields.date;
        let invalid = || ConversionError::InvalidDate { calendar, date };
        let gregorian = match calendar {
            CalendarSystem::Gregorian => date,
            CalendarSystem::Buddhist => CalendarDate {
                year: date.year.checked_sub(BUDDHIST_ERA_OFFSET).ok_or_else(invalid)?,
                ..date
            },
            CalendarSystem::Jalali => {
                calendar.check_range(date)?;
                let gregorian = jalali::jalali_to_gregorian(date.year, date.month, date.day);
                // The Gregorian year is 621 or 622 ahead unless it wrapped.
                if !(621..=622).contains(&(i64::from(gregorian.year) - i64::from(date.year))) {
                    return Err(invalid());
                }
                gregorian
            }
            _ => return Err(self.missing(calendar)),
        };
        CalendarSystem::Gregorian
            .check_range(gregorian)
            .map_err(|_| invalid())?;

        AbsoluteInstant::from_epoch_days(days_from_civil(
            gregorian.year,
            gregorian.month,
            gregorian.day,
        ))
        .ok_or_else(invalid)
    }

    fn decode(&self, calendar: CalendarSystem, instant: AbsoluteInstant) -> Result<CalendarFields> {
        let gregorian = civil_from_days(instant.epoch_days());
        let date = match calendar {
            CalendarSystem::Gregorian => gregorian,
            CalendarSystem::Buddhist => CalendarDate {
                year: gregorian.year.saturating_add(BUDDHIST_ERA_OFFSET),
                ..gregorian
            },
            CalendarSystem::Jalali => {
                jalali::gregorian_to_jalali(gregorian.year, gregorian.month, gregorian.day)
            }
            _ => return Err(self.missing(calendar)),
        };
        Ok(CalendarFields::new(date))
    }
}
