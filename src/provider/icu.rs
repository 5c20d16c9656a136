//! Provider backed by ICU4X's `icu_calendar`.

use crate::config::HijriVariant;
use crate::consts::{CHINESE_EXTENDED_YEAR_OFFSET, CHINESE_RELATED_YEAR_RANGE};
use crate::error::{ConversionError, Result};
use crate::types::{AbsoluteInstant, CalendarDate, CalendarFields, CalendarSystem, civil_from_days};
use icu_calendar::types::{MonthCode, RataDie};
use icu_calendar::{AnyCalendar, AnyCalendarKind, Date, Ref};
use tinystr::TinyAsciiStr;

/// Production provider covering every [`CalendarSystem`].
///
/// Calendars are built from ICU4X compiled data on each call, so the provider
/// itself is a plain value that can be shared across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IcuCalendarProvider {
    hijri: HijriVariant,
}

impl IcuCalendarProvider {
    pub const fn new(hijri: HijriVariant) -> Self {
        Self { hijri }
    }

    pub const fn hijri(&self) -> HijriVariant {
        self.hijri
    }

    const fn kind(&self, calendar: CalendarSystem) -> AnyCalendarKind {
        match calendar {
            CalendarSystem::Gregorian => AnyCalendarKind::Gregorian,
            CalendarSystem::Jalali => AnyCalendarKind::Persian,
            CalendarSystem::Hijri => match self.hijri {
                HijriVariant::Civil => AnyCalendarKind::HijriTabularTypeIIFriday,
                HijriVariant::CivilThursday => AnyCalendarKind::HijriTabularTypeIIThursday,
                HijriVariant::UmmAlQura => AnyCalendarKind::HijriUmmAlQura,
                HijriVariant::SimulatedMecca => AnyCalendarKind::HijriSimulatedMecca,
            },
            CalendarSystem::Hebrew => AnyCalendarKind::Hebrew,
            CalendarSystem::Buddhist => AnyCalendarKind::Buddhist,
            CalendarSystem::Coptic => AnyCalendarKind::Coptic,
            CalendarSystem::Ethiopian => AnyCalendarKind::Ethiopian,
            CalendarSystem::Chinese => AnyCalendarKind::Chinese,
        }
    }

    /// Finds a Chinese day by month code within its related ISO year.
    fn encode_chinese(
        cal: &AnyCalendar,
        date: CalendarDate,
        is_leap_month: bool,
    ) -> std::result::Result<RataDie, String> {
        let code = month_code(date.month, is_leap_month)
            .ok_or_else(|| format!("no month code for month {}", date.month))?;
        let related_iso = date
            .year
            .checked_sub(CHINESE_EXTENDED_YEAR_OFFSET)
            .filter(|year| CHINESE_RELATED_YEAR_RANGE.contains(year))
            .ok_or_else(|| format!("year {} outside the computed range", date.year))?;
        Date::try_new_from_codes(None, related_iso, code, date.day, Ref(cal))
            .map(|day| day.to_rata_die())
            .map_err(|err| err.to_string())
    }

    /// Hebrew months are fixed slots: Adar I is 6 and only exists in leap
    /// years, Adar (or Adar II) is 7 and Elul is 13.
    fn encode_hebrew(cal: &AnyCalendar, date: CalendarDate) -> std::result::Result<RataDie, String> {
        let code = hebrew_month_code(date.month)
            .ok_or_else(|| format!("no Hebrew month {}", date.month))?;
        Date::try_new_from_codes(None, date.year, code, date.day, Ref(cal))
            .map(|day| day.to_rata_die())
            .map_err(|err| err.to_string())
    }

    /// Walks forward from the first day of the year to the ordinal month.
    fn encode_by_ordinal(cal: &AnyCalendar, date: CalendarDate) -> std::result::Result<RataDie, String> {
        let first_month = MonthCode::new_normal(1).ok_or("no code for the first month")?;
        let mut current = Date::try_new_from_codes(None, date.year, first_month, 1, Ref(cal))
            .map_err(|err| err.to_string())?;

        if date.month < 1 || date.month > current.months_in_year() {
            return Err(format!(
                "month {} outside 1..={}",
                date.month,
                current.months_in_year()
            ));
        }
        for _ in 1..date.month {
            let next = current.to_rata_die().add(i64::from(current.days_in_month()));
            current = Date::from_rata_die(next, Ref(cal));
        }
        if date.day < 1 || date.day > current.days_in_month() {
            return Err(format!(
                "day {} outside 1..={}",
                date.day,
                current.days_in_month()
            ));
        }

        Ok(current.to_rata_die().add(i64::from(date.day) - 1))
    }
}

impl super::CalendarProvider for IcuCalendarProvider {
    fn name(&self) -> &'static str {
        "icu"
    }

    fn supports(&self, _calendar: CalendarSystem) -> bool {
        true
    }

    fn encode(&self, calendar: CalendarSystem, fields: CalendarFields) -> Result<AbsoluteInstant> {
        let cal = AnyCalendar::new(self.kind(calendar));
        let date = fields.date;
        let encoded = match calendar {
            CalendarSystem::Chinese => Self::encode_chinese(&cal, date, fields.is_leap_month),
            CalendarSystem::Hebrew => Self::encode_hebrew(&cal, date),
            _ => Self::encode_by_ordinal(&cal, date),
        }
        .and_then(|rd| {
            AbsoluteInstant::from_rata_die(rd.to_i64_date())
                .ok_or_else(|| "day outside the instant range".to_owned())
        });

        encoded.map_err(|reason| {
            tracing::debug!(%calendar, %date, leap = fields.is_leap_month, %reason, "icu rejected date fields");
            ConversionError::InvalidDate { calendar, date }
        })
    }

    fn decode(&self, calendar: CalendarSystem, instant: AbsoluteInstant) -> Result<CalendarFields> {
        let gregorian = civil_from_days(instant.epoch_days());
        let out_of_range = || {
            tracing::debug!(%calendar, %gregorian, "icu cannot compute this day");
            ConversionError::InvalidDate {
                calendar: CalendarSystem::Gregorian,
                date: gregorian,
            }
        };
        if calendar == CalendarSystem::Chinese && !CHINESE_RELATED_YEAR_RANGE.contains(&gregorian.year) {
            return Err(out_of_range());
        }

        let cal = AnyCalendar::new(self.kind(calendar));
        let day = Date::from_rata_die(RataDie::new(instant.rata_die()), Ref(&cal));
        let month = day.month();
        let day_of_month = day.day_of_month().0;

        match calendar {
            CalendarSystem::Chinese => {
                let year = day
                    .year()
                    .era_year_or_related_iso()
                    .checked_add(CHINESE_EXTENDED_YEAR_OFFSET)
                    .ok_or_else(out_of_range)?;
                Ok(CalendarFields {
                    date: CalendarDate::new(year, month.month_number(), day_of_month),
                    is_leap_month: month.is_leap(),
                })
            }
            CalendarSystem::Hebrew => Ok(CalendarFields::new(CalendarDate::new(
                day.extended_year(),
                hebrew_month_slot(month.standard_code).unwrap_or(month.ordinal),
                day_of_month,
            ))),
            _ => Ok(CalendarFields::new(CalendarDate::new(
                day.extended_year(),
                month.ordinal,
                day_of_month,
            ))),
        }
    }
}

/// `Mnn` for an ordinary month, `MnnL` for the leap month that follows it.
fn month_code(month: u8, is_leap_month: bool) -> Option<MonthCode> {
    if !(1..=12).contains(&month) {
        return None;
    }
    if is_leap_month {
        TinyAsciiStr::<4>::try_from_str(&format!("M{month:02}L"))
            .ok()
            .map(MonthCode)
    } else {
        MonthCode::new_normal(month)
    }
}

/// Fixed Hebrew slot to month code: `M05L` is Adar I, `M06` is Adar.
fn hebrew_month_code(slot: u8) -> Option<MonthCode> {
    match slot {
        1..=5 => MonthCode::new_normal(slot),
        6 => month_code(5, true),
        7..=13 => MonthCode::new_normal(slot - 1),
        _ => None,
    }
}

fn hebrew_month_slot(code: MonthCode) -> Option<u8> {
    match code.parsed()? {
        (5, true) => Some(6),
        (number @ 1..=5, false) => Some(number),
        (number @ 6..=12, false) => Some(number + 1),
        _ => None,
    }
}
