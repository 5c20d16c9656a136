//! Closed-form Jalali (Solar Hijri) and Gregorian conversion.
//!
//! Both directions are pure integer arithmetic over a shared day count and
//! need no calendar data. Leap years follow the 33-year arithmetic cycle
//! (8 leap years per 12053 days), which matches the astronomical calendar
//! for every year in common use.
//!
//! Inputs are not validated: an out-of-range month or day yields a
//! well-defined but not necessarily meaningful date.

use crate::consts::{
    COMMON_YEAR_DAYS, CENTURY_DAYS, DAYS_BEFORE_MONTH, GREGORIAN_CYCLE_DAYS,
    GREGORIAN_DAY_ANCHOR, JALALI_CYCLE_DAYS, JALALI_CYCLE_LEAPS, JALALI_CYCLE_YEARS,
    JALALI_DAY_ANCHOR, JALALI_LONG_MONTH, JALALI_LONG_MONTHS_DAYS, JALALI_SHORT_MONTH,
    JALALI_YEAR_ORIGIN, MONTHS_IN_YEAR, QUADRENNIUM_DAYS,
};
use crate::types::{days_in_month as gregorian_days_in_month, CalendarDate};

/// Converts a proleptic Gregorian date to Jalali.
///
/// A month outside `1..=12` is carried into the year before the day count
/// is taken, so month 13 of one year reads as January of the next.
#[allow(clippy::cast_possible_truncation)]
pub fn gregorian_to_jalali(gy: i32, gm: u8, gd: u8) -> CalendarDate {
    let months = i64::from(gm) - 1;
    let gy = i64::from(gy) + months.div_euclid(i64::from(MONTHS_IN_YEAR));
    let month_index = months.rem_euclid(i64::from(MONTHS_IN_YEAR));

    // Years counted from March, so a leap day belongs to the year before it.
    let gy2 = if month_index >= 2 { gy + 1 } else { gy };
    let mut days = GREGORIAN_DAY_ANCHOR
        + COMMON_YEAR_DAYS * gy
        + (gy2 + 3).div_euclid(4)
        - (gy2 + 99).div_euclid(100)
        + (gy2 + 399).div_euclid(400)
        + i64::from(gd)
        + DAYS_BEFORE_MONTH[month_index as usize];

    let mut jy = JALALI_YEAR_ORIGIN + JALALI_CYCLE_YEARS * days.div_euclid(JALALI_CYCLE_DAYS);
    days = days.rem_euclid(JALALI_CYCLE_DAYS);
    jy += 4 * days.div_euclid(QUADRENNIUM_DAYS);
    days = days.rem_euclid(QUADRENNIUM_DAYS);

    if days > COMMON_YEAR_DAYS {
        jy += (days - 1).div_euclid(COMMON_YEAR_DAYS);
        days = (days - 1).rem_euclid(COMMON_YEAR_DAYS);
    }

    let (jm, jd) = if days < JALALI_LONG_MONTHS_DAYS {
        (
            1 + days / JALALI_LONG_MONTH,
            1 + days % JALALI_LONG_MONTH,
        )
    } else {
        let rest = days - JALALI_LONG_MONTHS_DAYS;
        (7 + rest / JALALI_SHORT_MONTH, 1 + rest % JALALI_SHORT_MONTH)
    };

    CalendarDate::new(jy as i32, jm as u8, jd as u8)
}

/// Converts a Jalali date to proleptic Gregorian.
#[allow(clippy::cast_possible_truncation)]
pub fn jalali_to_gregorian(jy: i32, jm: u8, jd: u8) -> CalendarDate {
    let mut days = jalali_day_number(jy, jm, jd);

    let mut gy = 400 * days.div_euclid(GREGORIAN_CYCLE_DAYS);
    days = days.rem_euclid(GREGORIAN_CYCLE_DAYS);

    if days > CENTURY_DAYS {
        // The first century of each 400-year cycle is one day longer.
        days -= 1;
        gy += 100 * days.div_euclid(CENTURY_DAYS);
        days = days.rem_euclid(CENTURY_DAYS);
        if days >= COMMON_YEAR_DAYS {
            days += 1;
        }
    }

    gy += 4 * days.div_euclid(QUADRENNIUM_DAYS);
    days = days.rem_euclid(QUADRENNIUM_DAYS);

    if days > COMMON_YEAR_DAYS {
        gy += (days - 1).div_euclid(COMMON_YEAR_DAYS);
        days = (days - 1).rem_euclid(COMMON_YEAR_DAYS);
    }

    let gy = gy as i32;
    let mut gd = days + 1;
    let mut gm = 1;
    while gm <= MONTHS_IN_YEAR {
        let length = i64::from(gregorian_days_in_month(gy, gm));
        if gd <= length {
            break;
        }
        gd -= length;
        gm += 1;
    }

    CalendarDate::new(gy, gm, gd as u8)
}

/// Whether a Jalali year has 366 days under the 33-year cycle.
pub fn is_leap_year(jy: i32) -> bool {
    jalali_day_number(jy.saturating_add(1), 1, 1) - jalali_day_number(jy, 1, 1)
        == COMMON_YEAR_DAYS + 1
}

/// Days in a Jalali month, or 0 for a month outside `1..=12`.
#[allow(clippy::cast_possible_truncation)]
pub fn days_in_month(jy: i32, jm: u8) -> u8 {
    match jm {
        1..=6 => JALALI_LONG_MONTH as u8,
        7..=11 => JALALI_SHORT_MONTH as u8,
        12 if is_leap_year(jy) => JALALI_SHORT_MONTH as u8,
        12 => JALALI_SHORT_MONTH as u8 - 1,
        _ => 0,
    }
}

/// Day count of a Jalali date on the same origin the Gregorian walk uses.
fn jalali_day_number(jy: i32, jm: u8, jd: u8) -> i64 {
    let jy = i64::from(jy) - JALALI_YEAR_ORIGIN;
    let jm = i64::from(jm);
    let month_days = if jm < 7 {
        (jm - 1) * JALALI_LONG_MONTH
    } else {
        (jm - 7) * JALALI_SHORT_MONTH + JALALI_LONG_MONTHS_DAYS
    };
    JALALI_DAY_ANCHOR
        + COMMON_YEAR_DAYS * jy
        + jy.div_euclid(JALALI_CYCLE_YEARS) * JALALI_CYCLE_LEAPS
        + (jy.rem_euclid(JALALI_CYCLE_YEARS) + 3).div_euclid(4)
        + i64::from(jd)
        + month_days
}
