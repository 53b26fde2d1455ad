//! Hong Kong Stock Exchange holiday rules.

use super::lunar;
use crate::utils::{calculate_easter_monday, calculate_good_friday};
use chrono::{Datelike, NaiveDate, Weekday};

pub fn holidays_for_year(year: i32) -> Vec<(NaiveDate, &'static str)> {
    let mut holidays = Vec::new();

    push_with_substitute(&mut holidays, ymd(year, 1, 1), "New Year's Day");

    if let Some(lny1) = lunar::lunar_new_year_day1(year) {
        let names = [
            "Lunar New Year's Day",
            "Lunar New Year Holiday",
            "Lunar New Year Holiday",
        ];
        let mut block = Vec::new();
        for (i, name) in names.iter().enumerate() {
            block.push((lny1 + chrono::Duration::days(i as i64), *name));
        }
        for (date, name) in block {
            push_with_substitute(&mut holidays, date, name);
        }
    }

    if let Ok(date) = calculate_good_friday(year) {
        holidays.push((date, "Good Friday"));
        holidays.push((date + chrono::Duration::days(1), "Day after Good Friday"));
    }
    if let Ok(date) = calculate_easter_monday(year) {
        holidays.push((date, "Easter Monday"));
    }

    if let Some(date) = qing_ming_festival(year) {
        push_with_substitute(&mut holidays, date, "Ching Ming Festival");
    }

    push_with_substitute(&mut holidays, ymd(year, 5, 1), "Labour Day");

    if let Some(date) = lunar::buddhas_birthday(year) {
        push_with_substitute(&mut holidays, date, "Buddha's Birthday");
    }
    if let Some(date) = lunar::dragon_boat_festival(year) {
        push_with_substitute(&mut holidays, date, "Tuen Ng Festival");
    }

    push_with_substitute(&mut holidays, ymd(year, 7, 1), "HKSAR Establishment Day");

    if let Some(date) = lunar::mid_autumn_festival(year) {
        // Observed the day after the festival falls, by long-standing convention.
        push_with_substitute(
            &mut holidays,
            date + chrono::Duration::days(1),
            "Day after Mid-Autumn Festival",
        );
    }

    push_with_substitute(&mut holidays, ymd(year, 10, 1), "National Day");

    if let Some(date) = chung_yeung_festival(year) {
        push_with_substitute(&mut holidays, date, "Chung Yeung Festival");
    }

    push_with_substitute(&mut holidays, ymd(year, 12, 25), "Christmas Day");
    push_with_substitute(&mut holidays, ymd(year, 12, 26), "Day after Christmas");

    holidays
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Chung Yeung Festival (9th day of the 9th lunar month), roughly two
/// lunar months after Mid-Autumn.
fn chung_yeung_festival(year: i32) -> Option<NaiveDate> {
    let (month, day) = match year {
        2024 => (10, 11),
        2025 => (10, 29),
        2026 => (10, 18),
        2027 => (10, 8),
        2028 => (10, 26),
        2029 => (10, 16),
        2030 => (10, 5),
        2031 => (10, 24),
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Ching Ming Festival, a solar-term holiday that falls on April 4th or
/// 5th depending on the year.
fn qing_ming_festival(year: i32) -> Option<NaiveDate> {
    let day = match year {
        2024 => 4,
        2025 => 4,
        2026 => 5,
        2027 => 5,
        2028 => 4,
        2029 => 4,
        2030 => 5,
        2031 => 5,
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, 4, day)
}

/// If `date` falls on a Sunday, push a substitute on the next day not
/// already listed, capped at a week of lookahead.
fn push_with_substitute(holidays: &mut Vec<(NaiveDate, &'static str)>, date: NaiveDate, name: &'static str) {
    holidays.push((date, name));

    if date.weekday() == Weekday::Sun {
        let mut substitute = date + chrono::Duration::days(1);
        let mut attempts = 0;
        while holidays.iter().any(|(d, _)| *d == substitute) && attempts < 7 {
            substitute += chrono::Duration::days(1);
            attempts += 1;
        }
        if attempts < 7 {
            holidays.push((substitute, "Substitute Holiday"));
        }
    }
}
