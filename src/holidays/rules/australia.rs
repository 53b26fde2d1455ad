//! Australian Securities Exchange holiday rules.

use crate::utils::{calculate_good_friday, nth_weekday_of_month};
use chrono::{Datelike, NaiveDate, Weekday};

pub fn holidays_for_year(year: i32) -> Vec<(NaiveDate, &'static str)> {
    let mut holidays = Vec::new();

    push_with_substitute(&mut holidays, ymd(year, 1, 1), "New Year's Day");
    push_with_substitute(&mut holidays, ymd(year, 1, 26), "Australia Day");

    if let Some(date) = nth_weekday_of_month(year, 3, Weekday::Mon, 2) {
        holidays.push((date, "Labour Day"));
    }
    if let Ok(date) = calculate_good_friday(year) {
        holidays.push((date, "Good Friday"));
        holidays.push((date + chrono::Duration::days(3), "Easter Monday"));
    }
    push_with_substitute(&mut holidays, ymd(year, 4, 25), "Anzac Day");
    if let Some(date) = nth_weekday_of_month(year, 6, Weekday::Mon, 2) {
        holidays.push((date, "King's Birthday"));
    }
    push_with_substitute(&mut holidays, ymd(year, 12, 25), "Christmas Day");
    push_with_substitute(&mut holidays, ymd(year, 12, 26), "Boxing Day");

    holidays
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

fn push_with_substitute(holidays: &mut Vec<(NaiveDate, &'static str)>, date: NaiveDate, name: &'static str) {
    holidays.push((date, name));

    match date.weekday() {
        Weekday::Sat => holidays.push((date + chrono::Duration::days(2), "Substitute Holiday")),
        Weekday::Sun => holidays.push((date + chrono::Duration::days(1), "Substitute Holiday")),
        _ => {}
    }
}
