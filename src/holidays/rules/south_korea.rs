//! Korea Exchange holiday rules.

use super::lunar;
use chrono::NaiveDate;

pub fn holidays_for_year(year: i32) -> Vec<(NaiveDate, &'static str)> {
    let mut holidays = vec![
        (ymd(year, 1, 1), "New Year's Day"),
        (ymd(year, 3, 1), "Independence Movement Day"),
        (ymd(year, 5, 5), "Children's Day"),
        (ymd(year, 6, 6), "Memorial Day"),
        (ymd(year, 8, 15), "Liberation Day"),
        (ymd(year, 10, 3), "National Foundation Day"),
        (ymd(year, 10, 9), "Hangul Day"),
        (ymd(year, 12, 31), "Market Closed (Year End)"),
    ];

    if let Some(lny1) = lunar::lunar_new_year_day1(year) {
        holidays.push((lny1 - chrono::Duration::days(1), "Seollal Holiday"));
        holidays.push((lny1, "Seollal"));
        holidays.push((lny1 + chrono::Duration::days(1), "Seollal Holiday"));
    }
    if let Some(date) = lunar::mid_autumn_festival(year) {
        holidays.push((date - chrono::Duration::days(1), "Chuseok Holiday"));
        holidays.push((date, "Chuseok"));
        holidays.push((date + chrono::Duration::days(1), "Chuseok Holiday"));
    }

    holidays
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}
