//! Singapore Exchange holiday rules: the well-known fixed-date public
//! holidays, plus Good Friday. Singapore observes holidays that fall on
//! a Sunday with a Monday substitute; Saturday falls are not adjusted.

use super::lunar;
use crate::utils::calculate_good_friday;
use chrono::{Datelike, NaiveDate, Weekday};

pub fn holidays_for_year(year: i32) -> Vec<(NaiveDate, &'static str)> {
    let mut holidays = Vec::new();

    push_with_substitute(&mut holidays, ymd(year, 1, 1), "New Year's Day");

    if let Some(lny1) = lunar::lunar_new_year_day1(year) {
        push_with_substitute(&mut holidays, lny1, "Chinese New Year");
        push_with_substitute(
            &mut holidays,
            lny1 + chrono::Duration::days(1),
            "Chinese New Year Holiday",
        );
    }

    if let Ok(date) = calculate_good_friday(year) {
        holidays.push((date, "Good Friday"));
    }

    push_with_substitute(&mut holidays, ymd(year, 5, 1), "Labour Day");

    if let Some(date) = lunar::buddhas_birthday(year) {
        push_with_substitute(&mut holidays, date, "Vesak Day");
    }

    push_with_substitute(&mut holidays, ymd(year, 8, 9), "National Day");

    push_with_substitute(&mut holidays, ymd(year, 12, 25), "Christmas Day");

    holidays
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

fn push_with_substitute(holidays: &mut Vec<(NaiveDate, &'static str)>, date: NaiveDate, name: &'static str) {
    holidays.push((date, name));

    if date.weekday() == Weekday::Sun {
        holidays.push((date + chrono::Duration::days(1), "Substitute Holiday"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn national_day_present() {
        let holidays = holidays_for_year(2026);
        assert!(holidays.iter().any(|(d, _)| *d == ymd(2026, 8, 9)));
    }
}
