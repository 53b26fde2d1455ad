//! Taiwan Stock Exchange holiday rules.

use super::lunar;
use chrono::{Datelike, NaiveDate, Weekday};

pub fn holidays_for_year(year: i32) -> Vec<(NaiveDate, &'static str)> {
    let mut holidays = Vec::new();

    push_with_substitute(&mut holidays, ymd(year, 1, 1), "Founding Day");

    if let Some(lny1) = lunar::lunar_new_year_day1(year) {
        for (i, name) in [
            "Lunar New Year's Eve",
            "Lunar New Year's Day",
            "Spring Festival Holiday",
            "Spring Festival Holiday",
        ]
        .iter()
        .enumerate()
        {
            let date = lny1 + chrono::Duration::days(i as i64 - 1);
            push_with_substitute(&mut holidays, date, name);
        }
    }

    push_with_substitute(&mut holidays, ymd(year, 2, 28), "Peace Memorial Day");

    if let Some(date) = qing_ming_festival(year) {
        push_with_substitute(&mut holidays, date, "Tomb Sweeping Day");
    }

    push_with_substitute(&mut holidays, ymd(year, 5, 1), "Labour Day");

    if let Some(date) = lunar::dragon_boat_festival(year) {
        push_with_substitute(&mut holidays, date, "Dragon Boat Festival");
    }
    if let Some(date) = lunar::mid_autumn_festival(year) {
        push_with_substitute(&mut holidays, date, "Mid-Autumn Festival");
    }

    push_with_substitute(&mut holidays, ymd(year, 10, 10), "National Day");

    holidays
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn national_day_present() {
        let holidays = holidays_for_year(2026);
        assert!(holidays.iter().any(|(d, _)| *d == ymd(2026, 10, 10)));
    }
}
