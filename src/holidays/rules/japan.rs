//! Japanese holiday rules for the Tokyo Stock Exchange calendar, with
//! each holiday's display name attached.

use crate::utils::nth_weekday_of_month;
use chrono::{Datelike, NaiveDate, Weekday};

pub fn holidays_for_year(year: i32) -> Vec<(NaiveDate, &'static str)> {
    let mut holidays = Vec::new();

    holidays.push((ymd(year, 1, 1), "New Year's Day"));
    holidays.push((ymd(year, 1, 2), "New Year Holiday"));
    holidays.push((ymd(year, 1, 3), "New Year Holiday"));

    if let Some(date) = nth_weekday_of_month(year, 1, Weekday::Mon, 2) {
        holidays.push((date, "Coming of Age Day"));
    }
    push_with_substitute(&mut holidays, ymd(year, 2, 11), "National Foundation Day");
    push_with_substitute(&mut holidays, ymd(year, 2, 23), "Emperor's Birthday");
    if let Some(date) = vernal_equinox(year) {
        push_with_substitute(&mut holidays, date, "Vernal Equinox Day");
    }
    push_with_substitute(&mut holidays, ymd(year, 4, 29), "Showa Day");
    push_with_substitute(&mut holidays, ymd(year, 5, 3), "Constitution Memorial Day");
    apply_golden_week_bridge(year, &mut holidays);
    push_with_substitute(&mut holidays, ymd(year, 5, 5), "Children's Day");

    if let Some(date) = nth_weekday_of_month(year, 7, Weekday::Mon, 3) {
        holidays.push((date, "Marine Day"));
    }
    push_with_substitute(&mut holidays, ymd(year, 8, 11), "Mountain Day");
    if let Some(date) = nth_weekday_of_month(year, 9, Weekday::Mon, 3) {
        holidays.push((date, "Respect for the Aged Day"));
    }
    if let Some(date) = autumnal_equinox(year) {
        push_with_substitute(&mut holidays, date, "Autumnal Equinox Day");
    }
    if let Some(date) = nth_weekday_of_month(year, 10, Weekday::Mon, 2) {
        holidays.push((date, "Sports Day"));
    }
    push_with_substitute(&mut holidays, ymd(year, 11, 3), "Culture Day");
    push_with_substitute(&mut holidays, ymd(year, 11, 23), "Labour Thanksgiving Day");
    holidays.push((ymd(year, 12, 31), "Market Closed (Year End)"));

    holidays
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// If `date` falls on a Sunday, push a substitute holiday on the first
/// following day not already a holiday (capped at a week of lookahead).
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

fn apply_golden_week_bridge(year: i32, holidays: &mut Vec<(NaiveDate, &'static str)>) {
    let may_3 = ymd(year, 5, 3);
    let may_4 = ymd(year, 5, 4);
    let may_5 = ymd(year, 5, 5);

    holidays.push((may_4, "Greenery Day"));

    if may_3.weekday() == Weekday::Tue {
        holidays.push((ymd(year, 5, 2), "Citizens' Holiday"));
    }
    if may_5.weekday() == Weekday::Thu {
        holidays.push((ymd(year, 5, 6), "Citizens' Holiday"));
    }
    if may_3.weekday() == Weekday::Fri && may_5.weekday() == Weekday::Sun {
        holidays.push((ymd(year, 5, 6), "Citizens' Holiday"));
    }
    if may_4.weekday() == Weekday::Sun {
        holidays.push((ymd(year, 5, 6), "Substitute Holiday"));
    }
}

fn vernal_equinox(year: i32) -> Option<NaiveDate> {
    let day = match year {
        2024 => 20,
        2025 => 20,
        2026 => 20,
        2027 => 21,
        2028 => 20,
        2029 => 20,
        2030 => 20,
        2031 => 21,
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, 3, day)
}

fn autumnal_equinox(year: i32) -> Option<NaiveDate> {
    let day = match year {
        2024 => 22,
        2025 => 23,
        2026 => 23,
        2027 => 23,
        2028 => 22,
        2029 => 23,
        2030 => 23,
        2031 => 23,
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, 9, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_years_day_2026_present() {
        let holidays = holidays_for_year(2026);
        assert!(holidays
            .iter()
            .any(|(d, _)| *d == ymd(2026, 1, 1)));
    }

    #[test]
    fn golden_week_2026_present() {
        let holidays = holidays_for_year(2026);
        for day in [3, 4, 5] {
            assert!(holidays.iter().any(|(d, _)| *d == ymd(2026, 5, day)));
        }
    }

    #[test]
    fn jan_28_2026_is_not_a_holiday() {
        let holidays = holidays_for_year(2026);
        assert!(!holidays.iter().any(|(d, _)| *d == ymd(2026, 1, 28)));
    }
}
