//! Shanghai Stock Exchange holiday rules.
//!
//! Mainland China's public holidays are announced year by year as
//! multi-day blocks (often with weekend work-swaps folded in to create a
//! contiguous break), not derived from a fixed rule. This module
//! reflects that: most holidays here are closure *blocks*, not single
//! dates.

use super::lunar;
use chrono::NaiveDate;

pub fn holidays_for_year(year: i32) -> Vec<(NaiveDate, &'static str)> {
    let mut holidays = Vec::new();

    push_block(&mut holidays, ymd(year, 1, 1), ymd(year, 1, 1), "New Year's Day");

    if let Some((start, end)) = lunar::china_spring_festival_block(year) {
        push_block(&mut holidays, start, end, "Spring Festival");
    }

    if let Some(date) = qing_ming_festival(year) {
        push_block(&mut holidays, date, date, "Qingming Festival");
    }

    push_block(&mut holidays, ymd(year, 5, 1), ymd(year, 5, 3), "Labour Day");

    if let Some(date) = lunar::dragon_boat_festival(year) {
        push_block(&mut holidays, date, date, "Dragon Boat Festival");
    }
    if let Some(date) = lunar::mid_autumn_festival(year) {
        push_block(&mut holidays, date, date, "Mid-Autumn Festival");
    }

    push_block(&mut holidays, ymd(year, 10, 1), ymd(year, 10, 7), "National Day Golden Week");

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

fn push_block(holidays: &mut Vec<(NaiveDate, &'static str)>, start: NaiveDate, end: NaiveDate, name: &'static str) {
    let mut current = start;
    while current <= end {
        holidays.push((current, name));
        current += chrono::Duration::days(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spring_festival_block_2026_covers_feb_16_to_24() {
        let holidays = holidays_for_year(2026);
        for day in 16..=24 {
            assert!(holidays.iter().any(|(d, _)| *d == ymd(2026, 2, day)));
        }
        assert!(!holidays.iter().any(|(d, _)| *d == ymd(2026, 2, 25)));
    }
}
