//! Property-style checks on the Calendar Service: things that must hold
//! for any market and any date, not just the scenario-specific examples.

use chrono::{Datelike, NaiveDate};
use settlement_feasibility_engine::config::load_default;
use settlement_feasibility_engine::holidays::{
    BitmapExchangeSessionAdapter, ExchangeSessionSource, HolidayDataPlane, ManualOverrideStore,
    RuleTablePublicHolidaySource,
};
use settlement_feasibility_engine::CalendarService;
use std::sync::Arc;

fn calendar_for_2026() -> CalendarService {
    let registry = load_default();
    let exchange: Arc<dyn ExchangeSessionSource> =
        Arc::new(BitmapExchangeSessionAdapter::new(&registry, 2026, 2026));
    let public = Arc::new(RuleTablePublicHolidaySource::new(&registry, 2026, 2026));
    let manual = Arc::new(ManualOverrideStore::new());
    let data_plane = Arc::new(HolidayDataPlane::new(exchange, public, manual));
    CalendarService::new(registry, data_plane)
}

#[test]
fn is_trading_day_is_deterministic() {
    let calendar = calendar_for_2026();
    let date = NaiveDate::from_ymd_opt(2026, 4, 15).unwrap();
    let first = calendar.is_trading_day("JP", date);
    let second = calendar.is_trading_day("JP", date);
    assert_eq!(first, second);
}

#[test]
fn every_saturday_and_sunday_in_2026_is_a_non_trading_day() {
    let calendar = calendar_for_2026();
    let mut date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
    while date <= end {
        if matches!(date.weekday(), chrono::Weekday::Sat | chrono::Weekday::Sun) {
            assert!(!calendar.is_trading_day("JP", date), "{date} should not be a trading day");
        }
        date += chrono::Duration::days(1);
    }
}

#[test]
fn next_trading_day_is_always_strictly_after_its_argument() {
    let calendar = calendar_for_2026();
    for day in 1..28 {
        let date = NaiveDate::from_ymd_opt(2026, 2, day).unwrap();
        let next = calendar.next_trading_day("HK", date).unwrap();
        assert!(next > date);
    }
}

#[test]
fn previous_trading_day_is_always_strictly_before_its_argument() {
    let calendar = calendar_for_2026();
    for day in 1..28 {
        let date = NaiveDate::from_ymd_opt(2026, 2, day).unwrap();
        let previous = calendar.previous_trading_day("HK", date).unwrap();
        assert!(previous < date);
    }
}

#[test]
fn advancing_zero_business_days_lands_on_or_after_the_start_date() {
    let calendar = calendar_for_2026();
    let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(); // a Friday
    let advanced = calendar.advance_business_days("JP", date, 0).unwrap().date;
    assert!(advanced >= date);
    assert!(calendar.is_trading_day("JP", advanced));
}

#[test]
fn advancing_n_business_days_passes_through_exactly_n_trading_days() {
    let calendar = calendar_for_2026();
    let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    let advanced = calendar.advance_business_days("JP", start, 3).unwrap().date;
    let trading_days_between = calendar
        .trading_days_in_range("JP", start, advanced)
        .len();
    // start itself plus 3 more trading days.
    assert_eq!(trading_days_between, 4);
}

#[test]
fn common_trading_days_is_a_subset_of_each_market_individually() {
    let calendar = calendar_for_2026();
    let from = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
    let to = NaiveDate::from_ymd_opt(2026, 2, 28).unwrap();
    let common = calendar.common_trading_days("HK", "CN", from, to);
    let hk_days = calendar.trading_days_in_range("HK", from, to);
    let cn_days = calendar.trading_days_in_range("CN", from, to);
    for date in &common {
        assert!(hk_days.contains(date));
        assert!(cn_days.contains(date));
    }
}

#[test]
fn trading_and_non_trading_days_partition_the_range() {
    let calendar = calendar_for_2026();
    let from = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    let to = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
    let trading = calendar.trading_days_in_range("SG", from, to).len();
    let non_trading = calendar.non_trading_days_in_range("SG", from, to).len();
    let total_days = (to - from).num_days() as usize + 1;
    assert_eq!(trading + non_trading, total_days);
}
