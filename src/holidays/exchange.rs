//! Exchange-Session Adapter (C3): the authoritative source for "is this
//! market open for trading on date D?".
//!
//! Adapter calls must be non-blocking, so the bitmap of non-session
//! dates is computed once at construction rather than recomputed per
//! query.

use chrono::NaiveDate;
use std::collections::HashSet;

use crate::market::MarketRegistry;
use crate::utils::is_weekend;

/// Trait seam so a host can plug in a different session source (e.g. a
/// real exchange-calendar feed) instead of the bundled rule-table
/// implementation. Initialization may fail; once constructed, queries
/// must not.
pub trait ExchangeSessionSource: Send + Sync {
    /// `true` if `market` runs a trading session on `date`.
    fn is_session(&self, market: &str, date: NaiveDate) -> bool;

    /// All non-session dates for `market` within `[from, to]` inclusive.
    fn non_session_dates(&self, market: &str, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate>;
}

/// The bundled session source: a precomputed bitmap of non-session dates
/// (holiday or weekend) per configured market, built from
/// [`crate::holidays::rules`].
pub struct BitmapExchangeSessionAdapter {
    non_session: HashSet<(String, NaiveDate)>,
}

impl BitmapExchangeSessionAdapter {
    /// Precompute the bitmap for every configured market across
    /// `[min_year, max_year]` inclusive.
    pub fn new(registry: &MarketRegistry, min_year: i32, max_year: i32) -> Self {
        let mut non_session = HashSet::new();

        for market in registry.list_codes() {
            for year in min_year..=max_year {
                for (date, _name) in crate::holidays::rules::holidays_for_year(market, year) {
                    non_session.insert((market.to_string(), date));
                }

                let mut current = chrono::NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
                let end = chrono::NaiveDate::from_ymd_opt(year, 12, 31).unwrap();
                while current <= end {
                    if is_weekend(current) {
                        non_session.insert((market.to_string(), current));
                    }
                    current += chrono::Duration::days(1);
                }
            }
        }

        tracing::info!(
            market_count = registry.len(),
            min_year,
            max_year,
            "exchange-session bitmap precomputed"
        );

        BitmapExchangeSessionAdapter { non_session }
    }
}

impl ExchangeSessionSource for BitmapExchangeSessionAdapter {
    fn is_session(&self, market: &str, date: NaiveDate) -> bool {
        !self.non_session.contains(&(market.to_string(), date))
    }

    fn non_session_dates(&self, market: &str, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .non_session
            .iter()
            .filter(|(m, d)| m == market && *d >= from && *d <= to)
            .map(|(_, d)| *d)
            .collect();
        dates.sort();
        dates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_default;

    #[test]
    fn weekend_is_always_non_session() {
        let registry = load_default();
        let adapter = BitmapExchangeSessionAdapter::new(&registry, 2026, 2026);
        // 2026-01-03 is a Saturday.
        assert!(!adapter.is_session("JP", NaiveDate::from_ymd_opt(2026, 1, 3).unwrap()));
    }

    #[test]
    fn known_holiday_is_non_session() {
        let registry = load_default();
        let adapter = BitmapExchangeSessionAdapter::new(&registry, 2026, 2026);
        assert!(!adapter.is_session("JP", NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
    }

    #[test]
    fn regular_weekday_is_session() {
        let registry = load_default();
        let adapter = BitmapExchangeSessionAdapter::new(&registry, 2026, 2026);
        assert!(adapter.is_session("JP", NaiveDate::from_ymd_opt(2026, 1, 28).unwrap()));
    }

    #[test]
    fn cross_market_holidays_do_not_leak() {
        let registry = load_default();
        let adapter = BitmapExchangeSessionAdapter::new(&registry, 2026, 2026);
        // CN's Spring Festival block does not close HK on the same dates.
        let cn_only_closure = NaiveDate::from_ymd_opt(2026, 10, 5).unwrap();
        assert!(!adapter.is_session("CN", cn_only_closure));
        assert!(adapter.is_session("HK", cn_only_closure));
    }
}
