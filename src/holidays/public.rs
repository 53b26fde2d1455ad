//! Public-Holiday Adapter: name-only holiday lookups used for display and
//! warnings, independent of whether a holiday actually closes a market's
//! exchange session (a half-day observance has a name but does not
//! necessarily appear in the exchange-session bitmap).

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::market::MarketRegistry;

/// Trait seam for a public-holiday name source.
pub trait PublicHolidaySource: Send + Sync {
    /// The holiday's display name on `date` for `market`, if any.
    fn holiday_name(&self, market: &str, date: NaiveDate) -> Option<String>;
}

/// Bundled implementation backed by [`crate::holidays::rules`], precomputed
/// at construction for the same reason the exchange-session bitmap is.
pub struct RuleTablePublicHolidaySource {
    names: HashMap<(String, NaiveDate), &'static str>,
}

impl RuleTablePublicHolidaySource {
    pub fn new(registry: &MarketRegistry, min_year: i32, max_year: i32) -> Self {
        let mut names = HashMap::new();
        for market in registry.list_codes() {
            for year in min_year..=max_year {
                for (date, name) in crate::holidays::rules::holidays_for_year(market, year) {
                    names.insert((market.to_string(), date), name);
                }
            }
        }
        RuleTablePublicHolidaySource { names }
    }
}

impl PublicHolidaySource for RuleTablePublicHolidaySource {
    fn holiday_name(&self, market: &str, date: NaiveDate) -> Option<String> {
        self.names
            .get(&(market.to_string(), date))
            .map(|name| name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_default;

    #[test]
    fn known_holiday_has_a_name() {
        let registry = load_default();
        let source = RuleTablePublicHolidaySource::new(&registry, 2026, 2026);
        assert_eq!(
            source.holiday_name("JP", NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
            Some("New Year's Day".to_string())
        );
    }

    #[test]
    fn ordinary_weekday_has_no_name() {
        let registry = load_default();
        let source = RuleTablePublicHolidaySource::new(&registry, 2026, 2026);
        assert_eq!(
            source.holiday_name("JP", NaiveDate::from_ymd_opt(2026, 1, 28).unwrap()),
            None
        );
    }
}
