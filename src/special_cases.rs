//! Special-Cases Advisor (C7): soft, advisory warnings that don't change
//! the settlement verdict but are worth surfacing to a caller — typhoon
//! season in Hong Kong and Taiwan, proximity to Lunar New Year closures,
//! and known half-day sessions.

use chrono::{Datelike, NaiveDate};

use crate::holidays::rules::lunar_new_year_day1;

/// A single advisory note, not a hard failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialCondition {
    pub market: String,
    pub note: String,
}

/// Markets that close on short notice for tropical storms.
const TYPHOON_PRONE_MARKETS: &[&str] = &["HK", "TW"];

/// Typhoon season runs roughly June through October in the Western
/// Pacific; this is advisory, not a closure rule (see [`crate::holidays`]
/// for actual closures, including any manual override recorded for a
/// specific signal).
fn is_typhoon_season(date: NaiveDate) -> bool {
    (6..=10).contains(&date.month())
}

/// Known half-days with reduced trading hours, not captured by the
/// holiday rule tables since the market is still open.
pub fn known_half_day(date: NaiveDate) -> Option<&'static str> {
    if date.month() == 12 && date.day() == 24 {
        return Some("Christmas Eve");
    }
    if date.month() == 12 && date.day() == 31 {
        return Some("New Year's Eve");
    }
    if let Some(lny) = lunar_new_year_day1(date.year()) {
        if date == lny - chrono::Duration::days(1) {
            return Some("Lunar New Year's Eve");
        }
    }
    None
}

/// Advisory conditions for `market` on `date`: none of these affect
/// [`crate::request::SettlementStatus`]; they are surfaced alongside it.
pub fn check_special_conditions(market: &str, date: NaiveDate) -> Vec<SpecialCondition> {
    let mut conditions = Vec::new();

    if TYPHOON_PRONE_MARKETS.contains(&market) && is_typhoon_season(date) {
        conditions.push(SpecialCondition {
            market: market.to_string(),
            note: "trade date falls within typhoon season; unscheduled closures are possible"
                .to_string(),
        });
    }

    if let Some(lny) = lunar_new_year_day1(date.year()) {
        let days_from_lny = (date - lny).num_days();
        if (-7..=14).contains(&days_from_lny) {
            conditions.push(SpecialCondition {
                market: market.to_string(),
                note: "trade date falls near Lunar New Year; extended regional closures are common"
                    .to_string(),
            });
        }
    }

    if let Some(name) = known_half_day(date) {
        conditions.push(SpecialCondition {
            market: market.to_string(),
            note: format!("{name} is a known half-day; trading hours are reduced"),
        });
    }

    conditions
}

/// Warnings specific to a market pair around the trade and settlement
/// dates, beyond what either market's own [`check_special_conditions`]
/// would surface individually. Currently models the HK/CN Lunar New Year
/// corridor, where the two markets' closure blocks rarely line up.
pub fn cross_market_warnings(
    market_a: &str,
    market_b: &str,
    trade_date: NaiveDate,
    settlement_date: Option<NaiveDate>,
) -> Vec<String> {
    let mut warnings = Vec::new();

    let pair = {
        let mut codes = [market_a, market_b];
        codes.sort_unstable();
        codes
    };
    if pair == ["CN", "HK"] {
        if let Some(lny) = lunar_new_year_day1(trade_date.year()) {
            let near_trade = (-7..=14).contains(&(trade_date - lny).num_days());
            let near_settlement = settlement_date
                .map(|d| (-7..=14).contains(&(d - lny).num_days()))
                .unwrap_or(false);
            if near_trade || near_settlement {
                warnings.push(
                    "HK and mainland China observe Lunar New Year on different closure \
                     schedules; settlement near this period is more likely to slip"
                        .to_string(),
                );
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hk_gets_typhoon_warning_in_july() {
        let conditions = check_special_conditions("HK", NaiveDate::from_ymd_opt(2026, 7, 20).unwrap());
        assert!(conditions.iter().any(|c| c.note.contains("typhoon")));
    }

    #[test]
    fn jp_gets_no_typhoon_warning() {
        let conditions = check_special_conditions("JP", NaiveDate::from_ymd_opt(2026, 7, 20).unwrap());
        assert!(!conditions.iter().any(|c| c.note.contains("typhoon")));
    }

    #[test]
    fn hk_cn_pair_warns_near_lunar_new_year() {
        let trade_date = NaiveDate::from_ymd_opt(2026, 2, 16).unwrap();
        let warnings = cross_market_warnings("HK", "CN", trade_date, None);
        assert!(!warnings.is_empty());
    }

    #[test]
    fn hk_jp_pair_never_warns() {
        let trade_date = NaiveDate::from_ymd_opt(2026, 2, 16).unwrap();
        let warnings = cross_market_warnings("HK", "JP", trade_date, None);
        assert!(warnings.is_empty());
    }

    #[test]
    fn christmas_eve_is_a_known_half_day() {
        assert_eq!(
            known_half_day(NaiveDate::from_ymd_opt(2026, 12, 24).unwrap()),
            Some("Christmas Eve")
        );
    }

    #[test]
    fn new_years_eve_is_a_known_half_day() {
        assert_eq!(
            known_half_day(NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()),
            Some("New Year's Eve")
        );
    }

    #[test]
    fn lunar_new_years_eve_is_a_known_half_day() {
        let lny = lunar_new_year_day1(2026).unwrap();
        assert_eq!(
            known_half_day(lny - chrono::Duration::days(1)),
            Some("Lunar New Year's Eve")
        );
    }

    #[test]
    fn ordinary_day_is_not_a_known_half_day() {
        assert_eq!(known_half_day(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()), None);
    }

    #[test]
    fn check_special_conditions_surfaces_known_half_day() {
        let conditions = check_special_conditions("JP", NaiveDate::from_ymd_opt(2026, 12, 24).unwrap());
        assert!(conditions.iter().any(|c| c.note.contains("half-day")));
    }
}
