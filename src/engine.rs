//! Settlement Engine (C6): orchestrates the Market Registry, Calendar
//! Service, Overlap Calculator, and Holiday Data Plane into a single
//! settlement-feasibility verdict.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use std::sync::Arc;

use crate::calendar::CalendarService;
use crate::clock;
use crate::error::{EngineResult, RequestError, RequestResult};
use crate::holidays::HolidayDataPlane;
use crate::market::MarketRegistry;
use crate::overlap::OverlapCalculator;
use crate::request::{
    CutOffCheck, Deadline, DeadlineKind, MarketPairComparison, MarketStatus,
    SettlementCheckRequest, SettlementDateResult, SettlementResult, SettlementStatus,
};
use crate::special_cases;

/// A cut-off crossed with less than this much margin downgrades a
/// settlement from LIKELY to AT_RISK even though it hasn't technically
/// passed yet.
const CUT_OFF_SAFETY_MARGIN_MINUTES: i64 = 60;

/// The Settlement Engine. Holds `Arc`s to its collaborators so cloning a
/// context is cheap and every request handler sees the same immutable
/// configuration and the same (possibly mutating) manual-override store.
#[derive(Clone)]
pub struct SettlementEngine {
    registry: MarketRegistry,
    calendar: Arc<CalendarService>,
    overlap: Arc<OverlapCalculator>,
    data_plane: Arc<HolidayDataPlane>,
}

impl SettlementEngine {
    pub fn new(
        registry: MarketRegistry,
        calendar: Arc<CalendarService>,
        overlap: Arc<OverlapCalculator>,
        data_plane: Arc<HolidayDataPlane>,
    ) -> Self {
        SettlementEngine {
            registry,
            calendar,
            overlap,
            data_plane,
        }
    }

    /// Evaluate whether `request` will settle. Never returns `Err` for an
    /// input problem: an unknown market code or `buy == sell` yields a
    /// fully populated UNLIKELY [`SettlementResult`] naming the bad input,
    /// not a rejected call. Only an internal invariant breach (e.g. a
    /// calendar scan exceeding its iteration cap) propagates as `Err`.
    pub fn check_settlement(&self, request: &SettlementCheckRequest) -> EngineResult<SettlementResult> {
        let buy = self.registry.get(&request.buy_market).cloned();
        let sell = self.registry.get(&request.sell_market).cloned();

        let (buy, sell) = match (buy, sell) {
            (None, _) => {
                return Ok(self.rejected_request_result(
                    request,
                    RequestError::UnknownMarket(request.buy_market.clone()),
                ));
            }
            (_, None) => {
                return Ok(self.rejected_request_result(
                    request,
                    RequestError::UnknownMarket(request.sell_market.clone()),
                ));
            }
            (Some(buy), Some(sell)) if buy.code == sell.code => {
                return Ok(self.rejected_request_result(request, RequestError::SameMarket(buy.code)));
            }
            (Some(buy), Some(sell)) => (buy, sell),
        };

        let mut warnings = Vec::new();
        let mut recommendations = Vec::new();

        let buy_trading = self.calendar.is_trading_day(&buy.code, request.trade_date);
        let sell_trading = self.calendar.is_trading_day(&sell.code, request.trade_date);

        for (market, is_trading) in [(&buy, buy_trading), (&sell, sell_trading)] {
            if !is_trading {
                if let Some(name) = self.calendar.get_holiday_info(&market.code, request.trade_date) {
                    warnings.push(format!("{}: {}", market.code, name));
                } else {
                    warnings.push(format!("{}: market closed (weekend)", market.code));
                }
            }
        }

        let trade_date_is_viable = buy_trading && sell_trading;
        if !trade_date_is_viable {
            if let Ok(next) = self
                .calendar
                .find_next_viable_trade_date(&buy.code, &sell.code, request.trade_date)
            {
                recommendations.push(format!(
                    "next date both markets are open for trading: {next}"
                ));
            }
        }

        let settlement = self
            .calendar
            .resolve_settlement_dates(request.trade_date, &buy.code, &sell.code)?;

        let settlement_extended = settlement
            .common_date
            .map(|common| common > settlement.buy_market_date.max(settlement.sell_market_date))
            .unwrap_or(false);

        let mut cut_off_checks = Vec::new();
        let mut deadlines = Vec::new();

        for market in [&buy, &sell] {
            if let Ok(close_at) = clock::to_utc(request.trade_date, market.trading_hours.close, market.timezone) {
                deadlines.push(self.build_deadline(
                    DeadlineKind::MarketClose,
                    &market.code,
                    close_at,
                    format!("{} market close", market.code),
                    request.execution_time,
                    market.timezone,
                ));
            }

            if let Some(cut_off_time) = market.depository_cut_off {
                let Some(execution_time) = request.execution_time else {
                    continue;
                };
                let cut_off_at = clock::to_utc(request.trade_date, cut_off_time, market.timezone)
                    .unwrap_or(execution_time);
                let is_passed = execution_time >= cut_off_at;
                let time_remaining_minutes = if is_passed {
                    None
                } else {
                    Some((cut_off_at - execution_time).num_minutes())
                };
                cut_off_checks.push(CutOffCheck {
                    market: market.code.clone(),
                    cut_off: cut_off_at,
                    is_passed,
                    time_remaining_minutes,
                });
                deadlines.push(self.build_deadline(
                    DeadlineKind::DepositoryCutOff,
                    &market.code,
                    cut_off_at,
                    format!("{} depository cut-off", market.code),
                    Some(execution_time),
                    market.timezone,
                ));
            }
        }
        deadlines.sort_by_key(|d| d.at);

        let overlap_windows = self
            .overlap
            .overlaps_on(&buy, &sell, request.trade_date)
            .unwrap_or_default();

        for condition in special_cases::check_special_conditions(&buy.code, request.trade_date)
            .into_iter()
            .chain(special_cases::check_special_conditions(&sell.code, request.trade_date))
        {
            warnings.push(format!("{}: {}", condition.market, condition.note));
        }
        warnings.extend(special_cases::cross_market_warnings(
            &buy.code,
            &sell.code,
            request.trade_date,
            settlement.common_date,
        ));

        let any_cut_off_passed = cut_off_checks.iter().any(|c| c.is_passed);
        let any_cut_off_close = cut_off_checks.iter().any(|c| {
            c.time_remaining_minutes
                .map(|m| m <= CUT_OFF_SAFETY_MARGIN_MINUTES)
                .unwrap_or(false)
        });

        let status = if !trade_date_is_viable || any_cut_off_passed {
            SettlementStatus::Unlikely
        } else if any_cut_off_close || settlement_extended {
            SettlementStatus::AtRisk
        } else {
            SettlementStatus::Likely
        };

        let message = status_message(status, &buy.code, &sell.code, &settlement.common_date);

        Ok(SettlementResult {
            status,
            trade_date: request.trade_date,
            settlement,
            cut_off_checks,
            deadlines,
            overlap_windows,
            warnings,
            recommendations,
            message,
        })
    }

    /// A single market's trading state as of `at`.
    pub fn get_market_status(&self, market_code: &str, at: DateTime<Utc>) -> RequestResult<MarketStatus> {
        let market = self
            .registry
            .get(market_code)
            .ok_or_else(|| RequestError::UnknownMarket(market_code.to_string()))?;

        let local = clock::from_utc(at, market.timezone);
        let today = local.date_naive();
        let is_trading_day = self.calendar.is_trading_day(market_code, today);

        let is_open_now = is_trading_day
            && self
                .engine_session_intervals(market, today)
                .iter()
                .any(|&(start, end)| at >= start && at < end);

        let session_name = if is_trading_day {
            market.trading_hours.session_name_at(local.time())
        } else {
            crate::market::SessionName::Closed
        };

        let next_open = self.next_session_boundary(market, today, at, true);
        let next_close = self.next_session_boundary(market, today, at, false);

        let cut_off_state = market.depository_cut_off.and_then(|cut_off_time| {
            let cut_off_at = clock::to_utc(today, cut_off_time, market.timezone).ok()?;
            let is_passed = at >= cut_off_at;
            let time_remaining_minutes = if is_passed {
                None
            } else {
                Some((cut_off_at - at).num_minutes())
            };
            Some(CutOffCheck {
                market: market.code.clone(),
                cut_off: cut_off_at,
                is_passed,
                time_remaining_minutes,
            })
        });

        let next_boundary = if is_open_now { next_close } else { next_open };
        let time_until_text = next_boundary.map(|boundary| clock::format_duration(boundary - at));

        Ok(MarketStatus {
            market: market.code.clone(),
            is_trading_day,
            is_open_now,
            local_time: local.time(),
            session_name,
            next_open,
            next_close,
            cut_off_state,
            time_until_text,
        })
    }

    /// Status for both sides of a pair, plus today's overlap windows.
    pub fn get_market_pair_comparison(
        &self,
        market_a: &str,
        market_b: &str,
        at: DateTime<Utc>,
    ) -> RequestResult<MarketPairComparison> {
        let buy = self.get_market_status(market_a, at)?;
        let sell = self.get_market_status(market_b, at)?;

        let market_a = self.registry.get(market_a).expect("validated above");
        let market_b = self.registry.get(market_b).expect("validated above");
        let today = clock::from_utc(at, market_a.timezone).date_naive();
        let overlap_today = self.overlap.overlaps_on(market_a, market_b, today).unwrap_or_default();

        Ok(MarketPairComparison {
            buy,
            sell,
            overlap_today,
        })
    }

    /// Build the UNLIKELY result returned for a request that fails
    /// market-code validation, naming the offending market/reason instead
    /// of rejecting the call.
    fn rejected_request_result(&self, request: &SettlementCheckRequest, reason: RequestError) -> SettlementResult {
        let message = format!("settlement check rejected: {reason}");
        SettlementResult {
            status: SettlementStatus::Unlikely,
            trade_date: request.trade_date,
            settlement: SettlementDateResult {
                buy_market_date: request.trade_date,
                sell_market_date: request.trade_date,
                common_date: None,
            },
            cut_off_checks: Vec::new(),
            deadlines: Vec::new(),
            overlap_windows: Vec::new(),
            warnings: vec![reason.to_string()],
            recommendations: Vec::new(),
            message,
        }
    }

    /// Assemble a [`Deadline`], deriving `local_time`/`is_passed`/
    /// `time_remaining_text` from `execution_time` (the request's "now").
    /// Without an execution time there is nothing to compare against, so
    /// the deadline is reported as not yet passed with no countdown.
    fn build_deadline(
        &self,
        kind: DeadlineKind,
        market_code: &str,
        at: DateTime<Utc>,
        description: String,
        execution_time: Option<DateTime<Utc>>,
        zone: Tz,
    ) -> Deadline {
        let local_time = clock::from_utc(at, zone).time();
        let (is_passed, time_remaining_text) = match execution_time {
            Some(exec) => {
                let passed = exec >= at;
                let remaining = if passed { None } else { Some(clock::format_duration(at - exec)) };
                (passed, remaining)
            }
            None => (false, None),
        };

        Deadline {
            kind,
            market: market_code.to_string(),
            at,
            local_time,
            is_passed,
            time_remaining_text,
            description,
        }
    }

    fn engine_session_intervals(&self, market: &crate::market::Market, date: chrono::NaiveDate) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
        clock::session_intervals(date, &market.trading_hours, market.timezone).unwrap_or_default()
    }

    fn next_session_boundary(
        &self,
        market: &crate::market::Market,
        today: chrono::NaiveDate,
        at: DateTime<Utc>,
        opening: bool,
    ) -> Option<DateTime<Utc>> {
        let mut date = today;
        for _ in 0..crate::calendar::MAX_CALENDAR_SCAN_ITERATIONS {
            if self.calendar.is_trading_day(&market.code, date) {
                for &(start, end) in &self.engine_session_intervals(market, date) {
                    let boundary = if opening { start } else { end };
                    if boundary > at {
                        return Some(boundary);
                    }
                }
            }
            date += Duration::days(1);
        }
        None
    }

    pub fn calendar(&self) -> &Arc<CalendarService> {
        &self.calendar
    }

    pub fn data_plane(&self) -> &Arc<HolidayDataPlane> {
        &self.data_plane
    }
}

fn status_message(
    status: SettlementStatus,
    buy: &str,
    sell: &str,
    common_date: &Option<chrono::NaiveDate>,
) -> String {
    match status {
        SettlementStatus::Likely => match common_date {
            Some(date) => format!("{buy}/{sell} trade is likely to settle on {date}"),
            None => format!("{buy}/{sell} trade is likely to settle on schedule"),
        },
        SettlementStatus::AtRisk => {
            format!("{buy}/{sell} trade settlement is at risk; review the listed deadlines")
        }
        SettlementStatus::Unlikely => {
            format!("{buy}/{sell} trade is unlikely to settle on the requested trade date")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::InstrumentType;
    use crate::EngineContext;
    use chrono::{NaiveDate, NaiveTime, TimeZone};

    fn ctx() -> EngineContext {
        EngineContext::with_default_markets()
    }

    fn request(
        trade_date: NaiveDate,
        buy: &str,
        sell: &str,
        execution_time: Option<DateTime<Utc>>,
    ) -> SettlementCheckRequest {
        SettlementCheckRequest {
            trade_date,
            buy_market: buy.to_string(),
            sell_market: sell.to_string(),
            instrument_type: InstrumentType::Equity,
            execution_time,
        }
    }

    #[test]
    fn scenario_s1_is_likely() {
        let ctx = ctx();
        let trade_date = NaiveDate::from_ymd_opt(2026, 1, 28).unwrap();
        let execution_time = clock::to_utc(
            trade_date,
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            chrono_tz::Asia::Tokyo,
        )
        .unwrap();
        let result = ctx
            .engine()
            .check_settlement(&request(trade_date, "HK", "JP", Some(execution_time)))
            .unwrap();
        assert_eq!(result.status, SettlementStatus::Likely);
        assert_eq!(result.settlement.common_date, Some(NaiveDate::from_ymd_opt(2026, 1, 29).unwrap()));
    }

    #[test]
    fn scenario_s2_new_years_day_is_unlikely() {
        let ctx = ctx();
        let trade_date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let result = ctx
            .engine()
            .check_settlement(&request(trade_date, "HK", "JP", None))
            .unwrap();
        assert_eq!(result.status, SettlementStatus::Unlikely);
        assert!(result.warnings.iter().any(|w| w.contains("JP") && w.to_lowercase().contains("new year")));
    }

    #[test]
    fn scenario_s3_cn_closure_is_unlikely_with_next_date_recommendation() {
        let ctx = ctx();
        let trade_date = NaiveDate::from_ymd_opt(2026, 2, 16).unwrap();
        let result = ctx
            .engine()
            .check_settlement(&request(trade_date, "HK", "CN", None))
            .unwrap();
        assert_eq!(result.status, SettlementStatus::Unlikely);
        assert!(!result.recommendations.is_empty());
    }

    #[test]
    fn scenario_s4_after_cut_off_is_unlikely() {
        let ctx = ctx();
        let trade_date = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
        let execution_time = clock::to_utc(
            trade_date,
            NaiveTime::from_hms_opt(16, 30, 0).unwrap(),
            chrono_tz::Asia::Hong_Kong,
        )
        .unwrap();
        let result = ctx
            .engine()
            .check_settlement(&request(trade_date, "JP", "HK", Some(execution_time)))
            .unwrap();
        assert_eq!(result.status, SettlementStatus::Unlikely);
        assert!(result
            .cut_off_checks
            .iter()
            .any(|c| c.market == "HK" && c.is_passed));
    }

    #[test]
    fn scenario_s5_before_cut_off_with_thin_margin_is_at_risk() {
        let ctx = ctx();
        let trade_date = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
        let execution_time = clock::to_utc(
            trade_date,
            NaiveTime::from_hms_opt(15, 30, 0).unwrap(),
            chrono_tz::Asia::Hong_Kong,
        )
        .unwrap();
        let result = ctx
            .engine()
            .check_settlement(&request(trade_date, "JP", "HK", Some(execution_time)))
            .unwrap();
        assert_eq!(result.status, SettlementStatus::AtRisk);
    }

    #[test]
    fn scenario_s6_manual_override_is_unlikely() {
        let ctx = ctx();
        let date = NaiveDate::from_ymd_opt(2026, 7, 20).unwrap();
        ctx.data_plane()
            .manual_overrides()
            .record(crate::holidays::ManualOverride {
                market: "HK".to_string(),
                date,
                kind: crate::holidays::OverrideKind::Closure,
                name: None,
                reason: "Typhoon Signal 8".to_string(),
                affects_trading: true,
                affects_settlement: true,
                recorded_at: Utc.with_ymd_and_hms(2026, 7, 18, 0, 0, 0).unwrap(),
            })
            .unwrap();

        let result = ctx
            .engine()
            .check_settlement(&request(date, "HK", "JP", None))
            .unwrap();
        assert_eq!(result.status, SettlementStatus::Unlikely);
        assert!(result.warnings.iter().any(|w| w.contains("Typhoon Signal 8")));
    }

    #[test]
    fn unknown_market_is_unlikely_not_an_error() {
        let ctx = ctx();
        let trade_date = NaiveDate::from_ymd_opt(2026, 1, 28).unwrap();
        let result = ctx
            .engine()
            .check_settlement(&request(trade_date, "ZZ", "JP", None))
            .unwrap();
        assert_eq!(result.status, SettlementStatus::Unlikely);
        assert!(result.warnings.iter().any(|w| w.contains("ZZ")));
    }

    #[test]
    fn same_market_is_unlikely_not_an_error() {
        let ctx = ctx();
        let trade_date = NaiveDate::from_ymd_opt(2026, 1, 28).unwrap();
        let result = ctx
            .engine()
            .check_settlement(&request(trade_date, "JP", "JP", None))
            .unwrap();
        assert_eq!(result.status, SettlementStatus::Unlikely);
        assert!(result.warnings.iter().any(|w| w.contains("JP")));
    }

    #[test]
    fn market_close_deadlines_are_emitted_for_both_markets() {
        let ctx = ctx();
        let trade_date = NaiveDate::from_ymd_opt(2026, 1, 28).unwrap();
        let result = ctx
            .engine()
            .check_settlement(&request(trade_date, "HK", "JP", None))
            .unwrap();
        for code in ["HK", "JP"] {
            assert!(result
                .deadlines
                .iter()
                .any(|d| d.market == code && d.kind == DeadlineKind::MarketClose));
        }
    }

    #[test]
    fn passed_deadlines_never_carry_a_time_remaining_text() {
        let ctx = ctx();
        let trade_date = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
        let execution_time = clock::to_utc(
            trade_date,
            NaiveTime::from_hms_opt(16, 30, 0).unwrap(),
            chrono_tz::Asia::Hong_Kong,
        )
        .unwrap();
        let result = ctx
            .engine()
            .check_settlement(&request(trade_date, "JP", "HK", Some(execution_time)))
            .unwrap();
        for deadline in result.deadlines.iter().filter(|d| d.is_passed) {
            assert!(deadline.time_remaining_text.is_none());
        }
    }
}
