//! Calendar Service (C4): trading-day arithmetic and settlement-date
//! resolution, built on top of the Holiday Data Plane (C3).

use chrono::{Duration, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::holidays::HolidayDataPlane;
use crate::market::MarketRegistry;
use crate::request::SettlementDateResult;
use std::sync::Arc;

/// Forward/backward trading-day scans stop after this many steps and
/// report [`EngineError::CalendarScanExceeded`] rather than looping
/// forever against a corrupt or pathologically sparse calendar.
pub const MAX_CALENDAR_SCAN_ITERATIONS: u32 = 30;

/// The result of walking forward N business days from a starting date:
/// the landed-on trading day, how many calendar days that took, and which
/// dates were skipped along the way and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessDayAdvance {
    pub date: NaiveDate,
    pub calendar_days_elapsed: i64,
    pub skipped: Vec<(NaiveDate, String)>,
}

/// The Calendar Service. Cheap to clone: it only holds an `Arc` to the
/// shared registry and data plane.
#[derive(Clone)]
pub struct CalendarService {
    registry: MarketRegistry,
    data_plane: Arc<HolidayDataPlane>,
}

impl CalendarService {
    pub fn new(registry: MarketRegistry, data_plane: Arc<HolidayDataPlane>) -> Self {
        CalendarService {
            registry,
            data_plane,
        }
    }

    /// `true` if `market` runs a trading session on `date`.
    pub fn is_trading_day(&self, market: &str, date: NaiveDate) -> bool {
        self.data_plane.is_trading_day(market, date)
    }

    /// `true` if `market` accepts settlement on `date`. Usually equal to
    /// [`CalendarService::is_trading_day`], but a manual override with
    /// `affects_trading != affects_settlement` can make them diverge.
    pub fn is_settlement_day(&self, market: &str, date: NaiveDate) -> bool {
        self.data_plane.is_settlement_day(market, date)
    }

    /// The holiday name for `market` on `date`, if the data plane
    /// attributes a name to it (weekends carry no name).
    pub fn get_holiday_info(&self, market: &str, date: NaiveDate) -> Option<String> {
        self.data_plane.holiday_fact(market, date).name
    }

    /// The next trading day strictly after `from`, scanning forward.
    pub fn next_trading_day(&self, market: &str, from: NaiveDate) -> EngineResult<NaiveDate> {
        let mut candidate = from + Duration::days(1);
        for _ in 0..MAX_CALENDAR_SCAN_ITERATIONS {
            if self.is_trading_day(market, candidate) {
                return Ok(candidate);
            }
            candidate += Duration::days(1);
        }
        Err(EngineError::CalendarScanExceeded {
            from,
            limit: MAX_CALENDAR_SCAN_ITERATIONS,
        })
    }

    /// The previous trading day strictly before `from`, scanning backward.
    pub fn previous_trading_day(&self, market: &str, from: NaiveDate) -> EngineResult<NaiveDate> {
        let mut candidate = from - Duration::days(1);
        for _ in 0..MAX_CALENDAR_SCAN_ITERATIONS {
            if self.is_trading_day(market, candidate) {
                return Ok(candidate);
            }
            candidate -= Duration::days(1);
        }
        Err(EngineError::CalendarScanExceeded {
            from,
            limit: MAX_CALENDAR_SCAN_ITERATIONS,
        })
    }

    /// All trading days for `market` in `[from, to]` inclusive.
    pub fn trading_days_in_range(&self, market: &str, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        let mut current = from;
        while current <= to {
            if self.is_trading_day(market, current) {
                dates.push(current);
            }
            current += Duration::days(1);
        }
        dates
    }

    /// All non-trading days for `market` in `[from, to]` inclusive.
    pub fn non_trading_days_in_range(&self, market: &str, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        let mut current = from;
        while current <= to {
            if !self.is_trading_day(market, current) {
                dates.push(current);
            }
            current += Duration::days(1);
        }
        dates
    }

    /// Dates in `[from, to]` on which both markets are open for trading.
    pub fn common_trading_days(&self, market_a: &str, market_b: &str, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        let mut current = from;
        while current <= to {
            if self.is_trading_day(market_a, current) && self.is_trading_day(market_b, current) {
                dates.push(current);
            }
            current += Duration::days(1);
        }
        dates
    }

    /// The reason a date is skipped during a business-day walk: the
    /// holiday's name if the data plane attributes one, else a generic
    /// fallback for an unnamed weekend or closure.
    fn skip_reason(&self, market: &str, date: NaiveDate) -> String {
        self.data_plane
            .holiday_fact(market, date)
            .name
            .unwrap_or_else(|| "non-trading day".to_string())
    }

    /// Walk forward `n` trading days from `from` (exclusive), skipping
    /// non-trading days. `n == 0` returns the next trading day
    /// on-or-after `from` itself.
    pub fn advance_business_days(&self, market: &str, from: NaiveDate, n: u8) -> EngineResult<BusinessDayAdvance> {
        let mut current = from;
        let mut calendar_days_elapsed: i64 = 0;
        let mut skipped = Vec::new();

        if !self.is_trading_day(market, current) {
            let mut steps = 0;
            while !self.is_trading_day(market, current) {
                skipped.push((current, self.skip_reason(market, current)));
                current += Duration::days(1);
                calendar_days_elapsed += 1;
                steps += 1;
                if steps > MAX_CALENDAR_SCAN_ITERATIONS {
                    return Err(EngineError::CalendarScanExceeded {
                        from,
                        limit: MAX_CALENDAR_SCAN_ITERATIONS,
                    });
                }
            }
        }

        for _ in 0..n {
            let mut steps = 0;
            loop {
                current += Duration::days(1);
                calendar_days_elapsed += 1;
                steps += 1;
                if self.is_trading_day(market, current) {
                    break;
                }
                skipped.push((current, self.skip_reason(market, current)));
                if steps > MAX_CALENDAR_SCAN_ITERATIONS {
                    return Err(EngineError::CalendarScanExceeded {
                        from,
                        limit: MAX_CALENDAR_SCAN_ITERATIONS,
                    });
                }
            }
        }

        Ok(BusinessDayAdvance {
            date: current,
            calendar_days_elapsed,
            skipped,
        })
    }

    /// Resolve each market's settlement date independently from its own
    /// settlement cycle, plus the first common trading day both can
    /// settle on (the actual settlement date for the trade, if the cycles
    /// don't already land on the same day).
    pub fn resolve_settlement_dates(
        &self,
        trade_date: NaiveDate,
        buy_market: &str,
        sell_market: &str,
    ) -> EngineResult<SettlementDateResult> {
        let buy_cycle = self
            .registry
            .get(buy_market)
            .map(|m| m.settlement_cycle_days)
            .unwrap_or(0);
        let sell_cycle = self
            .registry
            .get(sell_market)
            .map(|m| m.settlement_cycle_days)
            .unwrap_or(0);

        let buy_date = self.advance_business_days(buy_market, trade_date, buy_cycle)?.date;
        let sell_date = self.advance_business_days(sell_market, trade_date, sell_cycle)?.date;

        let common_date = self.common_settlement_date(buy_market, sell_market, buy_date, sell_date)?;

        Ok(SettlementDateResult {
            buy_market_date: buy_date,
            sell_market_date: sell_date,
            common_date,
        })
    }

    /// The earliest date on or after `max(buy_date, sell_date)` on which
    /// both markets are open, or `None` if `buy_date == sell_date` and
    /// that date already works for both.
    pub fn common_settlement_date(
        &self,
        buy_market: &str,
        sell_market: &str,
        buy_date: NaiveDate,
        sell_date: NaiveDate,
    ) -> EngineResult<Option<NaiveDate>> {
        let later = buy_date.max(sell_date);
        if self.is_trading_day(buy_market, later) && self.is_trading_day(sell_market, later) {
            return Ok(Some(later));
        }

        let mut candidate = later;
        for _ in 0..MAX_CALENDAR_SCAN_ITERATIONS {
            candidate += Duration::days(1);
            if self.is_trading_day(buy_market, candidate) && self.is_trading_day(sell_market, candidate) {
                return Ok(Some(candidate));
            }
        }
        Err(EngineError::CalendarScanExceeded {
            from: later,
            limit: MAX_CALENDAR_SCAN_ITERATIONS,
        })
    }

    /// The next date on or after `from` on which both markets are open
    /// for trading, used to suggest a viable trade date when the
    /// requested one fails.
    pub fn find_next_viable_trade_date(&self, market_a: &str, market_b: &str, from: NaiveDate) -> EngineResult<NaiveDate> {
        let mut candidate = from;
        for _ in 0..MAX_CALENDAR_SCAN_ITERATIONS {
            if self.is_trading_day(market_a, candidate) && self.is_trading_day(market_b, candidate) {
                return Ok(candidate);
            }
            candidate += Duration::days(1);
        }
        Err(EngineError::CalendarScanExceeded {
            from,
            limit: MAX_CALENDAR_SCAN_ITERATIONS,
        })
    }
}
