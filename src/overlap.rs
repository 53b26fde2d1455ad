//! Overlap Calculator (C5): the trading-hour windows, in UTC, during
//! which both markets in a pair are simultaneously open on a given date.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::clock;
use crate::error::EngineResult;
use crate::holidays::HolidayDataPlane;
use crate::market::Market;

/// One UTC interval during which both markets' sessions are open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapWindow {
    pub date: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

/// Needs the Holiday Data Plane to rule out non-trading days before ever
/// computing session geometry; every method takes already-resolved
/// [`Market`] values so the caller (the Settlement Engine) owns
/// market-code validation.
#[derive(Clone)]
pub struct OverlapCalculator {
    data_plane: Arc<HolidayDataPlane>,
}

impl OverlapCalculator {
    pub fn new(data_plane: Arc<HolidayDataPlane>) -> Self {
        OverlapCalculator { data_plane }
    }

    /// All overlap windows between `market_a` and `market_b` on `date`,
    /// sorted by start time. Empty if either market is not a trading day
    /// on `date`. Otherwise each market's trading hours are first
    /// materialized into one or two UTC intervals (splitting on a lunch
    /// break), then every pair of intervals is intersected under
    /// half-open `[start, end)` semantics.
    pub fn overlaps_on(&self, market_a: &Market, market_b: &Market, date: NaiveDate) -> EngineResult<Vec<OverlapWindow>> {
        if !self.data_plane.is_trading_day(&market_a.code, date)
            || !self.data_plane.is_trading_day(&market_b.code, date)
        {
            return Ok(Vec::new());
        }

        let intervals_a = clock::session_intervals(date, &market_a.trading_hours, market_a.timezone)?;
        let intervals_b = clock::session_intervals(date, &market_b.trading_hours, market_b.timezone)?;

        let mut windows = Vec::new();
        for &(a_start, a_end) in &intervals_a {
            for &(b_start, b_end) in &intervals_b {
                let start = a_start.max(b_start);
                let end = a_end.min(b_end);
                if start < end {
                    windows.push(OverlapWindow {
                        date,
                        start,
                        end,
                        duration_minutes: (end - start).num_minutes(),
                    });
                }
            }
        }

        windows.sort_by_key(|w| w.start);
        Ok(windows)
    }

    /// Total overlap minutes between the two markets on `date`.
    pub fn overlap_minutes_on(&self, market_a: &Market, market_b: &Market, date: NaiveDate) -> EngineResult<i64> {
        Ok(self
            .overlaps_on(market_a, market_b, date)?
            .iter()
            .map(|w| w.duration_minutes)
            .sum())
    }
}
