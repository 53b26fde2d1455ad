//! Request and result types for the Settlement Engine (C6). These are the
//! crate's public data model: what a caller sends in, and what comes back.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RequestError, RequestResult};
use crate::overlap::OverlapWindow;

/// The kind of instrument being traded. Settlement-cycle and cut-off
/// rules are the same across instrument types in this engine; the field
/// exists so a caller's downstream reporting can slice by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentType {
    Equity,
    Etf,
    Bond,
}

impl InstrumentType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "equity" => Some(InstrumentType::Equity),
            "etf" => Some(InstrumentType::Etf),
            "bond" => Some(InstrumentType::Bond),
            _ => None,
        }
    }
}

/// A request to evaluate whether a cross-market trade will settle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementCheckRequest {
    pub trade_date: NaiveDate,
    pub buy_market: String,
    pub sell_market: String,
    pub instrument_type: InstrumentType,
    /// When the trade was (or will be) executed, as a UTC instant. `None`
    /// means the cut-off checks are skipped, since there is nothing to
    /// compare a cut-off time against.
    pub execution_time: Option<DateTime<Utc>>,
}

impl SettlementCheckRequest {
    /// Build a request from loosely-typed caller input (e.g. a parsed
    /// HTTP body), validating the instrument type string up front.
    ///
    /// This is the only place [`RequestError::UnknownInstrumentType`] is
    /// raised; market codes and buy == sell are validated by
    /// [`crate::engine::SettlementEngine::check_settlement`] itself and
    /// folded into the result's status rather than rejected here.
    pub fn try_new(
        trade_date: NaiveDate,
        buy_market: impl Into<String>,
        sell_market: impl Into<String>,
        instrument_type: &str,
        execution_time: Option<DateTime<Utc>>,
    ) -> RequestResult<Self> {
        let instrument_type = InstrumentType::parse(instrument_type)
            .ok_or_else(|| RequestError::UnknownInstrumentType(instrument_type.to_string()))?;
        Ok(SettlementCheckRequest {
            trade_date,
            buy_market: buy_market.into(),
            sell_market: sell_market.into(),
            instrument_type,
            execution_time,
        })
    }
}

/// The three-way settlement feasibility verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    Likely,
    AtRisk,
    Unlikely,
}

/// What kind of deadline a [`Deadline`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineKind {
    DepositoryCutOff,
    MarketClose,
    InstructionSubmission,
    TradeConfirmation,
    SettlementCutOff,
}

/// A single named deadline relevant to a settlement check, attributed to
/// the market that imposes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
    pub kind: DeadlineKind,
    pub market: String,
    pub at: DateTime<Utc>,
    pub local_time: NaiveTime,
    pub is_passed: bool,
    /// Text like `"2h 15m"` until `at`, as seen from the request's
    /// execution time. Always `None` once `is_passed` is `true`.
    pub time_remaining_text: Option<String>,
    pub description: String,
}

/// The result of comparing an execution time against one market's
/// depository cut-off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutOffCheck {
    pub market: String,
    pub cut_off: DateTime<Utc>,
    pub is_passed: bool,
    /// Minutes remaining before `cut_off`, as seen from the request's
    /// execution time. `None` once `is_passed` is `true`.
    pub time_remaining_minutes: Option<i64>,
}

/// The settlement date resolved independently in each market, plus the
/// common date both sides can actually settle on, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementDateResult {
    pub buy_market_date: NaiveDate,
    pub sell_market_date: NaiveDate,
    pub common_date: Option<NaiveDate>,
}

/// The full outcome of a settlement feasibility check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementResult {
    pub status: SettlementStatus,
    pub trade_date: NaiveDate,
    pub settlement: SettlementDateResult,
    pub cut_off_checks: Vec<CutOffCheck>,
    pub deadlines: Vec<Deadline>,
    pub overlap_windows: Vec<OverlapWindow>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
    pub message: String,
}

/// A single market's trading state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketStatus {
    pub market: String,
    pub is_trading_day: bool,
    pub is_open_now: bool,
    pub local_time: NaiveTime,
    pub session_name: crate::market::SessionName,
    pub next_open: Option<DateTime<Utc>>,
    pub next_close: Option<DateTime<Utc>>,
    pub cut_off_state: Option<CutOffCheck>,
    /// Text like `"1h 5m"` until whichever of `next_open`/`next_close` is
    /// relevant right now. `None` on a non-trading day with no next open
    /// known, or once there is nothing left to count down to.
    pub time_until_text: Option<String>,
}

/// A side-by-side status comparison of two markets, plus whether their
/// sessions overlap today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketPairComparison {
    pub buy: MarketStatus,
    pub sell: MarketStatus,
    pub overlap_today: Vec<OverlapWindow>,
}
