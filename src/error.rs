//! Error taxonomy for the settlement engine.
//!
//! Three kinds: configuration errors abort startup with an aggregated
//! report, request errors are recoverable and returned to whichever
//! caller builds a request, and engine errors mark invariant breaches or
//! persistence failures that are never masked.

use chrono::NaiveDate;
use thiserror::Error;

/// A single validation failure found while loading a configuration blob.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A market record's IANA timezone identifier could not be resolved.
    #[error("market {code}: unknown IANA timezone '{zone}'")]
    UnknownTimezone { code: String, zone: String },

    /// A market code was not exactly two uppercase letters, or was repeated.
    #[error("market code '{0}' must be two uppercase letters")]
    InvalidMarketCode(String),

    /// Two market records shared the same code.
    #[error("duplicate market code '{0}'")]
    DuplicateMarketCode(String),

    /// `open < close` (or the lunch-break ordering) was violated.
    #[error("market {code}: invalid trading hours ({reason})")]
    InvalidTradingHours { code: String, reason: String },

    /// `settlement_cycle_days` was outside `[0, 5]`.
    #[error("market {code}: settlement_cycle_days {value} is outside [0, 5]")]
    SettlementCycleOutOfRange { code: String, value: i64 },

    /// The currency field was not exactly three letters.
    #[error("market {code}: currency '{currency}' must be a 3-letter code")]
    InvalidCurrency { code: String, currency: String },

    /// A required field was missing or empty.
    #[error("market {code}: missing required field '{field}'")]
    MissingField { code: String, field: String },

    /// The blob could not be parsed as JSON at all.
    #[error("configuration blob is not valid JSON: {0}")]
    Malformed(String),

    /// One or more of the above were found while validating a blob.
    ///
    /// The registry never partially loads: every error in the blob is
    /// collected before this variant is returned.
    #[error("configuration invalid ({} error(s)): {}", .0.len(), render_many(.0))]
    Aggregate(Vec<ConfigError>),
}

fn render_many(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors surfaced to a caller building a request, never from
/// `check_settlement` itself (which always returns a populated result).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The market code does not exist in the registry.
    #[error("unknown market code '{0}'")]
    UnknownMarket(String),

    /// `buy_market == sell_market`.
    #[error("buy and sell market must differ, both were '{0}'")]
    SameMarket(String),

    /// The instrument type was not one of the recognized values.
    #[error("unrecognized instrument type '{0}'")]
    UnknownInstrumentType(String),
}

/// Internal invariant breaches and persistence failures.
///
/// These are unrecoverable in the sense that they indicate corrupt
/// calendar data or a failed disk write; they are never silently masked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A forward/backward trading-day scan exceeded
    /// [`crate::calendar::MAX_CALENDAR_SCAN_ITERATIONS`] steps.
    #[error("calendar scan from {from} exceeded {limit} iterations; calendar data may be corrupt")]
    CalendarScanExceeded { from: NaiveDate, limit: u32 },

    /// Writing the manual-override blob to disk failed; the in-memory
    /// table has been rolled back to its pre-mutation snapshot.
    #[error("manual override write failed: {0}")]
    PersistenceFailed(String),

    /// A timezone conversion produced no valid local time (e.g. a wall
    /// time that was skipped by a DST transition).
    #[error("invalid local time during timezone conversion: {0}")]
    InvalidLocalTime(String),
}

/// Result alias for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
/// Result alias for request validation.
pub type RequestResult<T> = std::result::Result<T, RequestError>;
/// Result alias for internal engine operations.
pub type EngineResult<T> = std::result::Result<T, EngineError>;
