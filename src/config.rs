//! Loading and validating the market-configuration blob (C1 input).
//!
//! The blob is a read-only, ordered list of market records plus an
//! informational version string and last-updated date. Times are
//! `HH:MM` wall-clock strings; timezones are IANA identifiers. Record
//! validation itself lives in [`crate::market`]; this module only
//! handles deserialization and the envelope.

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};
use crate::market::MarketRegistry;

/// The default market-configuration blob shipped with the crate,
/// covering the eight Asia-Pacific markets named in the original
/// market-status prototype's exchange-calendar-code table.
pub const DEFAULT_MARKETS_JSON: &str = include_str!("../default_markets.json");

#[derive(Debug, Clone, Deserialize)]
pub struct RawLunchBreak {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTradingHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
    #[serde(default)]
    pub lunch_break: Option<RawLunchBreak>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMarketRecord {
    pub code: String,
    pub name: String,
    pub exchange_name: String,
    pub timezone: String,
    pub trading_hours: RawTradingHours,
    pub settlement_cycle_days: u8,
    pub currency: String,
    #[serde(default)]
    pub depository_cut_off: Option<NaiveTime>,
}

#[derive(Debug, Clone, Deserialize)]
struct ConfigBlob {
    /// Informational only; not validated against the crate version.
    #[allow(dead_code)]
    version: String,
    #[allow(dead_code)]
    last_updated: NaiveDate,
    markets: Vec<RawMarketRecord>,
}

/// Parse a configuration blob's JSON text into a validated
/// [`MarketRegistry`].
pub fn load_from_str(json: &str) -> ConfigResult<MarketRegistry> {
    let blob: ConfigBlob =
        serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;
    MarketRegistry::from_raw(blob.markets)
}

/// Load and validate a configuration blob from a file on disk.
pub fn load_from_file(path: impl AsRef<Path>) -> ConfigResult<MarketRegistry> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Malformed(format!("{}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), "loading market configuration");
    load_from_str(&text)
}

/// Load the registry bundled with the crate.
pub fn load_default() -> MarketRegistry {
    load_from_str(DEFAULT_MARKETS_JSON).expect("bundled default_markets.json must be valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_blob_parses_and_validates() {
        let registry = load_default();
        assert!(registry.len() >= 8);
        for code in ["JP", "HK", "CN", "TW", "SG", "IN", "AU", "KR"] {
            assert!(registry.get(code).is_some(), "missing market {code}");
        }
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = load_from_str("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
    }
}
