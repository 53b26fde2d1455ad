//! Market Registry (C1): static market configuration, loaded once at
//! startup and immutable thereafter.

use chrono::NaiveTime;
use chrono_tz::Tz;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::RawMarketRecord;
use crate::error::{ConfigError, ConfigResult};

/// A trading session with a start and end wall-clock time.
///
/// Sessions are half-open: `[start, end)`, matching the session
/// materialization and overlap-intersection rules used throughout the
/// crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Session {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Session {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Session { start, end }
    }

    /// Returns `true` if `time` falls within `[start, end)`.
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.start && time < self.end
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// The named portion of a trading day a given wall-clock time falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionName {
    PreMarket,
    Morning,
    Lunch,
    Afternoon,
    PostMarket,
    Regular,
    Closed,
}

/// A market's standard daily trading hours, with an optional lunch break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TradingHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
    pub lunch_break: Option<Session>,
}

impl TradingHours {
    /// Which named session `time` falls in, assuming the date itself is a
    /// trading day. A lunch break splits the day into `Morning`/`Afternoon`;
    /// without one, the whole session is `Regular`.
    pub fn session_name_at(&self, time: NaiveTime) -> SessionName {
        if time < self.open {
            return SessionName::PreMarket;
        }
        if time >= self.close {
            return SessionName::PostMarket;
        }
        match self.lunch_break {
            None => SessionName::Regular,
            Some(lunch) => {
                if time < lunch.start {
                    SessionName::Morning
                } else if lunch.contains(time) {
                    SessionName::Lunch
                } else {
                    SessionName::Afternoon
                }
            }
        }
    }

    fn validate(&self, code: &str) -> ConfigResult<()> {
        if self.open >= self.close {
            return Err(ConfigError::InvalidTradingHours {
                code: code.to_string(),
                reason: "open must be before close".to_string(),
            });
        }
        if let Some(lunch) = self.lunch_break {
            if !(self.open <= lunch.start && lunch.start < lunch.end && lunch.end <= self.close) {
                return Err(ConfigError::InvalidTradingHours {
                    code: code.to_string(),
                    reason: "lunch break must satisfy open <= start < end <= close".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// A single configured financial market.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Market {
    pub code: String,
    pub name: String,
    pub exchange_name: String,
    pub timezone: Tz,
    pub trading_hours: TradingHours,
    pub settlement_cycle_days: u8,
    pub currency: String,
    pub depository_cut_off: Option<NaiveTime>,
}

/// The static, immutable set of markets known to the engine.
///
/// Constructed once at startup from a configuration blob (see
/// [`crate::config`]) and shared thereafter as an `Arc`; safe for
/// concurrent reads from any number of request handlers.
#[derive(Debug, Clone)]
pub struct MarketRegistry {
    markets: Arc<HashMap<String, Market>>,
}

impl MarketRegistry {
    /// Validate and assemble a registry from raw records.
    ///
    /// Collects every validation failure across every record before
    /// returning; never partially loads.
    pub fn from_raw(records: Vec<RawMarketRecord>) -> ConfigResult<Self> {
        let mut errors = Vec::new();
        let mut markets = HashMap::with_capacity(records.len());
        let mut seen_codes = std::collections::HashSet::new();

        for record in records {
            match validate_record(record) {
                Ok(market) => {
                    if !seen_codes.insert(market.code.clone()) {
                        errors.push(ConfigError::DuplicateMarketCode(market.code.clone()));
                        continue;
                    }
                    markets.insert(market.code.clone(), market);
                }
                Err(ConfigError::Aggregate(mut inner)) => errors.append(&mut inner),
                Err(e) => errors.push(e),
            }
        }

        if !errors.is_empty() {
            tracing::error!(error_count = errors.len(), "market configuration invalid");
            return Err(ConfigError::Aggregate(errors));
        }

        tracing::info!(market_count = markets.len(), "market registry loaded");
        Ok(MarketRegistry {
            markets: Arc::new(markets),
        })
    }

    /// Look up a market by its 2-letter code.
    pub fn get(&self, code: &str) -> Option<&Market> {
        self.markets.get(code)
    }

    /// All configured markets, in no particular order.
    pub fn list_all(&self) -> Vec<&Market> {
        self.markets.values().collect()
    }

    /// All configured market codes, in no particular order.
    pub fn list_codes(&self) -> Vec<&str> {
        self.markets.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.markets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }
}

fn validate_record(record: RawMarketRecord) -> ConfigResult<Market> {
    let mut errors = Vec::new();
    let code = record.code.trim().to_string();

    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        errors.push(ConfigError::InvalidMarketCode(code.clone()));
    }

    if record.name.trim().is_empty() {
        errors.push(ConfigError::MissingField {
            code: code.clone(),
            field: "name".to_string(),
        });
    }
    if record.exchange_name.trim().is_empty() {
        errors.push(ConfigError::MissingField {
            code: code.clone(),
            field: "exchange_name".to_string(),
        });
    }

    let timezone: Option<Tz> = match record.timezone.parse() {
        Ok(tz) => Some(tz),
        Err(_) => {
            errors.push(ConfigError::UnknownTimezone {
                code: code.clone(),
                zone: record.timezone.clone(),
            });
            None
        }
    };

    if record.currency.len() != 3 || !record.currency.chars().all(|c| c.is_ascii_alphabetic()) {
        errors.push(ConfigError::InvalidCurrency {
            code: code.clone(),
            currency: record.currency.clone(),
        });
    }

    if record.settlement_cycle_days > 5 {
        errors.push(ConfigError::SettlementCycleOutOfRange {
            code: code.clone(),
            value: record.settlement_cycle_days as i64,
        });
    }

    let trading_hours = TradingHours {
        open: record.trading_hours.open,
        close: record.trading_hours.close,
        lunch_break: record.trading_hours.lunch_break.map(|lb| Session {
            start: lb.start,
            end: lb.end,
        }),
    };
    if let Err(e) = trading_hours.validate(&code) {
        errors.push(e);
    }

    if !errors.is_empty() {
        return Err(ConfigError::Aggregate(errors));
    }

    Ok(Market {
        code,
        name: record.name,
        exchange_name: record.exchange_name,
        timezone: timezone.expect("validated above"),
        trading_hours,
        settlement_cycle_days: record.settlement_cycle_days,
        currency: record.currency.to_uppercase(),
        depository_cut_off: record.depository_cut_off,
    })
}
