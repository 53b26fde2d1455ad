//! The merged Holiday Data Plane: combines the exchange-session bitmap,
//! the public-holiday name table, and manual overrides into a single
//! query, applying the precedence rule manual override > weekend >
//! exchange-session > ordinary trading day.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::holidays::exchange::ExchangeSessionSource;
use crate::holidays::manual::{ManualOverrideStore, OverrideKind};
use crate::holidays::public::PublicHolidaySource;
use crate::utils::is_weekend;

/// Which layer of the data plane decided a date is not a trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolidaySource {
    ManualOverride,
    Weekend,
    ExchangeHoliday,
}

/// The outcome of querying the data plane for one market and date.
///
/// `is_trading_day` and `is_settlement_day` normally agree, but a manual
/// override with `affects_trading != affects_settlement` can make them
/// diverge (e.g. a market forced open to process settlement instructions
/// on a day it isn't accepting new trades).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayFact {
    pub is_trading_day: bool,
    pub is_settlement_day: bool,
    pub source: Option<HolidaySource>,
    pub name: Option<String>,
}

/// Reads of this type are lock-free; the only lock lives inside
/// [`ManualOverrideStore`] and is only taken on a write.
pub struct HolidayDataPlane {
    exchange: Arc<dyn ExchangeSessionSource>,
    public: Arc<dyn PublicHolidaySource>,
    manual: Arc<ManualOverrideStore>,
}

impl HolidayDataPlane {
    pub fn new(
        exchange: Arc<dyn ExchangeSessionSource>,
        public: Arc<dyn PublicHolidaySource>,
        manual: Arc<ManualOverrideStore>,
    ) -> Self {
        HolidayDataPlane {
            exchange,
            public,
            manual,
        }
    }

    /// The full fact for `market` on `date`.
    ///
    /// Trading and settlement status both start from the same base
    /// (weekend, then exchange-session bitmap); a manual override is
    /// applied last and can move either dimension independently via its
    /// `affects_trading`/`affects_settlement` flags.
    pub fn holiday_fact(&self, market: &str, date: NaiveDate) -> HolidayFact {
        let (mut is_trading_day, source, name) = if is_weekend(date) {
            (false, Some(HolidaySource::Weekend), None)
        } else if !self.exchange.is_session(market, date) {
            (
                false,
                Some(HolidaySource::ExchangeHoliday),
                self.public.holiday_name(market, date),
            )
        } else {
            (true, None, None)
        };
        let mut is_settlement_day = is_trading_day;
        let mut source = source;
        let mut name = name;

        if let Some(over) = self.manual.get(market, date) {
            let forced_open = matches!(over.kind, OverrideKind::HalfDay | OverrideKind::ForceOpen);
            if over.affects_trading {
                is_trading_day = forced_open;
            }
            if over.affects_settlement {
                is_settlement_day = forced_open;
            }
            source = Some(HolidaySource::ManualOverride);
            name = over.name.clone().or(Some(over.reason.clone()));
        }

        HolidayFact {
            is_trading_day,
            is_settlement_day,
            source,
            name,
        }
    }

    /// Convenience wrapper around [`Self::holiday_fact`].
    pub fn is_trading_day(&self, market: &str, date: NaiveDate) -> bool {
        self.holiday_fact(market, date).is_trading_day
    }

    /// Convenience wrapper around [`Self::holiday_fact`]. Usually equal to
    /// [`Self::is_trading_day`]; can diverge under a manual override that
    /// sets `affects_trading != affects_settlement`.
    pub fn is_settlement_day(&self, market: &str, date: NaiveDate) -> bool {
        self.holiday_fact(market, date).is_settlement_day
    }

    pub fn manual_overrides(&self) -> &Arc<ManualOverrideStore> {
        &self.manual
    }
}
