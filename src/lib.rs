//! # Settlement Feasibility Engine
//!
//! A decision core that answers one question: will a cross-market trade
//! settle on time, given the buy and sell markets' trading calendars,
//! timezone overlap, and settlement cycles?
//!
//! ## Quick start
//!
//! ```rust
//! use settlement_feasibility_engine::{EngineContext, SettlementCheckRequest, InstrumentType};
//! use chrono::NaiveDate;
//!
//! let ctx = EngineContext::with_default_markets();
//! let request = SettlementCheckRequest {
//!     trade_date: NaiveDate::from_ymd_opt(2026, 1, 28).unwrap(),
//!     buy_market: "HK".to_string(),
//!     sell_market: "JP".to_string(),
//!     instrument_type: InstrumentType::Equity,
//!     execution_time: None,
//! };
//! let result = ctx.engine().check_settlement(&request).unwrap();
//! println!("{:?}", result.status);
//! ```
//!
//! ## Architecture
//!
//! The crate is organized around seven components:
//!
//! - [`market`] — Market Registry (C1): immutable configuration.
//! - [`clock`] — Clock / Timezone Service (C2).
//! - [`holidays`] — Holiday Data Plane (C3): exchange-session bitmap,
//!   public-holiday names, and manual overrides merged under one
//!   precedence rule.
//! - [`calendar`] — Calendar Service (C4): trading-day arithmetic and
//!   settlement-date resolution.
//! - [`overlap`] — Overlap Calculator (C5): per-date trading-hour
//!   intersections between two markets.
//! - [`engine`] — Settlement Engine (C6): orchestrates the above into a
//!   single feasibility verdict.
//! - [`special_cases`] — Special-Cases Advisor (C7): soft warnings for
//!   typhoon season, Lunar New Year proximity, and known half-days.
//!
//! ## Error handling
//!
//! Three error families, matching three different failure moments: see
//! [`error::ConfigError`] (startup), [`error::RequestError`] (building a
//! request), and [`error::EngineError`] (internal invariant breaches).

#![deny(unsafe_code)]
#![forbid(unsafe_code)]

pub mod calendar;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod holidays;
pub mod market;
pub mod overlap;
pub mod request;
pub mod special_cases;
pub mod utils;

pub use calendar::CalendarService;
pub use engine::SettlementEngine;
pub use error::{ConfigError, ConfigResult, EngineError, EngineResult, RequestError, RequestResult};
pub use holidays::{HolidayDataPlane, HolidayFact, HolidaySource, ManualOverride, ManualOverrideStore, OverrideKind};
pub use market::{Market, MarketRegistry, Session, SessionName, TradingHours};
pub use overlap::{OverlapCalculator, OverlapWindow};
pub use request::{
    CutOffCheck, Deadline, DeadlineKind, InstrumentType, MarketPairComparison, MarketStatus,
    SettlementCheckRequest, SettlementDateResult, SettlementResult, SettlementStatus,
};

pub use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use std::sync::Arc;

/// The minimum year the bundled holiday rule tables cover.
pub const MIN_YEAR: i32 = 2024;
/// The maximum year the bundled holiday rule tables cover.
pub const MAX_YEAR: i32 = 2031;

/// Everything the engine needs, assembled once at startup and shared
/// thereafter as an immutable context (besides the one mutable table
/// inside [`ManualOverrideStore`]). A host process constructs one
/// `EngineContext` and passes it (or clones of the `Arc`s inside it) to
/// every request handler.
#[derive(Clone)]
pub struct EngineContext {
    registry: MarketRegistry,
    data_plane: Arc<HolidayDataPlane>,
    calendar: Arc<CalendarService>,
    overlap: Arc<OverlapCalculator>,
    engine: Arc<SettlementEngine>,
}

impl EngineContext {
    /// Build a context from an already-validated market registry and a
    /// pre-assembled holiday data plane (e.g. one wired to a
    /// persistent [`ManualOverrideStore`]).
    pub fn new(registry: MarketRegistry, data_plane: HolidayDataPlane) -> Self {
        let data_plane = Arc::new(data_plane);
        let calendar = Arc::new(CalendarService::new(registry.clone(), data_plane.clone()));
        let overlap = Arc::new(OverlapCalculator::new(data_plane.clone()));
        let engine = Arc::new(SettlementEngine::new(
            registry.clone(),
            calendar.clone(),
            overlap.clone(),
            data_plane.clone(),
        ));

        EngineContext {
            registry,
            data_plane,
            calendar,
            overlap,
            engine,
        }
    }

    /// Build a context from the bundled default market configuration and
    /// an in-memory (non-persistent) manual-override store, with the
    /// exchange-session and public-holiday bitmaps precomputed over
    /// `[MIN_YEAR, MAX_YEAR]`.
    pub fn with_default_markets() -> Self {
        let registry = config::load_default();
        let exchange: Arc<dyn holidays::ExchangeSessionSource> = Arc::new(
            holidays::BitmapExchangeSessionAdapter::new(&registry, MIN_YEAR, MAX_YEAR),
        );
        let public: Arc<dyn holidays::PublicHolidaySource> = Arc::new(
            holidays::RuleTablePublicHolidaySource::new(&registry, MIN_YEAR, MAX_YEAR),
        );
        let manual = Arc::new(ManualOverrideStore::new());
        let data_plane = HolidayDataPlane::new(exchange, public, manual);
        EngineContext::new(registry, data_plane)
    }

    pub fn registry(&self) -> &MarketRegistry {
        &self.registry
    }

    pub fn data_plane(&self) -> &Arc<HolidayDataPlane> {
        &self.data_plane
    }

    pub fn calendar(&self) -> &Arc<CalendarService> {
        &self.calendar
    }

    pub fn overlap(&self) -> &Arc<OverlapCalculator> {
        &self.overlap
    }

    pub fn engine(&self) -> &Arc<SettlementEngine> {
        &self.engine
    }
}
