//! The holiday data plane: four sources merged under one precedence rule.
//!
//! - [`rules`] holds the per-market holiday calculation tables.
//! - [`exchange`] is the Exchange-Session Adapter (C3): the bitmap that
//!   answers "is this market open on date D?".
//! - [`public`] is the Public-Holiday Adapter: holiday names for display,
//!   independent of whether the name maps to an actual closure.
//! - [`manual`] is the Manual-Override Adapter: the one mutable table.
//! - [`plane`] merges all three into the single query the rest of the
//!   crate uses.

pub mod exchange;
pub mod manual;
pub mod plane;
pub mod public;
pub mod rules;

pub use exchange::{BitmapExchangeSessionAdapter, ExchangeSessionSource};
pub use manual::{ManualOverride, ManualOverrideStore, OverrideKind};
pub use plane::{HolidayDataPlane, HolidayFact, HolidaySource};
pub use public::{PublicHolidaySource, RuleTablePublicHolidaySource};
