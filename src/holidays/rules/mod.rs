//! Per-market holiday calculation rules, one module per market.

mod australia;
mod china;
mod hong_kong;
mod india;
mod japan;
mod lunar;
mod singapore;
mod south_korea;
mod taiwan;

use chrono::NaiveDate;
use std::collections::HashMap;

/// Compute the named holidays for `code` in `year`. Returns an empty
/// vector for an unrecognized market code.
pub fn holidays_for_year(code: &str, year: i32) -> Vec<(NaiveDate, &'static str)> {
    match code {
        "JP" => japan::holidays_for_year(year),
        "HK" => hong_kong::holidays_for_year(year),
        "CN" => china::holidays_for_year(year),
        "TW" => taiwan::holidays_for_year(year),
        "SG" => singapore::holidays_for_year(year),
        "IN" => india::holidays_for_year(year),
        "AU" => australia::holidays_for_year(year),
        "KR" => south_korea::holidays_for_year(year),
        _ => Vec::new(),
    }
}

/// Same as [`holidays_for_year`] but collapsed into a `date -> name` map
/// (last write wins on a date collision, which only happens for
/// substitute-holiday bookkeeping within a single market's rule set).
pub fn holiday_names_for_year(code: &str, year: i32) -> HashMap<NaiveDate, &'static str> {
    holidays_for_year(code, year).into_iter().collect()
}

/// Re-exported for the Special-Cases Advisor, which needs the Lunar New
/// Year anchor date without duplicating the lookup table.
pub use lunar::lunar_new_year_day1;
