//! Easter calculation algorithms

use crate::error::{EngineError, EngineResult};
use chrono::NaiveDate;

/// Calculate Easter Sunday using the Anonymous Gregorian algorithm
pub fn calculate_easter(year: i32) -> EngineResult<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32).ok_or_else(|| {
        EngineError::InvalidLocalTime(format!("Easter calculation failed for year {year}"))
    })
}

/// Calculate Good Friday (2 days before Easter)
pub fn calculate_good_friday(year: i32) -> EngineResult<NaiveDate> {
    Ok(calculate_easter(year)? - chrono::Duration::days(2))
}

/// Calculate Easter Monday (1 day after Easter)
pub fn calculate_easter_monday(year: i32) -> EngineResult<NaiveDate> {
    Ok(calculate_easter(year)? + chrono::Duration::days(1))
}
