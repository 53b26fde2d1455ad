//! Lunisolar calendar dates shared by the Hong Kong, China and Taiwan
//! holiday rule modules, and by the Special-Cases Advisor's Lunar New
//! Year window.
//!
//! The Chinese lunisolar calendar has no closed-form conversion to the
//! Gregorian calendar; every holiday-calendar library that supports it
//! ships a static per-year lookup table instead of a formula. These
//! dates are illustrative for the years this crate supports and are not
//! sourced from an official almanac.

use chrono::NaiveDate;

/// The first day of Lunar New Year, by year.
pub fn lunar_new_year_day1(year: i32) -> Option<NaiveDate> {
    let (month, day) = match year {
        2024 => (2, 10),
        2025 => (1, 29),
        2026 => (2, 17),
        2027 => (2, 6),
        2028 => (1, 26),
        2029 => (2, 13),
        2030 => (2, 3),
        2031 => (1, 23),
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Dragon Boat Festival (5th day of the 5th lunar month).
pub fn dragon_boat_festival(year: i32) -> Option<NaiveDate> {
    let (month, day) = match year {
        2024 => (6, 10),
        2025 => (5, 31),
        2026 => (6, 19),
        2027 => (6, 9),
        2028 => (5, 28),
        2029 => (6, 16),
        2030 => (6, 5),
        2031 => (6, 24),
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Mid-Autumn Festival (15th day of the 8th lunar month).
pub fn mid_autumn_festival(year: i32) -> Option<NaiveDate> {
    let (month, day) = match year {
        2024 => (9, 17),
        2025 => (10, 6),
        2026 => (9, 25),
        2027 => (9, 15),
        2028 => (10, 3),
        2029 => (9, 22),
        2030 => (9, 12),
        2031 => (10, 1),
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Buddha's Birthday (8th day of the 4th lunar month), observed in Hong Kong.
pub fn buddhas_birthday(year: i32) -> Option<NaiveDate> {
    let (month, day) = match year {
        2024 => (5, 15),
        2025 => (5, 5),
        2026 => (5, 24),
        2027 => (5, 13),
        2028 => (5, 2),
        2029 => (5, 20),
        2030 => (5, 9),
        2031 => (4, 28),
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// China's Spring Festival golden-week closure block, `[start, end]`
/// inclusive, as announced by the State Council each year (adjusted
/// weekend work-swap days pulled into a single contiguous block here).
pub fn china_spring_festival_block(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let (start, end) = match year {
        2024 => ((2, 10), (2, 17)),
        2025 => ((1, 28), (2, 4)),
        2026 => ((2, 16), (2, 24)),
        2027 => ((2, 5), (2, 12)),
        2028 => ((1, 25), (2, 1)),
        2029 => ((2, 12), (2, 19)),
        2030 => ((2, 2), (2, 9)),
        2031 => ((1, 22), (1, 29)),
        _ => return None,
    };
    Some((
        NaiveDate::from_ymd_opt(year, start.0, start.1)?,
        NaiveDate::from_ymd_opt(year, end.0, end.1)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lny_2026_is_february_17() {
        assert_eq!(
            lunar_new_year_day1(2026),
            NaiveDate::from_ymd_opt(2026, 2, 17)
        );
    }

    #[test]
    fn china_block_2026_covers_feb_16_through_24() {
        let (start, end) = china_spring_festival_block(2026).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 2, 16).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 2, 24).unwrap());
    }
}
