//! Clock / Timezone Service (C2): pure functions around a common UTC
//! instant base. This is the only module where a market's "session"
//! meets an actual instant.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{EngineError, EngineResult};
use crate::market::TradingHours;

/// Convert a local wall-clock date+time in `zone` to a UTC instant.
///
/// Returns [`EngineError::InvalidLocalTime`] if the wall time falls in a
/// DST gap (never existed) or is otherwise ambiguous in a way that has no
/// "earliest" candidate.
pub fn to_utc(date: NaiveDate, wall_time: NaiveTime, zone: Tz) -> EngineResult<DateTime<Utc>> {
    let naive = date.and_time(wall_time);
    zone.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            EngineError::InvalidLocalTime(format!(
                "{naive} has no valid instant in timezone {zone}"
            ))
        })
}

/// Project a UTC instant into `zone`'s local wall time.
pub fn from_utc(instant: DateTime<Utc>, zone: Tz) -> DateTime<Tz> {
    instant.with_timezone(&zone)
}

/// Combine a date, wall time and zone into a UTC instant. Alias of
/// [`to_utc`].
pub fn combine(date: NaiveDate, wall_time: NaiveTime, zone: Tz) -> EngineResult<DateTime<Utc>> {
    to_utc(date, wall_time, zone)
}

/// The UTC offset of `zone`, in hours, evaluated at noon local time on
/// `date` so that the result reflects whichever side of a DST transition
/// that date falls on.
pub fn offset_hours(zone: Tz, on_date: NaiveDate) -> EngineResult<f64> {
    let noon = on_date
        .and_hms_opt(12, 0, 0)
        .expect("12:00:00 is always a valid time");
    let localized = zone.from_local_datetime(&noon).earliest().ok_or_else(|| {
        EngineError::InvalidLocalTime(format!("no valid noon instant for {zone} on {on_date}"))
    })?;
    Ok(localized.offset().fix().local_minus_utc() as f64 / 3600.0)
}

/// Time remaining until `target` as seen `from` a reference instant
/// (defaulting to now). Returns `None` if `target` is not after `from`.
pub fn time_until(target: DateTime<Utc>, from: DateTime<Utc>) -> Option<Duration> {
    let delta = target - from;
    if delta > Duration::zero() {
        Some(delta)
    } else {
        None
    }
}

/// Format a duration as `XdYhZm`, dropping any leading zero components
/// and falling back to `0m` for a (non-negative) zero duration.
pub fn format_duration(d: Duration) -> String {
    let total_minutes = d.num_minutes().max(0);
    let days = total_minutes / (24 * 60);
    let hours = (total_minutes % (24 * 60)) / 60;
    let minutes = total_minutes % 60;

    let mut out = String::new();
    if days > 0 {
        out.push_str(&format!("{days}d "));
    }
    if hours > 0 || days > 0 {
        out.push_str(&format!("{hours}h "));
    }
    out.push_str(&format!("{minutes}m"));
    out.trim().to_string()
}

/// Materialize a market's daily trading hours on `date` into one or two
/// UTC instant intervals: one when there is no lunch break, two
/// (morning + afternoon) when there is. This is the only place the
/// half-open `[start, end)` session convention is turned into concrete
/// instants.
pub fn session_intervals(
    date: NaiveDate,
    hours: &TradingHours,
    zone: Tz,
) -> EngineResult<Vec<(DateTime<Utc>, DateTime<Utc>)>> {
    match hours.lunch_break {
        None => {
            let start = to_utc(date, hours.open, zone)?;
            let end = to_utc(date, hours.close, zone)?;
            Ok(vec![(start, end)])
        }
        Some(lunch) => {
            let morning_start = to_utc(date, hours.open, zone)?;
            let morning_end = to_utc(date, lunch.start, zone)?;
            let afternoon_start = to_utc(date, lunch.end, zone)?;
            let afternoon_end = to_utc(date, hours.close, zone)?;
            Ok(vec![
                (morning_start, morning_end),
                (afternoon_start, afternoon_end),
            ])
        }
    }
}

/// Day-of-week based weekend test, evaluated on the civil calendar
/// (ignoring time-of-day).
pub fn is_weekend(date: NaiveDate) -> bool {
    crate::utils::is_weekend(date)
}

/// Truncate a date/weekday pair down to the day component, used when
/// reasoning about the day-of-week a [`NaiveDate`] falls on in a market's
/// local civil calendar.
pub fn weekday_of(date: NaiveDate) -> chrono::Weekday {
    date.weekday()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jst() -> Tz {
        chrono_tz::Asia::Tokyo
    }

    #[test]
    fn to_utc_and_back_round_trips() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 28).unwrap();
        let wall = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let instant = to_utc(date, wall, jst()).unwrap();
        let back = from_utc(instant, jst());
        assert_eq!(back.date_naive(), date);
        assert_eq!(back.time(), wall);
    }

    #[test]
    fn jst_offset_is_nine_hours_with_no_dst() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        assert_eq!(offset_hours(jst(), date).unwrap(), 9.0);
    }

    #[test]
    fn format_duration_omits_zero_leading_units() {
        assert_eq!(format_duration(Duration::minutes(0)), "0m");
        assert_eq!(format_duration(Duration::minutes(45)), "45m");
        assert_eq!(format_duration(Duration::minutes(90)), "1h 30m");
        assert_eq!(format_duration(Duration::minutes(60 * 24 + 30)), "1d 0h 30m");
    }

    #[test]
    fn time_until_future_is_some_past_is_none() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let future = now + Duration::minutes(30);
        let past = now - Duration::minutes(30);
        assert!(time_until(future, now).is_some());
        assert!(time_until(past, now).is_none());
        assert!(time_until(now, now).is_none());
    }

    #[test]
    fn session_intervals_with_lunch_break_yields_two_windows() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 28).unwrap();
        let hours = TradingHours {
            open: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            close: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            lunch_break: Some(crate::market::Session::new(
                NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
                NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
            )),
        };
        let windows = session_intervals(date, &hours, jst()).unwrap();
        assert_eq!(windows.len(), 2);
        assert!(windows[0].1 <= windows[1].0);
    }

    #[test]
    fn session_intervals_without_lunch_break_yields_one_window() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 28).unwrap();
        let hours = TradingHours {
            open: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            close: NaiveTime::from_hms_opt(13, 30, 0).unwrap(),
            lunch_break: None,
        };
        let windows = session_intervals(date, &hours, jst()).unwrap();
        assert_eq!(windows.len(), 1);
    }
}
