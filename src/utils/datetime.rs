use chrono::{DateTime, NaiveTime, Utc};

use crate::error::BotError;

/// Parses a strict 24-hour `HH:MM` time of day.
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime, BotError> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .map_err(|_| BotError::InvalidFormat(format!("bad time of day '{input}'")))
}

/// Combines a time of day with `now`'s calendar date. A time that already
/// passed today stays in the past; there is no rollover to tomorrow.
pub fn fire_time_today(time: NaiveTime, now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(time).and_utc()
}

pub fn format_time_of_day(dt: &DateTime<Utc>) -> String {
    dt.format("%H:%M").to_string()
}
