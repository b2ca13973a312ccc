use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::constants::{DATE_FORMAT, TIMESTAMP_FORMAT};
use crate::errors::{Error, Result};

/// Formats a timestamp the way both wire formats write periods.
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses `YYYY-MM-DDTHH:MM:SS`, or a bare `YYYY-MM-DD` taken as midnight.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT) {
        return Ok(timestamp);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|e| Error::Context(format!("Invalid timestamp '{}': {}", value, e)))
}

/// Midnight of the given date.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}
