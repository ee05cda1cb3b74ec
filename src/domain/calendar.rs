//! Day-boundary policy for the ledger.
//!
//! Visits are stamped with a calendar date and "today" is looked up by exact
//! string equality on that date. Both sides go through [`service_date`], which
//! truncates a UTC timestamp, so a write and a read at the same instant always
//! agree on the day.

use chrono::{DateTime, NaiveDate, Utc};

/// Storage and wire format for visit dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Calendar day a timestamp belongs to (UTC).
pub fn service_date(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive()
}

/// Current calendar day (UTC).
pub fn today() -> NaiveDate {
    service_date(Utc::now())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
}
