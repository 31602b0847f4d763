//! Calendar-day keys.
//!
//! A [`DateKey`] identifies one local calendar day. It is the idempotency key
//! for daily check-ins: the day "resets" at local midnight simply because
//! `DateKey::today()` starts returning a different value.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A local calendar day, serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build from year/month/day; `None` for an impossible date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today in the local timezone.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The following calendar day.
    pub fn next_day(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// The preceding calendar day.
    pub fn previous_day(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(&self, other: DateKey) -> i64 {
        (other.0 - self.0).num_days()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map(Self)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_iso_days() {
        let key: DateKey = "2024-08-31".parse().unwrap();
        assert_eq!(key.to_string(), "2024-08-31");
        assert_eq!(key, DateKey::from_ymd(2024, 8, 31).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert!("31/08/2024".parse::<DateKey>().is_err());
        assert!(DateKey::from_ymd(2024, 2, 30).is_none());
    }

    #[test]
    fn next_day_crosses_month_boundary() {
        let key = DateKey::from_ymd(2024, 1, 31).unwrap();
        assert_eq!(key.next_day(), DateKey::from_ymd(2024, 2, 1));
        assert_eq!(key.days_until(DateKey::from_ymd(2024, 2, 4).unwrap()), 4);
    }

    #[test]
    fn serializes_as_plain_string() {
        let key = DateKey::from_ymd(2024, 5, 22).unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2024-05-22\"");
    }
}
