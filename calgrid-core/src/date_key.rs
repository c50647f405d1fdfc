//! Canonical `YYYY-MM-DD` keys identifying one calendar day.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CalGridError, CalGridResult};

/// Years a key can name. Only these render as a four-digit `YYYY`.
pub const KEY_YEARS: RangeInclusive<i32> = 0..=9999;

/// A local calendar date, always rendered zero-padded as `YYYY-MM-DD`.
///
/// Keys carry no time zone: `2025-03-06T23:30:00-08:00` and
/// `2025-03-06T00:00:00Z` both belong to `2025-03-06`.
///
/// `new` and `From<NaiveDate>` trust the caller to stay within `KEY_YEARS`;
/// `checked` and `from_ymd` enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        DateKey(date)
    }

    /// Key for `date`, rejecting years outside `KEY_YEARS`.
    pub fn checked(date: NaiveDate) -> CalGridResult<Self> {
        if KEY_YEARS.contains(&date.year()) {
            Ok(DateKey(date))
        } else {
            Err(CalGridError::InvalidDateKey(date.to_string()))
        }
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> CalGridResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| CalGridError::InvalidDateKey(format!("{year:04}-{month:02}-{day:02}")))
            .and_then(DateKey::checked)
    }

    /// Parse the leading `YYYY-MM-DD` of an ISO date or date-time string.
    ///
    /// Whatever follows the date (time, offset) is ignored so that the
    /// calendar date written in the string is kept as is.
    pub fn from_iso_prefix(s: &str) -> CalGridResult<Self> {
        let s = s.trim();
        let prefix = s
            .get(..10)
            .ok_or_else(|| CalGridError::InvalidDateKey(s.to_string()))?;

        if let Some(rest) = s.get(10..) {
            if !(rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ')) {
                return Err(CalGridError::InvalidDateKey(s.to_string()));
            }
        }

        prefix.parse()
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Zero-based month (0 = January), matching `ViewState::view_month`.
    pub fn month0(&self) -> u32 {
        self.0.month0()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        DateKey(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.0.year(), self.0.month(), self.0.day())
    }
}

impl FromStr for DateKey {
    type Err = CalGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalGridError::InvalidDateKey(s.to_string());
        let bytes = s.as_bytes();

        // chrono's %m/%d accept single digits, so check the shape first
        let shape_ok = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !shape_ok {
            return Err(invalid());
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(DateKey)
            .map_err(|_| invalid())
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
