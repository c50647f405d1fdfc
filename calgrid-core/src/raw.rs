//! Loosely-shaped event records as delivered by sources.
//!
//! Pushed `loadEvents` messages and remote responses use slightly different
//! field names for the same things (`title`/`eventName`, `start`/`eventTime`)
//! and may omit most fields. `RawEvent` accepts all of them and normalizes
//! into `EventRecord`.

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;
use crate::error::{CalGridError, CalGridResult};
use crate::event::{DEFAULT_EVENT_COLOR, EventRecord, EventStart, UNTITLED_EVENT};

/// Date of a raw record: ISO text or epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    Text(String),
    EpochMillis(i64),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<RawDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Trimmed value, treating blank text as absent.
fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl RawDate {
    /// Resolve to the local calendar date.
    ///
    /// Text keeps the date as written; epoch milliseconds name an instant and
    /// are converted with the local time zone.
    pub fn date_key(&self) -> CalGridResult<DateKey> {
        match self {
            RawDate::Text(s) => DateKey::from_iso_prefix(s),
            RawDate::EpochMillis(ms) => Local
                .timestamp_millis_opt(*ms)
                .single()
                .ok_or_else(|| CalGridError::InvalidDateKey(ms.to_string()))
                .and_then(|dt| DateKey::checked(dt.date_naive())),
        }
    }
}

impl RawEvent {
    /// Decode one record from loose JSON. A wrong-typed field is a
    /// `MalformedRecord`, so callers can skip just this record.
    pub fn from_value(value: &serde_json::Value) -> CalGridResult<Self> {
        RawEvent::deserialize(value).map_err(|e| CalGridError::MalformedRecord(e.to_string()))
    }

    /// Normalize the record fields, ignoring `date`.
    pub fn to_record(&self) -> EventRecord {
        let start = text(&self.start)
            .or_else(|| text(&self.event_time))
            .map(EventStart::parse)
            .unwrap_or_default();
        let end = match start {
            EventStart::AllDay => None,
            EventStart::At(_) => text(&self.end).map(String::from),
        };
        let color = text(&self.color).unwrap_or(DEFAULT_EVENT_COLOR);
        let description = text(&self.description).map(String::from);

        EventRecord {
            title: self.label().to_string(),
            start,
            end,
            color: color.to_string(),
            description,
        }
    }

    /// Normalize into a keyed record. A missing or unreadable date is a
    /// `MalformedRecord`.
    pub fn normalize(&self) -> CalGridResult<(DateKey, EventRecord)> {
        let date = self
            .date
            .as_ref()
            .ok_or_else(|| CalGridError::MalformedRecord(format!("missing date on '{}'", self.label())))?;

        let key = date
            .date_key()
            .map_err(|e| CalGridError::MalformedRecord(format!("'{}': {e}", self.label())))?;

        Ok((key, self.to_record()))
    }

    fn label(&self) -> &str {
        text(&self.title)
            .or_else(|| text(&self.event_name))
            .unwrap_or(UNTITLED_EVENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawEvent {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_event_name_fallback_keeps_calendar_date() {
        let (key, record) = raw(r#"{"date":"2025-03-06T00:00:00Z","eventName":"Team Sync"}"#)
            .normalize()
            .unwrap();

        assert_eq!(key.to_string(), "2025-03-06");
        assert_eq!(record.title, "Team Sync");
        assert!(record.start.is_all_day());
        assert_eq!(record.color, DEFAULT_EVENT_COLOR);
    }

    #[test]
    fn test_title_wins_over_event_name() {
        let record = raw(r#"{"title":"Review","eventName":"ignored"}"#).to_record();
        assert_eq!(record.title, "Review");
    }

    #[test]
    fn test_blank_title_falls_through() {
        let record = raw(r#"{"title":"  ","eventName":"Backup"}"#).to_record();
        assert_eq!(record.title, "Backup");

        let record = raw(r#"{}"#).to_record();
        assert_eq!(record.title, UNTITLED_EVENT);
    }

    #[test]
    fn test_event_time_fallback_and_end() {
        let record = raw(r##"{"eventTime":"10:00","end":"11:00","color":"#ff0000"}"##).to_record();
        assert_eq!(record.start, EventStart::At("10:00".into()));
        assert_eq!(record.end.as_deref(), Some("11:00"));
        assert_eq!(record.color, "#ff0000");
    }

    #[test]
    fn test_wrong_typed_field_is_malformed() {
        let value = serde_json::json!({"date": "2025-03-04", "title": 7});
        let err = RawEvent::from_value(&value).unwrap_err();
        assert!(matches!(err, CalGridError::MalformedRecord(_)));

        let value = serde_json::json!({"date": "2025-03-04", "title": "Fine"});
        assert_eq!(RawEvent::from_value(&value).unwrap().title.as_deref(), Some("Fine"));
    }

    #[test]
    fn test_missing_date_is_malformed() {
        let err = raw(r#"{"title":"Orphan"}"#).normalize().unwrap_err();
        assert!(matches!(err, CalGridError::MalformedRecord(_)));
    }

    #[test]
    fn test_unreadable_date_is_malformed() {
        let err = raw(r#"{"date":"next tuesday"}"#).normalize().unwrap_err();
        assert!(matches!(err, CalGridError::MalformedRecord(_)));
    }

    #[test]
    fn test_epoch_millis_use_local_date() {
        let ms = Local
            .with_ymd_and_hms(2025, 3, 6, 12, 0, 0)
            .single()
            .unwrap()
            .timestamp_millis();
        let (key, _) = RawEvent {
            date: Some(RawDate::EpochMillis(ms)),
            ..Default::default()
        }
        .normalize()
        .unwrap();
        assert_eq!(key.to_string(), "2025-03-06");
    }
}
