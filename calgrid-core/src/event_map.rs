//! Date-keyed event collections.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::date_key::DateKey;
use crate::error::CalGridResult;
use crate::event::EventRecord;
use crate::raw::RawEvent;

/// Mapping from day to that day's events, in source order.
///
/// Looking up a day without events yields an empty slice, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventMap {
    days: BTreeMap<DateKey, Vec<EventRecord>>,
}

impl EventMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a batch of raw records.
    ///
    /// Records without a usable date are skipped and logged; the rest of the
    /// batch is kept.
    pub fn from_raw<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a RawEvent>,
    {
        Self::from_results(records.into_iter().map(RawEvent::normalize))
    }

    /// Decode and normalize a batch of loosely-typed JSON records.
    ///
    /// A record with a wrong-typed field is skipped like one without a date,
    /// so one bad record never costs the rest of the batch.
    pub fn from_values<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Value>,
    {
        Self::from_results(
            records
                .into_iter()
                .map(|value| RawEvent::from_value(value).and_then(|raw| raw.normalize())),
        )
    }

    /// Build from a response already grouped by date key (the shape served by
    /// remote endpoints). Entries whose key is not a valid date are skipped,
    /// as are records that do not decode.
    pub fn from_keyed<I, K>(days: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<Value>)>,
        K: AsRef<str>,
    {
        let results = days
            .into_iter()
            .filter_map(|(key, records)| match key.as_ref().parse::<DateKey>() {
                Ok(date_key) => Some((date_key, records)),
                Err(_) => {
                    warn!("Skipping {} event(s) under invalid key '{}'", records.len(), key.as_ref());
                    None
                }
            })
            .flat_map(|(date_key, records)| {
                records
                    .into_iter()
                    .map(move |value| RawEvent::from_value(&value).map(|raw| (date_key, raw.to_record())))
            });

        Self::from_results(results)
    }

    fn from_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = CalGridResult<(DateKey, EventRecord)>>,
    {
        let mut map = EventMap::new();
        let mut skipped = 0usize;

        for result in results {
            match result {
                Ok((key, record)) => map.push(key, record),
                Err(e) => {
                    skipped += 1;
                    warn!("Skipping event record: {e}");
                }
            }
        }

        if skipped > 0 {
            warn!(skipped, kept = map.len(), "Some event records were malformed");
        }

        map
    }

    pub fn push(&mut self, key: DateKey, record: EventRecord) {
        self.days.entry(key).or_default().push(record);
    }

    /// Events on `key`, empty when there are none.
    pub fn events_for(&self, key: &DateKey) -> &[EventRecord] {
        self.days.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of events across all days.
    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Days that have at least one event, in date order.
    pub fn days(&self) -> impl Iterator<Item = (&DateKey, &[EventRecord])> {
        self.days.iter().map(|(k, v)| (k, v.as_slice()))
    }
}

impl FromIterator<(DateKey, EventRecord)> for EventMap {
    fn from_iter<T: IntoIterator<Item = (DateKey, EventRecord)>>(iter: T) -> Self {
        let mut map = EventMap::new();
        for (key, record) in iter {
            map.push(key, record);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_absent_key_is_empty() {
        let map = EventMap::new();
        assert!(map.events_for(&key("2025-03-01")).is_empty());
    }

    #[test]
    fn test_from_raw_keeps_source_order_and_skips_malformed() {
        let raw: Vec<RawEvent> = serde_json::from_str(
            r#"[
                {"date":"2025-03-06","title":"First"},
                {"title":"No date"},
                {"date":"2025-03-06T08:00:00Z","eventName":"Second"},
                {"date":"2025-03-03","title":"Other day"}
            ]"#,
        )
        .unwrap();

        let map = EventMap::from_raw(&raw);

        let titles: Vec<_> = map
            .events_for(&key("2025-03-06"))
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, ["First", "Second"]);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_from_values_skips_wrong_typed_records() {
        let values: Vec<Value> = serde_json::from_str(
            r#"[
                {"date":"2025-03-03","title":"Good"},
                {"date":"2025-03-04","title":7},
                {"date":true,"title":"Bad date type"},
                {"date":1.5,"title":"Float timestamp"},
                {"date":"2025-03-03","eventName":"Also good"}
            ]"#,
        )
        .unwrap();

        let map = EventMap::from_values(&values);

        assert_eq!(map.len(), 2);
        let titles: Vec<_> = map
            .events_for(&key("2025-03-03"))
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, ["Good", "Also good"]);
        assert!(map.events_for(&key("2025-03-04")).is_empty());
    }

    #[test]
    fn test_from_keyed_skips_invalid_keys() {
        let days: BTreeMap<String, Vec<Value>> = serde_json::from_str(
            r#"{
                "2025-03-06": [{"title":"Sync","start":"10:00","end":"11:00"}],
                "2025-3-7": [{"title":"Bad key"}]
            }"#,
        )
        .unwrap();

        let map = EventMap::from_keyed(days);

        assert_eq!(map.len(), 1);
        assert_eq!(map.events_for(&key("2025-03-06"))[0].time_label(), "10:00 – 11:00");
    }

    #[test]
    fn test_from_keyed_skips_wrong_typed_records() {
        let days: BTreeMap<String, Vec<Value>> = serde_json::from_str(
            r#"{"2025-03-06": [{"title":"Kept"}, {"title":["not","text"]}, {"color":12}]}"#,
        )
        .unwrap();

        let map = EventMap::from_keyed(days);

        let titles: Vec<_> = map
            .events_for(&key("2025-03-06"))
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, ["Kept"]);
    }

    #[test]
    fn test_serializes_as_keyed_object() {
        let map: EventMap = [(key("2025-03-03"), EventRecord::new("Dentist"))]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["2025-03-03"][0]["title"], "Dentist");
    }
}
