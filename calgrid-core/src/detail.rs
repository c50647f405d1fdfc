//! Day detail hand-off.

use serde::Serialize;

use crate::date_key::DateKey;
use crate::event::EventRecord;

/// The events of one selected day, with the labels the detail view shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayDetail<'a> {
    pub date_key: DateKey,
    /// e.g. "Thursday, March 6, 2025"
    pub label: String,
    pub events: &'a [EventRecord],
}

impl<'a> DayDetail<'a> {
    pub fn new(date_key: DateKey, events: &'a [EventRecord]) -> Self {
        DayDetail {
            date_key,
            label: date_key.date().format("%A, %B %-d, %Y").to_string(),
            events,
        }
    }

    /// "2 event(s)" or "No events".
    pub fn summary(&self) -> String {
        match self.events.len() {
            0 => "No events".to_string(),
            n => format!("{n} event(s)"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn empty_message(&self) -> &'static str {
        "No events for this day."
    }
}
