//! Normalized event records.
//!
//! Every source converts its own wire shape into `EventRecord`; the grid,
//! the detail view and the renderer only ever see this type.

use serde::{Deserialize, Serialize};

/// Accent color used when a record does not carry its own.
pub const DEFAULT_EVENT_COLOR: &str = "#3b82f6";

/// Title used when a record has neither `title` nor `eventName`.
pub const UNTITLED_EVENT: &str = "Untitled";

/// Wire spelling of the all-day sentinel.
pub const ALL_DAY: &str = "All Day";

/// One event on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub title: String,
    #[serde(default)]
    pub start: EventStart,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_color() -> String {
    DEFAULT_EVENT_COLOR.to_string()
}

/// Start of an event: a time-of-day as supplied by the source, or all day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventStart {
    #[default]
    AllDay,
    At(String),
}

impl EventStart {
    /// Interpret source text; blank text and the sentinel both mean all day.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_DAY) {
            EventStart::AllDay
        } else {
            EventStart::At(trimmed.to_string())
        }
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self, EventStart::AllDay)
    }
}

impl From<String> for EventStart {
    fn from(s: String) -> Self {
        EventStart::parse(&s)
    }
}

impl From<EventStart> for String {
    fn from(start: EventStart) -> Self {
        match start {
            EventStart::AllDay => ALL_DAY.to_string(),
            EventStart::At(time) => time,
        }
    }
}

impl EventRecord {
    pub fn new(title: impl Into<String>) -> Self {
        EventRecord {
            title: title.into(),
            start: EventStart::AllDay,
            end: None,
            color: default_color(),
            description: None,
        }
    }

    pub fn at(mut self, start: impl Into<String>, end: Option<&str>) -> Self {
        self.start = EventStart::parse(&start.into());
        self.end = match self.start {
            EventStart::AllDay => None,
            EventStart::At(_) => end.map(str::trim).filter(|e| !e.is_empty()).map(String::from),
        };
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Time line shown in the detail view, e.g. "09:00 – 10:30" or "All day".
    pub fn time_label(&self) -> String {
        match (&self.start, &self.end) {
            (EventStart::AllDay, _) => "All day".to_string(),
            (EventStart::At(start), Some(end)) => format!("{start} – {end}"),
            (EventStart::At(start), None) => start.clone(),
        }
    }
}
