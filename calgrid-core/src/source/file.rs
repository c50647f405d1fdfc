use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{CalGridError, CalGridResult};
use crate::event_map::EventMap;
use crate::source::{EventSource, SourceMessage};

/// Events read from a JSON file.
///
/// Accepted layouts: a `loadEvents` message, a bare array of raw records, or
/// an object keyed by date (`{"2025-03-06": [{...}]}`). Only the layout has
/// to match; records are decoded one by one and bad ones are skipped.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EventsFile {
    Message(SourceMessage),
    Records(Vec<Value>),
    Keyed(BTreeMap<String, Vec<Value>>),
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Parse file contents in any of the accepted layouts.
    pub fn parse(contents: &str) -> CalGridResult<EventMap> {
        let parsed: EventsFile = serde_json::from_str(contents).map_err(|e| {
            CalGridError::Serialization(format!("Unrecognized events file layout: {e}"))
        })?;

        Ok(match parsed {
            EventsFile::Message(message) => message.to_event_map(),
            EventsFile::Records(records) => EventMap::from_values(&records),
            EventsFile::Keyed(days) => EventMap::from_keyed(days),
        })
    }
}

impl EventSource for FileSource {
    async fn load(&self) -> CalGridResult<EventMap> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            CalGridError::SourceUnavailable(format!("Could not read {}: {e}", self.path.display()))
        })?;

        let map = Self::parse(&contents)?;
        debug!(path = %self.path.display(), events = map.len(), "Loaded events file");
        Ok(map)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
