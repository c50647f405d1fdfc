use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, warn};

use crate::error::{CalGridError, CalGridResult};
use crate::event_map::EventMap;
use crate::source::EventSource;

const CHANNEL_CAPACITY: usize = 16;

/// A pushed message carrying events.
///
/// Records stay loose JSON until `to_event_map`, which decodes each one on
/// its own so a single bad record does not reject the message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SourceMessage {
    LoadEvents {
        #[serde(default)]
        data: Vec<Value>,
    },
}

impl SourceMessage {
    pub fn to_event_map(&self) -> EventMap {
        match self {
            SourceMessage::LoadEvents { data } => EventMap::from_values(data),
        }
    }
}

/// Events pushed over a channel.
///
/// `load` waits for the first message; later messages are read with
/// `next_message` and applied to the session as updates.
pub struct ChannelSource {
    rx: Mutex<mpsc::Receiver<SourceMessage>>,
}

impl ChannelSource {
    pub fn new(rx: mpsc::Receiver<SourceMessage>) -> Self {
        ChannelSource { rx: Mutex::new(rx) }
    }

    /// A connected sender/source pair.
    pub fn channel() -> (mpsc::Sender<SourceMessage>, Self) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        (tx, ChannelSource::new(rx))
    }

    /// Feed the channel from JSON lines, one message per line.
    ///
    /// Lines that are not a known message are logged and skipped. Spawns a
    /// task on the current tokio runtime.
    pub fn from_lines<R>(reader: R) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let (tx, source) = Self::channel();

        tokio::spawn(async move {
            let mut lines = reader.lines();
            loop {
                let line = match lines.next_line().await {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        warn!("Stopped reading event messages: {e}");
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<SourceMessage>(&line) {
                    Ok(message) => {
                        if tx.send(message).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!("Ignoring unrecognized message: {e}"),
                }
            }
            debug!("Event message stream ended");
        });

        source
    }

    /// Next pushed message, or `None` once every sender is gone.
    pub async fn next_message(&self) -> Option<SourceMessage> {
        self.rx.lock().await.recv().await
    }
}

impl EventSource for ChannelSource {
    async fn load(&self) -> CalGridResult<EventMap> {
        match self.next_message().await {
            Some(message) => Ok(message.to_event_map()),
            None => Err(CalGridError::SourceUnavailable(
                "message channel closed before any events arrived".into(),
            )),
        }
    }

    fn describe(&self) -> String {
        "pushed messages".to_string()
    }
}
