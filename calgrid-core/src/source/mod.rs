//! Event sources.
//!
//! A source produces the session's `EventMap`. It is asked once at startup;
//! sources that can push later updates (`ChannelSource`) hand out further
//! `SourceMessage`s that the session applies on arrival.

mod channel;
mod file;
mod remote;
mod static_source;

use std::future::Future;

use chrono::NaiveDate;

pub use channel::{ChannelSource, SourceMessage};
pub use file::FileSource;
pub use remote::RemoteSource;
pub use static_source::StaticSource;

use crate::config::{CalGridConfig, SourceKind};
use crate::error::{CalGridError, CalGridResult};
use crate::event_map::EventMap;

pub trait EventSource {
    /// Produce the full event map.
    fn load(&self) -> impl Future<Output = CalGridResult<EventMap>> + Send;

    /// Short description for logs and status lines.
    fn describe(&self) -> String;
}

/// Any of the built-in sources, chosen at runtime from configuration.
pub enum AnySource {
    Static(StaticSource),
    File(FileSource),
    Channel(ChannelSource),
    Remote(RemoteSource),
}

impl AnySource {
    /// Build the source selected by `config`.
    ///
    /// `today` seeds the generated sample month. The stdin source spawns a
    /// reader task and so must be built inside a tokio runtime.
    pub fn from_config(config: &CalGridConfig, today: NaiveDate) -> CalGridResult<Self> {
        match config.source {
            SourceKind::Sample => Ok(AnySource::Static(StaticSource::sample(today))),
            SourceKind::File => {
                let path = config.events_file_path().ok_or_else(|| {
                    CalGridError::Config("source = \"file\" requires events_file".into())
                })?;
                Ok(AnySource::File(FileSource::new(path)))
            }
            SourceKind::Remote => {
                let url = config.remote_url.as_deref().ok_or_else(|| {
                    CalGridError::Config("source = \"remote\" requires remote_url".into())
                })?;
                Ok(AnySource::Remote(RemoteSource::new(url)?))
            }
            SourceKind::Stdin => Ok(AnySource::Channel(ChannelSource::from_lines(
                tokio::io::BufReader::new(tokio::io::stdin()),
            ))),
        }
    }

    /// The push channel, when this source has one.
    pub fn as_channel(&self) -> Option<&ChannelSource> {
        match self {
            AnySource::Channel(channel) => Some(channel),
            _ => None,
        }
    }
}

impl EventSource for AnySource {
    async fn load(&self) -> CalGridResult<EventMap> {
        match self {
            AnySource::Static(source) => source.load().await,
            AnySource::File(source) => source.load().await,
            AnySource::Channel(source) => source.load().await,
            AnySource::Remote(source) => source.load().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            AnySource::Static(source) => source.describe(),
            AnySource::File(source) => source.describe(),
            AnySource::Channel(source) => source.describe(),
            AnySource::Remote(source) => source.describe(),
        }
    }
}
