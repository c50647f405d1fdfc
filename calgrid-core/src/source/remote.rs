use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{CalGridError, CalGridResult};
use crate::event_map::EventMap;
use crate::source::EventSource;

const REMOTE_TIMEOUT: Duration = Duration::from_secs(15);

/// Events fetched from an endpoint that hands out short-lived tokens.
///
/// The exchange is two requests against the same URL:
/// `GET <url>?action=token` answers `{"token": "..."}`, then
/// `GET <url>?token=<token>` answers the events grouped by date key.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    url: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

fn unavailable(context: &str, e: reqwest::Error) -> CalGridError {
    if e.is_timeout() {
        CalGridError::SourceUnavailable(format!(
            "{context}: timed out after {}s",
            REMOTE_TIMEOUT.as_secs()
        ))
    } else {
        CalGridError::SourceUnavailable(format!("{context}: {e}"))
    }
}

impl RemoteSource {
    pub fn new(url: &str) -> CalGridResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REMOTE_TIMEOUT)
            .build()
            .map_err(|e| CalGridError::Config(format!("Could not build HTTP client: {e}")))?;

        Ok(Self::with_client(url, client))
    }

    /// Use a caller-built client, e.g. one with its own proxy or TLS setup.
    pub fn with_client(url: &str, client: reqwest::Client) -> Self {
        RemoteSource {
            url: url.to_string(),
            client,
        }
    }

    async fn request_token(&self) -> CalGridResult<String> {
        let response: TokenResponse = self
            .client
            .get(&self.url)
            .query(&[("action", "token")])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| unavailable("Failed to get token", e))?
            .json()
            .await
            .map_err(|e| unavailable("Malformed token response", e))?;

        Ok(response.token)
    }

    async fn fetch_events(&self, token: &str) -> CalGridResult<EventMap> {
        // Records stay loose so one bad record is skipped, not the response
        let days: BTreeMap<String, Vec<Value>> = self
            .client
            .get(&self.url)
            .query(&[("token", token)])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| unavailable("Unauthorized or fetch failed", e))?
            .json()
            .await
            .map_err(|e| unavailable("Malformed events response", e))?;

        Ok(EventMap::from_keyed(days))
    }
}

impl EventSource for RemoteSource {
    async fn load(&self) -> CalGridResult<EventMap> {
        let token = self.request_token().await?;
        let map = self.fetch_events(&token).await?;
        debug!(url = %self.url, events = map.len(), "Fetched remote events");
        Ok(map)
    }

    fn describe(&self) -> String {
        format!("remote {}", self.url)
    }
}
