//! HTTP event source (e.g. a spreadsheet published as a JSON web app).

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use chronoquiz_core::error::SourceError;
use chronoquiz_core::parser::{parse_payload, ParsedPool};
use chronoquiz_core::traits::EventSource;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Marker left in sample configs until a real URL is filled in.
const PLACEHOLDER_MARKER: &str = "YOUR_";

/// Fetches the event list with a single GET request.
pub struct HttpSource {
    url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: &str, timeout_secs: Option<u64>) -> Self {
        let timeout_secs = timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            url: url.trim().to_string(),
            timeout_secs,
            client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn check_configured(&self) -> Result<(), SourceError> {
        if self.url.is_empty() {
            return Err(SourceError::NotConfigured("no URL set".into()));
        }
        if self.url.contains(PLACEHOLDER_MARKER) {
            return Err(SourceError::NotConfigured(format!(
                "replace the placeholder URL '{}' with your deployed web app URL",
                self.url
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl EventSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<ParsedPool, SourceError> {
        self.check_configured()?;

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                SourceError::Network(format!("could not reach {}: {e}", self.url))
            } else {
                SourceError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Http {
                status,
                message: body,
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout(self.timeout_secs)
            } else {
                SourceError::Network(format!("failed to read response body: {e}"))
            }
        })?;

        let payload: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| SourceError::Malformed(format!("response is not JSON: {e}")))?;

        parse_payload(&payload)
    }
}
