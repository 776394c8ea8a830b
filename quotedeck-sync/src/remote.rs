//! The remote endpoint client.
//!
//! The remote is an HTTP collaborator: GET returns the full remote
//! collection as a JSON array of quote records, POST accepts one record.
//! Payloads go through the interchange codec, so invalid remote records are
//! dropped and counted rather than failing the pass.

use crate::error::{SyncError, SyncResult};
use quotedeck_types::{Quote, QuoteRecord};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the remote endpoint.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the endpoint, e.g. `https://quotes.example.net/api`.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl RemoteConfig {
    /// Creates a config for the given base URL with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Outcome of fetching the remote collection.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// The validated remote records.
    pub quotes: Vec<Quote>,
    /// Remote records dropped for failing validation.
    pub dropped: usize,
}

/// HTTP client for the remote quote endpoint.
pub struct RemoteClient {
    config: RemoteConfig,
    client: Client,
}

impl RemoteClient {
    /// Creates a new client.
    pub fn new(config: RemoteConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create HTTP client");

        Self { config, client }
    }

    fn quotes_url(&self) -> String {
        format!("{}/quotes", self.config.base_url.trim_end_matches('/'))
    }

    /// Fetches the remote collection.
    ///
    /// A non-success status is [`SyncError::Http`]; a body that is not a
    /// JSON array is [`SyncError::Protocol`]. Individual invalid records are
    /// dropped and counted.
    pub async fn fetch_quotes(&self) -> SyncResult<FetchOutcome> {
        let response = self
            .client
            .get(self.quotes_url())
            .send()
            .await
            .map_err(|e| SyncError::Network(format!("fetch failed: {e}")))?;

        if !response.status().is_success() {
            return Err(SyncError::Http {
                status: response.status().as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SyncError::Network(format!("failed to read fetch body: {e}")))?;

        let outcome =
            quotedeck_codec::import(&body).map_err(|e| SyncError::Protocol(e.to_string()))?;
        if outcome.dropped > 0 {
            warn!("remote sent {} invalid quote records", outcome.dropped);
        }
        debug!("fetched {} quotes from remote", outcome.accepted.len());

        Ok(FetchOutcome {
            quotes: outcome.accepted,
            dropped: outcome.dropped,
        })
    }

    /// Posts one locally-added record to the remote.
    pub async fn push_quote(&self, quote: &Quote) -> SyncResult<()> {
        let record = QuoteRecord::from(quote);
        let response = self
            .client
            .post(self.quotes_url())
            .json(&record)
            .send()
            .await
            .map_err(|e| SyncError::Network(format!("push failed: {e}")))?;

        if !response.status().is_success() {
            return Err(SyncError::Http {
                status: response.status().as_u16(),
            });
        }

        debug!("pushed quote {} to remote", quote.id);
        Ok(())
    }
}
