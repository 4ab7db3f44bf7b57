//! Reqwest-based registry client with bounded retries.
//!
//! Fetches one subscriber key record per call:
//! `GET {base_url}/{subscriber_id}/{registry_name}/{unique_key_id}`.
//! Network failures and 5xx responses are retried with exponential backoff up
//! to the configured count; everything else fails immediately.

use crate::config::RegistryConfig;
use crate::protocol::{RegistryEnvelope, RegistryKeyRecord};
use crate::AuthError;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, warn};

/// Base delay for exponential retry backoff.
const BACKOFF_BASE_MS: u64 = 100;

/// Source of registry key records.
///
/// [`RegistryClient`] is the production implementation; tests substitute a
/// counting mock to exercise the resolver and engine without a network.
pub trait KeyFetcher: Send + Sync {
    /// Fetch the key record for one (subscriber, key) pair.
    fn fetch_key_record(
        &self,
        subscriber_id: &str,
        unique_key_id: &str,
    ) -> impl std::future::Future<Output = Result<RegistryKeyRecord, AuthError>> + Send;
}

/// HTTP client for the subscriber registry.
pub struct RegistryClient {
    client: Client,
    config: RegistryConfig,
}

impl RegistryClient {
    /// Create a new registry client from config.
    pub fn new(config: RegistryConfig) -> Result<Self, AuthError> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AuthError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Get the configured registry settings.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// One GET attempt; transport-level failures surface as `reqwest::Error`.
    async fn try_fetch(&self, url: &str) -> Result<reqwest::Response, reqwest::Error> {
        let mut request = self.client.get(url).header(CONTENT_TYPE, "application/json");
        if let Some(token) = &self.config.api_token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        request.send().await
    }

    async fn fetch_with_retries(&self, url: &str) -> Result<reqwest::Response, AuthError> {
        let mut attempt: u32 = 0;
        loop {
            let retryable = match self.try_fetch(url).await {
                Ok(response) if response.status().is_server_error() => {
                    format!("registry responded {}", response.status())
                }
                Ok(response) => return Ok(response),
                Err(e) if e.is_connect() || e.is_timeout() || e.is_request() => e.to_string(),
                Err(e) => {
                    error!(url, error = %e, "registry request failed");
                    return Err(AuthError::Transport(e.to_string()));
                }
            };

            if attempt >= self.config.retry_count {
                error!(url, error = %retryable, "registry unavailable after retries");
                return Err(AuthError::Transport(retryable));
            }

            attempt += 1;
            warn!(url, attempt, error = %retryable, "retrying registry fetch");
            let delay = BACKOFF_BASE_MS * (1u64 << (attempt - 1));
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
    }
}

impl KeyFetcher for RegistryClient {
    async fn fetch_key_record(
        &self,
        subscriber_id: &str,
        unique_key_id: &str,
    ) -> Result<RegistryKeyRecord, AuthError> {
        let url = self.config.registry_url(subscriber_id, unique_key_id);
        debug!(%url, "fetching public key from registry");

        let response = self.fetch_with_retries(&url).await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            warn!(%url, "registry returned 404");
            return Err(AuthError::KeyNotFound);
        }
        if !status.is_success() {
            error!(%url, %status, "registry returned error status");
            return Err(AuthError::Transport(format!("registry responded {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AuthError::Transport(format!("failed to read registry body: {e}")))?;

        if body.is_empty() {
            warn!(%url, "registry returned empty response");
            return Err(AuthError::RegistryEmptyResponse);
        }

        let envelope: RegistryEnvelope = serde_json::from_slice(&body)
            .map_err(|e| AuthError::Internal(format!("malformed registry response: {e}")))?;

        envelope.data.ok_or_else(|| {
            warn!(%url, "registry response carries no record");
            AuthError::RegistryEmptyResponse
        })
    }
}
