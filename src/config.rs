//! Registry client configuration.

/// Configuration for subscriber key lookups against a Beckn registry.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Registry base URL, without a trailing slash (e.g., `https://registry.example.org/subscribers`).
    pub base_url: String,

    /// Registry name segment used in lookup URLs.
    pub registry_name: String,

    /// Optional bearer token sent as `Authorization: Bearer {token}`.
    pub api_token: Option<String>,

    /// Number of retries for transient registry failures.
    pub retry_count: u32,

    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
}

impl RegistryConfig {
    /// Create a configuration with default retry and timeout settings.
    pub fn new(base_url: impl Into<String>, registry_name: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            registry_name: registry_name.into(),
            api_token: None,
            retry_count: 3,
            timeout_seconds: 10,
        }
    }

    /// Set the bearer token for registry requests.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Validate configuration for obvious errors.
    pub fn validate(&self) -> Result<(), crate::AuthError> {
        if self.base_url.is_empty() {
            return Err(crate::AuthError::ConfigError(
                "base_url cannot be empty".to_string(),
            ));
        }
        if self.registry_name.is_empty() {
            return Err(crate::AuthError::ConfigError(
                "registry_name cannot be empty".to_string(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(crate::AuthError::ConfigError(
                "timeout_seconds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the lookup URL for one subscriber key.
    ///
    /// Layout: `{base_url}/{subscriber_id}/{registry_name}/{unique_key_id}`.
    pub fn registry_url(&self, subscriber_id: &str, unique_key_id: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url, subscriber_id, self.registry_name, unique_key_id
        )
    }
}
