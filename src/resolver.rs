//! Subscriber key resolution: cache, registry fetch, and PEM normalization.

use crate::cache::KeyCache;
use crate::crypto::verify::{import_key, KeyHandle};
use crate::registry::KeyFetcher;
use crate::AuthError;
use tracing::{debug, info, warn};

/// Resolves subscriber public keys through a cache backed by the registry.
pub struct KeyResolver<F> {
    fetcher: F,
}

impl<F: KeyFetcher> KeyResolver<F> {
    /// Create a resolver over the given record source.
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Resolve the key handle for one (subscriber, key) pair.
    ///
    /// A cache hit returns immediately with no registry call and no
    /// re-validation. On a miss the registry record is fetched, its state
    /// checked, its key material normalized and imported, and the handle
    /// cached before returning.
    ///
    /// # Errors
    /// * [`AuthError::KeyExpiredOrRevoked`] - record state is not `live`
    /// * [`AuthError::PublicKeyFieldMissing`] - record carries no key field
    /// * [`AuthError::KeyImport`] - key material cannot be imported
    /// * plus everything the fetcher can raise
    pub async fn resolve(
        &self,
        subscriber_id: &str,
        unique_key_id: &str,
        cache: &dyn KeyCache,
    ) -> Result<KeyHandle, AuthError> {
        let cache_key = format!("{subscriber_id}:{unique_key_id}");
        if let Some(handle) = cache.get(&cache_key) {
            debug!(%cache_key, "key cache hit");
            return Ok(handle);
        }

        let record = self
            .fetcher
            .fetch_key_record(subscriber_id, unique_key_id)
            .await?;

        if let Some(state) = &record.state {
            if !state.eq_ignore_ascii_case("live") {
                warn!(subscriber_id, unique_key_id, %state, "public key is not in live state");
                return Err(AuthError::KeyExpiredOrRevoked);
            }
        }

        let raw_key = record
            .public_key_material()
            .ok_or(AuthError::PublicKeyFieldMissing)?;

        let pem = normalize_pem(raw_key);
        let handle = import_key(&pem)?;

        info!(
            subscriber_id,
            unique_key_id,
            record_name = record.record_name.as_deref().unwrap_or(""),
            "public key resolved from registry"
        );

        cache.set(&cache_key, handle.clone());
        Ok(handle)
    }
}

/// Normalize raw registry key material to PEM.
///
/// Trims whitespace, strips surrounding quote characters, and wraps bare
/// base64 content in `PUBLIC KEY` markers if none are present.
pub fn normalize_pem(raw_key: &str) -> String {
    let key = raw_key.trim().trim_matches('"');
    if key.contains("BEGIN PUBLIC KEY") {
        key.to_string()
    } else {
        format!("-----BEGIN PUBLIC KEY-----\n{key}\n-----END PUBLIC KEY-----\n")
    }
}
