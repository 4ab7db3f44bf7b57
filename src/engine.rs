//! Authorization engine - the main public API.
//!
//! [`AuthEngine`] composes the full pipeline for one inbound request:
//! header parse, timestamp window, key resolution, payload digest, canonical
//! signing string, and cryptographic verification.

use crate::cache::{KeyCache, MemoryCache};
use crate::clock::{Clock, SystemClock};
use crate::config::RegistryConfig;
use crate::crypto::{digest::blake2b512_b64, signing::build_signing_string, verify::verify_signature};
use crate::header::parse_signature_header;
use crate::registry::{KeyFetcher, RegistryClient};
use crate::resolver::KeyResolver;
use crate::timestamp::validate_timestamps;
use crate::AuthError;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::warn;

/// The slice of an inbound HTTP request the engine needs.
///
/// The HTTP framework integration builds one of these per request; the engine
/// never sees the framework's own request type.
#[derive(Debug, Clone, Default)]
pub struct InboundRequest {
    /// Raw `Authorization` header value, if present.
    pub authorization: Option<String>,

    /// Raw `X-Gateway-Authorization` header value, if present.
    pub gateway_authorization: Option<String>,

    /// Raw request body bytes as received on the wire, if captured.
    pub raw_body: Option<Vec<u8>>,

    /// Parsed JSON body, used when no raw body was captured.
    pub body: Option<serde_json::Value>,
}

impl InboundRequest {
    /// The signature header to verify.
    ///
    /// The primary `Authorization` header wins when both are present.
    pub fn signature_header(&self) -> Option<&str> {
        self.authorization
            .as_deref()
            .or(self.gateway_authorization.as_deref())
    }

    /// The payload bytes the digest covers: the captured raw body if
    /// available, else the canonical JSON serialization of the parsed body.
    pub fn payload(&self) -> Result<Cow<'_, [u8]>, AuthError> {
        if let Some(raw) = &self.raw_body {
            return Ok(Cow::Borrowed(raw));
        }
        let body = self.body.as_ref().unwrap_or(&serde_json::Value::Null);
        serde_json::to_vec(body)
            .map(Cow::Owned)
            .map_err(|e| AuthError::Internal(format!("failed to serialize body: {e}")))
    }

    /// Transaction id from the body context, or `"unknown"`.
    pub fn transaction_id(&self) -> &str {
        self.body
            .as_ref()
            .and_then(|body| body.get("context"))
            .and_then(|context| context.get("transaction_id"))
            .and_then(|id| id.as_str())
            .unwrap_or("unknown")
    }
}

/// Authorization engine verifying Beckn-signed requests.
///
/// Create one instance per process and share it across requests; the engine
/// is stateless per invocation apart from the shared key cache.
pub struct AuthEngine<F = RegistryClient> {
    resolver: KeyResolver<F>,
    cache: Arc<dyn KeyCache>,
    clock: Arc<dyn Clock>,
}

impl AuthEngine<RegistryClient> {
    /// Create an engine with the default in-memory cache and system clock.
    pub fn new(config: RegistryConfig) -> Result<Self, AuthError> {
        Self::with_cache(config, Arc::new(MemoryCache::new()))
    }

    /// Create an engine with an injected cache implementation.
    pub fn with_cache(
        config: RegistryConfig,
        cache: Arc<dyn KeyCache>,
    ) -> Result<Self, AuthError> {
        let client = RegistryClient::new(config)?;
        Ok(Self {
            resolver: KeyResolver::new(client),
            cache,
            clock: Arc::new(SystemClock),
        })
    }
}

impl<F: KeyFetcher> AuthEngine<F> {
    /// Create an engine from explicit parts (for testing).
    #[cfg(any(test, feature = "test-seams"))]
    pub fn from_parts(fetcher: F, cache: Arc<dyn KeyCache>, clock: Arc<dyn Clock>) -> Self {
        Self {
            resolver: KeyResolver::new(fetcher),
            cache,
            clock,
        }
    }

    /// Authorize one inbound request.
    ///
    /// Runs the full pipeline; `Ok(())` means the request is authorized.
    /// Every failure is a typed [`AuthError`] the boundary classifies via
    /// [`AuthError::classify`].
    pub async fn authorize(&self, request: &InboundRequest) -> Result<(), AuthError> {
        let descriptor = parse_signature_header(request.signature_header())?;
        validate_timestamps(&descriptor, self.clock.as_ref())?;

        let key = self
            .resolver
            .resolve(
                &descriptor.subscriber_id,
                &descriptor.unique_key_id,
                self.cache.as_ref(),
            )
            .await?;

        let payload = request.payload()?;
        let digest = blake2b512_b64(&payload);
        let signing_string = build_signing_string(descriptor.created, descriptor.expires, &digest);

        if !verify_signature(&signing_string, &descriptor.signature, &key) {
            warn!(
                subscriber_id = %descriptor.subscriber_id,
                unique_key_id = %descriptor.unique_key_id,
                "signature verification failed"
            );
            return Err(AuthError::VerificationFailed);
        }

        Ok(())
    }
}
