//! # beckn-auth
//!
//! **Beckn HTTP Signature verification for Rust.**
//!
//! beckn-auth authenticates inbound requests signed under the Beckn HTTP
//! Signature scheme: it parses the `Authorization` (or gateway-forwarded)
//! header, checks the signature's validity window, resolves the caller's
//! public key from a subscriber registry (with caching), and verifies the
//! signature over the canonical signing string derived from the request
//! body's BLAKE2b-512 digest.
//!
//! ## Features
//!
//! - **Two key families** — raw 32-byte Ed25519 keys and PEM/SPKI keys
//!   (Ed25519, ECDSA P-256/P-384, RSA PKCS#1), tagged once at import
//! - **Registry-backed key resolution** — cache hit, or fetch with bounded
//!   exponential-backoff retries, key-state validation, and PEM normalization
//! - **Stable error contract** — every failure classifies to a fixed
//!   `(HTTP status, error code, error path)` triple for NACK responses
//! - **Injected capabilities** — cache and clock are trait objects; no
//!   ambient global state
//!
//! ## Quickstart
//!
//! ```no_run
//! use beckn_auth::{AuthEngine, InboundRequest, RegistryConfig};
//!
//! # async fn run() -> Result<(), beckn_auth::AuthError> {
//! let config = RegistryConfig::new("https://registry.example.org/lookup", "ondc");
//! let engine = AuthEngine::new(config)?;
//!
//! let request = InboundRequest {
//!     authorization: Some("Signature keyId=\"...\",...".to_string()),
//!     gateway_authorization: None,
//!     raw_body: Some(b"{}".to_vec()),
//!     body: None,
//! };
//!
//! match engine.authorize(&request).await {
//!     Ok(()) => println!("authorized"),
//!     Err(error) => {
//!         let classified = error.classify();
//!         println!("{} {}", classified.http_status, classified.code.as_str());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error contract
//!
//! [`AuthError::classify`] maps every failure onto the Beckn NACK wire
//! contract: 400 for malformed/missing signatures, 401 for invalid, expired,
//! or unauthorized ones, 500 for registry/network failures. The
//! [`protocol::AckResponse`] envelope renders the classified error as JSON.

#![deny(missing_docs)]

// Core modules
pub mod clock;
pub mod config;
pub mod errors;

// Signature pipeline
pub mod cache;
pub mod crypto;
pub mod header;
pub mod protocol;
pub mod registry;
pub mod resolver;
pub mod timestamp;

// Engine (main public API)
pub mod engine;

// Re-exports for public API
pub use cache::{KeyCache, MemoryCache};
pub use clock::{Clock, SystemClock};
pub use config::RegistryConfig;
pub use crypto::verify::KeyHandle;
pub use engine::{AuthEngine, InboundRequest};
pub use errors::{AuthError, ClassifiedError, ErrorCode};
pub use header::SignatureDescriptor;
pub use protocol::AckResponse;
pub use registry::{KeyFetcher, RegistryClient};

#[cfg(any(test, feature = "test-seams"))]
pub use clock::MockClock;
