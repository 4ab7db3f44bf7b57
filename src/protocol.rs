//! Wire models: the registry lookup response and the ACK/NACK error envelope.

use crate::errors::{ClassifiedError, ErrorCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registry lookup response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryEnvelope {
    /// The subscriber key record, if the registry found one.
    pub data: Option<RegistryKeyRecord>,
}

/// One subscriber key record as reported by the registry.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryKeyRecord {
    /// Key lifecycle state; `LIVE` (any case) means usable.
    #[serde(default)]
    pub state: Option<String>,

    /// Registry-assigned record name, carried for logging only.
    #[serde(default)]
    pub record_name: Option<String>,

    /// Nested key material.
    #[serde(default)]
    pub details: Option<RegistryKeyDetails>,
}

/// Key material container; two field names are accepted for forward
/// compatibility across registry versions.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryKeyDetails {
    /// Current field name.
    #[serde(rename = "publicKey", default)]
    pub public_key: Option<String>,

    /// Legacy field name.
    #[serde(default)]
    pub signing_public_key: Option<String>,
}

impl RegistryKeyRecord {
    /// Extract the raw public key material, whichever field carries it.
    pub fn public_key_material(&self) -> Option<&str> {
        self.details.as_ref().and_then(|details| {
            details
                .public_key
                .as_deref()
                .or(details.signing_public_key.as_deref())
        })
    }
}

/// ACK/NACK outcome marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AckStatus {
    /// Request accepted.
    Ack,
    /// Request rejected.
    Nack,
}

/// Error payload inside a NACK envelope.
#[derive(Debug, Clone, Serialize)]
pub struct AckErrorBody {
    /// Stable error code.
    pub code: ErrorCode,
    /// Path within the request the error relates to.
    pub paths: String,
    /// Human-readable message.
    pub message: String,
}

/// The error-response envelope the HTTP boundary emits on authorization
/// failure.
#[derive(Debug, Clone, Serialize)]
pub struct AckResponse {
    /// Transaction id from the request body context, or `"unknown"`.
    pub transaction_id: String,
    /// ISO-8601 response timestamp.
    pub timestamp: String,
    /// Always `NACK` for error responses.
    pub ack_status: AckStatus,
    /// Classified error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<AckErrorBody>,
}

impl AckResponse {
    /// Build a NACK envelope from a classified failure.
    pub fn nack(
        transaction_id: impl Into<String>,
        classified: &ClassifiedError,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            timestamp: timestamp.to_rfc3339(),
            ack_status: AckStatus::Nack,
            error: Some(AckErrorBody {
                code: classified.code,
                paths: classified.path.to_string(),
                message: classified.message.clone(),
            }),
        }
    }
}
