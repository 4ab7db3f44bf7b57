//! Authorization error types and wire-level classification.
//!
//! Every failure in the pipeline is one variant of [`AuthError`], and
//! [`AuthError::classify`] is a total function from that closed enum to the
//! stable `(HTTP status, error code, error path)` triple the boundary renders.

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during request authorization.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Neither the Authorization nor X-Gateway-Authorization header is present.
    #[error("Missing Authorization or X-Gateway-Authorization header")]
    HeaderMissing,

    /// Header does not carry the `Signature ` scheme prefix.
    #[error("Invalid Beckn HTTP Signature format")]
    InvalidFormat,

    /// One or more required signature fields are missing or malformed.
    #[error("Signature incomplete")]
    PartialSignature,

    /// keyId does not decompose into `subscriberId|uniqueKeyId|algorithm`.
    #[error("Subscriber ID missing in keyId")]
    SubscriberNotFound,

    /// Signature `created` timestamp is in the future.
    #[error("Signature created in the future")]
    FutureCreated,

    /// Signature `expires` timestamp has passed.
    #[error("Signature has expired")]
    Expired,

    /// Registry has no record for this (subscriber, key) pair.
    #[error("Public key not found in registry")]
    KeyNotFound,

    /// Registry-reported key state is not `live`.
    #[error("Key is expired or revoked")]
    KeyExpiredOrRevoked,

    /// Registry responded with an empty body.
    #[error("Registry returned empty response")]
    RegistryEmptyResponse,

    /// Registry record carries no public key field.
    #[error("No public key found in registry response")]
    PublicKeyFieldMissing,

    /// Registry key material could not be imported.
    #[error("Failed to import public key: {0}")]
    KeyImport(String),

    /// Cryptographic signature verification failed.
    #[error("Signature verification failed")]
    VerificationFailed,

    /// HTTP transport error communicating with the registry.
    #[error("Registry transport error: {0}")]
    Transport(String),

    /// Internal failure (serialization, unexpected state).
    #[error("Internal server error occurred: {0}")]
    Internal(String),
}

/// Stable wire error codes emitted in NACK responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed request (bad signature scheme).
    InvalidRequest,
    /// Signature header absent.
    SecSignatureMissing,
    /// Signature incomplete, expired, or cryptographically invalid.
    SecSignatureInvalid,
    /// keyId carries no subscriber.
    SecSubscriberNotFound,
    /// Registry has no key for the caller.
    SecKeyNotFound,
    /// Registry key is not in live state.
    SecKeyExpiredOrRevoked,
    /// Unclassified authorization failure.
    SecUnauthorizedAction,
    /// Network or internal failure.
    NetInternalError,
}

impl ErrorCode {
    /// Wire form of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidRequest => "INVALID_REQUEST",
            ErrorCode::SecSignatureMissing => "SEC_SIGNATURE_MISSING",
            ErrorCode::SecSignatureInvalid => "SEC_SIGNATURE_INVALID",
            ErrorCode::SecSubscriberNotFound => "SEC_SUBSCRIBER_NOT_FOUND",
            ErrorCode::SecKeyNotFound => "SEC_KEY_NOT_FOUND",
            ErrorCode::SecKeyExpiredOrRevoked => "SEC_KEY_EXPIRED_OR_REVOKED",
            ErrorCode::SecUnauthorizedAction => "SEC_UNAUTHORIZED_ACTION",
            ErrorCode::NetInternalError => "NET_INTERNAL_ERROR",
        }
    }
}

/// A failure classified for the HTTP boundary.
#[derive(Debug, Clone)]
pub struct ClassifiedError {
    /// HTTP status to respond with (400, 401, or 500).
    pub http_status: u16,
    /// Stable wire error code.
    pub code: ErrorCode,
    /// Path within the request the error relates to.
    pub path: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl AuthError {
    /// Classify this failure into the stable `(status, code, path)` triple.
    pub fn classify(&self) -> ClassifiedError {
        let (http_status, code, path) = match self {
            AuthError::HeaderMissing => (400, ErrorCode::SecSignatureMissing, "authorization"),
            AuthError::InvalidFormat => (400, ErrorCode::InvalidRequest, "authorization"),
            AuthError::PartialSignature => (400, ErrorCode::SecSignatureInvalid, "authorization"),
            AuthError::FutureCreated => {
                (401, ErrorCode::SecSignatureInvalid, "authorization/created")
            }
            AuthError::Expired => (401, ErrorCode::SecSignatureInvalid, "authorization/expires"),
            AuthError::SubscriberNotFound => {
                (401, ErrorCode::SecSubscriberNotFound, "authorization")
            }
            AuthError::KeyNotFound => (401, ErrorCode::SecKeyNotFound, "authorization"),
            AuthError::KeyExpiredOrRevoked => {
                (401, ErrorCode::SecKeyExpiredOrRevoked, "authorization")
            }
            AuthError::RegistryEmptyResponse | AuthError::PublicKeyFieldMissing => {
                (401, ErrorCode::SecSignatureInvalid, "authorization")
            }
            AuthError::VerificationFailed => (401, ErrorCode::SecSignatureInvalid, "authorization"),
            AuthError::Transport(_) | AuthError::Internal(_) | AuthError::ConfigError(_) => {
                (500, ErrorCode::NetInternalError, "server")
            }
            AuthError::KeyImport(_) => (401, ErrorCode::SecUnauthorizedAction, "authorization"),
        };

        ClassifiedError {
            http_status,
            code,
            path,
            message: self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_missing_is_400_signature_missing() {
        let classified = AuthError::HeaderMissing.classify();
        assert_eq!(classified.http_status, 400);
        assert_eq!(classified.code, ErrorCode::SecSignatureMissing);
        assert_eq!(classified.path, "authorization");
    }

    #[test]
    fn invalid_format_is_400_invalid_request() {
        let classified = AuthError::InvalidFormat.classify();
        assert_eq!(classified.http_status, 400);
        assert_eq!(classified.code, ErrorCode::InvalidRequest);
    }

    #[test]
    fn partial_signature_is_400_signature_invalid() {
        let classified = AuthError::PartialSignature.classify();
        assert_eq!(classified.http_status, 400);
        assert_eq!(classified.code, ErrorCode::SecSignatureInvalid);
        assert_eq!(classified.path, "authorization");
    }

    #[test]
    fn future_created_points_at_created() {
        let classified = AuthError::FutureCreated.classify();
        assert_eq!(classified.http_status, 401);
        assert_eq!(classified.code, ErrorCode::SecSignatureInvalid);
        assert_eq!(classified.path, "authorization/created");
    }

    #[test]
    fn expired_points_at_expires() {
        let classified = AuthError::Expired.classify();
        assert_eq!(classified.http_status, 401);
        assert_eq!(classified.code, ErrorCode::SecSignatureInvalid);
        assert_eq!(classified.path, "authorization/expires");
    }

    #[test]
    fn registry_miss_is_401_key_not_found() {
        let classified = AuthError::KeyNotFound.classify();
        assert_eq!(classified.http_status, 401);
        assert_eq!(classified.code, ErrorCode::SecKeyNotFound);
    }

    #[test]
    fn non_live_key_is_401_expired_or_revoked() {
        let classified = AuthError::KeyExpiredOrRevoked.classify();
        assert_eq!(classified.http_status, 401);
        assert_eq!(classified.code, ErrorCode::SecKeyExpiredOrRevoked);
    }

    #[test]
    fn registry_empty_and_missing_field_share_a_row() {
        for err in [
            AuthError::RegistryEmptyResponse,
            AuthError::PublicKeyFieldMissing,
        ] {
            let classified = err.classify();
            assert_eq!(classified.http_status, 401);
            assert_eq!(classified.code, ErrorCode::SecSignatureInvalid);
            assert_eq!(classified.path, "authorization");
        }
    }

    #[test]
    fn transport_is_500_internal() {
        let classified = AuthError::Transport("connection refused".into()).classify();
        assert_eq!(classified.http_status, 500);
        assert_eq!(classified.code, ErrorCode::NetInternalError);
        assert_eq!(classified.path, "server");
    }

    #[test]
    fn key_import_falls_through_to_unauthorized_action() {
        let classified = AuthError::KeyImport("bad spki".into()).classify();
        assert_eq!(classified.http_status, 401);
        assert_eq!(classified.code, ErrorCode::SecUnauthorizedAction);
    }

    #[test]
    fn error_code_wire_forms() {
        assert_eq!(
            ErrorCode::SecSignatureMissing.as_str(),
            "SEC_SIGNATURE_MISSING"
        );
        assert_eq!(ErrorCode::NetInternalError.as_str(), "NET_INTERNAL_ERROR");
        assert_eq!(
            serde_json::to_string(&ErrorCode::SecKeyExpiredOrRevoked).unwrap(),
            "\"SEC_KEY_EXPIRED_OR_REVOKED\""
        );
    }

    #[test]
    fn classified_message_comes_from_display() {
        let classified = AuthError::Expired.classify();
        assert_eq!(classified.message, "Signature has expired");
    }
}
