//! Key import and algorithm-dispatched signature verification.
//!
//! Key material arrives as PEM (or a bare base64 body) and is tagged once at
//! import time as one of two families:
//!
//! * a raw 32-byte Ed25519 public key, verified with `ed25519-dalek`;
//! * an SPKI-encoded public key (PEM Ed25519, ECDSA P-256/P-384, or RSA
//!   PKCS#1), verified through `ring`'s detached-signature primitive.
//!
//! Verification itself never fails with an error: any malformed signature,
//! key, or algorithm mismatch yields `false`.

use crate::AuthError;
use base64::{engine::general_purpose::STANDARD, Engine};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use ring::signature::{self, UnparsedPublicKey};
use spki::{ObjectIdentifier, SubjectPublicKeyInfoRef};

/// Raw Ed25519 public-key length in bytes.
const RAW_ED25519_KEY_LENGTH: usize = 32;

const OID_RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");
const OID_EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
const OID_ED25519: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");
const OID_CURVE_P256: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
const OID_CURVE_P384: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");

/// Verification algorithm for the generic (SPKI) key family.
///
/// The hash is fixed per key type, matching PKCS#1 / ECDSA conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenericAlgorithm {
    /// Ed25519 delivered as SPKI rather than raw bytes.
    Ed25519,
    /// ECDSA over P-256 with SHA-256, ASN.1 signature encoding.
    EcdsaP256Sha256,
    /// ECDSA over P-384 with SHA-384, ASN.1 signature encoding.
    EcdsaP384Sha384,
    /// RSA PKCS#1 v1.5 with SHA-256.
    RsaPkcs1Sha256,
}

impl GenericAlgorithm {
    fn ring_algorithm(&self) -> &'static dyn signature::VerificationAlgorithm {
        match self {
            GenericAlgorithm::Ed25519 => &signature::ED25519,
            GenericAlgorithm::EcdsaP256Sha256 => &signature::ECDSA_P256_SHA256_ASN1,
            GenericAlgorithm::EcdsaP384Sha384 => &signature::ECDSA_P384_SHA384_ASN1,
            GenericAlgorithm::RsaPkcs1Sha256 => &signature::RSA_PKCS1_2048_8192_SHA256,
        }
    }
}

/// An imported, algorithm-tagged public key handle.
///
/// The tag is decided once at import time and determines which verification
/// path runs; verification never inspects the key type dynamically.
#[derive(Debug, Clone)]
pub enum KeyHandle {
    /// Raw 32-byte Ed25519 key, verify-only.
    RawEd25519(VerifyingKey),
    /// SPKI key: algorithm inferred from the encoding, key bits held raw.
    Generic {
        /// Verification algorithm inferred from the SPKI OID.
        algorithm: GenericAlgorithm,
        /// The subjectPublicKey bit-string contents.
        key_bytes: Vec<u8>,
    },
}

/// Import a PEM (or bare base64) public key into a [`KeyHandle`].
///
/// The PEM body is base64-decoded after stripping markers and whitespace.
/// A 32-byte decode is taken as a raw Ed25519 key; anything else must parse
/// as an SPKI document whose algorithm OID names a supported key type.
///
/// # Errors
/// [`AuthError::KeyImport`] on undecodable base64, an invalid Ed25519 point,
/// an unparseable SPKI document, or an unsupported algorithm OID.
pub fn import_key(pem: &str) -> Result<KeyHandle, AuthError> {
    let body: String = pem
        .lines()
        .filter(|line| !line.contains("-----"))
        .collect::<Vec<_>>()
        .join("");
    let body: String = body.chars().filter(|c| !c.is_whitespace()).collect();

    let der = STANDARD
        .decode(body.as_bytes())
        .map_err(|e| AuthError::KeyImport(format!("invalid base64 key body: {e}")))?;

    if der.len() == RAW_ED25519_KEY_LENGTH {
        let key_array: [u8; RAW_ED25519_KEY_LENGTH] = der
            .try_into()
            .map_err(|_| AuthError::KeyImport("key must be 32 bytes".to_string()))?;
        let verifying_key = VerifyingKey::from_bytes(&key_array)
            .map_err(|e| AuthError::KeyImport(format!("invalid Ed25519 public key: {e}")))?;
        return Ok(KeyHandle::RawEd25519(verifying_key));
    }

    let info = SubjectPublicKeyInfoRef::try_from(der.as_slice())
        .map_err(|e| AuthError::KeyImport(format!("invalid SPKI document: {e}")))?;

    let oid = info.algorithm.oid;
    let algorithm = if oid == OID_ED25519 {
        GenericAlgorithm::Ed25519
    } else if oid == OID_RSA_ENCRYPTION {
        GenericAlgorithm::RsaPkcs1Sha256
    } else if oid == OID_EC_PUBLIC_KEY {
        let curve = info
            .algorithm
            .parameters_oid()
            .map_err(|e| AuthError::KeyImport(format!("missing EC curve: {e}")))?;
        if curve == OID_CURVE_P256 {
            GenericAlgorithm::EcdsaP256Sha256
        } else if curve == OID_CURVE_P384 {
            GenericAlgorithm::EcdsaP384Sha384
        } else {
            return Err(AuthError::KeyImport(format!("unsupported EC curve: {curve}")));
        }
    } else {
        return Err(AuthError::KeyImport(format!(
            "unsupported key algorithm OID: {oid}"
        )));
    };

    let key_bytes = info
        .subject_public_key
        .as_bytes()
        .ok_or_else(|| AuthError::KeyImport("SPKI key bits are not byte-aligned".to_string()))?
        .to_vec();

    Ok(KeyHandle::Generic {
        algorithm,
        key_bytes,
    })
}

/// Verify a base64 signature over the signing string with the given key.
///
/// Returns `false` for any failure, including malformed signature bytes;
/// faults never propagate as errors.
pub fn verify_signature(signing_string: &str, signature_b64: &str, key: &KeyHandle) -> bool {
    let Ok(signature_bytes) = STANDARD.decode(signature_b64) else {
        return false;
    };

    match key {
        KeyHandle::RawEd25519(verifying_key) => {
            let Ok(signature_array) = <[u8; 64]>::try_from(signature_bytes.as_slice()) else {
                return false;
            };
            let sig = Signature::from_bytes(&signature_array);
            verifying_key.verify(signing_string.as_bytes(), &sig).is_ok()
        }
        KeyHandle::Generic {
            algorithm,
            key_bytes,
        } => UnparsedPublicKey::new(algorithm.ring_algorithm(), key_bytes)
            .verify(signing_string.as_bytes(), &signature_bytes)
            .is_ok(),
    }
}
