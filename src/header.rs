//! Beckn Authorization header parsing.
//!
//! Header format:
//!
//! ```text
//! Signature keyId="{subscriberId}|{uniqueKeyId}|{algorithm}",algorithm="...",
//!           created="{unixSeconds}",expires="{unixSeconds}",headers="...",signature="{base64}"
//! ```

use crate::AuthError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// The scheme prefix every Beckn signature header must start with.
const SCHEME_PREFIX: &str = "Signature ";

/// `name="value"` token grammar; names are word characters, values run to the
/// next double quote.
static PARAM_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(\w+)="([^"]+)""#).expect("valid regex"));

/// Parsed signature header components.
#[derive(Debug, Clone)]
pub struct SignatureDescriptor {
    /// Raw composite key identifier `subscriberId|uniqueKeyId|algorithm`.
    pub key_id: String,
    /// Subscriber whose key signed the request.
    pub subscriber_id: String,
    /// Which of the subscriber's keys signed the request.
    pub unique_key_id: String,
    /// Signature algorithm named in the keyId.
    pub algorithm: String,
    /// Signature creation time, Unix seconds.
    pub created: i64,
    /// Signature expiry time, Unix seconds.
    pub expires: i64,
    /// Header list covered by the signature.
    pub headers: String,
    /// Base64-encoded signature.
    pub signature: String,
}

/// Parse a raw Authorization header value into a [`SignatureDescriptor`].
///
/// # Errors
/// * [`AuthError::HeaderMissing`] - header absent or empty
/// * [`AuthError::InvalidFormat`] - scheme prefix is not `Signature `
/// * [`AuthError::PartialSignature`] - a required field is missing, or
///   `created`/`expires` is not a base-10 integer
/// * [`AuthError::SubscriberNotFound`] - keyId does not split into 3 parts
///   with a non-empty subscriber
pub fn parse_signature_header(raw_header: Option<&str>) -> Result<SignatureDescriptor, AuthError> {
    let raw_header = match raw_header {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AuthError::HeaderMissing),
    };

    let signature_part = raw_header
        .strip_prefix(SCHEME_PREFIX)
        .ok_or(AuthError::InvalidFormat)?;

    // Later duplicates overwrite earlier ones.
    let mut params: HashMap<&str, &str> = HashMap::new();
    for capture in PARAM_REGEX.captures_iter(signature_part) {
        let (_, [name, value]) = capture.extract();
        params.insert(name, value);
    }

    let required = ["keyId", "algorithm", "created", "expires", "headers", "signature"];
    if required.iter().any(|field| !params.contains_key(field)) {
        return Err(AuthError::PartialSignature);
    }

    let key_id = params["keyId"];
    let key_id_parts: Vec<&str> = key_id.split('|').collect();
    if key_id_parts.len() != 3 || key_id_parts[0].is_empty() {
        return Err(AuthError::SubscriberNotFound);
    }
    if key_id_parts[1].is_empty() || key_id_parts[2].is_empty() {
        return Err(AuthError::SubscriberNotFound);
    }

    let created: i64 = params["created"]
        .parse()
        .map_err(|_| AuthError::PartialSignature)?;
    let expires: i64 = params["expires"]
        .parse()
        .map_err(|_| AuthError::PartialSignature)?;

    Ok(SignatureDescriptor {
        key_id: key_id.to_string(),
        subscriber_id: key_id_parts[0].to_string(),
        unique_key_id: key_id_parts[1].to_string(),
        algorithm: key_id_parts[2].to_string(),
        created,
        expires,
        headers: params["headers"].to_string(),
        signature: params["signature"].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_HEADER: &str = r#"Signature keyId="sub1|key1|ed25519",algorithm="ed25519",created="1000",expires="2000",headers="(created) (expires) digest",signature="dGVzdA==""#;

    #[test]
    fn parses_well_formed_header() {
        let descriptor = parse_signature_header(Some(VALID_HEADER)).unwrap();
        assert_eq!(descriptor.key_id, "sub1|key1|ed25519");
        assert_eq!(descriptor.subscriber_id, "sub1");
        assert_eq!(descriptor.unique_key_id, "key1");
        assert_eq!(descriptor.algorithm, "ed25519");
        assert_eq!(descriptor.created, 1000);
        assert_eq!(descriptor.expires, 2000);
        assert_eq!(descriptor.headers, "(created) (expires) digest");
        assert_eq!(descriptor.signature, "dGVzdA==");
    }

    #[test]
    fn absent_header_is_missing() {
        assert!(matches!(
            parse_signature_header(None),
            Err(AuthError::HeaderMissing)
        ));
    }

    #[test]
    fn empty_header_is_missing() {
        assert!(matches!(
            parse_signature_header(Some("")),
            Err(AuthError::HeaderMissing)
        ));
    }

    #[test]
    fn wrong_scheme_is_invalid_format() {
        let header = r#"Bearer keyId="sub1|key1|ed25519""#;
        assert!(matches!(
            parse_signature_header(Some(header)),
            Err(AuthError::InvalidFormat)
        ));
    }

    #[test]
    fn lowercase_scheme_is_invalid_format() {
        let header = VALID_HEADER.replacen("Signature ", "signature ", 1);
        assert!(matches!(
            parse_signature_header(Some(&header)),
            Err(AuthError::InvalidFormat)
        ));
    }

    #[test]
    fn missing_field_is_partial_signature() {
        let header = r#"Signature keyId="sub1|key1|ed25519",algorithm="ed25519",created="1000",expires="2000",headers="digest""#;
        assert!(matches!(
            parse_signature_header(Some(header)),
            Err(AuthError::PartialSignature)
        ));
    }

    #[test]
    fn empty_value_is_partial_signature() {
        // `name=""` does not match the token grammar, so the field is absent.
        let header = VALID_HEADER.replace(r#"signature="dGVzdA==""#, r#"signature="""#);
        assert!(matches!(
            parse_signature_header(Some(&header)),
            Err(AuthError::PartialSignature)
        ));
    }

    #[test]
    fn non_numeric_created_is_partial_signature() {
        let header = VALID_HEADER.replace(r#"created="1000""#, r#"created="soon""#);
        assert!(matches!(
            parse_signature_header(Some(&header)),
            Err(AuthError::PartialSignature)
        ));
    }

    #[test]
    fn non_numeric_expires_is_partial_signature() {
        let header = VALID_HEADER.replace(r#"expires="2000""#, r#"expires="later""#);
        assert!(matches!(
            parse_signature_header(Some(&header)),
            Err(AuthError::PartialSignature)
        ));
    }

    #[test]
    fn two_part_key_id_is_subscriber_not_found() {
        let header = VALID_HEADER.replace("sub1|key1|ed25519", "sub1|key1");
        assert!(matches!(
            parse_signature_header(Some(&header)),
            Err(AuthError::SubscriberNotFound)
        ));
    }

    #[test]
    fn empty_subscriber_is_subscriber_not_found() {
        let header = VALID_HEADER.replace("sub1|key1|ed25519", "|key1|ed25519");
        assert!(matches!(
            parse_signature_header(Some(&header)),
            Err(AuthError::SubscriberNotFound)
        ));
    }

    #[test]
    fn four_part_key_id_is_subscriber_not_found() {
        let header = VALID_HEADER.replace("sub1|key1|ed25519", "sub1|key1|ed25519|extra");
        assert!(matches!(
            parse_signature_header(Some(&header)),
            Err(AuthError::SubscriberNotFound)
        ));
    }

    #[test]
    fn later_duplicate_field_wins() {
        let header = format!(r#"{},created="1500""#, VALID_HEADER);
        let descriptor = parse_signature_header(Some(&header)).unwrap();
        assert_eq!(descriptor.created, 1500);
    }

    #[test]
    fn whitespace_between_fields_is_tolerated() {
        let header = VALID_HEADER.replace("\",", "\", ");
        let descriptor = parse_signature_header(Some(&header)).unwrap();
        assert_eq!(descriptor.subscriber_id, "sub1");
    }
}
