//! BLAKE2b-512 payload digest computation.

use base64::{engine::general_purpose::STANDARD, Engine};
use blake2::{Blake2b512, Digest};

/// Compute the BLAKE2b-512 digest of a payload, base64-encoded.
pub fn blake2b512_b64(payload: &[u8]) -> String {
    let hash = Blake2b512::digest(payload);
    STANDARD.encode(hash)
}

/// Format the digest the way the signing string embeds it: `BLAKE-512={digest}`.
pub fn format_digest(payload: &[u8]) -> String {
    format!("BLAKE-512={}", blake2b512_b64(payload))
}
