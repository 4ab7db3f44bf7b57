//! Canonical signing-string construction.
//!
//! The Beckn signing string is exactly three lines, no trailing newline:
//!
//! ```text
//! (created): {created}
//! (expires): {expires}
//! digest: BLAKE-512={digest}
//! ```

/// Build the canonical signing string for a validity window and payload digest.
///
/// `digest` is the bare base64 digest; the `BLAKE-512=` prefix is added here.
pub fn build_signing_string(created: i64, expires: i64, digest: &str) -> String {
    format!("(created): {created}\n(expires): {expires}\ndigest: BLAKE-512={digest}")
}
