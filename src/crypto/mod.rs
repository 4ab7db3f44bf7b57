//! Cryptographic primitives for request verification.

pub mod digest;
pub mod signing;
pub mod verify;
