//! Signature validity-window enforcement.

use crate::clock::Clock;
use crate::header::SignatureDescriptor;
use crate::AuthError;

/// Check the descriptor's validity window against the current time.
///
/// Comparisons are strict; no clock-skew tolerance is applied.
///
/// # Errors
/// * [`AuthError::FutureCreated`] - `created` is after now
/// * [`AuthError::Expired`] - `expires` is before now
pub fn validate_timestamps<C: Clock + ?Sized>(
    descriptor: &SignatureDescriptor,
    clock: &C,
) -> Result<(), AuthError> {
    let now = clock.unix_seconds();

    if descriptor.created > now {
        return Err(AuthError::FutureCreated);
    }
    if descriptor.expires < now {
        return Err(AuthError::Expired);
    }

    Ok(())
}
