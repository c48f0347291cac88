//! Request validation performed before the matching engine is invoked.
//!
//! The engine itself never raises on well-formed input; callers check
//! request parameters here first and map the typed errors to their own
//! responses.

use crate::error::{Result, TollMatchError};

/// Validate that a pincode is exactly six ASCII digits.
pub fn validate_pincode(pincode: &str) -> Result<()> {
    if pincode.len() == 6 && pincode.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(TollMatchError::InvalidPincode {
            pincode: pincode.to_string(),
        })
    }
}

/// Validate a source/destination pincode pair.
///
/// Both pincodes must be valid and distinct; a route from a pincode to
/// itself has no toll plazas to report.
pub fn validate_pincode_pair(source: &str, destination: &str) -> Result<()> {
    validate_pincode(source)?;
    validate_pincode(destination)?;

    if source == destination {
        return Err(TollMatchError::SamePincode {
            pincode: source.to_string(),
        });
    }

    Ok(())
}
