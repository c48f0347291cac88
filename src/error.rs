//! Unified error handling for the toll matching library.
//!
//! All failures in this crate are local, pure-computation failures with no
//! partial side effects: malformed polyline input, malformed reference data,
//! or invalid request parameters. They are surfaced as typed values and never
//! swallowed; mapping them to user-visible responses is the caller's job.

use thiserror::Error;

/// Result type alias for toll matching operations.
pub type Result<T> = std::result::Result<T, TollMatchError>;

/// Errors that can occur during toll matching operations.
#[derive(Debug, Error)]
pub enum TollMatchError {
    /// An encoded polyline ended while a coordinate group still had its
    /// continuation bit set, or a latitude arrived without its longitude.
    #[error("polyline truncated at byte {index}: coordinate group never terminated")]
    TruncatedPolyline {
        /// Byte offset where input ran out.
        index: usize,
    },

    /// A byte outside the polyline encoding alphabet (`?`..`~`).
    #[error("invalid polyline character {byte:#04x} at byte {index}")]
    InvalidPolylineChar {
        /// The offending byte.
        byte: u8,
        /// Byte offset of the character.
        index: usize,
    },

    /// A coordinate group longer than any 32-bit delta can produce.
    #[error("polyline coordinate group too long at byte {index}")]
    OverlongGroup {
        /// Byte offset where the group exceeded its maximum length.
        index: usize,
    },

    /// A pincode that is not exactly six ASCII digits.
    #[error("pincode '{pincode}' is not a valid six-digit pincode")]
    InvalidPincode { pincode: String },

    /// Source and destination pincodes are identical.
    #[error("source and destination pincodes are both '{pincode}'")]
    SamePincode { pincode: String },

    /// The plaza CSV lacks a required header column.
    #[error("plaza CSV is missing required column '{column}'")]
    MissingColumn { column: &'static str },

    /// Underlying CSV read or parse failure (unreadable file, bad encoding).
    #[error("failed to read plaza data: {0}")]
    Csv(#[from] csv::Error),
}
