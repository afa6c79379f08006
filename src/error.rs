//! # KST3320 Error Handling
//!
//! This module defines the DecodeError enum, which represents the ways a
//! KST3320 uplink payload can fail to decode.

use thiserror::Error;

/// Represents the ways a KST3320 payload decode can fail.
///
/// Both variants are recoverable: the uplink layer converts them into a
/// single `parse_error` record instead of letting them escape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Indicates the transport string is not valid hexadecimal (odd
    /// length or a non-hex character).
    #[error("Invalid hexadecimal payload: {0}")]
    InvalidHexString(String),

    /// Indicates the payload is shorter than the selected layout
    /// requires, including the two-byte header itself.
    #[error("Payload truncated: need {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
}
