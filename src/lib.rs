//! # kst3320-rs - A Rust Crate for KST3320 LoRaWAN Payload Decoding
//!
//! The kst3320-rs crate decodes the binary uplink payload of the KST3320
//! LoRaWAN distance/GPS sensor into named, typed readings suitable for
//! ingestion by a downstream time-series platform.
//!
//! ## Features
//!
//! - Decode hex-encoded uplink payloads into ordered reading sequences
//! - Distance payloads with a derived, clamped fill-level percentage
//! - Battery payloads
//! - Standard (11-byte) and extended (20-byte) GPS fixes, including the
//!   combined latitude/longitude location point
//! - Configurable bin mounting geometry for the fill-level formula
//! - Uplink envelope handling: series/time metadata propagation and
//!   `parse_error` records for undecodable payloads
//! - Support for logging and error handling
//!
//! ## Usage
//!
//! To use the kst3320-rs crate in your Rust project, add the following to
//! your Cargo.toml file:
//!
//! ```toml
//! [dependencies]
//! kst3320-rs = "1.0.0"
//! ```
//!
//! Then, in your Rust code, you can import the necessary types and
//! functions:
//!
//! ```rust
//! use kst3320_rs::{decode_hex, Kst3320Decoder, FillGeometry, Reading};
//!
//! let readings = decode_hex("018203e8").unwrap();
//! assert_eq!(readings.len(), 4); // channel, type, distance, fill_level
//! ```

pub mod constants;
pub mod error;
pub mod logging;
pub mod payload;
pub mod uplink;

pub use crate::error::DecodeError;
pub use crate::logging::{init_logger, log_info};

// Core decoder types
pub use payload::decoder::{FillGeometry, Kst3320Decoder, PayloadType};
pub use payload::record::{GeoPoint, Reading, ReadingValue};

// Uplink envelope
pub use uplink::{decode_uplink, TaggedReading, UplinkMessage};

/// Decode a hex-encoded KST3320 payload with the default mounting
/// geometry.
///
/// # Arguments
/// * `raw_hex` - Hex-encoded uplink payload (at least two bytes)
///
/// # Returns
/// * `Ok(Vec<Reading>)` - Ordered readings, header readings first
/// * `Err(DecodeError)` - Malformed hex or truncated payload
pub fn decode_hex(raw_hex: &str) -> Result<Vec<Reading>, DecodeError> {
    Kst3320Decoder::new().decode_hex(raw_hex)
}

/// Decode a raw KST3320 payload with the default mounting geometry.
///
/// # Arguments
/// * `payload` - Raw uplink bytes (at least the two-byte header)
///
/// # Returns
/// * `Ok(Vec<Reading>)` - Ordered readings, header readings first
/// * `Err(DecodeError)` - Truncated payload
pub fn decode(payload: &[u8]) -> Result<Vec<Reading>, DecodeError> {
    Kst3320Decoder::new().decode(payload)
}
