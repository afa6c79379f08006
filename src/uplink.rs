//! Uplink envelope handling
//!
//! Bridges inbound transport records and the payload decoder: pulls the
//! hex payload out of an uplink message, decodes it, and tags every
//! resulting reading with the message's series/time metadata. A failed
//! decode is collapsed into a single `parse_error` record, so the
//! downstream store always receives well-formed records and never a
//! partial reading set.

use crate::payload::decoder::Kst3320Decoder;
use crate::payload::record::Reading;
use serde::{Deserialize, Serialize};

/// Inbound uplink record as delivered by the transport integration.
///
/// `serie` and `time` are opaque here; they are copied onto every output
/// record unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UplinkMessage {
    /// Hex-encoded payload bytes.
    pub value: String,
    /// Series identifier assigned by the sending device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serie: Option<String>,
    /// Reception timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// A decoded reading tagged with its uplink's metadata.
///
/// Serializes as the reading's own fields with `serie`/`time` appended,
/// matching the record shape of the downstream platform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggedReading {
    #[serde(flatten)]
    pub reading: Reading,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serie: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// Decode an uplink message into tagged output records.
///
/// On success every decoded reading is returned with the uplink's
/// metadata attached. On failure the output is exactly one `parse_error`
/// record carrying the error message; the failure replaces the normal
/// reading set rather than augmenting it.
pub fn decode_uplink(decoder: &Kst3320Decoder, uplink: &UplinkMessage) -> Vec<TaggedReading> {
    let readings = match decoder.decode_hex(&uplink.value) {
        Ok(readings) => readings,
        Err(e) => {
            crate::logging::log_warn(&format!(
                "Failed to decode uplink payload {:?}: {e}",
                uplink.value
            ));
            vec![Reading::text("parse_error", e.to_string())]
        }
    };

    readings
        .into_iter()
        .map(|reading| TaggedReading {
            reading,
            serie: uplink.serie.clone(),
            time: uplink.time.clone(),
        })
        .collect()
}
