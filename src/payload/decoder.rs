//! KST3320 payload decoder
//!
//! The KST3320 uplink format is a two-byte header (LoRa channel + data
//! type tag) followed by a type-specific field block:
//!
//! - `0x82` Distance: 16-bit BE distance in mm, plus a derived fill level
//! - `0x78` Battery: 8-bit battery level
//! - `0x88` GPS: 24-bit BE lat/lng/alt; the 20-byte extended variant
//!   (sent when ADR is enabled) appends 32-bit BE accuracies and a
//!   satellite count
//!
//! All multi-byte fields are big-endian and signed. An unrecognized tag,
//! or a GPS payload of unexpected length, decodes to the header readings
//! alone.

use crate::constants::*;
use crate::error::DecodeError;
use crate::payload::record::{GeoPoint, Reading};
use log::debug;

/// Payload variants selected by the data type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadType {
    /// Distance measurement (0x82)
    Distance,
    /// Battery level (0x78)
    Battery,
    /// GPS fix, standard or extended depending on payload length (0x88)
    Gps,
    /// Any other tag; decoded as header-only
    Unknown(u8),
}

impl PayloadType {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            SENSOR_TYPE_DISTANCE => Self::Distance,
            SENSOR_TYPE_BATTERY => Self::Battery,
            SENSOR_TYPE_GPS => Self::Gps,
            other => Self::Unknown(other),
        }
    }
}

/// Mounting geometry for the fill-level computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillGeometry {
    /// Distance in millimeters from the sensor face to the fill line.
    pub height_above_fill_line: f64,
    /// Total height in millimeters of the monitored bin.
    pub distance_to_bottom: f64,
}

impl Default for FillGeometry {
    fn default() -> Self {
        Self {
            height_above_fill_line: DEFAULT_FILL_LINE_OFFSET_MM,
            distance_to_bottom: DEFAULT_BIN_HEIGHT_MM,
        }
    }
}

impl FillGeometry {
    /// Convert a measured distance into a fill percentage, clamped to
    /// the closed interval [0, 100].
    pub fn fill_level(&self, distance_mm: f64) -> f64 {
        let percentage = 100.0
            - 100.0 * ((distance_mm - self.height_above_fill_line) / self.distance_to_bottom);
        percentage.clamp(0.0, 100.0)
    }
}

/// KST3320 payload decoder.
///
/// Holds only the mounting geometry; decoding is a pure function of the
/// input bytes, so a single decoder may be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Kst3320Decoder {
    pub geometry: FillGeometry,
}

impl Kst3320Decoder {
    /// Create a decoder with the default mounting geometry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder for a specific bin installation.
    pub fn with_geometry(geometry: FillGeometry) -> Self {
        Self { geometry }
    }

    /// Decode a hex-encoded uplink payload.
    ///
    /// Accepts upper- or lowercase hex; leading/trailing whitespace is
    /// ignored. An odd-length or non-hex string fails without partial
    /// output.
    pub fn decode_hex(&self, raw_hex: &str) -> Result<Vec<Reading>, DecodeError> {
        let payload = hex::decode(raw_hex.trim())
            .map_err(|e| DecodeError::InvalidHexString(e.to_string()))?;
        self.decode(&payload)
    }

    /// Decode a raw uplink payload into its ordered reading sequence.
    ///
    /// On success the sequence always starts with `lora_channel` and
    /// `data_type`, followed by the readings of the selected variant.
    pub fn decode(&self, payload: &[u8]) -> Result<Vec<Reading>, DecodeError> {
        if payload.len() < HEADER_LENGTH {
            return Err(DecodeError::Truncated {
                expected: HEADER_LENGTH,
                actual: payload.len(),
            });
        }
        let channel = payload[0] as i8;
        let data_type = payload[1];

        let mut readings = vec![
            Reading::numeric("lora_channel", channel as f64),
            Reading::numeric("data_type", data_type as f64),
        ];

        match PayloadType::from_byte(data_type) {
            PayloadType::Distance => {
                let distance = read_i16_be(payload, DISTANCE_OFFSET)? as f64;
                readings.push(Reading::with_unit("distance", distance, "mm"));
                readings.push(Reading::numeric(
                    "fill_level",
                    self.geometry.fill_level(distance),
                ));
            }
            PayloadType::Battery => {
                let battery = read_i8(payload, BATTERY_OFFSET)?;
                readings.push(Reading::numeric("battery", battery as f64));
            }
            // Second-level dispatch: the GPS tag selects its variant on
            // the exact payload length.
            PayloadType::Gps => match payload.len() {
                GPS_STANDARD_LENGTH => {
                    decode_gps_fix(payload, &mut readings)?;
                }
                GPS_EXTENDED_LENGTH => {
                    decode_gps_fix(payload, &mut readings)?;
                    readings.push(Reading::numeric(
                        "horizontal_accuracy",
                        read_i32_be(payload, GPS_HORIZONTAL_ACCURACY_OFFSET)? as f64
                            / ACCURACY_SCALE,
                    ));
                    readings.push(Reading::numeric(
                        "vertical_accuracy",
                        read_i32_be(payload, GPS_VERTICAL_ACCURACY_OFFSET)? as f64
                            / ACCURACY_SCALE,
                    ));
                    readings.push(Reading::numeric(
                        "satellites",
                        read_i8(payload, GPS_SATELLITES_OFFSET)? as f64,
                    ));
                }
                other => {
                    debug!("GPS payload with unexpected length {other}, emitting header only");
                }
            },
            PayloadType::Unknown(tag) => {
                debug!("Unknown data type 0x{tag:02X}, emitting header only");
            }
        }

        Ok(readings)
    }
}

/// Latitude/longitude/altitude block shared by both GPS variants, plus
/// the combined `location` point.
fn decode_gps_fix(payload: &[u8], readings: &mut Vec<Reading>) -> Result<(), DecodeError> {
    let latitude = read_i24_be(payload, GPS_LATITUDE_OFFSET)? as f64 / COORDINATE_SCALE;
    let longitude = read_i24_be(payload, GPS_LONGITUDE_OFFSET)? as f64 / COORDINATE_SCALE;
    let altitude = read_i24_be(payload, GPS_ALTITUDE_OFFSET)? as f64 / ALTITUDE_SCALE;

    readings.push(Reading::numeric("latitude", latitude));
    readings.push(Reading::numeric("longitude", longitude));
    readings.push(Reading::numeric("altitude", altitude));
    readings.push(Reading::location(GeoPoint {
        lat: latitude,
        lng: longitude,
    }));
    Ok(())
}

fn check_bounds(payload: &[u8], offset: usize, size: usize) -> Result<(), DecodeError> {
    if payload.len() < offset + size {
        return Err(DecodeError::Truncated {
            expected: offset + size,
            actual: payload.len(),
        });
    }
    Ok(())
}

fn read_i8(payload: &[u8], offset: usize) -> Result<i8, DecodeError> {
    check_bounds(payload, offset, 1)?;
    Ok(payload[offset] as i8)
}

fn read_i16_be(payload: &[u8], offset: usize) -> Result<i16, DecodeError> {
    check_bounds(payload, offset, 2)?;
    Ok(i16::from_be_bytes([payload[offset], payload[offset + 1]]))
}

/// Sign-extending 24-bit big-endian read.
fn read_i24_be(payload: &[u8], offset: usize) -> Result<i32, DecodeError> {
    check_bounds(payload, offset, 3)?;
    let fill = if payload[offset] & 0x80 != 0 { 0xFF } else { 0x00 };
    Ok(i32::from_be_bytes([
        fill,
        payload[offset],
        payload[offset + 1],
        payload[offset + 2],
    ]))
}

fn read_i32_be(payload: &[u8], offset: usize) -> Result<i32, DecodeError> {
    check_bounds(payload, offset, 4)?;
    Ok(i32::from_be_bytes([
        payload[offset],
        payload[offset + 1],
        payload[offset + 2],
        payload[offset + 3],
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_type_from_byte() {
        assert_eq!(PayloadType::from_byte(0x82), PayloadType::Distance);
        assert_eq!(PayloadType::from_byte(0x78), PayloadType::Battery);
        assert_eq!(PayloadType::from_byte(0x88), PayloadType::Gps);
        assert_eq!(PayloadType::from_byte(0x42), PayloadType::Unknown(0x42));
    }

    #[test]
    fn test_fill_level_formula() {
        let geometry = FillGeometry::default();
        assert_eq!(geometry.fill_level(0.0), 100.0);
        assert_eq!(geometry.fill_level(1000.0), 75.0);
        assert_eq!(geometry.fill_level(4000.0), 0.0);
    }

    #[test]
    fn test_fill_level_clamps() {
        let geometry = FillGeometry::default();
        // Measured distance beyond the bin bottom clamps to empty
        assert_eq!(geometry.fill_level(5000.0), 0.0);
        // A negative distance reading clamps to full
        assert_eq!(geometry.fill_level(-200.0), 100.0);
    }

    #[test]
    fn test_fill_level_custom_geometry() {
        let geometry = FillGeometry {
            height_above_fill_line: 100.0,
            distance_to_bottom: 2000.0,
        };
        assert_eq!(geometry.fill_level(1100.0), 50.0);
    }

    #[test]
    fn test_read_i16_be() {
        let data = [0x00, 0x00, 0x03, 0xE8];
        assert_eq!(read_i16_be(&data, 2).unwrap(), 1000);

        let data = [0xFF, 0x38];
        assert_eq!(read_i16_be(&data, 0).unwrap(), -200);
    }

    #[test]
    fn test_read_i24_be_sign_extension() {
        assert_eq!(read_i24_be(&[0x06, 0x6A, 0x6E], 0).unwrap(), 420_462);
        // High bit set: value is negative
        assert_eq!(read_i24_be(&[0xF4, 0x8E, 0x50], 0).unwrap(), -750_000);
    }

    #[test]
    fn test_read_i32_be() {
        assert_eq!(read_i32_be(&[0x00, 0x00, 0x0B, 0xB8], 0).unwrap(), 3000);
        assert_eq!(
            read_i32_be(&[0xFF, 0xFF, 0xFF, 0xFF], 0).unwrap(),
            -1
        );
    }

    #[test]
    fn test_reads_report_truncation() {
        let err = read_i16_be(&[0x01, 0x82, 0x03], 2).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Truncated {
                expected: 4,
                actual: 3
            }
        );

        assert!(read_i24_be(&[0x00; 4], 2).is_err());
        assert!(read_i32_be(&[0x00; 5], 2).is_err());
        assert!(read_i8(&[], 0).is_err());
    }
}
