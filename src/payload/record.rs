//! Output records produced by the payload decoder.
//!
//! Each decoded measurement is a [`Reading`]: a name from the fixed
//! KST3320 vocabulary, a value, and an optional unit. Readings serialize
//! to the record shape the downstream time-series platform ingests.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

/// A latitude/longitude pair carried by the composite `location` reading.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Represents the value of a decoded reading.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadingValue {
    Numeric(f64),
    Text(String),
    Location(GeoPoint),
}

/// One named measurement destined for the downstream time-series store.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub name: String,
    pub value: ReadingValue,
    /// Unit of measurement; in the KST3320 vocabulary only `distance`
    /// carries one ("mm").
    pub unit: Option<String>,
}

impl Reading {
    /// Create a plain numeric reading.
    pub fn numeric(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            value: ReadingValue::Numeric(value),
            unit: None,
        }
    }

    /// Create a numeric reading with a unit of measurement.
    pub fn with_unit(name: &str, value: f64, unit: &str) -> Self {
        Self {
            name: name.to_string(),
            value: ReadingValue::Numeric(value),
            unit: Some(unit.to_string()),
        }
    }

    /// Create a text reading (used for the `parse_error` record).
    pub fn text(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: ReadingValue::Text(value.into()),
            unit: None,
        }
    }

    /// Create the composite `location` reading from a decoded fix.
    pub fn location(point: GeoPoint) -> Self {
        Self {
            name: "location".to_string(),
            value: ReadingValue::Location(point),
            unit: None,
        }
    }
}

// Scalar readings serialize as {"name", "value", "unit"?}; the composite
// one puts its point under "location" instead of "value".
impl Serialize for Reading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        match &self.value {
            ReadingValue::Numeric(value) => map.serialize_entry("value", value)?,
            ReadingValue::Text(value) => map.serialize_entry("value", value)?,
            ReadingValue::Location(point) => map.serialize_entry("location", point)?,
        }
        if let Some(unit) = &self.unit {
            map.serialize_entry("unit", unit)?;
        }
        map.end()
    }
}
