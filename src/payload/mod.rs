//! The payload module contains the components responsible for decoding a
//! KST3320 uplink payload into output records.

pub mod decoder;
pub mod record;

pub use decoder::{FillGeometry, Kst3320Decoder, PayloadType};
pub use record::{GeoPoint, Reading, ReadingValue};
