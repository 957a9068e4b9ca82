//! Platform-agnostic types for the enviro telemetry node.
//!
//! This crate provides the shared data model used by the device engine
//! (enviro-core) and by client-side tooling: raw sensor readings, their
//! canonical fixed-point conversions, and the packed frame that goes over
//! the wireless link.
//!
//! # Features
//!
//! - Raw two-part fixed-point sensor readings
//! - Canonicalization to centi-°C, Pa, and centi-%RH
//! - The 6-byte little-endian telemetry frame
//! - UUID constants for the BLE service and characteristic
//!
//! # Example
//!
//! ```
//! use enviro_types::{RawReading, TelemetryFrame, convert};
//!
//! let raw = RawReading::new(25, 130_000); // 25.13 °C
//! let frame = TelemetryFrame::new(convert::temperature(raw), 101_325, 4500);
//! assert_eq!(frame.encode().len(), 6);
//! ```

pub mod convert;
pub mod error;
pub mod frame;
pub mod raw;
pub mod uuid;

pub use error::{ParseError, ParseResult};
pub use frame::{FRAME_LEN, TelemetryFrame};
pub use raw::RawReading;
pub use uuid as uuids;

#[cfg(test)]
mod tests {
    use super::*;

    // Cross-module checks; per-module behavior lives next to each module.

    #[test]
    fn test_converted_reading_survives_the_wire() {
        let temperature = convert::temperature(RawReading::new(-5, -250_000));
        let pressure = convert::pressure(RawReading::new(101, 325_000));
        let humidity = convert::humidity(RawReading::new(45, 0));

        let frame = TelemetryFrame::new(temperature, pressure, humidity);
        let parsed = TelemetryFrame::from_bytes(&frame.encode()).unwrap();

        assert_eq!(parsed.temperature, -525);
        assert_eq!(parsed.humidity, 4500);
        // pressure is truncated to its transmitted low word
        assert_eq!(parsed.pressure, (101_325u32 as u16) as u32);
    }

    #[test]
    fn test_sentinels_encode_as_all_ones() {
        let frame = TelemetryFrame::new(
            convert::TEMPERATURE_UNAVAILABLE,
            convert::PRESSURE_UNAVAILABLE,
            convert::HUMIDITY_UNAVAILABLE,
        );
        assert_eq!(frame.encode(), [0xFF; 6]);
    }
}
