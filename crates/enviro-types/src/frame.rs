//! The packed telemetry frame sent over the wireless link.

use bytes::Buf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Number of bytes in an encoded [`TelemetryFrame`].
pub const FRAME_LEN: usize = 6;

/// One canonical telemetry sample: the three values a peer receives.
///
/// Field widths match the canonical units, not the wire: pressure is kept
/// as full u32 Pascals and only its low 16 bits are transmitted, mirroring
/// the legacy characteristic layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TelemetryFrame {
    /// Temperature in centi-degrees Celsius.
    pub temperature: i16,
    /// Pressure in Pascals.
    pub pressure: u32,
    /// Relative humidity in centi-percent (0..=10000 for real readings).
    pub humidity: u16,
}

impl TelemetryFrame {
    /// Create a frame from the three canonical values.
    #[must_use]
    pub const fn new(temperature: i16, pressure: u32, humidity: u16) -> Self {
        Self {
            temperature,
            pressure,
            humidity,
        }
    }

    /// Encode the frame into its 6-byte wire layout.
    ///
    /// Layout (all little-endian):
    /// - bytes 0-1: temperature (i16, centi-°C)
    /// - bytes 2-3: pressure low word (u32 Pa truncated to u16)
    /// - bytes 4-5: humidity (u16, centi-%)
    #[must_use]
    pub fn encode(&self) -> [u8; FRAME_LEN] {
        let mut out = [0u8; FRAME_LEN];
        out[0..2].copy_from_slice(&self.temperature.to_le_bytes());
        out[2..4].copy_from_slice(&(self.pressure as u16).to_le_bytes());
        out[4..6].copy_from_slice(&self.humidity.to_le_bytes());
        out
    }

    /// Parse a frame from wire bytes, as a central would after a
    /// notification or characteristic read.
    ///
    /// The pressure field comes back as the transmitted low word; the
    /// high bits are not recoverable. Extra trailing bytes are ignored.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ParseError> {
        if data.len() < FRAME_LEN {
            return Err(ParseError::InvalidFrame(format!(
                "telemetry frame requires {} bytes, got {}",
                FRAME_LEN,
                data.len()
            )));
        }

        let mut buf = data;
        let temperature = buf.get_i16_le();
        let pressure = u32::from(buf.get_u16_le());
        let humidity = buf.get_u16_le();

        Ok(Self {
            temperature,
            pressure,
            humidity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout_is_little_endian() {
        let frame = TelemetryFrame::new(2500, 101_325, 4500);
        let bytes = frame.encode();

        assert_eq!(&bytes[0..2], &2500i16.to_le_bytes());
        // 101_325 = 0x18BCD; only the low word 0x8BCD is transmitted
        assert_eq!(&bytes[2..4], &0x8BCDu16.to_le_bytes());
        assert_eq!(&bytes[4..6], &4500u16.to_le_bytes());
    }

    #[test]
    fn test_encode_negative_temperature() {
        let frame = TelemetryFrame::new(-525, 0, 0);
        let bytes = frame.encode();
        assert_eq!(&bytes[0..2], &(-525i16).to_le_bytes());
    }

    #[test]
    fn test_from_bytes_roundtrips_low_word() {
        let frame = TelemetryFrame::new(-1000, 1500, 9999);
        let parsed = TelemetryFrame::from_bytes(&frame.encode()).unwrap();
        assert_eq!(parsed, frame);
    }

    #[test]
    fn test_from_bytes_rejects_short_input() {
        let err = TelemetryFrame::from_bytes(&[0u8; 5]).unwrap_err();
        assert!(err.to_string().contains("requires 6 bytes"));
    }

    #[test]
    fn test_from_bytes_ignores_trailing_bytes() {
        let mut data = TelemetryFrame::new(1, 2, 3).encode().to_vec();
        data.extend_from_slice(&[0xAA, 0xBB]);
        let parsed = TelemetryFrame::from_bytes(&data).unwrap();
        assert_eq!(parsed.temperature, 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialization() {
        let frame = TelemetryFrame::new(2500, 101_325, 4500);
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"pressure\":101325"));
    }
}
