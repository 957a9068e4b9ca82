//! Sensor source capability trait.
//!
//! The engine never talks to hardware directly. Each environmental
//! backend (BME280, a split HTS221/LPS22HB pair, a simulator) implements
//! [`SensorSource`] and is selected at configuration time, which replaces
//! the legacy compile-time board branching.

use async_trait::async_trait;

use enviro_types::RawReading;

use crate::error::Result;

/// A logical sensor channel the engine samples each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorChannel {
    /// Ambient temperature in °C.
    Temperature,
    /// Barometric pressure in kPa.
    Pressure,
    /// Relative humidity in %RH.
    Humidity,
}

impl SensorChannel {
    /// All channels, in frame order.
    pub const ALL: [SensorChannel; 3] = [
        SensorChannel::Temperature,
        SensorChannel::Pressure,
        SensorChannel::Humidity,
    ];

    /// Stable lowercase name for logging.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SensorChannel::Temperature => "temperature",
            SensorChannel::Pressure => "pressure",
            SensorChannel::Humidity => "humidity",
        }
    }
}

impl std::fmt::Display for SensorChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait abstracting the environmental sensor backend.
///
/// Implementations fetch the current raw value for one channel. A failed
/// read is reported as an error; the engine substitutes the legacy
/// sentinel for that channel when building the outgoing frame, so a fault
/// still participates in change detection.
///
/// # Example
///
/// ```ignore
/// use enviro_core::{SensorChannel, SensorSource};
///
/// async fn sample_temperature<S: SensorSource>(sensor: &S) {
///     match sensor.read(SensorChannel::Temperature).await {
///         Ok(raw) => println!("temperature: {raw}"),
///         Err(e) => eprintln!("read failed: {e}"),
///     }
/// }
/// ```
#[async_trait]
pub trait SensorSource: Send + Sync {
    /// Read the current raw value of one channel.
    async fn read(&self, channel: SensorChannel) -> Result<RawReading>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_names() {
        assert_eq!(SensorChannel::Temperature.name(), "temperature");
        assert_eq!(SensorChannel::Pressure.to_string(), "pressure");
        assert_eq!(SensorChannel::ALL.len(), 3);
    }
}
