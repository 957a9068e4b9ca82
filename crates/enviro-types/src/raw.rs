//! Raw two-part fixed-point sensor readings.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A raw sensor reading as produced by the driver layer.
///
/// The physical quantity is `units + micros * 1e-6`, the two-part
/// fixed-point representation used by Zephyr-style sensor drivers. Both
/// parts carry the sign, so `-5.25` arrives as `{ units: -5, micros: -250_000 }`.
///
/// Readings are ephemeral: one is produced per sample and converted
/// immediately, never retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawReading {
    /// Whole units of the quantity (°C, kPa, %RH depending on channel).
    pub units: i32,
    /// Fractional part in millionths of a unit.
    pub micros: i32,
}

impl RawReading {
    /// Create a raw reading from its two parts.
    #[must_use]
    pub const fn new(units: i32, micros: i32) -> Self {
        Self { units, micros }
    }
}

impl fmt::Display for RawReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:06}", self.units, self.micros.unsigned_abs())
    }
}
