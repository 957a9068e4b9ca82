//! Canonicalization of raw sensor readings.
//!
//! Raw readings arrive as two-part fixed-point values (`units` plus
//! `micros` in millionths). The functions here map them to the canonical
//! integer units that go on the wire: centi-°C, Pa, and centi-%RH. All
//! fractional division truncates toward zero, matching C integer division,
//! so a micro part smaller than the divisor contributes nothing in either
//! direction.

use crate::raw::RawReading;

/// Value substituted for temperature when the sensor read fails.
///
/// Legacy wire convention: the all-ones bit pattern (`-1` as i16, 0xFFFF).
/// It collides with a legitimate reading of -0.01 °C and exists only for
/// compatibility with the legacy firmware; prefer carrying a `Result`
/// until the frame is built.
pub const TEMPERATURE_UNAVAILABLE: i16 = -1;

/// Value substituted for pressure when the sensor read fails.
///
/// Same legacy all-ones convention as [`TEMPERATURE_UNAVAILABLE`].
pub const PRESSURE_UNAVAILABLE: u32 = u32::MAX;

/// Value substituted for humidity when the sensor read fails.
///
/// Same legacy all-ones convention as [`TEMPERATURE_UNAVAILABLE`]. Note
/// this lies outside the clamped [0, 10000] range of a real conversion.
pub const HUMIDITY_UNAVAILABLE: u16 = u16::MAX;

/// Convert a raw temperature reading (°C) to centi-degrees Celsius.
///
/// `units*100 + micros/10_000`, accumulated in 64 bits and then narrowed
/// with a truncating cast to i16. The cast wraps for values beyond the
/// 16-bit range; that wraparound is the defined behavior of the canonical
/// storage width, not an error. No clamping is applied.
///
/// # Examples
///
/// ```
/// use enviro_types::{RawReading, convert};
///
/// assert_eq!(convert::temperature(RawReading::new(25, 0)), 2500);
/// assert_eq!(convert::temperature(RawReading::new(-5, -250_000)), -525);
/// // fractional magnitude below 10_000 truncates to zero
/// assert_eq!(convert::temperature(RawReading::new(0, 9_999)), 0);
/// ```
#[must_use]
pub fn temperature(raw: RawReading) -> i16 {
    let centi = i64::from(raw.units) * 100 + i64::from(raw.micros / 10_000);
    centi as i16
}

/// Convert a raw pressure reading (kPa) to Pascals.
///
/// `units*1000 + micros/1000`, accumulated in 64 bits. A negative result
/// can only come from invalid or negative raw input and clamps to 0; it
/// never wraps. The final narrowing to u32 is a truncating cast.
///
/// # Examples
///
/// ```
/// use enviro_types::{RawReading, convert};
///
/// assert_eq!(convert::pressure(RawReading::new(1, 500_000)), 1500);
/// assert_eq!(convert::pressure(RawReading::new(-1, -500_000)), 0);
/// ```
#[must_use]
pub fn pressure(raw: RawReading) -> u32 {
    let pa = i64::from(raw.units) * 1000 + i64::from(raw.micros / 1000);
    if pa < 0 { 0 } else { pa as u32 }
}

/// Convert a raw humidity reading (%RH) to centi-percent.
///
/// `units*100 + micros/10_000`, clamped to the closed range [0, 10000]
/// however far the input lies outside it.
///
/// # Examples
///
/// ```
/// use enviro_types::{RawReading, convert};
///
/// assert_eq!(convert::humidity(RawReading::new(50, 0)), 5000);
/// assert_eq!(convert::humidity(RawReading::new(100, 1_000_000)), 10000);
/// assert_eq!(convert::humidity(RawReading::new(-5, -100_000)), 0);
/// ```
#[must_use]
pub fn humidity(raw: RawReading) -> u16 {
    let cpermil = i64::from(raw.units) * 100 + i64::from(raw.micros / 10_000);
    cpermil.clamp(0, 10_000) as u16
}
