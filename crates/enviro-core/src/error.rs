//! Error types for enviro-core.
//!
//! Everything here degrades to "skip this delivery": no error in the
//! engine is fatal. Sensor faults become sentinel values in the outgoing
//! frame, transport faults are logged and the delivery dropped, and an
//! invalid subscription write leaves the state untouched.

use thiserror::Error;

/// Errors surfaced by the telemetry engine and its collaborators.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A sensor channel could not be read.
    #[error("Sensor read failed on {channel}: {reason}")]
    SensorRead {
        /// Human-readable channel name.
        channel: &'static str,
        /// Driver-reported reason.
        reason: String,
    },

    /// The transport rejected a send at issuance time.
    #[error("Transport rejected {mode} delivery: {reason}")]
    TransportRejected {
        /// Delivery mode that was attempted ("notify" or "indicate").
        mode: &'static str,
        /// Transport-reported reason.
        reason: String,
    },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Create a sensor read error with channel context.
    pub fn sensor_read(channel: &'static str, reason: impl Into<String>) -> Self {
        Self::SensorRead {
            channel,
            reason: reason.into(),
        }
    }

    /// Create a transport rejection error for an unacknowledged send.
    pub fn notify_rejected(reason: impl Into<String>) -> Self {
        Self::TransportRejected {
            mode: "notify",
            reason: reason.into(),
        }
    }

    /// Create a transport rejection error for an acknowledged send.
    pub fn indicate_rejected(reason: impl Into<String>) -> Self {
        Self::TransportRejected {
            mode: "indicate",
            reason: reason.into(),
        }
    }
}

/// Result type alias using enviro-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;
