//! Error types for data parsing in enviro-types.

use thiserror::Error;

/// Errors that can occur when parsing telemetry data.
///
/// This error type is platform-agnostic and does not include
/// transport-specific errors (those belong in enviro-core).
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Failed to parse data due to insufficient bytes.
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),
}

/// Result type alias using enviro-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
