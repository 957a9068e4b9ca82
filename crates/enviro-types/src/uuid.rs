//! Bluetooth UUIDs for the enviro telemetry service.
//!
//! These identify the custom GATT service and characteristic the node
//! exposes; the transport layer owns the actual GATT table, but clients
//! and tooling need the same constants.

use uuid::{Uuid, uuid};

/// Custom environmental telemetry service.
pub const TELEMETRY_SERVICE: Uuid = uuid!("e177af9e-e1f0-4f65-8206-29507e994416");

/// Telemetry characteristic carrying the packed 6-byte frame.
pub const TELEMETRY_CHARACTERISTIC: Uuid = uuid!("e177af9e-e1f0-4f65-8206-29507e994417");

/// Standard Client Characteristic Configuration descriptor.
pub const CCCD: Uuid = uuid!("00002902-0000-1000-8000-00805f9b34fb");
