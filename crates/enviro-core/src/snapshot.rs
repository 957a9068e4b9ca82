//! Last-published telemetry snapshot and change detection.
//!
//! The snapshot comparison is the sole gate for notification work: an
//! unchanged reading produces no wireless traffic at all, which is what
//! keeps a battery-powered node quiet between environmental changes.

use tracing::trace;

use enviro_types::{FRAME_LEN, TelemetryFrame};

/// Holds the byte encoding of the last frame handed to the transport
/// layer and decides whether a fresh frame differs from it.
///
/// The store is the exclusive owner of the published bytes and is only
/// mutated from the tick context, so it needs no interior locking.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    last: [u8; FRAME_LEN],
}

impl SnapshotStore {
    /// Create a store whose snapshot is all zeroes, matching the
    /// characteristic's initial value before the first sample.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode `frame` and compare it against the stored snapshot.
    ///
    /// On a difference the snapshot is overwritten and `true` returned;
    /// on an identical encoding the stored state is untouched.
    pub fn update(&mut self, frame: &TelemetryFrame) -> bool {
        let encoded = frame.encode();
        if encoded == self.last {
            trace!("telemetry unchanged, skipping publish");
            return false;
        }
        self.last = encoded;
        true
    }

    /// The last published encoding, as served for a characteristic read.
    #[must_use]
    pub fn last(&self) -> &[u8; FRAME_LEN] {
        &self.last
    }

    /// Clear the snapshot back to its initial all-zero value.
    pub fn reset(&mut self) {
        self.last = [0; FRAME_LEN];
    }
}
