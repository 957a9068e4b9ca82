//! Notification dispatch with the at-most-one-indication invariant.
//!
//! The publisher sits between the snapshot store and the transport. Per
//! tick it runs the change gate, consults the peer's delivery mode, and
//! issues at most one send. For acknowledged (indicate) deliveries the
//! underlying stacks forbid a second send before the first completes, so
//! the in-flight state is a compare-and-set on an atomic flag: a delivery
//! that loses the race is dropped, never queued.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use tracing::{debug, trace, warn};

use enviro_types::TelemetryFrame;

use crate::snapshot::SnapshotStore;
use crate::subscription::{DeliveryMode, SubscriptionTracker};
use crate::transport::{DeliveryOutcome, Transport};

/// Dispatches changed telemetry frames to the peer.
///
/// Owns the snapshot store; shares the subscription tracker with the
/// transport's descriptor-write path and the in-flight flag with the
/// completion watcher tasks it spawns.
pub struct TelemetryPublisher {
    transport: Arc<dyn Transport>,
    subscriptions: Arc<SubscriptionTracker>,
    store: SnapshotStore,
    in_flight: Arc<AtomicBool>,
}

impl std::fmt::Debug for TelemetryPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryPublisher")
            .field("mode", &self.subscriptions.mode())
            .field("in_flight", &self.in_flight.load(Ordering::Acquire))
            .finish()
    }
}

impl TelemetryPublisher {
    /// Create a publisher over the given transport and subscription state.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, subscriptions: Arc<SubscriptionTracker>) -> Self {
        Self {
            transport,
            subscriptions,
            store: SnapshotStore::new(),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Run one frame through the change gate and deliver it if the peer
    /// asked for pushes.
    ///
    /// Returns `true` when the frame differed from the last published
    /// snapshot (whether or not a send was issued). Send failures are
    /// logged and dropped; the next changed tick retries with fresh data.
    pub async fn publish(&mut self, frame: &TelemetryFrame) -> bool {
        if !self.store.update(frame) {
            return false;
        }

        let payload = Bytes::copy_from_slice(self.store.last());
        match self.subscriptions.mode() {
            DeliveryMode::Unsubscribed => {
                trace!("telemetry changed but peer is unsubscribed");
            }
            DeliveryMode::Notify => self.send_notify(payload).await,
            DeliveryMode::Indicate => self.send_indicate(payload).await,
        }
        true
    }

    async fn send_notify(&self, payload: Bytes) {
        // best effort: no in-flight tracking, no retry
        if let Err(e) = self.transport.send_unacknowledged(payload).await {
            warn!("notify push failed: {e}");
        }
    }

    async fn send_indicate(&self, payload: Bytes) {
        // the CAS is the whole invariant: whoever sets false->true owns
        // the one outstanding indication
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("indication already in flight, dropping this update");
            return;
        }

        match self.transport.send_acknowledged(payload).await {
            Ok(completion) => {
                let in_flight = Arc::clone(&self.in_flight);
                tokio::spawn(async move {
                    match completion.await {
                        Ok(DeliveryOutcome::Delivered) => debug!("indication acknowledged"),
                        Ok(DeliveryOutcome::Failed) => warn!("indication delivery failed"),
                        Err(_) => warn!("transport dropped the completion channel"),
                    }
                    // success and failure both release the guard
                    in_flight.store(false, Ordering::Release);
                });
            }
            Err(e) => {
                // rejected at issuance: nothing is outstanding
                self.in_flight.store(false, Ordering::Release);
                warn!("indicate push rejected: {e}");
            }
        }
    }

    /// Whether an acknowledged delivery is currently outstanding.
    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Force-release the in-flight guard.
    ///
    /// The transport must call this (via the service's disconnect path)
    /// when the link drops, since a completion for a dead connection may
    /// never arrive.
    pub fn force_clear_in_flight(&self) {
        self.in_flight.store(false, Ordering::Release);
    }

    /// The last published snapshot bytes, for characteristic reads.
    #[must_use]
    pub fn last_snapshot(&self) -> &[u8; enviro_types::FRAME_LEN] {
        self.store.last()
    }

    /// Reset the snapshot store (disconnect path).
    pub(crate) fn reset_snapshot(&mut self) {
        self.store.reset();
    }
}
