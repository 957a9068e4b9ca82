//! Peer subscription state.
//!
//! The peer selects its delivery mode by writing the standard CCCD codes
//! to the telemetry characteristic's configuration descriptor. Writes
//! arrive from the transport's callback context while `tick()` runs on
//! the scheduler context, so the mode lives in a single atomic word.

use std::sync::atomic::{AtomicU8, Ordering};

use tracing::{debug, warn};

/// CCCD code disabling all pushes.
pub const CODE_NONE: u16 = 0x0000;
/// CCCD code enabling unacknowledged pushes.
pub const CODE_NOTIFY: u16 = 0x0001;
/// CCCD code enabling acknowledged pushes.
pub const CODE_INDICATE: u16 = 0x0002;

/// The peer's delivery preference for telemetry updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum DeliveryMode {
    /// No pushes; the peer polls with reads if it cares.
    #[default]
    Unsubscribed = 0,
    /// Best-effort unacknowledged pushes.
    Notify = 1,
    /// Acknowledged pushes with a completion signal.
    Indicate = 2,
}

impl DeliveryMode {
    /// Map a CCCD wire code to a delivery mode.
    ///
    /// Returns `None` for anything other than the three recognized codes.
    #[must_use]
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            CODE_NONE => Some(DeliveryMode::Unsubscribed),
            CODE_NOTIFY => Some(DeliveryMode::Notify),
            CODE_INDICATE => Some(DeliveryMode::Indicate),
            _ => None,
        }
    }

    fn from_raw(raw: u8) -> Self {
        match raw {
            1 => DeliveryMode::Notify,
            2 => DeliveryMode::Indicate,
            _ => DeliveryMode::Unsubscribed,
        }
    }
}

/// Tracks the delivery mode of the telemetry channel's single peer.
///
/// Starts [`DeliveryMode::Unsubscribed`] and persists for the lifetime of
/// the logical channel; the transport resets it on disconnect via
/// [`SubscriptionTracker::reset`]. Writes and reads may race freely; the
/// tracker holds exactly one word of state, so no wider consistency is
/// needed.
#[derive(Debug, Default)]
pub struct SubscriptionTracker {
    mode: AtomicU8,
}

impl SubscriptionTracker {
    /// Create a tracker in the unsubscribed state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current delivery mode.
    #[must_use]
    pub fn mode(&self) -> DeliveryMode {
        DeliveryMode::from_raw(self.mode.load(Ordering::Acquire))
    }

    /// Apply a configuration-descriptor write from the transport.
    ///
    /// An unrecognized code is logged and ignored; the state is unchanged.
    pub fn write(&self, code: u16) {
        match DeliveryMode::from_code(code) {
            Some(mode) => {
                debug!(code, ?mode, "subscription descriptor written");
                self.mode.store(mode as u8, Ordering::Release);
            }
            None => {
                warn!(code, "invalid subscription descriptor value, ignoring");
            }
        }
    }

    /// Return to the unsubscribed state (channel teardown).
    pub fn reset(&self) {
        self.mode
            .store(DeliveryMode::Unsubscribed as u8, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_unsubscribed() {
        assert_eq!(SubscriptionTracker::new().mode(), DeliveryMode::Unsubscribed);
    }

    #[test]
    fn test_valid_codes_transition() {
        let tracker = SubscriptionTracker::new();

        tracker.write(CODE_NOTIFY);
        assert_eq!(tracker.mode(), DeliveryMode::Notify);

        tracker.write(CODE_INDICATE);
        assert_eq!(tracker.mode(), DeliveryMode::Indicate);

        tracker.write(CODE_NONE);
        assert_eq!(tracker.mode(), DeliveryMode::Unsubscribed);
    }

    #[test]
    fn test_invalid_code_leaves_state_unchanged() {
        let tracker = SubscriptionTracker::new();

        tracker.write(CODE_NOTIFY);
        tracker.write(0x0003);
        assert_eq!(tracker.mode(), DeliveryMode::Notify);

        tracker.write(0xFFFF);
        tracker.write(CODE_INDICATE);
        assert_eq!(tracker.mode(), DeliveryMode::Indicate);
    }

    #[test]
    fn test_reset_returns_to_unsubscribed() {
        let tracker = SubscriptionTracker::new();
        tracker.write(CODE_INDICATE);
        tracker.reset();
        assert_eq!(tracker.mode(), DeliveryMode::Unsubscribed);
    }
}
