//! Mock sensor and transport implementations for testing.
//!
//! These stand in for the platform collaborators so the engine can be
//! exercised without hardware or a wireless stack.
//!
//! # Features
//!
//! - **Failure injection**: fail sensor channels or reject sends
//! - **Manual completion**: acknowledged sends stay pending until the test
//!   resolves them, which is how the one-in-flight invariant is probed
//! - **Counters**: every send and read is counted

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::oneshot;

use enviro_types::RawReading;

use crate::error::{Error, Result};
use crate::sensor::{SensorChannel, SensorSource};
use crate::transport::{Completion, DeliveryOutcome, Transport};

/// A scriptable sensor backend.
///
/// Each channel holds one raw reading that tests overwrite between ticks.
/// A channel marked failing returns an error, which the service turns
/// into the sentinel value.
#[derive(Debug)]
pub struct MockSensor {
    temperature: Mutex<RawReading>,
    pressure: Mutex<RawReading>,
    humidity: Mutex<RawReading>,
    failing: Mutex<Vec<SensorChannel>>,
    read_count: AtomicU32,
}

impl Default for MockSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSensor {
    /// Create a mock reading 22.5 °C, 101.325 kPa, 45 %RH.
    #[must_use]
    pub fn new() -> Self {
        Self {
            temperature: Mutex::new(RawReading::new(22, 500_000)),
            pressure: Mutex::new(RawReading::new(101, 325_000)),
            humidity: Mutex::new(RawReading::new(45, 0)),
            failing: Mutex::new(Vec::new()),
            read_count: AtomicU32::new(0),
        }
    }

    /// Overwrite the raw reading for one channel.
    pub fn set_reading(&self, channel: SensorChannel, raw: RawReading) {
        let cell = match channel {
            SensorChannel::Temperature => &self.temperature,
            SensorChannel::Pressure => &self.pressure,
            SensorChannel::Humidity => &self.humidity,
        };
        *cell.lock().expect("mock lock poisoned") = raw;
    }

    /// Make reads of `channel` fail until [`clear_failures`](Self::clear_failures).
    pub fn fail_channel(&self, channel: SensorChannel) {
        let mut failing = self.failing.lock().expect("mock lock poisoned");
        if !failing.contains(&channel) {
            failing.push(channel);
        }
    }

    /// Restore all channels to working order.
    pub fn clear_failures(&self) {
        self.failing.lock().expect("mock lock poisoned").clear();
    }

    /// Number of channel reads performed.
    #[must_use]
    pub fn read_count(&self) -> u32 {
        self.read_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SensorSource for MockSensor {
    async fn read(&self, channel: SensorChannel) -> Result<RawReading> {
        self.read_count.fetch_add(1, Ordering::Relaxed);

        if self
            .failing
            .lock()
            .expect("mock lock poisoned")
            .contains(&channel)
        {
            return Err(Error::sensor_read(channel.name(), "injected failure"));
        }

        let cell = match channel {
            SensorChannel::Temperature => &self.temperature,
            SensorChannel::Pressure => &self.pressure,
            SensorChannel::Humidity => &self.humidity,
        };
        Ok(*cell.lock().expect("mock lock poisoned"))
    }
}

/// A scriptable transport.
///
/// Unacknowledged sends are recorded and succeed unless rejection is
/// enabled. Acknowledged sends are recorded and stay pending until the
/// test calls [`complete_next`](MockTransport::complete_next), mirroring
/// a real stack's asynchronous confirmation.
#[derive(Debug, Default)]
pub struct MockTransport {
    unacknowledged: Mutex<Vec<Bytes>>,
    acknowledged: Mutex<Vec<Bytes>>,
    pending: Mutex<VecDeque<oneshot::Sender<DeliveryOutcome>>>,
    reject_unacknowledged: AtomicBool,
    reject_acknowledged: AtomicBool,
}

impl MockTransport {
    /// Create a transport that accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject unacknowledged sends at issuance.
    pub fn reject_unacknowledged(&self, reject: bool) {
        self.reject_unacknowledged.store(reject, Ordering::Relaxed);
    }

    /// Reject acknowledged sends at issuance.
    pub fn reject_acknowledged(&self, reject: bool) {
        self.reject_acknowledged.store(reject, Ordering::Relaxed);
    }

    /// Payloads sent without acknowledgment, in order.
    #[must_use]
    pub fn unacknowledged_sent(&self) -> Vec<Bytes> {
        self.unacknowledged
            .lock()
            .expect("mock lock poisoned")
            .clone()
    }

    /// Payloads sent with acknowledgment, in order.
    #[must_use]
    pub fn acknowledged_sent(&self) -> Vec<Bytes> {
        self.acknowledged.lock().expect("mock lock poisoned").clone()
    }

    /// Number of acknowledged sends still awaiting completion.
    #[must_use]
    pub fn pending_completions(&self) -> usize {
        self.pending.lock().expect("mock lock poisoned").len()
    }

    /// Resolve the oldest pending acknowledged send.
    ///
    /// Returns `false` when nothing was pending.
    pub fn complete_next(&self, outcome: DeliveryOutcome) -> bool {
        let sender = self
            .pending
            .lock()
            .expect("mock lock poisoned")
            .pop_front();
        match sender {
            Some(tx) => {
                // a dropped receiver just means the watcher went away first
                let _ = tx.send(outcome);
                true
            }
            None => false,
        }
    }

    /// Drop the oldest pending completion without resolving it,
    /// simulating a transport torn down mid-delivery.
    pub fn drop_next_completion(&self) -> bool {
        self.pending
            .lock()
            .expect("mock lock poisoned")
            .pop_front()
            .is_some()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send_unacknowledged(&self, payload: Bytes) -> Result<()> {
        if self.reject_unacknowledged.load(Ordering::Relaxed) {
            return Err(Error::notify_rejected("injected rejection"));
        }
        self.unacknowledged
            .lock()
            .expect("mock lock poisoned")
            .push(payload);
        Ok(())
    }

    async fn send_acknowledged(&self, payload: Bytes) -> Result<Completion> {
        if self.reject_acknowledged.load(Ordering::Relaxed) {
            return Err(Error::indicate_rejected("injected rejection"));
        }
        self.acknowledged
            .lock()
            .expect("mock lock poisoned")
            .push(payload);

        let (tx, rx) = oneshot::channel();
        self.pending.lock().expect("mock lock poisoned").push_back(tx);
        Ok(rx)
    }
}
