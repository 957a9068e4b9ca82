//! Simulated hardware for the CLI: a drifting sensor and a console
//! transport that plays the peer's role.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use rand::Rng;
use tokio::sync::oneshot;
use tracing::debug;

use enviro_core::error::Result;
use enviro_core::sensor::{SensorChannel, SensorSource};
use enviro_core::transport::{Completion, DeliveryOutcome, Transport};
use enviro_types::{RawReading, TelemetryFrame};

/// A sensor backend that wanders around indoor-typical values.
///
/// Each read nudges the channel by a small random step so change
/// detection has something to chew on without flooding every tick.
#[derive(Debug)]
pub struct SimulatedSensor {
    // micro-units per channel, mutated on every read
    state: Mutex<[i64; 3]>,
}

impl Default for SimulatedSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedSensor {
    /// Start at 22.5 °C, 101.325 kPa, 45 %RH.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new([22_500_000, 101_325_000, 45_000_000]),
        }
    }

    fn index(channel: SensorChannel) -> usize {
        match channel {
            SensorChannel::Temperature => 0,
            SensorChannel::Pressure => 1,
            SensorChannel::Humidity => 2,
        }
    }
}

#[async_trait]
impl SensorSource for SimulatedSensor {
    async fn read(&self, channel: SensorChannel) -> Result<RawReading> {
        let mut state = self.state.lock().expect("sim lock poisoned");
        let idx = Self::index(channel);

        // drift by up to ±0.02 units; most ticks end up unchanged after
        // canonical rounding
        let step = rand::rng().random_range(-20_000..=20_000i64);
        state[idx] = (state[idx] + step).max(0);

        let micro = state[idx];
        Ok(RawReading::new(
            (micro / 1_000_000) as i32,
            (micro % 1_000_000) as i32,
        ))
    }
}

/// A transport that prints every delivery and acknowledges indications
/// after a short delay, like an unhurried peer.
#[derive(Debug)]
pub struct ConsoleTransport {
    ack_delay: Duration,
    as_json: bool,
}

impl ConsoleTransport {
    /// Create a console transport acknowledging after `ack_delay`.
    #[must_use]
    pub fn new(ack_delay: Duration, as_json: bool) -> Self {
        Self { ack_delay, as_json }
    }

    fn print(&self, kind: &str, payload: &Bytes) {
        match TelemetryFrame::from_bytes(payload) {
            Ok(frame) if self.as_json => {
                // frame fields are plain integers, serialization cannot fail
                let json = serde_json::to_string(&frame).expect("frame serializes");
                println!("{json}");
            }
            Ok(frame) => {
                println!(
                    "[{kind}] {:.2} degC  {} Pa (low word)  {:.2} %RH",
                    f64::from(frame.temperature) / 100.0,
                    frame.pressure,
                    f64::from(frame.humidity) / 100.0,
                );
            }
            Err(e) => println!("[{kind}] unparseable payload: {e}"),
        }
    }
}

#[async_trait]
impl Transport for ConsoleTransport {
    async fn send_unacknowledged(&self, payload: Bytes) -> Result<()> {
        self.print("notify", &payload);
        Ok(())
    }

    async fn send_acknowledged(&self, payload: Bytes) -> Result<Completion> {
        self.print("indicate", &payload);

        let (tx, rx) = oneshot::channel();
        let delay = self.ack_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debug!("simulated peer acknowledged");
            let _ = tx.send(DeliveryOutcome::Delivered);
        });
        Ok(rx)
    }
}
