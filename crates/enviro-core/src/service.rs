//! The telemetry service: sampling loop and transport-facing entry points.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::interval;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use enviro_types::{RawReading, TelemetryFrame, convert};

use crate::error::{Error, Result};
use crate::publisher::TelemetryPublisher;
use crate::sensor::{SensorChannel, SensorSource};
use crate::subscription::SubscriptionTracker;
use crate::transport::Transport;

/// Configuration for the telemetry service.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Period between telemetry ticks. Default: 1 second, matching the
    /// legacy firmware main loop.
    pub period: Duration,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(1),
        }
    }
}

impl TelemetryConfig {
    /// Validate the configuration and return an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.period.is_zero() {
            return Err(Error::InvalidConfig("period must be > 0".to_string()));
        }
        Ok(())
    }
}

/// Samples the sensor backend each tick and pushes changed frames.
///
/// One service owns one logical telemetry channel. The scheduler drives
/// [`tick`](TelemetryService::tick); the transport calls
/// [`on_subscription_write`](TelemetryService::on_subscription_write) and
/// [`on_disconnect`](TelemetryService::on_disconnect) from its own
/// context.
///
/// # Example
///
/// ```ignore
/// use enviro_core::{MockSensor, MockTransport, TelemetryService};
/// use std::sync::Arc;
///
/// let service = TelemetryService::new(
///     Arc::new(MockSensor::new()),
///     Arc::new(MockTransport::new()),
/// );
/// ```
pub struct TelemetryService {
    sensor: Arc<dyn SensorSource>,
    subscriptions: Arc<SubscriptionTracker>,
    publisher: TelemetryPublisher,
}

impl TelemetryService {
    /// Create a service over a sensor backend and a transport.
    #[must_use]
    pub fn new(sensor: Arc<dyn SensorSource>, transport: Arc<dyn Transport>) -> Self {
        let subscriptions = Arc::new(SubscriptionTracker::new());
        let publisher = TelemetryPublisher::new(transport, Arc::clone(&subscriptions));
        Self {
            sensor,
            subscriptions,
            publisher,
        }
    }

    /// Sample all channels, substituting the legacy sentinel for a failed
    /// read so a fault shows up as a change on the wire.
    async fn sample(&self) -> TelemetryFrame {
        let temperature = match self.read(SensorChannel::Temperature).await {
            Ok(raw) => convert::temperature(raw),
            Err(_) => convert::TEMPERATURE_UNAVAILABLE,
        };
        let pressure = match self.read(SensorChannel::Pressure).await {
            Ok(raw) => convert::pressure(raw),
            Err(_) => convert::PRESSURE_UNAVAILABLE,
        };
        let humidity = match self.read(SensorChannel::Humidity).await {
            Ok(raw) => convert::humidity(raw),
            Err(_) => convert::HUMIDITY_UNAVAILABLE,
        };
        TelemetryFrame::new(temperature, pressure, humidity)
    }

    async fn read(&self, channel: SensorChannel) -> Result<RawReading> {
        self.sensor.read(channel).await.inspect_err(|e| {
            warn!(%channel, "sensor read failed: {e}");
        })
    }

    /// Run one telemetry period: sample, detect change, maybe push.
    ///
    /// Returns `true` when the sampled frame differed from the last
    /// published one.
    pub async fn tick(&mut self) -> bool {
        let frame = self.sample().await;
        self.publisher.publish(&frame).await
    }

    /// Transport entry point for configuration-descriptor writes.
    pub fn on_subscription_write(&self, code: u16) {
        self.subscriptions.write(code);
    }

    /// Transport entry point for link teardown.
    ///
    /// Resets the subscription, the published snapshot, and the
    /// indication in-flight guard; a completion for the dead link may
    /// never arrive.
    pub fn on_disconnect(&mut self) {
        info!("peer disconnected, resetting telemetry channel");
        self.subscriptions.reset();
        self.publisher.force_clear_in_flight();
        self.publisher.reset_snapshot();
    }

    /// The last published snapshot bytes, as served for a read request.
    #[must_use]
    pub fn current_snapshot(&self) -> &[u8; enviro_types::FRAME_LEN] {
        self.publisher.last_snapshot()
    }

    /// Whether an acknowledged delivery is outstanding.
    #[must_use]
    pub fn indication_in_flight(&self) -> bool {
        self.publisher.in_flight()
    }

    /// Drive [`tick`](TelemetryService::tick) on a fixed period until the
    /// token is cancelled.
    ///
    /// This is the host-side equivalent of the firmware main loop; on a
    /// real device the platform scheduler calls `tick` directly.
    pub async fn run(mut self, config: TelemetryConfig, cancel: CancellationToken) -> Result<()> {
        config.validate()?;
        let mut ticker = interval(config.period);
        info!(period_ms = config.period.as_millis() as u64, "telemetry loop started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("telemetry loop cancelled");
                    return Ok(());
                }
                _ = ticker.tick() => {
                    if self.tick().await {
                        debug!("telemetry changed");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(TelemetryConfig::default().validate().is_ok());
        let bad = TelemetryConfig {
            period: Duration::ZERO,
        };
        assert!(bad.validate().is_err());
    }
}
