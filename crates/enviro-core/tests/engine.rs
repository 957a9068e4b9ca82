//! End-to-end tests for the telemetry engine.
//!
//! These drive a [`TelemetryService`] over the mock sensor and transport,
//! covering change detection, subscription gating, and the
//! one-indication-in-flight invariant. No hardware required.

use std::sync::Arc;

use enviro_core::mock::{MockSensor, MockTransport};
use enviro_core::subscription::{CODE_INDICATE, CODE_NOTIFY};
use enviro_core::transport::{DeliveryOutcome, Transport};
use enviro_core::{SensorChannel, SensorSource, TelemetryService};
use enviro_types::{RawReading, TelemetryFrame};

fn make_service() -> (Arc<MockSensor>, Arc<MockTransport>, TelemetryService) {
    let sensor = Arc::new(MockSensor::new());
    let transport = Arc::new(MockTransport::new());
    let service = TelemetryService::new(
        Arc::clone(&sensor) as Arc<dyn SensorSource>,
        Arc::clone(&transport) as Arc<dyn Transport>,
    );
    (sensor, transport, service)
}

/// Let the spawned completion watcher run until the guard clears.
async fn wait_for_guard_clear(service: &TelemetryService) {
    for _ in 0..100 {
        if !service.indication_in_flight() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("in-flight guard never cleared");
}

/// Expected wire bytes for the mock's default readings:
/// 22.5 °C, 101.325 kPa, 45 %RH.
fn default_frame_bytes() -> [u8; 6] {
    TelemetryFrame::new(2250, 101_325, 4500).encode()
}

#[tokio::test]
async fn test_first_tick_publishes_notify() {
    let (_sensor, transport, mut service) = make_service();
    service.on_subscription_write(CODE_NOTIFY);

    assert!(service.tick().await);

    let sent = transport.unacknowledged_sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].as_ref(), &default_frame_bytes());
    assert_eq!(transport.acknowledged_sent().len(), 0);
}

#[tokio::test]
async fn test_unchanged_tick_sends_nothing() {
    let (_sensor, transport, mut service) = make_service();
    service.on_subscription_write(CODE_NOTIFY);

    assert!(service.tick().await);
    assert!(!service.tick().await);
    assert!(!service.tick().await);

    assert_eq!(transport.unacknowledged_sent().len(), 1);
}

#[tokio::test]
async fn test_unsubscribed_change_is_detected_but_not_sent() {
    let (sensor, transport, mut service) = make_service();

    assert!(service.tick().await);
    sensor.set_reading(SensorChannel::Temperature, RawReading::new(30, 0));
    assert!(service.tick().await);

    assert_eq!(transport.unacknowledged_sent().len(), 0);
    assert_eq!(transport.acknowledged_sent().len(), 0);
    // the snapshot still tracked the change
    assert_eq!(service.current_snapshot()[0..2], 3000i16.to_le_bytes());
}

#[tokio::test]
async fn test_at_most_one_indication_in_flight() {
    let (sensor, transport, mut service) = make_service();
    service.on_subscription_write(CODE_INDICATE);

    // first change issues an indication that stays pending
    assert!(service.tick().await);
    assert_eq!(transport.acknowledged_sent().len(), 1);
    assert!(service.indication_in_flight());

    // second change while pending is dropped, not queued
    sensor.set_reading(SensorChannel::Humidity, RawReading::new(60, 0));
    assert!(service.tick().await);
    assert_eq!(transport.acknowledged_sent().len(), 1);
    assert_eq!(transport.pending_completions(), 1);

    // completion re-arms the guard; the next change goes out
    assert!(transport.complete_next(DeliveryOutcome::Delivered));
    wait_for_guard_clear(&service).await;

    sensor.set_reading(SensorChannel::Humidity, RawReading::new(70, 0));
    assert!(service.tick().await);
    assert_eq!(transport.acknowledged_sent().len(), 2);
}

#[tokio::test]
async fn test_failed_completion_also_rearms() {
    let (sensor, transport, mut service) = make_service();
    service.on_subscription_write(CODE_INDICATE);

    assert!(service.tick().await);
    assert!(transport.complete_next(DeliveryOutcome::Failed));
    wait_for_guard_clear(&service).await;

    sensor.set_reading(SensorChannel::Pressure, RawReading::new(95, 0));
    assert!(service.tick().await);
    assert_eq!(transport.acknowledged_sent().len(), 2);
}

#[tokio::test]
async fn test_dropped_completion_channel_rearms() {
    let (sensor, transport, mut service) = make_service();
    service.on_subscription_write(CODE_INDICATE);

    assert!(service.tick().await);
    assert!(transport.drop_next_completion());
    wait_for_guard_clear(&service).await;

    sensor.set_reading(SensorChannel::Pressure, RawReading::new(95, 0));
    assert!(service.tick().await);
    assert_eq!(transport.acknowledged_sent().len(), 2);
}

#[tokio::test]
async fn test_issuance_rejection_clears_guard_synchronously() {
    let (sensor, transport, mut service) = make_service();
    service.on_subscription_write(CODE_INDICATE);
    transport.reject_acknowledged(true);

    assert!(service.tick().await);
    // rejected at issuance: nothing outstanding, no watcher involved
    assert!(!service.indication_in_flight());
    assert_eq!(transport.pending_completions(), 0);

    // next changed tick retries against a working transport
    transport.reject_acknowledged(false);
    sensor.set_reading(SensorChannel::Temperature, RawReading::new(18, 0));
    assert!(service.tick().await);
    assert_eq!(transport.acknowledged_sent().len(), 1);
}

#[tokio::test]
async fn test_notify_failure_is_discarded() {
    let (sensor, transport, mut service) = make_service();
    service.on_subscription_write(CODE_NOTIFY);
    transport.reject_unacknowledged(true);

    // the failure is logged and dropped; the tick still reports a change
    assert!(service.tick().await);
    assert_eq!(transport.unacknowledged_sent().len(), 0);

    // the next changed tick naturally retries with fresh data
    transport.reject_unacknowledged(false);
    sensor.set_reading(SensorChannel::Humidity, RawReading::new(50, 0));
    assert!(service.tick().await);
    assert_eq!(transport.unacknowledged_sent().len(), 1);
}

#[tokio::test]
async fn test_sensor_failure_is_a_reportable_change() {
    let (sensor, transport, mut service) = make_service();
    service.on_subscription_write(CODE_NOTIFY);

    assert!(service.tick().await);

    // a failing channel flips that field to the sentinel, which differs
    // from the last published value
    sensor.fail_channel(SensorChannel::Temperature);
    assert!(service.tick().await);
    let sent = transport.unacknowledged_sent();
    assert_eq!(sent[1][0..2], [0xFF, 0xFF]);

    // staying failed is not a change
    assert!(!service.tick().await);

    // recovery is a change back out of the error marker
    sensor.clear_failures();
    assert!(service.tick().await);
    assert_eq!(transport.unacknowledged_sent().len(), 3);
}

#[tokio::test]
async fn test_invalid_subscription_code_is_ignored() {
    let (_sensor, transport, mut service) = make_service();

    // notify -> invalid -> indicate must land on indicate
    service.on_subscription_write(CODE_NOTIFY);
    service.on_subscription_write(0x0007);
    service.on_subscription_write(CODE_INDICATE);

    assert!(service.tick().await);
    assert_eq!(transport.unacknowledged_sent().len(), 0);
    assert_eq!(transport.acknowledged_sent().len(), 1);
}

#[tokio::test]
async fn test_disconnect_resets_channel_state() {
    let (_sensor, transport, mut service) = make_service();
    service.on_subscription_write(CODE_INDICATE);

    assert!(service.tick().await);
    assert!(service.indication_in_flight());

    service.on_disconnect();

    // guard force-cleared, snapshot zeroed, subscription gone
    assert!(!service.indication_in_flight());
    assert_eq!(service.current_snapshot(), &[0u8; 6]);

    // same readings now count as a change again, but nobody is subscribed
    assert!(service.tick().await);
    assert_eq!(transport.acknowledged_sent().len(), 1);
}
