//! Telemetry change-detection and notification engine for an embedded
//! environmental sensor node.
//!
//! The node samples temperature, pressure, and humidity on a fixed period
//! and exposes the readings to a single peer over a short-range wireless
//! link. This crate is the protocol-state core of that firmware, ported
//! to run against capability traits instead of a concrete stack:
//!
//! - **Change detection**: a frame is pushed only when its 6-byte wire
//!   encoding differs from the last published one, keeping the link quiet
//!   between environmental changes.
//! - **Subscription gating**: the peer picks no pushes, unacknowledged
//!   pushes (notify), or acknowledged pushes (indicate) by writing its
//!   configuration descriptor.
//! - **One indication in flight**: acknowledged deliveries are guarded by
//!   an atomic compare-and-set; a change that arrives while one is
//!   outstanding is dropped, never queued.
//!
//! The wireless stack and the sensor drivers are external collaborators
//! behind the [`Transport`] and [`SensorSource`] traits; [`mock`] provides
//! scriptable implementations of both.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use enviro_core::{MockSensor, MockTransport, TelemetryService, Transport, subscription};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let sensor = Arc::new(MockSensor::new());
//!     let transport = Arc::new(MockTransport::new());
//!     let mut service =
//!         TelemetryService::new(sensor, Arc::clone(&transport) as Arc<dyn Transport>);
//!
//!     // peer subscribes for unacknowledged pushes
//!     service.on_subscription_write(subscription::CODE_NOTIFY);
//!
//!     // first sample always differs from the zeroed snapshot
//!     assert!(service.tick().await);
//!     assert_eq!(transport.unacknowledged_sent().len(), 1);
//! }
//! ```

pub mod error;
pub mod mock;
pub mod publisher;
pub mod sensor;
pub mod service;
pub mod snapshot;
pub mod subscription;
pub mod transport;

pub use error::{Error, Result};
pub use mock::{MockSensor, MockTransport};
pub use publisher::TelemetryPublisher;
pub use sensor::{SensorChannel, SensorSource};
pub use service::{TelemetryConfig, TelemetryService};
pub use snapshot::SnapshotStore;
pub use subscription::{DeliveryMode, SubscriptionTracker};
pub use transport::{Completion, DeliveryOutcome, Transport};

// Re-export the shared data model.
pub use enviro_types::{RawReading, TelemetryFrame, convert};
