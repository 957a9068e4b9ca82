//! Transport capability trait.
//!
//! The wireless stack lives outside this crate. The engine only needs two
//! sends: a best-effort push (GATT notify) and an acknowledged push (GATT
//! indicate) whose completion arrives asynchronously. Completion is
//! modeled as a oneshot channel rather than a callback so the engine
//! never blocks the transport's execution context.

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::oneshot;

use crate::error::Result;

/// Terminal outcome of an acknowledged delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The peer acknowledged the delivery.
    Delivered,
    /// The transport reported a delivery failure.
    Failed,
}

/// Receiver side of an acknowledged delivery's completion signal.
///
/// Resolves exactly once. A dropped sender (transport torn down before
/// reporting) is treated as a failure by the engine.
pub type Completion = oneshot::Receiver<DeliveryOutcome>;

/// Trait abstracting the outbound wireless link.
///
/// # Contract
///
/// - [`send_unacknowledged`](Transport::send_unacknowledged) is fire and
///   forget: `Ok` means the payload was handed to the stack, nothing more.
/// - [`send_acknowledged`](Transport::send_acknowledged) returns `Err` when
///   the stack rejects the send at issuance time. On `Ok`, the returned
///   [`Completion`] resolves exactly once when the peer acknowledges or
///   the stack gives up. Callers must not issue a second acknowledged send
///   before that resolution; the underlying stacks do not support it.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Push a payload to the peer without acknowledgment.
    async fn send_unacknowledged(&self, payload: Bytes) -> Result<()>;

    /// Push a payload to the peer with acknowledgment.
    async fn send_acknowledged(&self, payload: Bytes) -> Result<Completion>;
}
