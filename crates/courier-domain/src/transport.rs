use async_trait::async_trait;

use crate::error::BridgeResult;
use crate::types::{QueueEnvelope, RequestRecord, ResponseRecord};

/// Receive side of the pub/sub subscription.
/// Infrastructure (courier-nats) implements this trait.
#[async_trait]
pub trait EnvelopeSource: Send {
    /// Block until the next envelope arrives.
    /// `Ok(None)` means the transport closed the subscription.
    async fn recv(&mut self) -> BridgeResult<Option<QueueEnvelope>>;
}

/// Send half of the duplex stream.
/// Infrastructure (courier-grpc) implements this trait.
#[async_trait]
pub trait RequestSink: Send {
    /// Send one record. Failures are per-record; the stream stays usable
    /// until `close` is called.
    async fn send(&mut self, record: RequestRecord) -> BridgeResult<()>;

    /// Signal end-of-output to the remote side. Idempotent; sends after the
    /// first close fail with a stream-send error.
    async fn close(&mut self);
}

/// Receive half of the duplex stream.
/// Infrastructure (courier-grpc) implements this trait.
#[async_trait]
pub trait ResponseSource: Send {
    /// Block until the next response arrives.
    /// `Ok(None)` is the end-of-stream signal; errors are terminal.
    async fn recv(&mut self) -> BridgeResult<Option<ResponseRecord>>;
}
