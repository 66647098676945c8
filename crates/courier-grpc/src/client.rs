use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::Streaming;
use tonic::transport::{Channel, Endpoint};
use tracing::{debug, info};

use courier_domain::{
    BridgeError, BridgeResult, RequestRecord, RequestSink, ResponseRecord, ResponseSource,
};

use crate::conversions::{request_to_proto, response_to_domain};
use crate::proto::microservice::v1::micro_service_client::MicroServiceClient;
use crate::proto::microservice::v1::{Request, Response};

/// Capacity of the outbound request channel feeding the duplex stream.
const REQUEST_BUFFER: usize = 16;

pub struct RemoteServiceClient {
    client: MicroServiceClient<Channel>,
}

impl RemoteServiceClient {
    /// Dial the remote endpoint. Establishment failures are fatal to startup.
    pub async fn connect(endpoint: &str, timeout: Duration) -> Result<Self> {
        info!(
            "Connecting to remote service at {} (timeout={:?})",
            endpoint, timeout
        );

        let channel = Endpoint::from_shared(endpoint.to_string())
            .context("Invalid remote endpoint")?
            .connect_timeout(timeout)
            .connect()
            .await
            .context("Failed to connect to remote service")?;

        info!("Successfully connected to remote service");
        Ok(Self {
            client: MicroServiceClient::new(channel),
        })
    }

    /// Open the duplex stream and split it into its two halves.
    ///
    /// The send half feeds an in-memory channel wrapped as the request
    /// stream; dropping the sender is the end-of-output signal on the wire.
    /// The receive half is the response body, consumed independently.
    pub async fn open_stream(&mut self) -> Result<(GrpcRequestSink, GrpcResponseSource)> {
        debug!("Opening duplex stream");

        let (tx, rx) = mpsc::channel(REQUEST_BUFFER);
        let responses = self
            .client
            .micro_service(ReceiverStream::new(rx))
            .await
            .context("Failed to open duplex stream")?
            .into_inner();

        debug!("Duplex stream established");
        Ok((
            GrpcRequestSink { tx: Some(tx) },
            GrpcResponseSource { inner: responses },
        ))
    }
}

/// Send half of the duplex stream.
pub struct GrpcRequestSink {
    tx: Option<mpsc::Sender<Request>>,
}

#[async_trait]
impl RequestSink for GrpcRequestSink {
    async fn send(&mut self, record: RequestRecord) -> BridgeResult<()> {
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| BridgeError::StreamSend("send half already closed".to_string()))?;

        tx.send(request_to_proto(record)).await.map_err(|_| {
            BridgeError::StreamSend("request stream closed by transport".to_string())
        })
    }

    async fn close(&mut self) {
        // Dropping the sender ends the request stream on the wire
        if self.tx.take().is_some() {
            debug!("Closed send half of duplex stream");
        }
    }
}

/// Receive half of the duplex stream.
pub struct GrpcResponseSource {
    inner: Streaming<Response>,
}

#[async_trait]
impl ResponseSource for GrpcResponseSource {
    async fn recv(&mut self) -> BridgeResult<Option<ResponseRecord>> {
        match self.inner.message().await {
            Ok(Some(response)) => Ok(Some(response_to_domain(response))),
            Ok(None) => Ok(None),
            Err(status) => Err(BridgeError::StreamReceive(status.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(parameter: &str) -> RequestRecord {
        RequestRecord {
            service_name: "svc".to_string(),
            parameter: parameter.to_string(),
            timestamp: "2026-08-07 12:00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_sink_forwards_records_onto_channel() {
        // Arrange
        let (tx, mut rx) = mpsc::channel(4);
        let mut sink = GrpcRequestSink { tx: Some(tx) };

        // Act
        sink.send(record("1")).await.unwrap();
        sink.send(record("2")).await.unwrap();

        // Assert
        assert_eq!(rx.recv().await.unwrap().message, "1");
        assert_eq!(rx.recv().await.unwrap().message, "2");
    }

    #[tokio::test]
    async fn test_close_signals_end_of_stream_once() {
        // Arrange
        let (tx, mut rx) = mpsc::channel(4);
        let mut sink = GrpcRequestSink { tx: Some(tx) };

        // Act
        sink.close().await;
        sink.close().await;

        // Assert: the channel is closed and further sends are rejected
        assert!(rx.recv().await.is_none());
        assert!(matches!(
            sink.send(record("3")).await,
            Err(BridgeError::StreamSend(_))
        ));
    }

    #[tokio::test]
    async fn test_send_after_receiver_dropped_is_a_stream_send_error() {
        // Arrange
        let (tx, rx) = mpsc::channel(4);
        let mut sink = GrpcRequestSink { tx: Some(tx) };
        drop(rx);

        // Act
        let result = sink.send(record("1")).await;

        // Assert
        assert!(matches!(result, Err(BridgeError::StreamSend(_))));
    }
}
