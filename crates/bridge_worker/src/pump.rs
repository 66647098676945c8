use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use courier_domain::{
    BridgeError, EnvelopeSource, RecordLogger, RequestSink, ResponseSource, translate_envelope,
};

/// Lifecycle of the pump as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PumpState {
    Connecting,
    Streaming,
    Draining,
    Closed,
}

fn transition(state: &mut PumpState, next: PumpState) {
    debug!(from = ?state, to = ?next, "Pump state transition");
    *state = next;
}

/// Drives both directions of one duplex stream.
///
/// The send loop runs on the caller's task: it blocks on the subscription,
/// translates each envelope, and pushes the resulting records onto the send
/// half in order. The receive loop runs on its own task and logs every
/// response as it arrives. The two share nothing but the stream halves, the
/// cancellation token, and the receive task's join handle.
pub struct DuplexPump {
    source: Box<dyn EnvelopeSource>,
    sink: Box<dyn RequestSink>,
    responses: Box<dyn ResponseSource>,
    logger: Arc<dyn RecordLogger>,
}

impl DuplexPump {
    pub fn new(
        source: Box<dyn EnvelopeSource>,
        sink: Box<dyn RequestSink>,
        responses: Box<dyn ResponseSource>,
        logger: Arc<dyn RecordLogger>,
    ) -> Self {
        Self {
            source,
            sink,
            responses,
            logger,
        }
    }

    /// Run both loops until cancellation, subscription closure, or a fatal
    /// error.
    ///
    /// Shutdown is two-phase: the send half is closed exactly once, after the
    /// sender has no more pending input, and the pump then waits for the
    /// receive loop to finish before reporting closed. A response still in
    /// flight when the last request goes out is therefore never dropped.
    ///
    /// Translation failures are fatal and propagate; a failed send of a
    /// single record is logged and the loop continues with the next record.
    pub async fn run(self, ctx: CancellationToken) -> anyhow::Result<()> {
        let Self {
            mut source,
            mut sink,
            responses,
            logger,
        } = self;

        let mut state = PumpState::Connecting;
        transition(&mut state, PumpState::Streaming);

        // Child token so a fatal send-side error can unwind the receive loop
        // without waiting on a remote that never closes its half.
        let receive_ctx = ctx.child_token();
        let receive_done = tokio::spawn(receive_loop(
            responses,
            Arc::clone(&logger),
            receive_ctx.clone(),
        ));

        let mut fatal: Option<BridgeError> = None;
        loop {
            tokio::select! {
                _ = ctx.cancelled() => {
                    info!("Stop requested, draining duplex stream");
                    break;
                }
                received = source.recv() => match received {
                    Ok(Some(envelope)) => match translate_envelope(&envelope) {
                        Ok(records) => {
                            for record in records {
                                logger.request(&record);
                                if let Err(e) = sink.send(record).await {
                                    // Per-record failure; the stream stays up
                                    error!(error = %e, "Failed to send request record");
                                }
                            }
                        }
                        Err(e) => {
                            error!(
                                error = %e,
                                topic = %envelope.topic,
                                "Failed to translate queue envelope"
                            );
                            fatal = Some(e);
                            break;
                        }
                    },
                    Ok(None) => {
                        warn!("Subscription closed by transport, draining duplex stream");
                        break;
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to receive queue envelope");
                        fatal = Some(e);
                        break;
                    }
                }
            }
        }

        transition(&mut state, PumpState::Draining);
        sink.close().await;
        if fatal.is_some() {
            receive_ctx.cancel();
        }

        // The join handle doubles as the receive loop's one-shot completion
        // signal: single writer, awaited exactly once.
        if let Err(e) = receive_done.await {
            error!(error = %e, "Receive loop task failed");
        }
        transition(&mut state, PumpState::Closed);

        match fatal {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

/// Consume the receive half until end-of-stream, transport error, or
/// cancellation. Every record is logged immediately, in arrival order.
async fn receive_loop(
    mut responses: Box<dyn ResponseSource>,
    logger: Arc<dyn RecordLogger>,
    ctx: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = ctx.cancelled() => {
                debug!("Receive loop cancelled");
                break;
            }
            received = responses.recv() => match received {
                Ok(Some(record)) => logger.response(&record),
                Ok(None) => {
                    debug!("Response stream closed by remote");
                    break;
                }
                Err(e) => {
                    // Terminal for this loop only; the send loop keeps running
                    error!(error = %e, "Failed to receive response record");
                    break;
                }
            }
        }
    }
}
