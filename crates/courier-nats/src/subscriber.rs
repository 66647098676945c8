use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::StreamExt;
use tracing::{debug, info};

use courier_domain::{BridgeResult, EnvelopeSource, QueueEnvelope};

/// Core NATS subscription feeding the bridge with queue envelopes.
///
/// The bridge consumes a plain subscription: no consumer groups, no ack
/// semantics, one envelope per published message.
pub struct TopicSubscriber {
    topic: String,
    subscriber: async_nats::Subscriber,
}

impl TopicSubscriber {
    pub(crate) async fn subscribe(client: &async_nats::Client, topic: &str) -> Result<Self> {
        debug!(topic, "Subscribing to queue topic");

        let subscriber = client
            .subscribe(topic.to_string())
            .await
            .context("Failed to subscribe to queue topic")?;

        info!(topic, "Subscription established");
        Ok(Self {
            topic: topic.to_string(),
            subscriber,
        })
    }
}

#[async_trait]
impl EnvelopeSource for TopicSubscriber {
    async fn recv(&mut self) -> BridgeResult<Option<QueueEnvelope>> {
        match self.subscriber.next().await {
            Some(message) => {
                debug!(
                    topic = %self.topic,
                    payload_size = message.payload.len(),
                    "Received queue envelope"
                );
                Ok(Some(QueueEnvelope {
                    topic: message.subject.to_string(),
                    payload: String::from_utf8_lossy(&message.payload).into_owned(),
                }))
            }
            None => Ok(None),
        }
    }
}
