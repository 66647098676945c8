use anyhow::{Context, Result};
use std::time::Duration;
use tracing::info;

use crate::subscriber::TopicSubscriber;

pub struct NatsClient {
    client: async_nats::Client,
}

impl NatsClient {
    pub async fn connect(url: &str, timeout: Duration) -> Result<Self> {
        info!("Connecting to NATS at {} (timeout={:?})", url, timeout);

        // Configure connection timeout for establishing the TCP connection
        let client = async_nats::ConnectOptions::new()
            .connection_timeout(timeout)
            .connect(url)
            .await
            .context("Failed to connect to NATS")?;

        info!("Successfully connected to NATS");
        Ok(Self { client })
    }

    /// Subscribe to a single queue topic, returning the envelope source the
    /// pump consumes.
    pub async fn subscribe(&self, topic: &str) -> Result<TopicSubscriber> {
        TopicSubscriber::subscribe(&self.client, topic).await
    }

    /// Drain outstanding subscriptions and close the connection.
    pub async fn close(self) -> Result<()> {
        info!("Closing NATS connection");
        self.client
            .drain()
            .await
            .context("Failed to drain NATS connection")
    }
}
