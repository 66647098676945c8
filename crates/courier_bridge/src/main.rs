mod config;
mod telemetry;

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use bridge_worker::{BridgeWorker, DuplexPump};
use config::ServiceConfig;
use courier_domain::TracingRecordLogger;
use courier_grpc::RemoteServiceClient;
use courier_nats::NatsClient;
use courier_runner::Runner;

#[tokio::main]
async fn main() {
    // Initialize configuration and tracing
    let config = match ServiceConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    telemetry::init_telemetry(&config.log_level);

    info!(
        queue_topic = %config.queue_topic,
        remote_endpoint = %config.remote_endpoint,
        "Starting courier bridge"
    );

    let startup_timeout = Duration::from_secs(config.startup_timeout_secs);

    // Pub/sub subscription
    let nats_client = match NatsClient::connect(&config.nats_url, startup_timeout).await {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to connect to NATS: {:#}", e);
            std::process::exit(1);
        }
    };
    let subscriber = match nats_client.subscribe(&config.queue_topic).await {
        Ok(subscriber) => subscriber,
        Err(e) => {
            error!("Failed to subscribe to queue topic: {:#}", e);
            std::process::exit(1);
        }
    };

    // Duplex stream
    let mut remote =
        match RemoteServiceClient::connect(&config.remote_endpoint, startup_timeout).await {
            Ok(client) => client,
            Err(e) => {
                error!("Failed to connect to remote service: {:#}", e);
                std::process::exit(1);
            }
        };
    let (sink, responses) = match remote.open_stream().await {
        Ok(halves) => halves,
        Err(e) => {
            error!("Failed to open duplex stream: {:#}", e);
            std::process::exit(1);
        }
    };

    let pump = DuplexPump::new(
        Box::new(subscriber),
        Box::new(sink),
        Box::new(responses),
        Arc::new(TracingRecordLogger),
    );
    let worker = BridgeWorker::new(pump);

    let result = Runner::new()
        .with_named_process("duplex_pump", worker.into_runner_process())
        .with_closer(move || async move {
            info!("Running cleanup tasks...");
            nats_client.close().await?;
            info!("Cleanup complete");
            Ok(())
        })
        .with_closer_timeout(Duration::from_secs(10))
        .run()
        .await;

    if result.is_err() {
        std::process::exit(1);
    }
}
