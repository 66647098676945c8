use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::pump::DuplexPump;

/// Runner-facing wrapper around the duplex pump.
pub struct BridgeWorker {
    pump: DuplexPump,
}

impl BridgeWorker {
    pub fn new(pump: DuplexPump) -> Self {
        debug!("initializing bridge worker");
        Self { pump }
    }

    #[allow(clippy::type_complexity)]
    pub fn into_runner_process(
        self,
    ) -> Box<
        dyn FnOnce(
                CancellationToken,
            )
                -> std::pin::Pin<Box<dyn std::future::Future<Output = anyhow::Result<()>> + Send>>
            + Send,
    > {
        Box::new({
            let pump = self.pump;
            move |ctx| Box::pin(async move { pump.run(ctx).await })
        })
    }
}
