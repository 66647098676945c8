//! A concurrent application runner that manages long-running processes with
//! graceful shutdown.
//!
//! Named app processes run concurrently until one fails or a shutdown signal
//! (SIGINT/SIGTERM) arrives; the shared cancellation token is then cancelled
//! and every process is given the chance to drain before closers execute
//! under a single timeout. The first process error is returned to the caller
//! so the binary owns the exit code.
//!
//! # Example
//!
//! ```no_run
//! use courier_runner::Runner;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let result = Runner::new()
//!         .with_named_process("ticker", |ctx| async move {
//!             loop {
//!                 tokio::select! {
//!                     _ = ctx.cancelled() => break,
//!                     _ = tokio::time::sleep(Duration::from_secs(1)) => {
//!                         tracing::info!("tick");
//!                     }
//!                 }
//!             }
//!             Ok(())
//!         })
//!         .with_closer(|| async move {
//!             tracing::info!("cleaning up");
//!             Ok(())
//!         })
//!         .run()
//!         .await;
//!
//!     if result.is_err() {
//!         std::process::exit(1);
//!     }
//! }
//! ```

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// An app process: receives the shared cancellation token and runs until
/// completion or cancellation.
pub type Process = Box<
    dyn FnOnce(
            CancellationToken,
        ) -> Pin<Box<dyn Future<Output = Result<(), anyhow::Error>> + Send>>
        + Send,
>;

/// A cleanup function executed after all processes have stopped.
pub type Closer =
    Box<dyn FnOnce() -> Pin<Box<dyn Future<Output = Result<(), anyhow::Error>> + Send>> + Send>;

pub struct Runner {
    processes: Vec<(String, Process)>,
    closers: Vec<Closer>,
    closer_timeout: Duration,
    cancellation_token: CancellationToken,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner {
    pub fn new() -> Self {
        Self {
            processes: Vec::new(),
            closers: Vec::new(),
            closer_timeout: Duration::from_secs(10),
            cancellation_token: CancellationToken::new(),
        }
    }

    /// Adds a named app process. If any process returns an error, the shared
    /// token is cancelled and the remaining processes drain gracefully.
    pub fn with_named_process<F, Fut>(mut self, name: impl Into<String>, process: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), anyhow::Error>> + Send + 'static,
    {
        self.processes
            .push((name.into(), Box::new(|token| Box::pin(process(token)))));
        self
    }

    /// Adds a closer. Closers run in registration order after every process
    /// has stopped, regardless of how the processes ended.
    pub fn with_closer<F, Fut>(mut self, closer: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), anyhow::Error>> + Send + 'static,
    {
        self.closers.push(Box::new(|| Box::pin(closer())));
        self
    }

    /// Sets the overall timeout for the closer phase. Default is 10 seconds.
    pub fn with_closer_timeout(mut self, timeout: Duration) -> Self {
        self.closer_timeout = timeout;
        self
    }

    /// Sets a custom cancellation token, allowing external shutdown control.
    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = token;
        self
    }

    /// Runs all processes to completion, then the closers.
    ///
    /// Returns the first process error, if any.
    pub async fn run(self) -> Result<(), anyhow::Error> {
        let Self {
            processes,
            closers,
            closer_timeout,
            cancellation_token: token,
        } = self;

        let mut join_set: JoinSet<(String, Result<(), anyhow::Error>)> = JoinSet::new();
        for (name, process) in processes {
            let process_token = token.clone();
            join_set.spawn(async move {
                debug!(process = %name, "Starting app process");
                let result = process(process_token).await;
                (name, result)
            });
        }

        spawn_signal_watcher(token.clone());

        let mut first_error: Option<anyhow::Error> = None;
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((name, Ok(()))) => {
                    debug!(process = %name, "App process completed");
                }
                Ok((name, Err(err))) => {
                    error!(process = %name, "App process failed: {:#}", err);
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                    token.cancel();
                }
                Err(err) => {
                    error!("App process panicked: {}", err);
                    if first_error.is_none() {
                        first_error = Some(anyhow::anyhow!("app process panicked: {err}"));
                    }
                    token.cancel();
                }
            }
        }

        if !closers.is_empty() {
            info!(
                "Running {} closer(s) with timeout of {:?}",
                closers.len(),
                closer_timeout
            );
            match tokio::time::timeout(closer_timeout, run_closers(closers)).await {
                Ok(()) => info!("All closers completed"),
                Err(_) => error!("Closers timed out after {:?}", closer_timeout),
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => {
                info!("All app processes stopped");
                Ok(())
            }
        }
    }
}

/// Runs closers one at a time, in registration order. A failing closer is
/// logged and does not prevent the remaining closers from running.
async fn run_closers(closers: Vec<Closer>) {
    for (index, closer) in closers.into_iter().enumerate() {
        match closer().await {
            Ok(()) => debug!(index, "Closer completed"),
            Err(err) => error!(index, "Closer failed: {:#}", err),
        }
    }
}

fn spawn_signal_watcher(token: CancellationToken) {
    let interrupt_token = token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received shutdown signal");
                interrupt_token.cancel();
            }
            Err(err) => {
                error!("Error setting up signal handler: {}", err);
            }
        }
    });

    #[cfg(unix)]
    {
        tokio::spawn(async move {
            use tokio::signal::unix::{SignalKind, signal};
            let mut sigterm =
                signal(SignalKind::terminate()).expect("Failed to set up SIGTERM handler");
            sigterm.recv().await;
            info!("Received SIGTERM signal");
            token.cancel();
        });
    }
}
