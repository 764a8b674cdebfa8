//! Shutdown signalling.
//!
//! A [`ShutdownSignal`] is shared by the composition root and every task that
//! should stop early. Receivers obtained from [`ShutdownSignal::subscribe`]
//! observe triggers sent after they subscribe, so subscribe before starting
//! the work that must be cancellable.

use tokio::signal;
use tokio::sync::broadcast;

/// Cloneable handle for requesting and observing shutdown.
///
/// Dropping every handle closes the channel, which receivers also treat as
/// shutdown.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    tx: broadcast::Sender<()>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Get the underlying sender
    pub fn sender(&self) -> broadcast::Sender<()> {
        self.tx.clone()
    }

    /// Request shutdown. Returns the number of receivers notified.
    pub fn trigger(&self) -> usize {
        self.tx.send(()).unwrap_or(0)
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for Ctrl+C or SIGTERM, then trigger `shutdown`.
pub async fn listen_for_os_signals(shutdown: ShutdownSignal) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating shutdown");
        }
    }

    shutdown.trigger();
}
