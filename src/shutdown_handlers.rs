use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::shutdown::{ShutdownReceiver, ShutdownSender};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// One shutdown is ever sent per run.
const SHUTDOWN_CHANNEL_CAPACITY: usize = 1;

#[must_use]
pub fn shutdown_channel() -> (ShutdownSender, ShutdownReceiver) {
    broadcast::channel::<()>(SHUTDOWN_CHANNEL_CAPACITY)
}

/// Turns the first Ctrl-C (or SIGTERM on unix) into a shutdown. The task
/// also ends, without sending, once anyone else sends a shutdown.
pub fn setup_signal_shutdown_handler(shutdown_tx: &ShutdownSender) -> JoinHandle<()> {
    let shutdown_tx = shutdown_tx.clone();
    let mut shutdown_rx = shutdown_tx.subscribe();
    tokio::spawn(async move {
        tokio::select! {
            _ = shutdown_rx.recv() => {}
            name = termination_signal() => {
                tracing::info!("Received {}; stopping the flood.", name);
                drop(shutdown_tx.send(()));
            }
        }
    })
}

async fn termination_signal() -> &'static str {
    #[cfg(unix)]
    {
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    () = ctrl_c() => "Ctrl-C",
                    _ = term.recv() => "SIGTERM",
                }
            }
            Err(err) => {
                tracing::warn!("Failed to register SIGTERM handler: {}", err);
                ctrl_c().await;
                "Ctrl-C"
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c().await;
        "Ctrl-C"
    }
}

/// Never resolves when Ctrl-C cannot be watched.
async fn ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", err);
        std::future::pending::<()>().await;
    }
}
