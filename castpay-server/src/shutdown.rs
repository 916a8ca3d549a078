//! Signal handling for graceful shutdown.

use tokio::signal::unix::{SignalKind, signal};

async fn wait_for(kind: SignalKind, name: &'static str) {
    match signal(kind) {
        Ok(mut stream) => {
            stream.recv().await;
            tracing::info!("Received {name}, initiating graceful shutdown");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install {name} handler");
            std::future::pending::<()>().await;
        }
    }
}

/// Creates a future that completes when a shutdown signal is received.
///
/// Listens for SIGTERM and SIGINT (Ctrl+C).
pub async fn shutdown_signal() {
    tokio::select! {
        _ = wait_for(SignalKind::terminate(), "SIGTERM") => {}
        _ = wait_for(SignalKind::interrupt(), "SIGINT") => {}
    }
}
