//! Graceful shutdown on SIGINT / SIGTERM.

use std::{io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install {signal} handler: {source}")]
    Install {
        signal: &'static str,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    Interrupt,
    Terminate,
}

async fn interrupt() -> Result<Signal, ShutdownSignalError> {
    signal::ctrl_c()
        .await
        .map_err(|source| ShutdownSignalError::Install {
            signal: "ctrl-c",
            source,
        })?;

    Ok(Signal::Interrupt)
}

#[cfg(unix)]
async fn terminate() -> Result<Signal, ShutdownSignalError> {
    use signal::unix::{SignalKind, signal as unix_signal};

    let mut stream =
        unix_signal(SignalKind::terminate()).map_err(|source| ShutdownSignalError::Install {
            signal: "SIGTERM",
            source,
        })?;

    stream.recv().await;

    Ok(Signal::Terminate)
}

#[cfg(not(unix))]
async fn terminate() -> Result<Signal, ShutdownSignalError> {
    std::future::pending().await
}

/// Wait for a shutdown signal, then stop accepting connections and give
/// in-flight requests `grace` to finish.
pub(crate) async fn listen(handle: ServerHandle, grace: Duration) -> Result<(), ShutdownSignalError> {
    let received = tokio::select! {
        result = interrupt() => result?,
        result = terminate() => result?,
    };

    info!(
        signal = ?received,
        grace_seconds = grace.as_secs(),
        "shutdown signal received, draining connections"
    );

    handle.stop_graceful(Some(grace));

    Ok(())
}
