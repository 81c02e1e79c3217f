//! Graceful shutdown signal handling

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    io,
    time::Duration,
};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

/// Process signal that stops the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShutdownSignal {
    /// Ctrl+C.
    Interrupt,

    /// SIGTERM, as sent by container runtimes.
    Terminate,
}

impl Display for ShutdownSignal {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Interrupt => "interrupt",
            Self::Terminate => "terminate",
        })
    }
}

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install {signal} handler: {source}")]
    Install {
        signal: ShutdownSignal,
        #[source]
        source: io::Error,
    },
}

impl ShutdownSignalError {
    fn install(signal: ShutdownSignal) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Install { signal, source }
    }
}

async fn interrupt() -> Result<ShutdownSignal, ShutdownSignalError> {
    signal::ctrl_c()
        .await
        .map_err(ShutdownSignalError::install(ShutdownSignal::Interrupt))?;

    Ok(ShutdownSignal::Interrupt)
}

#[cfg(unix)]
async fn terminate() -> Result<ShutdownSignal, ShutdownSignalError> {
    signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(ShutdownSignalError::install(ShutdownSignal::Terminate))?
        .recv()
        .await;

    Ok(ShutdownSignal::Terminate)
}

#[cfg(not(unix))]
async fn terminate() -> Result<ShutdownSignal, ShutdownSignalError> {
    std::future::pending().await
}

/// Wait for the first shutdown signal, then stop `handle`, letting in-flight requests run for up
/// to `grace_period`.
pub(crate) async fn listen(
    handle: ServerHandle,
    grace_period: Duration,
) -> Result<ShutdownSignal, ShutdownSignalError> {
    let received = tokio::select! {
        received = interrupt() => received?,
        received = terminate() => received?,
    };

    info!(
        signal = %received,
        grace_period_ms = grace_period.as_millis(),
        "shutdown signal received, draining requests"
    );

    handle.stop_graceful(grace_period);

    Ok(received)
}
