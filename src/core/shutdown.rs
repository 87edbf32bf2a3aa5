use tokio::signal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopSignal {
    Interrupt,
    Terminate,
}

async fn interrupt() -> StopSignal {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    StopSignal::Interrupt
}

#[cfg(unix)]
async fn terminate() -> StopSignal {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to install SIGTERM handler");
            std::future::pending::<()>().await;
        }
    }
    StopSignal::Terminate
}

#[cfg(not(unix))]
async fn terminate() -> StopSignal {
    std::future::pending::<StopSignal>().await
}

/// Resolves on Ctrl+C or SIGTERM; in-flight requests are drained by `axum::serve` afterwards.
pub(crate) async fn shutdown_signal() {
    let received = tokio::select! {
        signal = interrupt() => signal,
        signal = terminate() => signal,
    };

    tracing::info!(signal = ?received, "Shutdown signal received, draining connections");
}
