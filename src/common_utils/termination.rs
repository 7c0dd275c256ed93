use futures::future;
use std::io;
use stop_handle::StopHandle;
use tracing::{error, info};

#[cfg(unix)]
async fn wait_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = match signal(SignalKind::interrupt()) {
        Ok(s) => s,
        Err(e) => {
            error!("could not listen for SIGINT: {}", e);
            return wait_ctrl_c().await;
        }
    };
    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            error!("could not listen for SIGTERM: {}", e);
            return wait_ctrl_c().await;
        }
    };

    tokio::select! {
        _ = interrupt.recv() => "SIGINT",
        _ = terminate.recv() => "SIGTERM",
    }
}

#[cfg(not(unix))]
async fn wait_signal() -> &'static str {
    wait_ctrl_c().await
}

async fn wait_ctrl_c() -> &'static str {
    received("ctrl-c", tokio::signal::ctrl_c().await).await
}

/// Resolves to `kind` only when the signal really arrived. A listener that could not be
/// registered never fires.
async fn received(kind: &'static str, outcome: io::Result<()>) -> &'static str {
    match outcome {
        Ok(()) => kind,
        Err(e) => {
            error!("could not listen for {}: {}", kind, e);
            future::pending().await
        }
    }
}

pub async fn stop_signal_listener<R: StopSignal>(app_stop_handle: StopHandle<R>) {
    let kind = wait_signal().await;

    info!("signal `{}` received", kind);

    app_stop_handle.stop(R::signal_received());
}

pub trait StopSignal {
    fn signal_received() -> Self;
}

#[cfg(test)]
mod test {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn delivered_signal_resolves() {
        assert_eq!(received("ctrl-c", Ok(())).await, "ctrl-c");
    }

    #[tokio::test]
    async fn failed_registration_never_fires() {
        let outcome = tokio::time::timeout(
            Duration::from_millis(50),
            received(
                "ctrl-c",
                Err(io::Error::new(io::ErrorKind::Other, "no signal driver")),
            ),
        )
        .await;

        assert!(outcome.is_err());
    }
}
