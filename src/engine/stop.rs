// src/engine/stop.rs

//! Cooperative stop flag.
//!
//! OS signals never touch engine state directly. A listener task flips a
//! `tokio::sync::watch` flag; the poll loop checks it between cycles and
//! races it against the inter-cycle sleep.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, warn};

use crate::errors::Result;

/// Write side of the stop flag. Cheap to clone.
#[derive(Debug, Clone)]
pub struct StopHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl StopHandle {
    /// Request a stop. Idempotent.
    pub fn request_stop(&self) {
        self.tx.send_replace(true);
    }
}

/// Read side of the stop flag, owned by the poll loop.
#[derive(Debug, Clone)]
pub struct StopSignal {
    rx: watch::Receiver<bool>,
}

impl StopSignal {
    pub fn is_requested(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once a stop has been requested.
    ///
    /// If every [`StopHandle`] is dropped without requesting a stop, this
    /// never resolves.
    pub async fn requested(&mut self) {
        if self.rx.wait_for(|stop| *stop).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Create a connected stop handle / signal pair.
pub fn stop_channel() -> (StopHandle, StopSignal) {
    let (tx, rx) = watch::channel(false);
    (StopHandle { tx: Arc::new(tx) }, StopSignal { rx })
}

/// Spawn listeners that turn SIGINT (and SIGTERM on unix) into a stop
/// request on `handle`.
pub fn install_signal_handlers(handle: StopHandle) -> Result<()> {
    {
        let handle = handle.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "failed to listen for Ctrl+C");
                return;
            }
            warn!("Received SIGINT");
            handle.request_stop();
        });
    }

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            if terminate.recv().await.is_some() {
                warn!("Received SIGTERM");
                handle.request_stop();
            }
        });
    }

    #[cfg(not(unix))]
    drop(handle);

    Ok(())
}
