// Server lifecycle
// Owns the listener and the shutdown signal wiring

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::watch;

/// Handle for requesting an orderly shutdown of a running [`Server`].
///
/// Cheap to clone; the first call wins and repeat calls are no-ops.
#[derive(Clone)]
pub struct ShutdownHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        let _ = self.tx.send(true);
    }
}

/// Explicitly-owned server lifecycle: bound on construction, listening while
/// [`Server::serve`] runs, draining once a termination signal or a
/// [`ShutdownHandle`] fires, stopped when `serve` returns.
///
/// Draining means the listener stops accepting new connections while requests
/// already in flight run to completion.
pub struct Server {
    listener: TcpListener,
    shutdown_tx: Arc<watch::Sender<bool>>,
    // Held from bind time so a shutdown requested before serve starts is
    // still observed.
    shutdown_rx: watch::Receiver<bool>,
}

impl Server {
    /// Binds the listener. Failure here is a startup error for the caller.
    pub async fn bind(addr: SocketAddr) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Ok(Self {
            listener,
            shutdown_tx: Arc::new(shutdown_tx),
            shutdown_rx,
        })
    }

    /// Address actually bound, useful when the port was 0.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            tx: self.shutdown_tx.clone(),
        }
    }

    /// Serves `app` until a termination signal or shutdown handle fires,
    /// then lets in-flight requests finish before returning.
    pub async fn serve(self, app: Router) -> io::Result<()> {
        let mut shutdown_rx = self.shutdown_rx;
        let addr = self.listener.local_addr()?;
        tracing::info!("Server started on port {}", addr.port());

        axum::serve(self.listener, app)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    () = shutdown_signal() => {}
                    _ = shutdown_rx.changed() => {}
                }
                tracing::info!("Shutting down gracefully...");
            })
            .await?;

        tracing::info!("Server closed.");
        Ok(())
    }
}

/// Resolves when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler");
        let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt())
            .expect("failed to install SIGINT handler");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        drop(signal::ctrl_c().await);
    }
}
