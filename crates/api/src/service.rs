//! Service lifecycle: store connection plus HTTP listener, started and
//! stopped together.

use std::net::SocketAddr;

use blog_core::store::{self, SharedStore, StoreError};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::config::AppConfig;
use crate::routes;
use crate::state::AppState;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("service is already running on {0}")]
    AlreadyRunning(SocketAddr),

    #[error("service is not running")]
    NotRunning,

    #[error("failed to connect to store: {0}")]
    Store(#[from] StoreError),

    #[error("listener error: {0}")]
    Io(#[from] std::io::Error),

    #[error("server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// The blog posts HTTP service.
///
/// `start` and `stop` must alternate; anything else is an error. Dropping a
/// running service signals the listener to shut down.
pub struct Service {
    config: AppConfig,
    running: Option<Running>,
}

struct Running {
    addr: SocketAddr,
    store: SharedStore,
    shutdown: Option<oneshot::Sender<()>>,
    server: JoinHandle<std::io::Result<()>>,
}

impl Running {
    fn signal_shutdown(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

impl Drop for Running {
    fn drop(&mut self) {
        self.signal_shutdown();
    }
}

impl Service {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            running: None,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Address the listener is bound to, while running.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.running.as_ref().map(|running| running.addr)
    }

    /// Store handle, while running.
    pub fn store(&self) -> Option<SharedStore> {
        self.running.as_ref().map(|running| running.store.clone())
    }

    /// Connect to the store at `store_address`, bind the listener and begin
    /// serving. Returns the bound address once connections are accepted.
    pub async fn start(&mut self, store_address: &str) -> Result<SocketAddr, ServiceError> {
        if let Some(running) = &self.running {
            return Err(ServiceError::AlreadyRunning(running.addr));
        }

        let store = store::connect(store_address, &self.config.store_options()).await?;

        let (listener, addr) = match bind(&self.config.addr()).await {
            Ok(bound) => bound,
            Err(err) => {
                store.close().await;
                return Err(err.into());
            }
        };

        let app = routes::build_router(AppState::new(store.clone(), self.config.clone()));
        let (shutdown, shutdown_rx) = oneshot::channel::<()>();
        let server = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    // A dropped sender also means shut down.
                    let _ = shutdown_rx.await;
                })
                .await
        });

        tracing::info!("Listening on {addr}");
        self.running = Some(Running {
            addr,
            store,
            shutdown: Some(shutdown),
            server,
        });
        Ok(addr)
    }

    /// Stop accepting connections, drain in-flight requests and close the store.
    pub async fn stop(&mut self) -> Result<(), ServiceError> {
        let mut running = self.running.take().ok_or(ServiceError::NotRunning)?;

        running.signal_shutdown();
        let served = (&mut running.server).await;
        running.store.close().await;
        tracing::info!(addr = %running.addr, "Service stopped");

        served??;
        Ok(())
    }
}

async fn bind(addr: &str) -> std::io::Result<(TcpListener, SocketAddr)> {
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    Ok((listener, local))
}
