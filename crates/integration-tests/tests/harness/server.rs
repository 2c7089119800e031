//! Test server wrapper that starts Clipscribe on a random port

use std::net::SocketAddr;
use std::sync::Arc;

use clipscribe_config::Config;
use clipscribe_server::Server;
use clipscribe_store::{RecordStore, SqliteStore};
use tokio_util::sync::CancellationToken;

/// A running test server instance
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
    store: Arc<dyn RecordStore>,
}

impl TestServer {
    /// Start a test server with a fresh in-memory store
    pub async fn start(config: Config) -> anyhow::Result<Self> {
        Self::start_with_store(config, Arc::new(SqliteStore::in_memory()?)).await
    }

    /// Start a test server around `store`
    ///
    /// Binds to port 0 for automatic port assignment
    pub async fn start_with_store(config: Config, store: Arc<dyn RecordStore>) -> anyhow::Result<Self> {
        let server = Server::with_store(&config, Arc::clone(&store)).await?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        // Bind the listener here so we know the actual port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            axum::serve(listener, server.into_router())
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        let client = reqwest::Client::new();

        Ok(Self {
            addr,
            shutdown,
            client,
            store,
        })
    }

    /// Base URL of the running test server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Get a reference to the HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Record store behind the server
    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
