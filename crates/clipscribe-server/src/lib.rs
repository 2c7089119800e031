#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod completion;
mod cors;
mod error;
mod health;
mod payload;
mod prompts;
mod state;
mod upload;
mod videos;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use clipscribe_config::Config;
use clipscribe_llm::Completer;
use clipscribe_store::{RecordStore, SqliteStore};
use http::HeaderValue;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use payload::{CompletionBody, DEFAULT_TEMPERATURE, ExtractPayload, TranscriptionBody, Validate};
pub use state::AppState;
pub use upload::UploadSettings;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
    store: Arc<dyn RecordStore>,
}

impl Server {
    /// Build the server, opening the record store named in `[storage]`
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let store = if config.storage.is_in_memory() {
            SqliteStore::in_memory()
        } else {
            SqliteStore::open(&config.storage.database_path)
        }
        .with_context(|| format!("failed to open record store {}", config.storage.database_path.display()))?;

        Self::with_store(config, Arc::new(store)).await
    }

    /// Build the server around an existing record store
    pub async fn with_store(config: &Config, store: Arc<dyn RecordStore>) -> anyhow::Result<Self> {
        let listen_address = config.server.listen_address();

        let mut uploads = UploadSettings::from_config(&config.storage);
        tokio::fs::create_dir_all(&uploads.dir)
            .await
            .with_context(|| format!("failed to create upload directory {}", uploads.dir.display()))?;
        // Stored video paths must stay valid if the working directory changes.
        uploads.dir = tokio::fs::canonicalize(&uploads.dir)
            .await
            .with_context(|| format!("failed to resolve upload directory {}", uploads.dir.display()))?;

        let transcriber = stt::build_transcriber(config)?;
        let completer = Completer::from_config(&config.llm)
            .map_err(|e| anyhow::anyhow!("Failed to initialize completion provider: {e}"))?;

        let stream_origin = HeaderValue::from_str(config.server.stream_origin()).unwrap_or_else(|_| {
            tracing::warn!("CORS origin is not a valid header value, completion streams will allow any origin");
            HeaderValue::from_static("*")
        });

        let body_limit = uploads.body_limit();

        let state = AppState {
            store: Arc::clone(&store),
            transcriber: Arc::new(transcriber),
            completer: Arc::new(completer),
            uploads: Arc::new(uploads),
            stream_origin,
        };

        let mut app = Router::new()
            .route("/prompts", get(prompts::list_prompts))
            .route(
                "/videos",
                post(videos::upload_video).layer(DefaultBodyLimit::max(body_limit)),
            )
            .route("/videos/{video_id}/transcription", post(videos::create_transcription))
            .route("/videos/{video_id}/complete", post(completion::complete_video))
            .with_state(state);

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, get(health::health_handler));
        }

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // CORS, permissive unless [server.cors] narrows it
        let cors_config = config.server.cors.clone().unwrap_or_default();
        app = app.layer(cors::cors_layer(&cors_config));

        Ok(Self {
            router: app,
            listen_address,
            store,
        })
    }

    /// Get the configured listen address
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Record store shared by all handlers
    pub fn store(&self) -> Arc<dyn RecordStore> {
        Arc::clone(&self.store)
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
