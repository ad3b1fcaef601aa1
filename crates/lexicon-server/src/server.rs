//! Server setup and lifecycle.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::services::ServeDir;

use lexicon_content::{FsCorpus, Resolver};

use crate::routes::{self, AppState};

/// Configuration for the site server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Content corpus root (holds `vocabulary/`, `styles/`, `pages/`).
    pub content_dir: PathBuf,

    /// Built static site to serve as fallback, if any.
    pub static_dir: Option<PathBuf>,

    /// Port to listen on.
    pub port: u16,

    /// Host to bind to.
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            static_dir: None,
            port: 3000,
            host: "127.0.0.1".to_string(),
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}: {1}")]
    InvalidAddress(String, String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),
}

/// The design vocabulary site server.
pub struct SiteServer {
    config: ServerConfig,
}

impl SiteServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Build the application router. Exposed separately so tests can drive
    /// the routes without binding a socket.
    pub fn router(config: &ServerConfig) -> Router {
        let state = Arc::new(AppState {
            resolver: Resolver::new(FsCorpus::new(&config.content_dir)),
        });

        let mut app = Router::new()
            .route("/api/search", get(routes::search))
            .route("/api/vocabulary", get(routes::vocabulary_listing))
            .route("/api/vocabulary/{slug}", get(routes::vocabulary_entry))
            .route("/api/styles", get(routes::style_listing))
            .route("/api/styles/{slug}", get(routes::style_entry))
            .route("/api/pages/{slug}", get(routes::page_entry))
            .with_state(state);

        if let Some(static_dir) = &config.static_dir {
            app = app.fallback_service(ServeDir::new(static_dir));
        }

        app
    }

    /// Start serving until the process is terminated.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr_str = format!("{}:{}", self.config.host, self.config.port);
        let addr: SocketAddr = addr_str
            .parse()
            .map_err(|e: std::net::AddrParseError| {
                ServerError::InvalidAddress(addr_str.clone(), e.to_string())
            })?;

        let app = Self::router(&self.config);

        tracing::info!("Serving content API at http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}
