// HTTP server state and startup

mod error;
pub mod handlers;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::downloader::cache::InfoCache;
use crate::downloader::extractors::{MediaExtractor, YtDlpExtractor};

pub use error::ApiError;
pub use routes::create_router;

/// Per-process services, constructed once at startup and injected into
/// every handler through axum state.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<InfoCache>,
    pub extractor: Arc<dyn MediaExtractor>,
}

impl AppState {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            cache: Arc::new(InfoCache::new()?),
            extractor: Arc::new(YtDlpExtractor::new()),
        })
    }
}

/// Bind and serve until the process is stopped.
pub async fn serve(addr: SocketAddr) -> std::io::Result<()> {
    let state = AppState::new()?;
    let app = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    info!("listening on http://{}", addr);
    axum::serve(listener, app).await
}
