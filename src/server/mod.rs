//! HTTP surface: index page, URL screenshots and slide PDFs.

mod error;
mod handlers;

pub use error::{ApiError, ErrorBody};
pub use handlers::{ScreenshotForm, SlidesRequest};

use crate::session::SessionPool;
use crate::ServerConfig;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: SessionPool,
    pub navigation_timeout: Duration,
}

impl AppState {
    pub fn new(pool: SessionPool, navigation_timeout: Duration) -> Self {
        Self {
            pool,
            navigation_timeout,
        }
    }

    /// State backed by `launcher`, sized from `config`.
    pub fn from_config(launcher: Arc<dyn crate::Launcher>, config: &ServerConfig) -> Self {
        Self::new(
            SessionPool::new(launcher, config.max_sessions),
            config.navigation_timeout(),
        )
    }
}

/// Build the application router.
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/healthz", get(handlers::healthz))
        .route("/screenshot", post(handlers::screenshot))
        .route("/slides", post(handlers::slides))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
