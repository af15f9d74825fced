use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::sync::RwLock;
use tracing::info;

use oobflash_core::{FlashConfig, FragmentRenderer, ResponseAugmenter};

mod dto;
mod error;
mod flash;
mod fragment;
mod handlers;
mod html;
mod markdown;
mod store;


pub use flash::{CLIENT_COOKIE, HX_REQUEST, flash_middleware};
pub use fragment::HtmlFragmentRenderer;
pub use store::{FlashStore, Flashes, PendingBatch};

#[derive(Clone)]
pub struct WebState {
    pub(crate) config: Arc<FlashConfig>,
    pub(crate) store: FlashStore,
    pub(crate) augmenter: ResponseAugmenter,
    pub(crate) renderer: Arc<dyn FragmentRenderer + Send + Sync>,
    pub(crate) items: Arc<RwLock<Vec<String>>>,
}

impl WebState {
    /// # Errors
    /// Returns an error when the config names an invalid container id.
    pub fn new(config: FlashConfig) -> oobflash_core::Result<Self> {
        let renderer = HtmlFragmentRenderer::from_config(&config)?;
        Ok(Self::with_renderer(config, Arc::new(renderer)))
    }

    #[must_use]
    pub fn with_renderer(
        config: FlashConfig,
        renderer: Arc<dyn FragmentRenderer + Send + Sync>,
    ) -> Self {
        Self {
            augmenter: ResponseAugmenter::new(config.policy()),
            renderer,
            config: Arc::new(config),
            store: FlashStore::new(),
            items: Arc::new(RwLock::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn store(&self) -> &FlashStore {
        &self.store
    }
}

/// Start the demo web server and block until shutdown.
///
/// # Errors
/// Returns an error when the config is invalid, the runtime cannot be created,
/// the socket cannot be bound, or the server exits with a runtime failure.
pub fn serve_web(config: FlashConfig, host: &str, port: u16) -> Result<()> {
    let state = WebState::new(config).context("invalid flash configuration")?;
    let bind_addr = format!("{host}:{port}");
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build web runtime")?;

    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .with_context(|| format!("failed to bind web server at {bind_addr}"))?;
        info!(
            addr = %listener.local_addr()?,
            container = %state.config.container_id,
            dismiss_ms = u64::try_from(state.config.dismiss_after.as_millis()).unwrap_or(u64::MAX),
            "flash demo listening"
        );

        axum::serve(listener, app_router(state))
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
            })
            .await
            .context("web server failed")
    })
}

/// Demo routes wrapped in the injection middleware.
pub fn app_router(state: WebState) -> Router {
    let routes = Router::new()
        .route("/", get(handlers::index))
        .route("/assets/flash.css", get(handlers::flash_css))
        .route("/items", post(handlers::add_item))
        .route("/items/reload", post(handlers::add_item_and_reload))
        .route("/items/redirect", post(handlers::redirect_home))
        .route("/api/notifications", get(handlers::pending_notifications));
    with_flash_notifications(routes, state)
}

/// Installs the injection middleware once over every route in `routes`, so no
/// handler needs to opt in.
pub fn with_flash_notifications(routes: Router<WebState>, state: WebState) -> Router {
    routes
        .layer(middleware::from_fn_with_state(
            state.clone(),
            flash::flash_middleware,
        ))
        .with_state(state)
}
