//! VAST Router

use crate::application::config::VastConfig;
use crate::domain::repository::AdConfigSource;
use crate::infra::AnyAdConfigSource;
use crate::presentation::handlers::{self, VastAppState};
use axum::{Router, routing::get};
use platform::clock::Clock;
use std::sync::Arc;

/// Create the VAST router with the source chosen at startup
pub fn vast_router(source: AnyAdConfigSource, clock: Arc<dyn Clock>, config: VastConfig) -> Router {
    vast_router_generic(source, clock, config)
}

/// Create a VAST router for any source implementation
pub fn vast_router_generic<S>(source: S, clock: Arc<dyn Clock>, config: VastConfig) -> Router
where
    S: AdConfigSource + Clone + Send + Sync + 'static,
{
    let state = VastAppState {
        source: Arc::new(source),
        clock,
        config: Arc::new(config),
    };

    Router::new()
        .route("/vast", get(handlers::serve_vast::<S>))
        .route("/ads/vast.xml", get(handlers::serve_vast::<S>))
        .route("/ads/track", get(handlers::track_pixel))
        .route("/ads/pixel", get(handlers::track_pixel))
        .fallback(handlers::not_found)
        .with_state(state)
}
