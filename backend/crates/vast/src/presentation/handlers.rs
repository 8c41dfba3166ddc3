//! HTTP Handlers

use crate::application::config::VastConfig;
use crate::application::serve_vast::ServeVastUseCase;
use crate::domain::repository::AdConfigSource;
use crate::presentation::dto::VastQuery;
use crate::presentation::xml::{VAST_CONTENT_TYPE, render};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode, Uri, header};
use axum::response::IntoResponse;
use kernel::error::app_error::AppError;
use platform::cache::{beacon_headers, no_cache_headers};
use platform::clock::Clock;
use std::sync::Arc;

/// Shared state for VAST handlers
#[derive(Clone)]
pub struct VastAppState<S>
where
    S: AdConfigSource + Clone + Send + Sync + 'static,
{
    pub source: Arc<S>,
    pub clock: Arc<dyn Clock>,
    pub config: Arc<VastConfig>,
}

/// GET /vast
///
/// Always 200 with a VAST body; a malformed query is treated as empty.
pub async fn serve_vast<S>(
    State(state): State<VastAppState<S>>,
    query: Result<Query<VastQuery>, QueryRejection>,
) -> impl IntoResponse
where
    S: AdConfigSource + Clone + Send + Sync + 'static,
{
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unparseable VAST query, using defaults");
            VastQuery::default()
        }
    };

    let use_case =
        ServeVastUseCase::new(state.source.clone(), state.clock.clone(), state.config.clone());

    let decision = use_case.execute(query.into_input()).await;
    let body = render(&decision, &state.config);

    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static(VAST_CONTENT_TYPE),
        )],
        no_cache_headers(),
        body,
    )
}

/// GET /ads/track
///
/// Beacon sink: accepts anything, records nothing.
pub async fn track_pixel() -> impl IntoResponse {
    (StatusCode::NO_CONTENT, beacon_headers())
}

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> AppError {
    AppError::not_found(format!("No route for {}", uri.path()))
}
