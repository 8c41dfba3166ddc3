//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use anyhow::Context;
use axum::http::{self, Method, header};
use platform::clock::SystemClock;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vast::domain::repository::AdConfigSource;
use vast::{AnyAdConfigSource, RotationMode, VastConfig, vast_router};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8787";
const DEFAULT_AD_CONFIG_SOURCE: &str = "ads/config.json";
const DEFAULT_AD_CONFIG_TIMEOUT_MS: u64 = 3000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,vast=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let vast_config = vast_config_from_env()?;

    // Inventory source
    let location =
        env::var("AD_CONFIG_SOURCE").unwrap_or_else(|_| DEFAULT_AD_CONFIG_SOURCE.to_string());
    let timeout_ms = match env::var("AD_CONFIG_TIMEOUT_MS") {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("AD_CONFIG_TIMEOUT_MS is not a number: {raw}"))?,
        Err(_) => DEFAULT_AD_CONFIG_TIMEOUT_MS,
    };
    let source = AnyAdConfigSource::from_location(&location, Duration::from_millis(timeout_ms))
        .map_err(AppError::from)
        .context("Invalid AD_CONFIG_SOURCE")?;

    tracing::info!(
        source = %source.describe(),
        rotation = %vast_config.rotation_mode,
        bucket_secs = vast_config.bucket_window.as_secs(),
        beacons = vast_config.tracking_url.is_some(),
        "VAST configuration loaded"
    );

    // CORS configuration
    let allow_origin = match env::var("CORS_ORIGINS") {
        Ok(origins) => {
            let allowed: Vec<http::HeaderValue> = origins
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            AllowOrigin::list(allowed)
        }
        Err(_) => AllowOrigin::any(),
    };

    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::list([Method::GET, Method::OPTIONS]))
        .allow_headers(AllowHeaders::list([header::ACCEPT, header::CONTENT_TYPE]));

    // Build router
    let app = vast_router(source, Arc::new(SystemClock), vast_config)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let bind = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("BIND_ADDR is not a socket address: {bind}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build-profile preset, then `VAST_*` overrides
fn vast_config_from_env() -> anyhow::Result<VastConfig> {
    let mut config = if cfg!(debug_assertions) {
        VastConfig::development()
    } else {
        VastConfig::default()
    };

    if let Ok(raw) = env::var("VAST_BUCKET_SECS") {
        let secs: u64 = raw
            .trim()
            .parse()
            .with_context(|| format!("VAST_BUCKET_SECS is not a number: {raw}"))?;
        anyhow::ensure!(secs > 0, "VAST_BUCKET_SECS must be positive");
        config.bucket_window = Duration::from_secs(secs);
    }

    if let Ok(raw) = env::var("VAST_ROTATION") {
        config.rotation_mode = raw.parse::<RotationMode>()?;
    }

    if let Ok(url) = env::var("VAST_TRACKING_URL") {
        let url = url.trim();
        if !url.is_empty() {
            config.tracking_url = Some(url.to_string());
        }
    }

    if let Ok(ad_system) = env::var("VAST_AD_SYSTEM") {
        let ad_system = ad_system.trim();
        if !ad_system.is_empty() {
            config.ad_system = ad_system.to_string();
        }
    }

    Ok(config)
}
