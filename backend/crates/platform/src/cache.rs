//! Cache Suppression Headers
//!
//! Ad decisions are per-request and time-bucket sensitive, so neither the
//! player nor any intermediary may cache them.

use axum::http::{HeaderName, HeaderValue, header};

/// `Cache-Control` for dynamic documents
pub const NO_STORE_REVALIDATE: &str = "no-store, no-cache, must-revalidate, max-age=0";

/// `Cache-Control` for beacon responses
pub const NO_STORE: &str = "no-store";

/// Headers forbidding any caching of a dynamic document
///
/// `Pragma` is kept for HTTP/1.0 caches still found in some set-top boxes.
pub fn no_cache_headers() -> [(HeaderName, HeaderValue); 2] {
    [
        (
            header::CACHE_CONTROL,
            HeaderValue::from_static(NO_STORE_REVALIDATE),
        ),
        (header::PRAGMA, HeaderValue::from_static("no-cache")),
    ]
}

/// Headers for empty beacon responses
pub fn beacon_headers() -> [(HeaderName, HeaderValue); 1] {
    [(header::CACHE_CONTROL, HeaderValue::from_static(NO_STORE))]
}
