//! Infrastructure Layer
//!
//! Inventory document sources: local file, HTTP origin, in-memory bundle.

pub mod bundled;
pub mod file;
pub mod http;

use crate::domain::entities::AdConfig;
use crate::domain::repository::AdConfigSource;
use crate::error::{VastError, VastResult};
use bundled::BundledAdConfigSource;
use file::FileAdConfigSource;
use http::HttpAdConfigSource;
use std::time::Duration;

/// Source chosen at startup from a location string
#[derive(Debug, Clone)]
pub enum AnyAdConfigSource {
    File(FileAdConfigSource),
    Http(HttpAdConfigSource),
    Bundled(BundledAdConfigSource),
}

impl AnyAdConfigSource {
    /// `http://` / `https://` locations are fetched, anything else is a path
    pub fn from_location(location: &str, timeout: Duration) -> VastResult<Self> {
        let location = location.trim();
        if location.is_empty() {
            return Err(VastError::InvalidLocation("empty location".to_string()));
        }

        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(Self::Http(HttpAdConfigSource::new(location, timeout)?))
        } else {
            Ok(Self::File(FileAdConfigSource::new(location)))
        }
    }
}

impl AdConfigSource for AnyAdConfigSource {
    async fn load(&self) -> VastResult<AdConfig> {
        match self {
            Self::File(source) => source.load().await,
            Self::Http(source) => source.load().await,
            Self::Bundled(source) => source.load().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::File(source) => source.describe(),
            Self::Http(source) => source.describe(),
            Self::Bundled(source) => source.describe(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_dispatch() {
        let timeout = Duration::from_secs(1);
        assert!(matches!(
            AnyAdConfigSource::from_location("ads/config.json", timeout).unwrap(),
            AnyAdConfigSource::File(_)
        ));
        assert!(matches!(
            AnyAdConfigSource::from_location("HTTPS://cdn.example/ads/config.json", timeout)
                .unwrap(),
            AnyAdConfigSource::Http(_)
        ));
        assert!(matches!(
            AnyAdConfigSource::from_location("  ", timeout),
            Err(VastError::InvalidLocation(_))
        ));
    }

    #[tokio::test]
    async fn test_bundled_dispatch() {
        let source = AnyAdConfigSource::Bundled(BundledAdConfigSource::new(
            r#"{"houseAds": [{"id": "b1", "url": "b1.mp4"}]}"#,
        ));
        let config = source.load().await.unwrap();
        assert_eq!(config.house_ads.len(), 1);
        assert!(source.describe().starts_with("bundled:"));
    }
}
