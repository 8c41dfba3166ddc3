//! HTTP Source
//!
//! Fetches the document from a collaborator (typically the static origin
//! that also hosts the creatives) once per request.

use crate::domain::entities::AdConfig;
use crate::domain::repository::AdConfigSource;
use crate::error::VastResult;
use platform::fetch::HttpFetcher;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpAdConfigSource {
    url: String,
    fetcher: HttpFetcher,
}

impl HttpAdConfigSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> VastResult<Self> {
        Ok(Self {
            url: url.into(),
            fetcher: HttpFetcher::new(timeout)?,
        })
    }
}

impl AdConfigSource for HttpAdConfigSource {
    async fn load(&self) -> VastResult<AdConfig> {
        let bytes = self.fetcher.get_bytes(&self.url).await?;
        Ok(AdConfig::from_json_slice(&bytes)?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VastError;
    use axum::Router;
    use axum::routing::get;
    use tokio::net::TcpListener;

    async fn spawn_origin(body: &'static str) -> String {
        let app = Router::new().route("/ads/config.json", get(move || async move { body }));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/ads/config.json")
    }

    #[tokio::test]
    async fn test_load_remote_document() {
        let url = spawn_origin(r#"{"sponsorAds": [{"id": "s1", "mp4": "s1.mp4"}]}"#).await;
        let source = HttpAdConfigSource::new(url, Duration::from_secs(3)).unwrap();
        let config = source.load().await.unwrap();
        assert_eq!(config.sponsor_ads[0].id.as_deref(), Some("s1"));
    }

    #[tokio::test]
    async fn test_html_error_page_is_malformed() {
        let url = spawn_origin("<html>502 Bad Gateway</html>").await;
        let source = HttpAdConfigSource::new(url, Duration::from_secs(3)).unwrap();
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, VastError::ConfigMalformed(_)));
    }

    #[tokio::test]
    async fn test_unreachable_origin() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = format!("http://{addr}/ads/config.json");
        let source = HttpAdConfigSource::new(url, Duration::from_secs(3)).unwrap();
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, VastError::ConfigFetch(_)));
    }
}
