//! Bundled Source
//!
//! A document compiled into the binary or supplied in memory. It is decoded
//! on every load so behaviour matches the other sources exactly.

use crate::domain::entities::AdConfig;
use crate::domain::repository::AdConfigSource;
use crate::error::VastResult;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct BundledAdConfigSource {
    document: Arc<str>,
}

impl BundledAdConfigSource {
    pub fn new(document: impl Into<Arc<str>>) -> Self {
        Self {
            document: document.into(),
        }
    }
}

impl AdConfigSource for BundledAdConfigSource {
    async fn load(&self) -> VastResult<AdConfig> {
        Ok(AdConfig::from_json_slice(self.document.as_bytes())?)
    }

    fn describe(&self) -> String {
        format!("bundled:{} bytes", self.document.len())
    }
}
