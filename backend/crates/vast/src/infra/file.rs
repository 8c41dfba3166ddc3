//! Filesystem Source
//!
//! Re-reads the document from disk on every request, so operators can edit
//! it in place without a restart.

use crate::domain::entities::AdConfig;
use crate::domain::repository::AdConfigSource;
use crate::error::{VastError, VastResult};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileAdConfigSource {
    path: PathBuf,
}

impl FileAdConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AdConfigSource for FileAdConfigSource {
    async fn load(&self) -> VastResult<AdConfig> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| VastError::ConfigUnavailable {
                path: self.path.display().to_string(),
                source,
            })?;

        Ok(AdConfig::from_json_slice(&bytes)?)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
