use crate::domain::ports::ListingSource;
use crate::utils::error::{PredictorError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalSource {
    path: PathBuf,
}

impl LocalSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ListingSource for LocalSource {
    async fn read(&self) -> Result<Vec<u8>> {
        tracing::debug!("Reading listings from {}", self.path.display());
        match tokio::fs::read(&self.path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(PredictorError::DataFileNotFound {
                    location: self.describe(),
                })
            }
            Err(e) => Err(PredictorError::IoError(e)),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
