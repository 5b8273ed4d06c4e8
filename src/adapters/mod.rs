// Adapters layer: concrete listing sources (local file, HTTP).

pub mod http;
pub mod local;

pub use http::HttpSource;
pub use local::LocalSource;

use crate::config::toml_config::DataConfig;
use crate::domain::ports::ListingSource;
use crate::utils::error::Result;
use crate::utils::validation::is_remote_location;
use async_trait::async_trait;
use std::time::Duration;

/// A source picked from a location string: URLs go over HTTP, anything else is a path.
#[derive(Debug, Clone)]
pub enum DataSource {
    Local(LocalSource),
    Remote(HttpSource),
}

impl DataSource {
    pub fn from_location(location: &str) -> Result<Self> {
        Ok(if is_remote_location(location) {
            DataSource::Remote(HttpSource::new(location)?)
        } else {
            DataSource::Local(LocalSource::new(location))
        })
    }

    pub fn from_config(config: &DataConfig) -> Result<Self> {
        Ok(if is_remote_location(&config.location) {
            DataSource::Remote(HttpSource::with_timeout(
                config.location.as_str(),
                Duration::from_secs(config.timeout_seconds),
            )?)
        } else {
            DataSource::Local(LocalSource::new(config.location.as_str()))
        })
    }
}

#[async_trait]
impl ListingSource for DataSource {
    async fn read(&self) -> Result<Vec<u8>> {
        match self {
            DataSource::Local(source) => source.read().await,
            DataSource::Remote(source) => source.read().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            DataSource::Local(source) => source.describe(),
            DataSource::Remote(source) => source.describe(),
        }
    }
}
