use crate::domain::ports::ListingSource;
use crate::utils::error::{PredictorError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Fetches listing CSV over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, Duration::from_secs(30))
    }

    /// Fails when the TLS backend cannot be initialised.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl ListingSource for HttpSource {
    async fn read(&self) -> Result<Vec<u8>> {
        tracing::debug!("Making HTTP request to: {}", self.url);
        let response = self.client.get(&self.url).send().await?;
        tracing::debug!("HTTP response status: {}", response.status());

        if response.status() == StatusCode::NOT_FOUND {
            return Err(PredictorError::DataFileNotFound {
                location: self.url.clone(),
            });
        }

        let body = response.error_for_status()?.bytes().await?;
        Ok(body.to_vec())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
