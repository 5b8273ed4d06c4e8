use crate::domain::model::{BrandCatalog, Query};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Where training listings come from.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Raw CSV bytes.
    async fn read(&self) -> Result<Vec<u8>>;

    /// Human readable location, shown in logs and reports.
    fn describe(&self) -> String;
}

/// Anything that can answer a price query.
#[async_trait]
pub trait Predictor: Send {
    async fn predict(&mut self, query: &Query) -> Result<u64>;

    /// Brands the selector should offer.
    fn brand_catalog(&self) -> BrandCatalog;

    /// Short label for the estimator, shown next to the result.
    fn label(&self) -> &'static str;

    /// Informational note printed under each estimate.
    fn note(&self) -> String;
}
