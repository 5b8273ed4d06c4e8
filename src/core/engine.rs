use crate::core::dataset::{parse_listings, ListingTable};
use crate::core::encoding::FeatureEncoder;
use crate::core::regression::{LinearModel, LinearRegression};
use crate::domain::model::{BrandCatalog, Query};
use crate::domain::ports::{ListingSource, Predictor};
use crate::utils::error::{PredictorError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nalgebra::DVector;
use serde::Serialize;

/// Fewest valid rows a fit is attempted on.
pub const MIN_TRAINING_ROWS: usize = 2;

/// Encoder and regression fitted together, plus what they were fitted on.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    encoder: FeatureEncoder,
    model: LinearModel,
    catalog: BrandCatalog,
    source: String,
    rows_used: usize,
    rows_dropped: usize,
    r_squared: f64,
    fitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Coefficient {
    pub feature: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub source: String,
    pub rows_used: usize,
    pub rows_dropped: usize,
    pub intercept: f64,
    pub coefficients: Vec<Coefficient>,
    pub r_squared: f64,
    pub brands: Vec<String>,
    pub fitted_at: DateTime<Utc>,
}

impl TrainedModel {
    pub fn fit(table: &ListingTable, source: impl Into<String>) -> Result<Self> {
        if table.len() < MIN_TRAINING_ROWS {
            return Err(PredictorError::InsufficientData {
                valid: table.len(),
                required: MIN_TRAINING_ROWS,
            });
        }

        let encoder = FeatureEncoder::fit(table.brands());
        let x = encoder.transform_listings(&table.listings);
        let y = DVector::from_iterator(table.len(), table.listings.iter().map(|l| l.price));

        let model = LinearRegression::new().fit(&x, &y)?;
        let r_squared = model.r_squared(&x, &y);

        Ok(Self {
            catalog: BrandCatalog::from_observed(table.brands()),
            encoder,
            model,
            source: source.into(),
            rows_used: table.len(),
            rows_dropped: table.dropped,
            r_squared,
            fitted_at: Utc::now(),
        })
    }

    /// Model output clamped at zero and truncated to whole currency units.
    pub fn predict(&self, query: &Query) -> u64 {
        let row = self.encoder.transform_query(query);
        let raw = self.model.predict_row(&row);
        // NaN saturates to 0 in the cast
        raw.max(0.0).trunc() as u64
    }

    pub fn brand_catalog(&self) -> &BrandCatalog {
        &self.catalog
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn summary(&self) -> ModelSummary {
        let coefficients = self
            .encoder
            .feature_names()
            .into_iter()
            .zip(self.model.coefficients.iter())
            .map(|(feature, value)| Coefficient {
                feature,
                value: *value,
            })
            .collect();

        ModelSummary {
            source: self.source.clone(),
            rows_used: self.rows_used,
            rows_dropped: self.rows_dropped,
            intercept: self.model.intercept,
            coefficients,
            r_squared: self.r_squared,
            brands: self.catalog.options().to_vec(),
            fitted_at: self.fitted_at,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum ModelState {
    #[default]
    Unfitted,
    Ready(TrainedModel),
}

/// Loads listings from a source, fits the model and serves queries.
pub struct PredictorEngine<S: ListingSource> {
    source: S,
    refit_per_query: bool,
    state: ModelState,
}

impl<S: ListingSource> PredictorEngine<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            refit_per_query: false,
            state: ModelState::Unfitted,
        }
    }

    /// Re-read and re-fit before every prediction instead of caching the model.
    pub fn with_refit_per_query(mut self, refit: bool) -> Self {
        self.refit_per_query = refit;
        self
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ModelState::Ready(_))
    }

    pub fn model(&self) -> Option<&TrainedModel> {
        match &self.state {
            ModelState::Ready(model) => Some(model),
            ModelState::Unfitted => None,
        }
    }

    /// Runs the load phase. On failure the current state is kept.
    pub async fn load(&mut self) -> Result<&TrainedModel> {
        let location = self.source.describe();
        tracing::info!("Loading listings from {}", location);

        let data = self.source.read().await?;
        let table = parse_listings(&data)?;
        if table.dropped > 0 {
            tracing::warn!("Dropped {} rows with invalid values", table.dropped);
        }

        let trained = TrainedModel::fit(&table, location)?;
        tracing::info!(
            rows = table.len(),
            r_squared = trained.r_squared,
            "Model trained"
        );

        self.state = ModelState::Ready(trained);
        self.ready_model()
    }

    fn ready_model(&self) -> Result<&TrainedModel> {
        self.model().ok_or_else(|| PredictorError::FitError {
            reason: "model is not fitted".to_string(),
        })
    }

    pub async fn predict(&mut self, query: &Query) -> Result<u64> {
        if self.refit_per_query || !self.is_ready() {
            self.load().await?;
        }
        Ok(self.ready_model()?.predict(query))
    }

    pub fn brand_catalog(&self) -> BrandCatalog {
        self.model()
            .map(|m| m.brand_catalog().clone())
            .unwrap_or_else(|| BrandCatalog::from_observed(std::iter::empty()))
    }
}

#[async_trait]
impl<S: ListingSource> Predictor for PredictorEngine<S> {
    async fn predict(&mut self, query: &Query) -> Result<u64> {
        PredictorEngine::predict(self, query).await
    }

    fn brand_catalog(&self) -> BrandCatalog {
        PredictorEngine::brand_catalog(self)
    }

    fn label(&self) -> &'static str {
        "linear regression"
    }

    fn note(&self) -> String {
        format!(
            "Important: this model was trained on data from '{}'. Prediction accuracy depends \
             heavily on the quality, quantity and relevance of that data; synthetic or \
             unrepresentative data gives inaccurate prices.",
            self.source.describe()
        )
    }
}
