pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, QueryArgs};
pub use crate::config::{OutputFormat, PredictorConfig};

pub use crate::adapters::{DataSource, HttpSource, LocalSource};
pub use crate::core::{
    engine::{ModelSummary, PredictorEngine, TrainedModel},
    formula::{FormulaCoefficients, FormulaEstimator},
    form::QueryForm,
    report::PriceReport,
    session::Session,
};
pub use crate::domain::model::{BrandCatalog, Listing, Query};
pub use crate::domain::ports::{ListingSource, Predictor};
pub use crate::utils::error::{PredictorError, Result};
