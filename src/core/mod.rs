pub mod dataset;
pub mod encoding;
pub mod engine;
pub mod form;
pub mod formula;
pub mod regression;
pub mod report;
pub mod session;

pub use crate::domain::model::{BrandCatalog, Listing, Query};
pub use crate::domain::ports::{ListingSource, Predictor};
pub use crate::utils::error::Result;
