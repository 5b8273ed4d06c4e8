#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, QueryArgs};
pub use toml_config::{OutputFormat, PredictorConfig, DEFAULT_DATA_LOCATION};
