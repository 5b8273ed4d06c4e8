use crate::config::toml_config::{OutputFormat, PredictorConfig};
use crate::domain::model::{
    BrandCatalog, Query, ENGINE_SIZE_DEFAULT, ENGINE_SIZE_MAX, ENGINE_SIZE_MIN, MILEAGE_DEFAULT,
    MILEAGE_MAX, MILEAGE_MIN, YEAR_DEFAULT, YEAR_MAX, YEAR_MIN,
};
use crate::utils::error::Result;
use clap::{Args, Parser};

fn parse_engine_size(value: &str) -> std::result::Result<f64, String> {
    let size: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if (ENGINE_SIZE_MIN..=ENGINE_SIZE_MAX).contains(&size) {
        Ok(size)
    } else {
        Err(format!(
            "engine size must be between {} and {} liters",
            ENGINE_SIZE_MIN, ENGINE_SIZE_MAX
        ))
    }
}

/// The four car attributes, with the same domains as the input controls.
#[derive(Debug, Clone, Args)]
pub struct QueryArgs {
    /// Odometer reading in kilometers
    #[arg(long, default_value_t = MILEAGE_DEFAULT,
          value_parser = clap::value_parser!(u32).range(i64::from(MILEAGE_MIN)..=i64::from(MILEAGE_MAX)))]
    pub mileage: u32,

    /// Year of manufacture
    #[arg(long, default_value_t = YEAR_DEFAULT,
          value_parser = clap::value_parser!(i32).range(i64::from(YEAR_MIN)..=i64::from(YEAR_MAX)))]
    pub year: i32,

    /// Car brand; defaults to the first brand on offer
    #[arg(long)]
    pub brand: Option<String>,

    /// Engine size in liters
    #[arg(long, default_value_t = ENGINE_SIZE_DEFAULT, value_parser = parse_engine_size)]
    pub engine_size: f64,
}

impl QueryArgs {
    /// Builds the query, resolving the brand against the selector options.
    pub fn to_query(&self, catalog: &BrandCatalog) -> Result<Query> {
        let brand = match &self.brand {
            Some(brand) => catalog.resolve(brand)?,
            None => catalog.default_option(),
        };
        Query::new(self.mileage, self.year, brand, self.engine_size)
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "car-price")]
#[command(about = "Estimate a used car's price (IDR) with a fixed pricing formula")]
pub struct CliConfig {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format; overrides [output] format from the config file
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Start an interactive form instead of a single estimate
    #[arg(short, long)]
    pub interactive: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl CliConfig {
    pub fn load_config(&self) -> Result<PredictorConfig> {
        let mut config = PredictorConfig::load_optional(self.config.as_deref())?;
        if let Some(format) = self.format {
            config.output.format = format;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = CliConfig::try_parse_from(["car-price"]).unwrap();
        assert_eq!(cli.query.mileage, 50_000);
        assert_eq!(cli.query.year, 2018);
        assert_eq!(cli.query.engine_size, 2.0);
        assert!(cli.query.brand.is_none());
        assert!(!cli.interactive);

        let query = cli.query.to_query(&BrandCatalog::fixed()).unwrap();
        assert_eq!(query.brand, "Toyota");
    }

    #[test]
    fn test_ranges_enforced_by_parser() {
        assert!(CliConfig::try_parse_from(["car-price", "--mileage", "300001"]).is_err());
        assert!(CliConfig::try_parse_from(["car-price", "--year", "1989"]).is_err());
        assert!(CliConfig::try_parse_from(["car-price", "--engine-size", "8.5"]).is_err());
        assert!(CliConfig::try_parse_from(["car-price", "--engine-size", "big"]).is_err());
        assert!(CliConfig::try_parse_from([
            "car-price",
            "--mileage",
            "0",
            "--year",
            "2025",
            "--engine-size",
            "0.5"
        ])
        .is_ok());
    }

    #[test]
    fn test_brand_resolved_against_catalog() {
        let cli =
            CliConfig::try_parse_from(["car-price", "--brand", "mercedes-benz", "--format", "json"])
                .unwrap();
        let query = cli.query.to_query(&BrandCatalog::fixed()).unwrap();
        assert_eq!(query.brand, "Mercedes-Benz");
        assert_eq!(cli.load_config().unwrap().output.format, OutputFormat::Json);

        let unknown = CliConfig::try_parse_from(["car-price", "--brand", "Lada"]).unwrap();
        assert!(unknown.query.to_query(&BrandCatalog::fixed()).is_err());
    }
}
