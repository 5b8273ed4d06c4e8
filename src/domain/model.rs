use crate::utils::error::{PredictorError, Result};
use crate::utils::validation::validate_range;
use serde::{Deserialize, Serialize};

pub const MILEAGE_MIN: u32 = 0;
pub const MILEAGE_MAX: u32 = 300_000;
pub const MILEAGE_STEP: u32 = 1_000;
pub const MILEAGE_DEFAULT: u32 = 50_000;

pub const YEAR_MIN: i32 = 1990;
pub const YEAR_MAX: i32 = 2025;
pub const YEAR_DEFAULT: i32 = 2018;

pub const ENGINE_SIZE_MIN: f64 = 0.5;
pub const ENGINE_SIZE_MAX: f64 = 8.0;
pub const ENGINE_SIZE_STEP: f64 = 0.1;
pub const ENGINE_SIZE_DEFAULT: f64 = 2.0;

/// Brand option that stands for "anything not listed".
pub const OTHER_BRAND: &str = "Other";

/// Selector options of the fixed-formula variant.
pub const FIXED_BRANDS: [&str; 10] = [
    "Toyota",
    "Honda",
    "Ford",
    "BMW",
    "Mercedes-Benz",
    "Nissan",
    "Mitsubishi",
    "Suzuki",
    "Hyundai",
    OTHER_BRAND,
];

/// One historical training row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub mileage: f64,
    pub year: f64,
    pub engine_size: f64,
    pub brand: String,
    pub price: f64,
}

/// The four attributes a price is requested for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub mileage: u32,
    pub year: i32,
    pub brand: String,
    pub engine_size: f64,
}

impl Query {
    /// Builds a query, rejecting values outside the input controls' domains.
    pub fn new(mileage: u32, year: i32, brand: impl Into<String>, engine_size: f64) -> Result<Self> {
        validate_range("mileage", mileage, MILEAGE_MIN, MILEAGE_MAX)?;
        validate_range("year", year, YEAR_MIN, YEAR_MAX)?;
        validate_range("engine_size", engine_size, ENGINE_SIZE_MIN, ENGINE_SIZE_MAX)?;

        let brand = brand.into();
        if brand.trim().is_empty() {
            return Err(PredictorError::ValidationError {
                field: "brand".to_string(),
                message: "brand cannot be empty".to_string(),
            });
        }

        Ok(Self {
            mileage,
            year,
            brand,
            engine_size,
        })
    }
}

/// The set of brands a selector offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandCatalog {
    options: Vec<String>,
}

impl BrandCatalog {
    pub fn fixed() -> Self {
        Self {
            options: FIXED_BRANDS.iter().map(|b| b.to_string()).collect(),
        }
    }

    /// Sorted distinct brands seen in the data, with "Other" appended when absent.
    pub fn from_observed<'a, I>(brands: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut options: Vec<String> = brands.into_iter().map(str::to_string).collect();
        options.sort();
        options.dedup();
        if !options.iter().any(|b| b == OTHER_BRAND) {
            options.push(OTHER_BRAND.to_string());
        }
        Self { options }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn default_option(&self) -> &str {
        self.options.first().map(String::as_str).unwrap_or(OTHER_BRAND)
    }

    /// Case-insensitive lookup returning the canonical spelling.
    pub fn resolve(&self, brand: &str) -> Result<&str> {
        let wanted = brand.trim();
        self.options
            .iter()
            .find(|b| b.eq_ignore_ascii_case(wanted))
            .map(String::as_str)
            .ok_or_else(|| PredictorError::ValidationError {
                field: "brand".to_string(),
                message: format!(
                    "'{}' is not one of: {}",
                    wanted,
                    self.options.join(", ")
                ),
            })
    }
}
