use crate::domain::model::{BrandCatalog, Query};
use crate::domain::ports::Predictor;
use crate::utils::error::{PredictorError, Result};
use crate::utils::validation::Validate;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Coefficients of the hand-written pricing formula, in IDR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormulaCoefficients {
    pub base_price: i64,
    pub per_km: i64,
    pub per_year_of_age: i64,
    pub reference_year: i32,
    pub per_liter: f64,
    pub floor_price: i64,
    pub brand_adjustments: BTreeMap<String, i64>,
}

impl Default for FormulaCoefficients {
    fn default() -> Self {
        let brand_adjustments = [
            ("BMW", 50_000_000),
            ("Mercedes-Benz", 50_000_000),
            ("Toyota", 20_000_000),
            ("Honda", 20_000_000),
            ("Ford", -10_000_000),
        ]
        .into_iter()
        .map(|(brand, amount)| (brand.to_string(), amount))
        .collect();

        Self {
            base_price: 200_000_000,
            per_km: 500,
            per_year_of_age: 7_500_000,
            reference_year: 2025,
            per_liter: 8_000_000.0,
            floor_price: 30_000_000,
            brand_adjustments,
        }
    }
}

impl Validate for FormulaCoefficients {
    fn validate(&self) -> Result<()> {
        let checks: [(&str, bool, String); 4] = [
            ("formula.per_km", self.per_km >= 0, self.per_km.to_string()),
            (
                "formula.per_year_of_age",
                self.per_year_of_age >= 0,
                self.per_year_of_age.to_string(),
            ),
            (
                "formula.per_liter",
                self.per_liter.is_finite() && self.per_liter >= 0.0,
                self.per_liter.to_string(),
            ),
            (
                "formula.floor_price",
                self.floor_price >= 0,
                self.floor_price.to_string(),
            ),
        ];

        for (field, ok, value) in checks {
            if !ok {
                return Err(PredictorError::InvalidConfigValueError {
                    field: field.to_string(),
                    value,
                    reason: "Value must be a non-negative number".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Fixed-coefficient estimator. Total over the query domain.
#[derive(Debug, Clone, Default)]
pub struct FormulaEstimator {
    coefficients: FormulaCoefficients,
}

impl FormulaEstimator {
    pub fn new(coefficients: FormulaCoefficients) -> Self {
        Self { coefficients }
    }

    pub fn coefficients(&self) -> &FormulaCoefficients {
        &self.coefficients
    }

    pub fn brand_adjustment(&self, brand: &str) -> i64 {
        self.coefficients
            .brand_adjustments
            .get(brand)
            .copied()
            .unwrap_or(0)
    }

    pub fn estimate(&self, query: &Query) -> u64 {
        let c = &self.coefficients;
        let age = i64::from(c.reference_year) - i64::from(query.year);

        // coefficients come from user config; saturate instead of overflowing
        let integral = c
            .base_price
            .saturating_sub(i64::from(query.mileage).saturating_mul(c.per_km))
            .saturating_sub(age.saturating_mul(c.per_year_of_age))
            .saturating_add(self.brand_adjustment(&query.brand));
        // engine term is fractional; added last, then truncated
        let price = integral as f64 + query.engine_size * c.per_liter;
        let price = price.max(c.floor_price as f64);

        tracing::debug!(
            age,
            brand_adjustment = self.brand_adjustment(&query.brand),
            price,
            "formula estimate"
        );

        price.trunc() as u64
    }
}

#[async_trait]
impl Predictor for FormulaEstimator {
    async fn predict(&mut self, query: &Query) -> Result<u64> {
        Ok(self.estimate(query))
    }

    fn brand_catalog(&self) -> BrandCatalog {
        BrandCatalog::fixed()
    }

    fn label(&self) -> &'static str {
        "fixed formula"
    }

    fn note(&self) -> String {
        "(This is a simplified estimate for demonstration purposes. Real prices depend on many \
         other factors such as condition, features and market demand.)"
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(mileage: u32, year: i32, brand: &str, engine_size: f64) -> Query {
        Query::new(mileage, year, brand, engine_size).unwrap()
    }

    #[test]
    fn test_reference_example() {
        let estimator = FormulaEstimator::default();
        // 200M - 25M - 52.5M + 0 + 16M
        assert_eq!(estimator.estimate(&query(50_000, 2018, "Other", 2.0)), 138_500_000);
    }

    #[test]
    fn test_floor_applies_to_old_high_mileage_cars() {
        let estimator = FormulaEstimator::default();
        assert_eq!(
            estimator.estimate(&query(300_000, 1990, "Ford", 0.5)),
            30_000_000
        );
    }

    #[test]
    fn test_fractional_engine_size_truncates() {
        let estimator = FormulaEstimator::default();
        let price = estimator.estimate(&query(0, 2025, "Other", 0.7));
        assert!((205_599_999..=205_600_000).contains(&price));
    }

    #[test]
    fn test_unknown_brand_gets_no_adjustment() {
        let estimator = FormulaEstimator::default();
        assert_eq!(estimator.brand_adjustment("Lada"), 0);
        assert_eq!(estimator.brand_adjustment("Nissan"), 0);
        assert_eq!(estimator.brand_adjustment("BMW"), 50_000_000);
    }

    #[test]
    fn test_custom_coefficients() {
        let coefficients = FormulaCoefficients {
            reference_year: 2030,
            ..FormulaCoefficients::default()
        };
        let estimator = FormulaEstimator::new(coefficients);
        // five more years of age than the default reference
        assert_eq!(
            estimator.estimate(&query(50_000, 2018, "Other", 2.0)),
            138_500_000 - 5 * 7_500_000
        );
    }

    #[test]
    fn test_extreme_coefficients_saturate_to_floor() {
        let coefficients = FormulaCoefficients {
            per_km: i64::MAX,
            per_year_of_age: i64::MAX,
            ..FormulaCoefficients::default()
        };
        assert!(coefficients.validate().is_ok());
        let estimator = FormulaEstimator::new(coefficients);

        assert_eq!(
            estimator.estimate(&query(300_000, 1990, "BMW", 8.0)),
            30_000_000
        );
        // zero mileage and age leave the huge coefficients unused
        assert_eq!(
            estimator.estimate(&query(0, 2025, "Other", 2.0)),
            216_000_000
        );
    }

    #[test]
    fn test_huge_adjustments_do_not_overflow() {
        let mut coefficients = FormulaCoefficients {
            base_price: i64::MAX,
            ..FormulaCoefficients::default()
        };
        coefficients
            .brand_adjustments
            .insert("BMW".to_string(), i64::MAX);
        let estimator = FormulaEstimator::new(coefficients);

        assert!(estimator.estimate(&query(0, 2025, "BMW", 8.0)) >= i64::MAX as u64);
    }

    #[test]
    fn test_negative_coefficients_rejected() {
        let coefficients = FormulaCoefficients {
            per_km: -1,
            ..FormulaCoefficients::default()
        };
        assert!(coefficients.validate().is_err());
        assert!(FormulaCoefficients::default().validate().is_ok());
    }
}
