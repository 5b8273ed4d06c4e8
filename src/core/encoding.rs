use crate::domain::model::{Listing, Query};
use nalgebra::{DMatrix, DVector};

pub const NUMERIC_FEATURES: [&str; 3] = ["Mileage", "Year", "Engine_Size"];

/// One-hot encodes the brand and passes the numeric columns through.
///
/// Output layout is `[brand indicators..., mileage, year, engine_size]`.
/// A brand that was not seen while fitting encodes as an all-zero block.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureEncoder {
    categories: Vec<String>,
}

impl FeatureEncoder {
    pub fn fit<'a, I>(brands: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut categories: Vec<String> = brands.into_iter().map(str::to_string).collect();
        categories.sort();
        categories.dedup();
        Self { categories }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn width(&self) -> usize {
        self.categories.len() + NUMERIC_FEATURES.len()
    }

    pub fn feature_names(&self) -> Vec<String> {
        self.categories
            .iter()
            .map(|c| format!("Brand_{}", c))
            .chain(NUMERIC_FEATURES.iter().map(|n| n.to_string()))
            .collect()
    }

    fn encode(&self, brand: &str, numeric: [f64; 3]) -> DVector<f64> {
        let mut row = DVector::zeros(self.width());
        if let Ok(slot) = self.categories.binary_search_by(|c| c.as_str().cmp(brand)) {
            row[slot] = 1.0;
        }
        let offset = self.categories.len();
        for (i, value) in numeric.into_iter().enumerate() {
            row[offset + i] = value;
        }
        row
    }

    pub fn transform_query(&self, query: &Query) -> DVector<f64> {
        self.encode(
            &query.brand,
            [
                f64::from(query.mileage),
                f64::from(query.year),
                query.engine_size,
            ],
        )
    }

    pub fn transform_listings(&self, listings: &[Listing]) -> DMatrix<f64> {
        let mut matrix = DMatrix::zeros(listings.len(), self.width());
        for (i, listing) in listings.iter().enumerate() {
            let row = self.encode(
                &listing.brand,
                [listing.mileage, listing.year, listing.engine_size],
            );
            matrix.set_row(i, &row.transpose());
        }
        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_sorted_and_deduplicated() {
        let encoder = FeatureEncoder::fit(["Toyota", "Honda", "Toyota", "BMW"]);
        assert_eq!(encoder.categories(), &["BMW", "Honda", "Toyota"]);
        assert_eq!(encoder.width(), 6);
        assert_eq!(
            encoder.feature_names(),
            vec!["Brand_BMW", "Brand_Honda", "Brand_Toyota", "Mileage", "Year", "Engine_Size"]
        );
    }

    #[test]
    fn test_known_brand_sets_single_indicator() {
        let encoder = FeatureEncoder::fit(["Toyota", "Honda"]);
        let query = Query::new(10_000, 2020, "Toyota", 1.5).unwrap();
        let row = encoder.transform_query(&query);
        assert_eq!(row.as_slice(), &[0.0, 1.0, 10_000.0, 2020.0, 1.5]);
    }

    #[test]
    fn test_unknown_brand_encodes_as_zeros() {
        let encoder = FeatureEncoder::fit(["Toyota", "Honda"]);
        let query = Query::new(10_000, 2020, "Other", 1.5).unwrap();
        let row = encoder.transform_query(&query);
        assert_eq!(row.as_slice(), &[0.0, 0.0, 10_000.0, 2020.0, 1.5]);
    }
}
