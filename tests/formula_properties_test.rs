use car_price_predictor::domain::model::FIXED_BRANDS;
use car_price_predictor::{FormulaEstimator, Query};

fn query(mileage: u32, year: i32, brand: &str, engine_size: f64) -> Query {
    Query::new(mileage, year, brand, engine_size).unwrap()
}

fn engine_sizes() -> impl Iterator<Item = f64> {
    // 0.5 ..= 8.0 in 0.1 steps, built from integers to avoid drift
    (5..=80).map(|tenths| f64::from(tenths) / 10.0)
}

#[test]
fn test_never_below_floor() {
    let estimator = FormulaEstimator::default();
    for brand in FIXED_BRANDS {
        for mileage in (0..=300_000).step_by(25_000) {
            for year in (1990..=2025).step_by(5) {
                for engine in [0.5, 1.0, 2.0, 4.4, 8.0] {
                    let price = estimator.estimate(&query(mileage, year, brand, engine));
                    assert!(
                        price >= 30_000_000,
                        "{} {} {} {} -> {}",
                        mileage,
                        year,
                        brand,
                        engine,
                        price
                    );
                }
            }
        }
    }
}

#[test]
fn test_monotonic_in_mileage() {
    let estimator = FormulaEstimator::default();
    for brand in ["BMW", "Ford", "Other"] {
        let mut previous = u64::MAX;
        for mileage in (0..=300_000).step_by(1_000) {
            let price = estimator.estimate(&query(mileage, 2015, brand, 1.8));
            assert!(price <= previous);
            previous = price;
        }
    }
}

#[test]
fn test_older_cars_never_cost_more() {
    let estimator = FormulaEstimator::default();
    let mut previous = u64::MAX;
    for year in (1990..=2025).rev() {
        let price = estimator.estimate(&query(40_000, year, "Honda", 1.5));
        assert!(price <= previous);
        previous = price;
    }
}

#[test]
fn test_bigger_engines_never_cost_less() {
    let estimator = FormulaEstimator::default();
    let mut previous = 0;
    for engine in engine_sizes() {
        let price = estimator.estimate(&query(100_000, 2005, "Toyota", engine));
        assert!(price >= previous);
        previous = price;
    }
}

#[test]
fn test_brand_tiers() {
    let estimator = FormulaEstimator::default();
    let price = |brand: &str| estimator.estimate(&query(30_000, 2020, brand, 2.0)) as i64;

    assert_eq!(price("BMW"), price("Mercedes-Benz"));
    assert_eq!(price("BMW"), price("Toyota") + 30_000_000);
    assert_eq!(price("Toyota"), price("Honda"));
    assert_eq!(price("BMW"), price("Ford") + 60_000_000);
    assert_eq!(price("BMW"), price("Other") + 50_000_000);
    for untiered in ["Nissan", "Mitsubishi", "Suzuki", "Hyundai"] {
        assert_eq!(price(untiered), price("Other"));
    }
}

#[test]
fn test_documented_example() {
    let estimator = FormulaEstimator::default();
    assert_eq!(
        estimator.estimate(&query(50_000, 2018, "Other", 2.0)),
        138_500_000
    );
}
