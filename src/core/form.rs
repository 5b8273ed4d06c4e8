use crate::domain::model::{
    BrandCatalog, Query, ENGINE_SIZE_DEFAULT, ENGINE_SIZE_MAX, ENGINE_SIZE_MIN, MILEAGE_DEFAULT,
    MILEAGE_MAX, MILEAGE_MIN, YEAR_DEFAULT, YEAR_MAX, YEAR_MIN,
};
use crate::utils::error::{PredictorError, Result};
use crate::utils::validation::validate_range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Updated,
    Submit,
    Show,
    Help,
    Quit,
}

pub const FORM_HELP: &str = "Commands:\n  \
    mileage=<km>        0 to 300000\n  \
    year=<year>         1990 to 2025\n  \
    engine=<liters>     0.5 to 8.0\n  \
    brand=<name>        one of the listed brands\n  \
    <empty line>|predict  estimate the price\n  \
    show                show current values\n  \
    quit                exit";

/// Current values of the input controls.
#[derive(Debug, Clone)]
pub struct QueryForm {
    mileage: u32,
    year: i32,
    engine_size: f64,
    brand: String,
    catalog: BrandCatalog,
}

fn invalid(field: &str, message: impl Into<String>) -> PredictorError {
    PredictorError::ValidationError {
        field: field.to_string(),
        message: message.into(),
    }
}

impl QueryForm {
    pub fn new(catalog: BrandCatalog) -> Self {
        Self {
            mileage: MILEAGE_DEFAULT,
            year: YEAR_DEFAULT,
            engine_size: ENGINE_SIZE_DEFAULT,
            brand: catalog.default_option().to_string(),
            catalog,
        }
    }

    /// Form pre-filled from a query; the brand must be one of the catalog options.
    pub fn from_query(catalog: BrandCatalog, query: &Query) -> Result<Self> {
        let mut form = Self::new(catalog);
        form.set("mileage", &query.mileage.to_string())?;
        form.set("year", &query.year.to_string())?;
        form.set("engine", &query.engine_size.to_string())?;
        form.set("brand", &query.brand)?;
        Ok(form)
    }

    pub fn catalog(&self) -> &BrandCatalog {
        &self.catalog
    }

    pub fn query(&self) -> Result<Query> {
        Query::new(self.mileage, self.year, self.brand.clone(), self.engine_size)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "mileage" | "km" => {
                let mileage: u32 = value
                    .parse()
                    .map_err(|_| invalid("mileage", format!("'{}' is not a whole number", value)))?;
                validate_range("mileage", mileage, MILEAGE_MIN, MILEAGE_MAX)?;
                self.mileage = mileage;
            }
            "year" => {
                let year: i32 = value
                    .parse()
                    .map_err(|_| invalid("year", format!("'{}' is not a year", value)))?;
                validate_range("year", year, YEAR_MIN, YEAR_MAX)?;
                self.year = year;
            }
            "engine" | "engine_size" => {
                let engine_size: f64 = value
                    .parse()
                    .map_err(|_| invalid("engine_size", format!("'{}' is not a number", value)))?;
                validate_range("engine_size", engine_size, ENGINE_SIZE_MIN, ENGINE_SIZE_MAX)?;
                self.engine_size = engine_size;
            }
            "brand" => {
                self.brand = self.catalog.resolve(value)?.to_string();
            }
            other => return Err(invalid("command", format!("unknown control '{}'", other))),
        }
        Ok(())
    }

    /// Applies one input line. Assignments on a line are all-or-nothing.
    pub fn apply(&mut self, line: &str) -> Result<FormAction> {
        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "" | "predict" => return Ok(FormAction::Submit),
            "show" => return Ok(FormAction::Show),
            "help" | "?" => return Ok(FormAction::Help),
            "quit" | "exit" | "q" => return Ok(FormAction::Quit),
            _ => {}
        }

        let mut staged = self.clone();
        for token in line.split_whitespace() {
            let (key, value) = token
                .split_once('=')
                .ok_or_else(|| invalid("command", format!("expected key=value, got '{}'", token)))?;
            staged.set(key, value)?;
        }
        *self = staged;
        Ok(FormAction::Updated)
    }

    pub fn render(&self) -> String {
        format!(
            "⏲  Mileage: {} km\n📅 Year: {}\n🚘 Brand: {} (options: {})\n⛽ Engine size: {:.1} L",
            self.mileage,
            self.year,
            self.brand,
            self.catalog.options().join(", "),
            self.engine_size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_controls() {
        let form = QueryForm::new(BrandCatalog::fixed());
        let query = form.query().unwrap();
        assert_eq!(query.mileage, 50_000);
        assert_eq!(query.year, 2018);
        assert_eq!(query.engine_size, 2.0);
        assert_eq!(query.brand, "Toyota");
    }

    #[test]
    fn test_assignments_update_controls() {
        let mut form = QueryForm::new(BrandCatalog::fixed());
        assert_eq!(
            form.apply("mileage=120000 year=2010 engine=1.6 brand=ford").unwrap(),
            FormAction::Updated
        );
        let query = form.query().unwrap();
        assert_eq!(query.mileage, 120_000);
        assert_eq!(query.year, 2010);
        assert_eq!(query.engine_size, 1.6);
        assert_eq!(query.brand, "Ford");
    }

    #[test]
    fn test_out_of_range_line_is_rejected_atomically() {
        let mut form = QueryForm::new(BrandCatalog::fixed());
        assert!(form.apply("mileage=60000 year=1980").is_err());
        assert_eq!(form.query().unwrap().mileage, 50_000);
        assert!(form.apply("brand=Lada").is_err());
        assert!(form.apply("engine=9").is_err());
        assert!(form.apply("colour=red").is_err());
        assert!(form.apply("mileage").is_err());
    }

    #[test]
    fn test_control_words() {
        let mut form = QueryForm::new(BrandCatalog::fixed());
        assert_eq!(form.apply("").unwrap(), FormAction::Submit);
        assert_eq!(form.apply("Predict").unwrap(), FormAction::Submit);
        assert_eq!(form.apply("show").unwrap(), FormAction::Show);
        assert_eq!(form.apply("help").unwrap(), FormAction::Help);
        assert_eq!(form.apply("quit").unwrap(), FormAction::Quit);
    }

    #[test]
    fn test_from_query_requires_known_brand() {
        let catalog = BrandCatalog::from_observed(["Honda", "Toyota"]);
        let known = Query::new(10_000, 2020, "honda", 1.5).unwrap();
        let form = QueryForm::from_query(catalog.clone(), &known).unwrap();
        assert_eq!(form.query().unwrap().brand, "Honda");

        let unknown = Query::new(10_000, 2020, "BMW", 1.5).unwrap();
        assert!(QueryForm::from_query(catalog, &unknown).is_err());
    }
}
