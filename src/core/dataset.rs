use crate::domain::model::Listing;
use crate::utils::error::{PredictorError, Result};

pub const REQUIRED_COLUMNS: [&str; 5] = ["Mileage", "Year", "Engine_Size", "Brand", "Price"];

/// Valid listings plus how many rows were discarded while cleaning.
#[derive(Debug, Clone, Default)]
pub struct ListingTable {
    pub listings: Vec<Listing>,
    pub dropped: usize,
}

impl ListingTable {
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn brands(&self) -> impl Iterator<Item = &str> {
        self.listings.iter().map(|l| l.brand.as_str())
    }
}

struct ColumnIndex {
    mileage: usize,
    year: usize,
    engine_size: usize,
    brand: usize,
    price: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| position(**name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(PredictorError::MissingColumns { missing });
        }

        let index = |name: &str| position(name).unwrap_or_default();
        Ok(Self {
            mileage: index("Mileage"),
            year: index("Year"),
            engine_size: index("Engine_Size"),
            brand: index("Brand"),
            price: index("Price"),
        })
    }
}

fn numeric(record: &csv::StringRecord, index: usize) -> Option<f64> {
    record
        .get(index)
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .and_then(|cell| cell.parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

fn parse_row(record: &csv::StringRecord, columns: &ColumnIndex) -> Option<Listing> {
    // 空白品牌無法被查詢選取，與空值一樣丟棄
    let brand = record.get(columns.brand).filter(|b| !b.trim().is_empty())?;
    Some(Listing {
        mileage: numeric(record, columns.mileage)?,
        year: numeric(record, columns.year)?,
        engine_size: numeric(record, columns.engine_size)?,
        brand: brand.to_string(),
        price: numeric(record, columns.price)?,
    })
}

/// Parses listing CSV, coercing numeric columns and dropping rows that fail.
pub fn parse_listings(data: &[u8]) -> Result<ListingTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let columns = ColumnIndex::from_headers(reader.headers()?)?;

    let mut table = ListingTable::default();
    for record in reader.records() {
        let record = record?;
        match parse_row(&record, &columns) {
            Some(listing) => table.listings.push(listing),
            None => {
                tracing::trace!(line = ?record.position().map(|p| p.line()), "dropping invalid row");
                table.dropped += 1;
            }
        }
    }

    tracing::debug!(
        valid = table.len(),
        dropped = table.dropped,
        "parsed listing table"
    );
    Ok(table)
}
