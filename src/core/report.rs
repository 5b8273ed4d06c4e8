use crate::domain::model::Query;
use serde::Serialize;

/// `1234567` -> `"1,234,567"`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    pub price: u64,
    pub currency: String,
    pub formatted: String,
    pub estimator: String,
    pub query: Query,
    pub note: String,
}

impl PriceReport {
    pub fn new(
        price: u64,
        currency: &str,
        estimator: &str,
        query: Query,
        note: impl Into<String>,
    ) -> Self {
        Self {
            price,
            currency: currency.to_string(),
            formatted: format!("{} {}", currency, format_thousands(price)),
            estimator: estimator.to_string(),
            query,
            note: note.into(),
        }
    }

    pub fn render_text(&self) -> String {
        format!(
            "✅ Estimated car price ({}):\n## {}\nℹ️  {}",
            self.estimator, self.formatted, self.note
        )
    }
}
