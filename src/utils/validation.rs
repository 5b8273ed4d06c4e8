use crate::utils::error::{PredictorError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(PredictorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(PredictorError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(PredictorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(PredictorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PredictorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// A data location is either an `http(s)://` URL or a filesystem path.
pub fn is_remote_location(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

pub fn validate_location(field_name: &str, location: &str) -> Result<()> {
    if is_remote_location(location) {
        validate_url(field_name, location)
    } else {
        validate_path(field_name, location)
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PredictorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Range check for user input; failures are [`PredictorError::ValidationError`].
pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN fails both comparisons, so reject it explicitly
    if !(value >= min && value <= max) {
        return Err(PredictorError::ValidationError {
            field: field_name.to_string(),
            message: format!("{} is outside the range {} to {}", value, min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("data.location", "https://example.com/cars.csv").is_ok());
        assert!(validate_url("data.location", "http://example.com/cars.csv").is_ok());
        assert!(validate_url("data.location", "").is_err());
        assert!(validate_url("data.location", "invalid-url").is_err());
        assert!(validate_url("data.location", "ftp://example.com/cars.csv").is_err());
    }

    #[test]
    fn test_validate_location() {
        assert!(validate_location("data.location", "daftar_mobil.csv").is_ok());
        assert!(validate_location("data.location", "https://example.com/x.csv").is_ok());
        assert!(validate_location("data.location", "  ").is_err());
        assert!(validate_location("data.location", "https://").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("year", 2018, 1990, 2025).is_ok());
        assert!(validate_range("year", 1989, 1990, 2025).is_err());
        assert!(validate_range("engine_size", 8.0, 0.5, 8.0).is_ok());
        assert!(validate_range("engine_size", f64::NAN, 0.5, 8.0).is_err());
    }
}
