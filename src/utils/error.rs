use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictorError {
    #[error("Data file '{location}' not found")]
    DataFileNotFound { location: String },

    #[error("Data file is missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("Not enough valid rows to fit the model: {valid} valid, at least {required} required")]
    InsufficientData { valid: usize, required: usize },

    #[error("Linear regression fit failed: {reason}")]
    FitError { reason: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration '{field}'")]
    MissingConfigError { field: String },

    #[error("Invalid {field}: {message}")]
    ValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Data,
    Model,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PredictorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PredictorError::DataFileNotFound { .. }
            | PredictorError::MissingColumns { .. }
            | PredictorError::InsufficientData { .. }
            | PredictorError::CsvError(_) => ErrorCategory::Data,
            PredictorError::FitError { .. } => ErrorCategory::Model,
            PredictorError::ConfigError { .. }
            | PredictorError::ConfigValidationError { .. }
            | PredictorError::InvalidConfigValueError { .. }
            | PredictorError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PredictorError::ValidationError { .. } => ErrorCategory::Input,
            PredictorError::IoError(_)
            | PredictorError::ApiError(_)
            | PredictorError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 單一輸入錯誤，表單可繼續使用
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Model => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Exit code used by the binaries when this error halts the process.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PredictorError::DataFileNotFound { location } => format!(
                "Error: file '{}' was not found. Place the CSV next to the application or pass --data.",
                location
            ),
            PredictorError::MissingColumns { .. } => format!(
                "Error: the CSV file must contain the columns: {}",
                crate::core::dataset::REQUIRED_COLUMNS.join(", ")
            ),
            PredictorError::InsufficientData { required, .. } => format!(
                "Error: not enough data in the CSV to train the model (at least {} valid rows).",
                required
            ),
            PredictorError::FitError { reason } => format!(
                "Error while training the linear regression model: {}. Please check your data.",
                reason
            ),
            PredictorError::CsvError(e) => format!(
                "Error while reading the CSV file: {}. Make sure the CSV format is correct.",
                e
            ),
            PredictorError::ValidationError { field, message } => {
                format!("Invalid {}: {}", field, message)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PredictorError::DataFileNotFound { .. } => {
                "Check the data path (default: daftar_mobil.csv) or set [data] location in the config file"
            }
            PredictorError::MissingColumns { .. } => {
                "Add a header row with Mileage, Year, Engine_Size, Brand and Price (Model is optional)"
            }
            PredictorError::InsufficientData { .. } => {
                "Add more rows with numeric Mileage, Year, Engine_Size and Price values"
            }
            PredictorError::FitError { .. } => {
                "Inspect the training data for extreme or constant values"
            }
            PredictorError::CsvError(_) => "Make sure every row has the same delimiter and quoting",
            PredictorError::ApiError(_) => "Check network connectivity and the data URL",
            PredictorError::IoError(_) => "Check file permissions and available disk space",
            PredictorError::SerializationError(_) => "Report this as a bug",
            PredictorError::ConfigError { .. }
            | PredictorError::ConfigValidationError { .. }
            | PredictorError::InvalidConfigValueError { .. }
            | PredictorError::MissingConfigError { .. } => {
                "Fix the configuration file or command-line flags and try again"
            }
            PredictorError::ValidationError { .. } => "Enter a value inside the allowed range",
        }
    }
}

pub type Result<T> = std::result::Result<T, PredictorError>;
