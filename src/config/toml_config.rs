use crate::core::formula::FormulaCoefficients;
use crate::utils::error::{PredictorError, Result};
use crate::utils::validation::{validate_location, validate_non_empty_string, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DATA_LOCATION: &str = "daftar_mobil.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    pub data: DataConfig,
    pub model: ModelConfig,
    pub formula: FormulaCoefficients,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// CSV path, or an http(s) URL.
    pub location: String,
    pub timeout_seconds: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            location: DEFAULT_DATA_LOCATION.to_string(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub refit_per_query: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub currency: String,
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            currency: "Rp".to_string(),
            format: OutputFormat::Text,
        }
    }
}

impl PredictorConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PredictorError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Loads the file when given, defaults otherwise.
    pub fn load_optional<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PredictorError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_URL})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PredictorError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_location("data.location", &self.data.location)?;
        if self.data.timeout_seconds == 0 {
            return Err(PredictorError::InvalidConfigValueError {
                field: "data.timeout_seconds".to_string(),
                value: "0".to_string(),
                reason: "Value must be at least 1".to_string(),
            });
        }
        validate_non_empty_string("output.currency", &self.output.currency)?;
        self.formula.validate()
    }
}

impl Validate for PredictorConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
