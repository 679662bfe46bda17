use crate::adapters::json::DEFAULT_INDENT;
use crate::adapters::source::Source;
use crate::core::ConfigProvider;
use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_RETRY_DELAY_SECONDS: u64 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub location: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    pub timeout_seconds: Option<u64>,
    pub retry_attempts: Option<u32>,
    pub retry_delay_seconds: Option<u64>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    #[serde(default = "default_indent")]
    pub indent: String,
}

fn default_delimiter() -> char {
    ','
}

fn default_pretty() -> bool {
    true
}

fn default_indent() -> String {
    DEFAULT_INDENT.to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            pretty: default_pretty(),
            indent: default_indent(),
        }
    }
}

impl ConvertConfig {
    /// A configuration with defaults for everything but the source.
    pub fn for_location(location: impl Into<String>) -> Self {
        Self {
            source: SourceConfig {
                location: location.into(),
                delimiter: default_delimiter(),
                timeout_seconds: None,
                retry_attempts: None,
                retry_delay_seconds: None,
                headers: HashMap::new(),
            },
            output: OutputConfig::default(),
        }
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ConvertError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ConvertError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_KEY})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static regex is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }
}

impl Validate for ConvertConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("source.location", &self.source.location)?;
        // Remote locations are URL-checked while being classified.
        Source::detect(&self.source.location)?;

        validation::validate_delimiter("source.delimiter", self.source.delimiter)?;

        if let Some(timeout) = self.source.timeout_seconds {
            validation::validate_positive_number("source.timeout_seconds", timeout, 1)?;
        }

        if let Some(path) = &self.output.path {
            validation::validate_path("output.path", path)?;
        }

        if self.output.pretty && !self.output.indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(ConvertError::InvalidConfigValueError {
                field: "output.indent".to_string(),
                value: self.output.indent.escape_default().to_string(),
                reason: "Indent may only contain spaces and tabs".to_string(),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for ConvertConfig {
    fn source_location(&self) -> &str {
        &self.source.location
    }

    fn output_path(&self) -> Option<&str> {
        self.output.path.as_deref()
    }

    fn delimiter(&self) -> char {
        self.source.delimiter
    }

    fn pretty(&self) -> bool {
        self.output.pretty
    }

    fn indent(&self) -> &str {
        &self.output.indent
    }

    fn timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn retry_attempts(&self) -> u32 {
        self.source.retry_attempts.unwrap_or(0)
    }

    fn retry_delay_seconds(&self) -> u64 {
        self.source
            .retry_delay_seconds
            .unwrap_or(DEFAULT_RETRY_DELAY_SECONDS)
    }

    fn request_headers(&self) -> &HashMap<String, String> {
        &self.source.headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = ConvertConfig::from_toml_str(
            r#"
[source]
location = "data/input.csv"
"#,
        )
        .unwrap();

        assert_eq!(config.source_location(), "data/input.csv");
        assert_eq!(config.delimiter(), ',');
        assert_eq!(config.output_path(), None);
        assert!(config.pretty());
        assert_eq!(config.indent(), "\t");
        assert_eq!(config.timeout_seconds(), DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(config.retry_attempts(), 0);
        assert!(config.request_headers().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_config() {
        let config = ConvertConfig::from_toml_str(
            r#"
[source]
location = "https://example.com/data.csv"
delimiter = ";"
timeout_seconds = 10
retry_attempts = 3
retry_delay_seconds = 2
headers = { Accept = "text/csv" }

[output]
path = "out/data.json"
pretty = false
indent = "  "
"#,
        )
        .unwrap();

        assert_eq!(config.delimiter(), ';');
        assert_eq!(config.timeout_seconds(), 10);
        assert_eq!(config.retry_attempts(), 3);
        assert_eq!(config.retry_delay_seconds(), 2);
        assert_eq!(config.request_headers().get("Accept").unwrap(), "text/csv");
        assert_eq!(config.output_path(), Some("out/data.json"));
        assert!(!config.pretty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CSV2JSON_TEST_TOKEN", "secret-42");
        let config = ConvertConfig::from_toml_str(
            r#"
[source]
location = "https://example.com/data.csv"
headers = { Authorization = "Bearer ${CSV2JSON_TEST_TOKEN}", Missing = "${CSV2JSON_TEST_UNSET_VAR}" }
"#,
        )
        .unwrap();

        assert_eq!(
            config.request_headers().get("Authorization").unwrap(),
            "Bearer secret-42"
        );
        assert_eq!(
            config.request_headers().get("Missing").unwrap(),
            "${CSV2JSON_TEST_UNSET_VAR}"
        );
    }

    #[test]
    fn test_invalid_toml() {
        let err = ConvertConfig::from_toml_str("[source\nlocation = 1").unwrap_err();
        assert!(matches!(err, ConvertError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_validation_failures() {
        let mut config = ConvertConfig::for_location("ftp://example.com/data.csv");
        assert!(config.validate().is_ok(), "non-http locations are local paths");

        config.source.location = "http://".to_string();
        assert!(config.validate().is_err());

        config.source.location = "data.csv".to_string();
        config.source.delimiter = '"';
        assert!(config.validate().is_err());

        config.source.delimiter = ',';
        config.source.timeout_seconds = Some(0);
        assert!(config.validate().is_err());

        config.source.timeout_seconds = None;
        config.output.indent = "xx".to_string();
        assert!(config.validate().is_err());
    }
}
