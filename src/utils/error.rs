use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Invalid header '{header}': {reason}")]
    HeaderParse { header: String, reason: String },

    #[error("Row {row} has {found} fields but the header has {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Header '{header}' addresses '{key}' as {expected}, but it already holds {found}")]
    TypeConflict {
        header: String,
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Input contains no header row")]
    EmptyInput,

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("HTTP request to {url} returned status {status}")]
    HttpStatusError { url: String, status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unsupported source: {location}")]
    UnsupportedSource { location: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ConvertError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::HeaderParse { .. }
            | ConvertError::RowLength { .. }
            | ConvertError::TypeConflict { .. }
            | ConvertError::EmptyInput
            | ConvertError::CsvError(_) => ErrorCategory::Input,
            ConvertError::HttpError(_) | ConvertError::HttpStatusError { .. } => {
                ErrorCategory::Network
            }
            ConvertError::IoError(_) | ConvertError::SerializationError(_) => {
                ErrorCategory::Storage
            }
            ConvertError::UnsupportedSource { .. }
            | ConvertError::ConfigValidationError { .. }
            | ConvertError::InvalidConfigValueError { .. }
            | ConvertError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// Network failures may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ConvertError::HttpError(e) => e.is_timeout() || e.is_connect(),
            ConvertError::HttpStatusError { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ConvertError::HeaderParse { .. } => {
                "Array markers must look like key[N] with a non-negative integer N"
            }
            ConvertError::RowLength { .. } => {
                "Make sure every data row has exactly as many fields as the header row"
            }
            ConvertError::TypeConflict { .. } => {
                "Rename the conflicting headers so a key is used either as an object, an array or a value"
            }
            ConvertError::EmptyInput => "Provide at least a header row",
            ConvertError::CsvError(_) => "Check the delimiter and the CSV quoting",
            ConvertError::HttpError(_) | ConvertError::HttpStatusError { .. } => {
                "Check the URL and network connectivity, then retry"
            }
            ConvertError::IoError(_) => "Check that the path exists and is accessible",
            ConvertError::SerializationError(_) => "Report this as a bug",
            ConvertError::UnsupportedSource { .. } => {
                "Use a local file path or an http(s) URL"
            }
            ConvertError::ConfigValidationError { .. }
            | ConvertError::InvalidConfigValueError { .. }
            | ConvertError::MissingConfigError { .. } => {
                "Review the command line options or the configuration file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("The input data could not be converted: {}", self),
            ErrorCategory::Network => format!("The source could not be downloaded: {}", self),
            ErrorCategory::Storage => format!("Reading or writing a file failed: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
