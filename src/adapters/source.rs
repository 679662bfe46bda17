use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::validate_url;
use std::fmt;

/// Where the tabular input comes from, resolved once before conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    LocalPath(String),
    RemoteUrl(String),
    /// Raw rows, the first one being the header row.
    InMemory(Vec<Vec<String>>),
}

impl Source {
    /// Classifies a location string: `http://` and `https://` are remote,
    /// everything else is a local path, kept exactly as given.
    pub fn detect(location: &str) -> Result<Self> {
        let trimmed = location.trim();
        if trimmed.is_empty() {
            return Err(ConvertError::UnsupportedSource {
                location: location.to_string(),
            });
        }

        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            validate_url("source", trimmed)?;
            return Ok(Source::RemoteUrl(trimmed.to_string()));
        }
        Ok(Source::LocalPath(location.to_string()))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::LocalPath(path) => write!(f, "file {}", path),
            Source::RemoteUrl(url) => write!(f, "url {}", url),
            Source::InMemory(rows) => write!(f, "{} in-memory rows", rows.len()),
        }
    }
}
