use crate::config::toml_config::ConvertConfig;
use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::validate_required_field;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "csv2json")]
#[command(about = "Convert CSV with dotted/bracketed headers into nested JSON")]
pub struct CliConfig {
    /// Local CSV file or http(s) URL
    pub source: Option<String>,

    /// Write the JSON here instead of printing it
    #[arg(short, long)]
    pub output: Option<String>,

    /// TOML configuration file; command line options take precedence
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long)]
    pub delimiter: Option<char>,

    /// Emit compact JSON
    #[arg(long)]
    pub compact: bool,

    /// Indentation used for pretty output
    #[arg(long)]
    pub indent: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long)]
    pub retry_attempts: Option<u32>,

    /// Extra request header for remote sources, as "Name: value"
    #[arg(long = "header", value_name = "NAME: VALUE")]
    pub headers: Vec<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Builds the effective configuration: the TOML file (when given) with
    /// command line options applied on top.
    pub fn to_convert_config(&self) -> Result<ConvertConfig> {
        let mut config = match &self.config {
            Some(path) => ConvertConfig::from_file(path)?,
            None => ConvertConfig::for_location(
                validate_required_field("source", &self.source)?.clone(),
            ),
        };

        if let Some(source) = &self.source {
            config.source.location = source.clone();
        }
        if let Some(output) = &self.output {
            config.output.path = Some(output.clone());
        }
        if let Some(delimiter) = self.delimiter {
            config.source.delimiter = delimiter;
        }
        if self.compact {
            config.output.pretty = false;
        }
        if let Some(indent) = &self.indent {
            config.output.indent = indent.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.source.timeout_seconds = Some(timeout);
        }
        if let Some(attempts) = self.retry_attempts {
            config.source.retry_attempts = Some(attempts);
        }
        for header in &self.headers {
            let (name, value) = parse_header_arg(header)?;
            config.source.headers.insert(name, value);
        }

        Ok(config)
    }
}

fn parse_header_arg(arg: &str) -> Result<(String, String)> {
    match arg.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(ConvertError::InvalidConfigValueError {
            field: "header".to_string(),
            value: arg.to_string(),
            reason: "Expected \"Name: value\"".to_string(),
        }),
    }
}
