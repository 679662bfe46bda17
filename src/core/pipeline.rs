use crate::adapters::http::HttpFetcher;
use crate::adapters::json::render_json;
use crate::adapters::source::Source;
use crate::adapters::tabular::read_table;
use crate::core::transform::transform;
use crate::core::{ConfigProvider, Pipeline, Record, Storage, Table};
use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::validate_delimiter;
use std::time::Duration;

/// Reads CSV from the configured source, converts it, and writes JSON when an
/// output path is configured.
pub struct CsvJsonPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    source: Source,
}

impl<S: Storage, C: ConfigProvider> CsvJsonPipeline<S, C> {
    /// Resolves the source from the configured location.
    pub fn new(storage: S, config: C) -> Result<Self> {
        let source = Source::detect(config.source_location())?;
        Ok(Self::with_source(storage, config, source))
    }

    /// Uses an explicit source, e.g. [`Source::InMemory`] rows.
    pub fn with_source(storage: S, config: C, source: Source) -> Self {
        Self {
            storage,
            config,
            source,
        }
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    fn fetcher(&self) -> Result<HttpFetcher> {
        Ok(
            HttpFetcher::new(Duration::from_secs(self.config.timeout_seconds()))?
                .with_headers(self.config.request_headers().clone())
                .with_retries(
                    self.config.retry_attempts(),
                    Duration::from_secs(self.config.retry_delay_seconds()),
                ),
        )
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CsvJsonPipeline<S, C> {
    async fn extract(&self) -> Result<Table> {
        let delimiter = validate_delimiter("delimiter", self.config.delimiter())?;

        match &self.source {
            Source::LocalPath(path) => {
                tracing::debug!("Reading CSV file: {}", path);
                let data = self.storage.read_file(path).await?;
                read_table(&data, delimiter)
            }
            Source::RemoteUrl(url) => {
                let data = self.fetcher()?.fetch(url).await?;
                tracing::debug!("Downloaded {} bytes from {}", data.len(), url);
                read_table(&data, delimiter)
            }
            Source::InMemory(rows) => {
                Table::from_rows(rows.clone()).ok_or(ConvertError::EmptyInput)
            }
        }
    }

    async fn transform(&self, table: Table) -> Result<Vec<Record>> {
        transform(&table)
    }

    async fn load(&self, records: &[Record]) -> Result<Option<String>> {
        let Some(output_path) = self.config.output_path() else {
            return Ok(None);
        };

        let json = render_json(records, self.config.pretty(), self.config.indent())?;
        tracing::debug!("Writing JSON ({} bytes) to {}", json.len(), output_path);
        self.storage.write_file(output_path, &json).await?;

        Ok(Some(output_path.to_string()))
    }
}
