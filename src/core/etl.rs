use crate::core::Pipeline;
use crate::domain::model::ConvertOutcome;
use crate::utils::error::Result;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs extract, transform and load. Records are always returned; the
    /// output path is set only when the pipeline wrote them somewhere.
    pub async fn run(&self) -> Result<ConvertOutcome> {
        let started = Instant::now();
        tracing::info!("Starting conversion");

        let table = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} columns and {} rows",
            table.headers.len(),
            table.len()
        );

        let records = self.pipeline.transform(table).await?;
        tracing::info!("Built {} records", records.len());

        let output_path = self.pipeline.load(&records).await?;
        if let Some(path) = &output_path {
            tracing::info!("Output saved to: {}", path);
        }

        tracing::debug!("Conversion finished in {:?}", started.elapsed());
        Ok(ConvertOutcome {
            records,
            output_path,
        })
    }
}
