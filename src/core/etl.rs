use crate::core::summary::RunSummary;
use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Extract, transform and load. Nothing is written unless every record
    /// normalizes cleanly.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting CDF normalization");

        tracing::debug!("Extracting records...");
        let raw_data = self.pipeline.extract().await?;
        tracing::info!("Extracted {} records", raw_data.len());

        tracing::debug!("Normalizing records...");
        let result = self.pipeline.transform(raw_data).await?;
        tracing::info!("Normalized {} records", result.records.len());
        RunSummary::from_records(&result.records).log();

        tracing::debug!("Writing artifact...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }

    /// Extract and transform only; returns the summary that a full run would log.
    pub async fn dry_run(&self) -> Result<RunSummary> {
        tracing::info!("Dry run: nothing will be written");

        let raw_data = self.pipeline.extract().await?;
        tracing::info!("Extracted {} records", raw_data.len());

        let result = self.pipeline.transform(raw_data).await?;
        let summary = RunSummary::from_records(&result.records);
        summary.log();

        Ok(summary)
    }
}
