use crate::core::artifact::render_artifact;
use crate::core::normalize::Normalizer;
use crate::core::{ConfigProvider, InputRecord, Pipeline, Storage, TransformResult};
use crate::domain::model::InputDocument;
use crate::utils::error::Result;

/// Reads the disbursement file, normalizes every record and writes the
/// TypeScript artifact.
pub struct CdfPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    normalizer: Normalizer,
}

impl<S: Storage, C: ConfigProvider> CdfPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let normalizer = Normalizer::new(config.rules().clone())?;
        Ok(Self {
            storage,
            config,
            normalizer,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CdfPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<InputRecord>> {
        tracing::debug!("Reading input from: {}", self.config.input_path());
        let bytes = self.storage.read_file(self.config.input_path()).await?;
        tracing::debug!("Read {} bytes", bytes.len());

        let document: InputDocument = serde_json::from_slice(&bytes)?;
        Ok(document.data)
    }

    async fn transform(&self, data: Vec<InputRecord>) -> Result<TransformResult> {
        let records = self.normalizer.records(&data)?;
        let artifact = render_artifact(self.config.const_name(), &records)?;

        Ok(TransformResult { records, artifact })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = self.config.output_path();

        tracing::debug!(
            "Writing {} records ({} bytes) to {}",
            result.records.len(),
            result.artifact.len(),
            output_path
        );
        self.storage
            .write_file(output_path, result.artifact.as_bytes())
            .await?;

        Ok(output_path.to_string())
    }
}
