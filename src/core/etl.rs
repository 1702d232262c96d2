use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting catalog build...");

        // Extract
        let tables = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} contact rows and {} services rows",
            tables.contacts.row_count(),
            tables.services.row_count()
        );

        // Transform
        let result = self.pipeline.transform(tables).await?;
        tracing::info!("Built {} catalog records", result.records.len());

        // Load
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
