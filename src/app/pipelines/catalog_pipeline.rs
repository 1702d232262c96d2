use crate::adapters::spreadsheet::load_tables;
use crate::core::catalog::CatalogBuilder;
use crate::core::{ConfigProvider, Pipeline, SourceTables, Storage, TransformResult};
use crate::domain::model::CatalogDiagnostics;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

pub const DIAGNOSTICS_FILE: &str = "catalog_diagnostics.json";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DiagnosticsReport<'a> {
    generated_at: DateTime<Utc>,
    catalog_file: &'a str,
    record_count: usize,
    #[serde(flatten)]
    diagnostics: &'a CatalogDiagnostics,
}

/// Builds the plumber catalog from the two sheets and writes it as JSON.
pub struct CatalogPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> CatalogPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn output_file_path(&self, file_name: &str) -> String {
        Path::new(self.config.output_path())
            .join(file_name)
            .to_string_lossy()
            .into_owned()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CatalogPipeline<S, C> {
    async fn extract(&self) -> Result<SourceTables> {
        load_tables(&self.storage, &self.config).await
    }

    async fn transform(&self, data: SourceTables) -> Result<TransformResult> {
        CatalogBuilder::from_config(&self.config).build(&data)
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = self.output_file_path(self.config.output_file());

        let json_data = serde_json::to_string_pretty(&result.records)?;
        tracing::debug!("Writing {} bytes to {}", json_data.len(), output_path);
        self.storage
            .write_file(&output_path, json_data.as_bytes())
            .await?;

        if self.config.write_diagnostics() {
            let diagnostics_path = self.output_file_path(DIAGNOSTICS_FILE);
            let report = DiagnosticsReport {
                generated_at: Utc::now(),
                catalog_file: &output_path,
                record_count: result.records.len(),
                diagnostics: &result.diagnostics,
            };
            let report_json = serde_json::to_string_pretty(&report)?;
            self.storage
                .write_file(&diagnostics_path, report_json.as_bytes())
                .await?;
            tracing::info!("Diagnostics saved to: {}", diagnostics_path);
        }

        let diagnostics = &result.diagnostics;
        if !diagnostics.unmatched_service_rows.is_empty() {
            tracing::warn!(
                "{} services rows had no contact match",
                diagnostics.unmatched_service_rows.len()
            );
        }
        if !diagnostics.contacts_without_services.is_empty() {
            tracing::info!(
                "{} contacts left out for offering no recognized service",
                diagnostics.contacts_without_services.len()
            );
        }

        tracing::info!(
            "Generated {} with {} plumbers",
            output_path,
            result.records.len()
        );
        Ok(output_path)
    }
}
