use crate::domain::model::{ContactColumns, SourceTables, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Where the two input sheets live and how to read them.
pub trait SourceConfig: Send + Sync {
    fn contacts_path(&self) -> &str;
    fn contacts_sheet(&self) -> Option<&str>;
    fn services_path(&self) -> &str;
    fn services_sheet(&self) -> Option<&str>;
    fn contact_columns(&self) -> &ContactColumns;
    fn services_company_column(&self) -> usize;
    fn header_scan_rows(&self) -> usize;
}

pub trait ConfigProvider: SourceConfig {
    fn output_path(&self) -> &str;
    fn output_file(&self) -> &str;
    fn write_diagnostics(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<SourceTables>;
    async fn transform(&self, data: SourceTables) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
