pub use crate::app::pipelines::catalog_pipeline::{CatalogPipeline, DIAGNOSTICS_FILE};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::TomlConfig;
    use crate::core::etl::EtlEngine;
    use crate::domain::model::ContactRecord;
    use crate::domain::ports::{Pipeline, Storage};
    use crate::domain::services::ServiceCode;
    use crate::utils::error::{EtlError, Result};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put_file(&self, path: &str, data: &str) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.as_bytes().to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    const CONTACTS_CSV: &str = "\
Company,Phone,Email / contact,Location / office,Google rating info (proxy)
Acme Plumbing LLC,555-1234,info@acme.test,Gettysburg,4.8 (120 reviews)
Bravo Drains,,,,
Idle Pipes Inc,555-0000,,,
";

    const SERVICES_CSV: &str = "\
Gettysburg plumbers,,,
,,,
Company,Emergency Plumbing,Leak Detection,Hydro Jetting
Acme Plumbing,✓,,✓
Bravo Drains Co.,,Yes,
Idle Pipes,no,,
Unknown Rooter,✓,✓,
";

    fn csv_config(diagnostics: bool) -> TomlConfig {
        let content = format!(
            r#"
[inputs]
contacts_path = "contacts.csv"
services_path = "services.csv"

[output]
path = "data"
diagnostics = {}
"#,
            diagnostics
        );
        TomlConfig::from_toml_str(&content).unwrap()
    }

    async fn seeded_storage() -> MockStorage {
        let storage = MockStorage::new();
        storage.put_file("contacts.csv", CONTACTS_CSV).await;
        storage.put_file("services.csv", SERVICES_CSV).await;
        storage
    }

    #[tokio::test]
    async fn test_extract_reads_both_sheets() {
        let storage = seeded_storage().await;
        let pipeline = CatalogPipeline::new(storage, csv_config(false));

        let tables = pipeline.extract().await.unwrap();

        assert_eq!(tables.contacts.row_count(), 4);
        assert_eq!(tables.services.row_count(), 7);
    }

    #[tokio::test]
    async fn test_extract_missing_input_fails() {
        let storage = MockStorage::new();
        let pipeline = CatalogPipeline::new(storage, csv_config(false));

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, EtlError::IoError(_)));
    }

    #[tokio::test]
    async fn test_transform_builds_catalog() {
        let storage = seeded_storage().await;
        let pipeline = CatalogPipeline::new(storage, csv_config(false));

        let tables = pipeline.extract().await.unwrap();
        let result = pipeline.transform(tables).await.unwrap();

        let names: Vec<&str> = result.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Acme Plumbing LLC", "Bravo Drains"]);
        assert_eq!(result.records[0].services, vec![ServiceCode::EmergencyPlumbing]);
        assert_eq!(result.records[1].services, vec![ServiceCode::LeakDetection]);
        assert_eq!(result.diagnostics.unmatched_service_rows, vec!["Unknown Rooter"]);
        assert_eq!(result.diagnostics.contacts_without_services, vec!["Idle Pipes Inc"]);
    }

    #[tokio::test]
    async fn test_engine_writes_catalog_json() {
        let storage = seeded_storage().await;
        let pipeline = CatalogPipeline::new(storage.clone(), csv_config(false));

        let output_path = EtlEngine::new(pipeline).run().await.unwrap();

        assert_eq!(output_path, "data/plumbers.json");
        let written = storage.get_file("data/plumbers.json").await.unwrap();
        let records: Vec<ContactRecord> = serde_json::from_slice(&written).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "acme-plumbing-llc");
        assert_eq!(records[0].email.as_deref(), Some("info@acme.test"));
        assert_eq!(records[0].rating_note.as_deref(), Some("4.8 (120 reviews)"));
        assert_eq!(records[1].phone, None);

        assert!(storage.get_file("data/catalog_diagnostics.json").await.is_none());
    }

    #[tokio::test]
    async fn test_load_writes_diagnostics_when_enabled() {
        let storage = seeded_storage().await;
        let pipeline = CatalogPipeline::new(storage.clone(), csv_config(true));

        EtlEngine::new(pipeline).run().await.unwrap();

        let written = storage
            .get_file(&format!("data/{}", DIAGNOSTICS_FILE))
            .await
            .unwrap();
        let report: serde_json::Value = serde_json::from_slice(&written).unwrap();
        assert_eq!(report["recordCount"], 2);
        assert_eq!(report["catalogFile"], "data/plumbers.json");
        assert_eq!(report["headerRow"], 2);
        assert_eq!(report["matchedRows"], 3);
        assert_eq!(report["unrecognizedHeaders"][0]["label"], "Hydro Jetting");
        assert!(report["generatedAt"].is_string());
    }
}
