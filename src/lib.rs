pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use core::{
    catalog::CatalogBuilder, etl::EtlEngine, matching::MatchReport, pipeline::CatalogPipeline,
};
pub use domain::model::{Cell, ContactRecord, SourceTables, Table};
pub use domain::services::ServiceCode;
pub use utils::error::{EtlError, Result};
