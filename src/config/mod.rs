pub mod cli;
pub mod toml_config;

use crate::core::{ConfigProvider, SourceConfig};
#[cfg(feature = "cli")]
use crate::domain::model::ContactColumns;
use crate::utils::error::Result;
use crate::utils::validation;
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::{Args, Parser};
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONTACTS_PATH: &str = "0-GburgPlumbers.xlsx";
pub const DEFAULT_SERVICES_PATH: &str = "0-G-burg Plumbers Services.xlsx";
pub const DEFAULT_OUTPUT_PATH: &str = "data";
pub const DEFAULT_OUTPUT_FILE: &str = "plumbers.json";
pub const DEFAULT_HEADER_SCAN_ROWS: usize = 10;
pub const MAX_HEADER_SCAN_ROWS: usize = 100;

/// Input sheet flags shared by the catalog and match-report binaries.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct InputArgs {
    #[arg(long, default_value = DEFAULT_CONTACTS_PATH)]
    pub contacts_path: String,

    /// Sheet to read from the contacts workbook (first sheet when omitted)
    #[arg(long)]
    pub contacts_sheet: Option<String>,

    #[arg(long, default_value = DEFAULT_SERVICES_PATH)]
    pub services_path: String,

    /// Sheet to read from the services workbook (first sheet when omitted)
    #[arg(long)]
    pub services_sheet: Option<String>,

    /// Column holding company names in the services sheet (0-based)
    #[arg(long, default_value_t = 0)]
    pub services_company_column: usize,

    /// How many leading rows to search for the service header
    #[arg(long, default_value_t = DEFAULT_HEADER_SCAN_ROWS)]
    pub header_scan_rows: usize,

    #[arg(skip)]
    #[serde(default)]
    pub contact_columns: ContactColumns,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "plumber-catalog")]
#[command(about = "Build the plumber catalog from the contacts and services sheets")]
pub struct CliConfig {
    #[command(flatten)]
    #[serde(flatten)]
    pub inputs: InputArgs,

    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    /// Also write catalog_diagnostics.json next to the catalog
    #[arg(long)]
    pub diagnostics: bool,

    /// Load settings from a TOML file instead of flags
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl SourceConfig for InputArgs {
    fn contacts_path(&self) -> &str {
        &self.contacts_path
    }

    fn contacts_sheet(&self) -> Option<&str> {
        self.contacts_sheet.as_deref()
    }

    fn services_path(&self) -> &str {
        &self.services_path
    }

    fn services_sheet(&self) -> Option<&str> {
        self.services_sheet.as_deref()
    }

    fn contact_columns(&self) -> &ContactColumns {
        &self.contact_columns
    }

    fn services_company_column(&self) -> usize {
        self.services_company_column
    }

    fn header_scan_rows(&self) -> usize {
        self.header_scan_rows
    }
}

#[cfg(feature = "cli")]
impl SourceConfig for CliConfig {
    fn contacts_path(&self) -> &str {
        self.inputs.contacts_path()
    }

    fn contacts_sheet(&self) -> Option<&str> {
        self.inputs.contacts_sheet()
    }

    fn services_path(&self) -> &str {
        self.inputs.services_path()
    }

    fn services_sheet(&self) -> Option<&str> {
        self.inputs.services_sheet()
    }

    fn contact_columns(&self) -> &ContactColumns {
        self.inputs.contact_columns()
    }

    fn services_company_column(&self) -> usize {
        self.inputs.services_company_column()
    }

    fn header_scan_rows(&self) -> usize {
        self.inputs.header_scan_rows()
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn write_diagnostics(&self) -> bool {
        self.diagnostics
    }
}

/// Checks on the input side of any configuration.
pub fn validate_sources<C: SourceConfig>(config: &C) -> Result<()> {
    validation::validate_spreadsheet_path("contacts_path", config.contacts_path())?;
    validation::validate_spreadsheet_path("services_path", config.services_path())?;
    validation::validate_range(
        "header_scan_rows",
        config.header_scan_rows(),
        1,
        MAX_HEADER_SCAN_ROWS,
    )?;
    validation::validate_non_empty_string(
        "contacts.columns.company",
        &config.contact_columns().company,
    )?;
    Ok(())
}

/// Checks shared by every `ConfigProvider`.
pub fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    validate_sources(config)?;
    validation::validate_path("output_path", config.output_path())?;
    validation::validate_non_empty_string("output_file", config.output_file())?;
    Ok(())
}

#[cfg(feature = "cli")]
impl Validate for InputArgs {
    fn validate(&self) -> Result<()> {
        validate_sources(self)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
