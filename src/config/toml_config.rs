use crate::config::{
    validate_provider, DEFAULT_CONTACTS_PATH, DEFAULT_HEADER_SCAN_ROWS, DEFAULT_OUTPUT_FILE,
    DEFAULT_OUTPUT_PATH, DEFAULT_SERVICES_PATH,
};
use crate::core::{ConfigProvider, SourceConfig};
use crate::domain::model::ContactColumns;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub inputs: InputsConfig,
    pub contacts: ContactsConfig,
    pub services: ServicesConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputsConfig {
    pub contacts_path: String,
    pub contacts_sheet: Option<String>,
    pub services_path: String,
    pub services_sheet: Option<String>,
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            contacts_path: DEFAULT_CONTACTS_PATH.to_string(),
            contacts_sheet: None,
            services_path: DEFAULT_SERVICES_PATH.to_string(),
            services_sheet: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactsConfig {
    pub columns: ContactColumns,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    pub company_column: usize,
    pub header_scan_rows: usize,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            company_column: 0,
            header_scan_rows: DEFAULT_HEADER_SCAN_ROWS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
    pub filename: String,
    pub diagnostics: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT_PATH.to_string(),
            filename: DEFAULT_OUTPUT_FILE.to_string(),
            diagnostics: false,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PLUMBER_DATA_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl SourceConfig for TomlConfig {
    fn contacts_path(&self) -> &str {
        &self.inputs.contacts_path
    }

    fn contacts_sheet(&self) -> Option<&str> {
        self.inputs.contacts_sheet.as_deref()
    }

    fn services_path(&self) -> &str {
        &self.inputs.services_path
    }

    fn services_sheet(&self) -> Option<&str> {
        self.inputs.services_sheet.as_deref()
    }

    fn contact_columns(&self) -> &ContactColumns {
        &self.contacts.columns
    }

    fn services_company_column(&self) -> usize {
        self.services.company_column
    }

    fn header_scan_rows(&self) -> usize {
        self.services.header_scan_rows
    }
}

impl ConfigProvider for TomlConfig {
    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_file(&self) -> &str {
        &self.output.filename
    }

    fn write_diagnostics(&self) -> bool {
        self.output.diagnostics
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
