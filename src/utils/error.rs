use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Spreadsheet error: {0}")]
    SpreadsheetError(#[from] calamine::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Sheet '{sheet}' not found in {source_name}")]
    SheetNotFoundError { source_name: String, sheet: String },

    #[error("Column '{column}' not found in {table} table")]
    MissingColumnError { table: String, column: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::SpreadsheetError(_)
            | EtlError::CsvError(_)
            | EtlError::SheetNotFoundError { .. } => ErrorCategory::Input,
            EtlError::ConfigValidationError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            EtlError::MissingColumnError { .. } => ErrorCategory::Data,
            EtlError::IoError(_) | EtlError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::SpreadsheetError(_) => {
                "Check that the file is a readable xlsx/xls/ods workbook".to_string()
            }
            EtlError::CsvError(_) => "Check the CSV file for malformed quoting".to_string(),
            EtlError::IoError(_) => {
                "Check that the input files exist and the output directory is writable"
                    .to_string()
            }
            EtlError::SerializationError(_) => {
                "The catalog JSON could not be read or written; regenerate it".to_string()
            }
            EtlError::SheetNotFoundError { .. } => {
                "Pass an existing sheet name or omit it to use the first sheet".to_string()
            }
            EtlError::MissingColumnError { column, .. } => {
                format!("Add a '{}' header to the contacts header row or configure the column name", column)
            }
            EtlError::ConfigValidationError { .. } | EtlError::InvalidConfigValueError { .. } => {
                "Review the command-line flags or the TOML configuration file".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Could not read an input sheet: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Data => format!("Input data problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    /// Process exit code for a failed run.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
