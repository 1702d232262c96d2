use crate::domain::services::ServiceCode;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A single spreadsheet value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

static EMPTY_CELL: Cell = Cell::Empty;

impl Cell {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Render the cell the way it reads in the sheet; `None` for empty cells.
    pub fn display_value(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    Some(format!("{}", *n as i64))
                } else {
                    Some(format!("{}", n))
                }
            }
            Cell::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

/// One sheet's worth of cells, addressed by absolute row/column position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Build a table of text cells; empty strings become `Cell::Empty`.
    pub fn from_text_rows(rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|value| {
                        if value.is_empty() {
                            Cell::Empty
                        } else {
                            Cell::from(*value)
                        }
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .unwrap_or(&EMPTY_CELL)
    }

    /// First row holding any value. Leading blank rows are skipped, so a sheet
    /// whose data starts below A1 still has its column names found.
    pub fn header_row(&self) -> Option<usize> {
        self.rows
            .iter()
            .position(|cells| cells.iter().any(|cell| !cell.is_empty()))
    }

    /// Rows below the header row; empty when the table has no header.
    pub fn data_rows(&self) -> Range<usize> {
        let start = self.header_row().map_or(self.rows.len(), |row| row + 1);
        start..self.rows.len()
    }

    /// Column whose header cell reads exactly `name` (ignoring surrounding whitespace).
    pub fn header_index(&self, name: &str) -> Option<usize> {
        let header = &self.rows[self.header_row()?];
        header
            .iter()
            .position(|cell| cell.as_text().map(str::trim) == Some(name.trim()))
    }
}

/// The two loaded inputs.
#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    pub contacts: Table,
    pub services: Table,
}

/// Header names of the contacts sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactColumns {
    pub company: String,
    pub phone: String,
    pub email: String,
    pub location: String,
    pub rating_note: String,
}

impl Default for ContactColumns {
    fn default() -> Self {
        Self {
            company: "Company".to_string(),
            phone: "Phone".to_string(),
            email: "Email / contact".to_string(),
            location: "Location / office".to_string(),
            rating_note: "Google rating info (proxy)".to_string(),
        }
    }
}

/// A company in the generated catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub rating_note: Option<String>,
    pub services: Vec<ServiceCode>,
}

impl ContactRecord {
    pub fn offers(&self, code: ServiceCode) -> bool {
        self.services.contains(&code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceColumn {
    pub column: usize,
    pub code: ServiceCode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnrecognizedHeader {
    pub column: usize,
    pub label: String,
}

/// What the catalog build kept, and what it left behind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDiagnostics {
    pub header_row: Option<usize>,
    pub service_columns: Vec<ServiceColumn>,
    pub unrecognized_headers: Vec<UnrecognizedHeader>,
    pub matched_rows: usize,
    pub service_assignments: usize,
    pub unmatched_service_rows: Vec<String>,
    pub overwritten_contacts: Vec<String>,
    pub contacts_without_services: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<ContactRecord>,
    pub diagnostics: CatalogDiagnostics,
}
