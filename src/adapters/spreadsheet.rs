use crate::domain::model::{Cell, SourceTables, Table};
use crate::domain::ports::{SourceConfig, Storage};
use crate::utils::error::{EtlError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets};
use std::io::Cursor;
use std::path::Path;

fn is_csv(source_name: &str) -> bool {
    Path::new(source_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Parse raw file contents into a table. CSV files are read by extension;
/// everything else goes through calamine's format sniffing.
pub fn parse_table(source_name: &str, bytes: Vec<u8>, sheet: Option<&str>) -> Result<Table> {
    if is_csv(source_name) {
        parse_csv(&bytes)
    } else {
        parse_workbook(source_name, bytes, sheet)
    }
}

fn parse_csv(bytes: &[u8]) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = record
            .iter()
            .map(|field| {
                if field.trim().is_empty() {
                    Cell::Empty
                } else {
                    Cell::from(field)
                }
            })
            .collect();
        rows.push(row);
    }

    Ok(Table::new(rows))
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => {
            if s.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.clone())
            }
        }
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

fn parse_workbook(source_name: &str, bytes: Vec<u8>, sheet: Option<&str>) -> Result<Table> {
    let mut workbook: Sheets<_> = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let sheet_name = match sheet {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|known| known == name) {
                return Err(EtlError::SheetNotFoundError {
                    source_name: source_name.to_string(),
                    sheet: name.to_string(),
                });
            }
            name.to_string()
        }
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| EtlError::SheetNotFoundError {
                source_name: source_name.to_string(),
                sheet: "<first sheet>".to_string(),
            })?,
    };

    let range = workbook.worksheet_range(&sheet_name)?;
    tracing::debug!(
        "Read sheet '{}' from {} ({:?} cells)",
        sheet_name,
        source_name,
        range.get_size()
    );

    // Range start offset (data may not begin at A1)
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; start_col as usize];
        cells.extend(row.iter().map(convert_cell));
        rows.push(cells);
    }

    Ok(Table::new(rows))
}

/// Read both input sheets through `storage`.
pub async fn load_tables<S: Storage, C: SourceConfig>(
    storage: &S,
    config: &C,
) -> Result<SourceTables> {
    tracing::info!("Loading contacts from: {}", config.contacts_path());
    let contacts_bytes = storage.read_file(config.contacts_path()).await?;
    let contacts = parse_table(config.contacts_path(), contacts_bytes, config.contacts_sheet())?;

    tracing::info!("Loading services from: {}", config.services_path());
    let services_bytes = storage.read_file(config.services_path()).await?;
    let services = parse_table(config.services_path(), services_bytes, config.services_sheet())?;

    Ok(SourceTables { contacts, services })
}
