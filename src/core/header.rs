use crate::domain::model::{Cell, ServiceColumn, Table, UnrecognizedHeader};
use crate::domain::services::ServiceCode;

/// The services-sheet row carrying service labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceHeader {
    pub row: usize,
    pub columns: Vec<ServiceColumn>,
    pub unrecognized: Vec<UnrecognizedHeader>,
}

impl ServiceHeader {
    /// First row holding company data.
    pub fn data_start(&self) -> usize {
        self.row + 1
    }
}

fn recognized_columns(row: &[Cell]) -> Vec<ServiceColumn> {
    row.iter()
        .enumerate()
        .filter_map(|(column, cell)| {
            let label = cell.as_text()?.trim();
            ServiceCode::from_label(label).map(|code| ServiceColumn { column, code })
        })
        .collect()
}

/// Scan the first `scan_rows` rows and pick the one with the most known
/// service labels. Ties go to the earlier row; no labels anywhere gives `None`.
///
/// `company_column` is excluded from the unrecognized list since it holds the
/// company-name heading rather than a service.
pub fn detect_service_header(
    table: &Table,
    scan_rows: usize,
    company_column: usize,
) -> Option<ServiceHeader> {
    let mut best: Option<(usize, Vec<ServiceColumn>)> = None;

    for (row_idx, row) in table.rows().iter().take(scan_rows).enumerate() {
        let columns = recognized_columns(row);
        let best_score = best.as_ref().map(|(_, cols)| cols.len()).unwrap_or(0);
        if columns.len() > best_score {
            best = Some((row_idx, columns));
        }
    }

    let (row, columns) = best?;

    let unrecognized = table.rows()[row]
        .iter()
        .enumerate()
        .filter(|(column, _)| *column != company_column)
        .filter(|(column, _)| !columns.iter().any(|c| c.column == *column))
        .filter_map(|(column, cell)| {
            let label = cell.display_value()?.trim().to_string();
            (!label.is_empty()).then_some(UnrecognizedHeader { column, label })
        })
        .collect();

    Some(ServiceHeader {
        row,
        columns,
        unrecognized,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_header_below_title_rows() {
        let table = Table::from_text_rows(&[
            &["Gettysburg plumbers", "", ""],
            &["Services offered", "", ""],
            &["Company", "Emergency Plumbing", " Leak Detection "],
            &["Acme", "✓", ""],
        ]);

        let header = detect_service_header(&table, 10, 0).unwrap();
        assert_eq!(header.row, 2);
        assert_eq!(header.data_start(), 3);
        assert_eq!(
            header.columns,
            vec![
                ServiceColumn { column: 1, code: ServiceCode::EmergencyPlumbing },
                ServiceColumn { column: 2, code: ServiceCode::LeakDetection },
            ]
        );
        assert!(header.unrecognized.is_empty());
    }

    #[test]
    fn test_best_score_wins_and_ties_go_first() {
        let table = Table::from_text_rows(&[
            &["", "Leak Detection", ""],
            &["", "Emergency Plumbing", "Water Treatment"],
            &["", "Toilet - Repair", "Toilet-Installation"],
        ]);

        let header = detect_service_header(&table, 10, 0).unwrap();
        assert_eq!(header.row, 1);
    }

    #[test]
    fn test_unrecognized_headers_are_reported() {
        let table = Table::from_text_rows(&[&[
            "Company",
            "Emergency Plumbing",
            "Hydro Jetting",
            "",
            "Notes",
        ]]);

        let header = detect_service_header(&table, 10, 0).unwrap();
        assert_eq!(header.columns.len(), 1);
        assert_eq!(
            header.unrecognized,
            vec![
                UnrecognizedHeader { column: 2, label: "Hydro Jetting".to_string() },
                UnrecognizedHeader { column: 4, label: "Notes".to_string() },
            ]
        );
    }

    #[test]
    fn test_scan_window_is_bounded() {
        let table = Table::from_text_rows(&[
            &["title"],
            &["subtitle"],
            &["Company", "Emergency Plumbing"],
        ]);

        assert!(detect_service_header(&table, 2, 0).is_none());
        assert!(detect_service_header(&table, 3, 0).is_some());
        assert!(detect_service_header(&Table::default(), 10, 0).is_none());
    }
}
