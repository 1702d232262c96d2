use crate::core::header::detect_service_header;
use crate::core::normalize::normalize_cell;
use crate::domain::model::{Cell, ContactColumns, SourceTables};
use crate::utils::error::{EtlError, Result};
use std::collections::HashMap;
use std::fmt;

/// Unique names of one sheet keyed by normalized company name.
///
/// Keys keep the order they were first seen in; a later name with the same
/// key replaces the displayed name.
#[derive(Debug, Default)]
struct NameIndex {
    entries: Vec<(String, String)>,
    positions: HashMap<String, usize>,
}

impl NameIndex {
    fn from_cells<'c>(cells: impl IntoIterator<Item = &'c Cell>) -> Self {
        let mut index = NameIndex::default();
        for cell in cells {
            let Some(name) = cell.as_text() else {
                continue;
            };
            let key = normalize_cell(cell);
            match index.positions.get(&key) {
                Some(&position) => index.entries[position].1 = name.to_string(),
                None => {
                    index.positions.insert(key.clone(), index.entries.len());
                    index.entries.push((key, name.to_string()));
                }
            }
        }
        index
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.positions
            .get(key)
            .map(|&position| self.entries[position].1.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedPair {
    pub services_name: String,
    pub contacts_name: String,
}

/// How the company names of the two sheets line up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchReport {
    pub matched: Vec<MatchedPair>,
    pub services_only: Vec<String>,
    pub contacts_only: Vec<String>,
}

impl MatchReport {
    pub fn compare<'c>(
        contact_names: impl IntoIterator<Item = &'c Cell>,
        service_names: impl IntoIterator<Item = &'c Cell>,
    ) -> Self {
        let contacts = NameIndex::from_cells(contact_names);
        let services = NameIndex::from_cells(service_names);

        let mut report = MatchReport::default();
        for (key, services_name) in &services.entries {
            match contacts.get(key) {
                Some(contacts_name) => report.matched.push(MatchedPair {
                    services_name: services_name.clone(),
                    contacts_name: contacts_name.to_string(),
                }),
                None => report.services_only.push(services_name.clone()),
            }
        }
        for (key, contacts_name) in &contacts.entries {
            if services.get(key).is_none() {
                report.contacts_only.push(contacts_name.clone());
            }
        }
        report
    }

    /// Compare the company columns of both loaded sheets. Services names are
    /// read below the detected service header, or from every row if none is found.
    pub fn from_tables(
        tables: &SourceTables,
        columns: &ContactColumns,
        services_company_column: usize,
        header_scan_rows: usize,
    ) -> Result<Self> {
        let company_column = tables.contacts.header_index(&columns.company).ok_or_else(|| {
            EtlError::MissingColumnError {
                table: "contacts".to_string(),
                column: columns.company.clone(),
            }
        })?;

        let services_start =
            detect_service_header(&tables.services, header_scan_rows, services_company_column)
                .map(|header| header.data_start())
                .unwrap_or(0);

        let contact_names = tables
            .contacts
            .data_rows()
            .map(|row| tables.contacts.cell(row, company_column));
        let service_names = (services_start..tables.services.row_count())
            .map(|row| tables.services.cell(row, services_company_column));

        let report = Self::compare(contact_names, service_names);
        tracing::info!(
            "Match report: {} matched, {} services-only, {} contacts-only",
            report.matched.len(),
            report.services_only.len(),
            report.contacts_only.len()
        );
        Ok(report)
    }

    pub fn unique_services(&self) -> usize {
        self.matched.len() + self.services_only.len()
    }

    pub fn unique_contacts(&self) -> usize {
        self.matched.len() + self.contacts_only.len()
    }
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n=== MATCHED COMPANIES ===\n")?;
        for pair in &self.matched {
            writeln!(f, "SERVICES: \"{}\"", pair.services_name)?;
            writeln!(f, "CONTACTS: \"{}\"\n", pair.contacts_name)?;
        }

        writeln!(f, "\n=== SERVICES FILE ONLY (NO CONTACT MATCH) ===\n")?;
        for name in &self.services_only {
            writeln!(f, "- {}", name)?;
        }

        writeln!(f, "\n=== CONTACTS FILE ONLY (NO SERVICES MATCH) ===\n")?;
        for name in &self.contacts_only {
            writeln!(f, "- {}", name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Table;

    fn cells(names: &[&str]) -> Vec<Cell> {
        names.iter().map(|name| Cell::from(*name)).collect()
    }

    #[test]
    fn test_partitions_names() {
        let contacts = cells(&["Acme Plumbing LLC", "Bravo Drains", "Contacts Only Co"]);
        let services = cells(&["Acme Plumbing", "Bravo Drains Inc.", "Services Only"]);

        let report = MatchReport::compare(&contacts, &services);

        assert_eq!(
            report.matched,
            vec![
                MatchedPair {
                    services_name: "Acme Plumbing".to_string(),
                    contacts_name: "Acme Plumbing LLC".to_string(),
                },
                MatchedPair {
                    services_name: "Bravo Drains Inc.".to_string(),
                    contacts_name: "Bravo Drains".to_string(),
                },
            ]
        );
        assert_eq!(report.services_only, vec!["Services Only"]);
        assert_eq!(report.contacts_only, vec!["Contacts Only Co"]);
    }

    #[test]
    fn test_counts_add_up_to_unique_keys() {
        let contacts = cells(&["A", "B", "B", "The C", "C Co", "D"]);
        let mut services = cells(&["B", "C", "E", "E", "F"]);
        services.push(Cell::Number(7.0));
        services.push(Cell::Empty);

        let report = MatchReport::compare(&contacts, &services);

        // contacts keys: a, b, c, d; services keys: b, c, e, f
        assert_eq!(report.unique_contacts(), 4);
        assert_eq!(report.unique_services(), 4);
        assert_eq!(report.matched.len(), 2);
        assert_eq!(report.contacts_only, vec!["A", "D"]);
        assert_eq!(report.services_only, vec!["E", "F"]);
    }

    #[test]
    fn test_later_duplicate_name_is_displayed() {
        let contacts = cells(&["The C", "C Co"]);
        let services = cells(&["C"]);

        let report = MatchReport::compare(&contacts, &services);

        assert_eq!(report.matched[0].contacts_name, "C Co");
    }

    #[test]
    fn test_from_tables_skips_title_rows() {
        let tables = SourceTables {
            contacts: Table::from_text_rows(&[&["Company"], &["Acme"], &["Solo"]]),
            services: Table::from_text_rows(&[
                &["Services matrix", ""],
                &["Company", "Emergency Plumbing"],
                &["Acme LLC", "✓"],
            ]),
        };

        let report =
            MatchReport::from_tables(&tables, &ContactColumns::default(), 0, 10).unwrap();

        assert_eq!(report.matched.len(), 1);
        assert!(report.services_only.is_empty());
        assert_eq!(report.contacts_only, vec!["Solo"]);
    }

    #[test]
    fn test_from_tables_contacts_header_below_blank_row() {
        let tables = SourceTables {
            contacts: Table::from_text_rows(&[&[""], &["Company"], &["Acme"]]),
            services: Table::from_text_rows(&[&["Company", "Emergency Plumbing"], &["Acme", "✓"]]),
        };

        let report =
            MatchReport::from_tables(&tables, &ContactColumns::default(), 0, 10).unwrap();

        assert_eq!(report.matched.len(), 1);
        assert!(report.contacts_only.is_empty());
    }

    #[test]
    fn test_display_sections() {
        let report = MatchReport {
            matched: vec![MatchedPair {
                services_name: "Acme".to_string(),
                contacts_name: "Acme LLC".to_string(),
            }],
            services_only: vec!["Lone Service".to_string()],
            contacts_only: vec![],
        };

        let text = report.to_string();

        assert!(text.contains("=== MATCHED COMPANIES ==="));
        assert!(text.contains("SERVICES: \"Acme\"\nCONTACTS: \"Acme LLC\""));
        assert!(text.contains("=== SERVICES FILE ONLY (NO CONTACT MATCH) ===\n\n- Lone Service"));
        assert!(text.contains("=== CONTACTS FILE ONLY (NO SERVICES MATCH) ==="));
    }
}
