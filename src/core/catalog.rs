use crate::core::header::detect_service_header;
use crate::core::normalize::{is_truthy, normalize_cell, slugify};
use crate::domain::model::{
    CatalogDiagnostics, ContactColumns, ContactRecord, SourceTables, Table, TransformResult,
};
use crate::domain::ports::SourceConfig;
use crate::utils::error::{EtlError, Result};
use std::collections::HashMap;

/// Contacts keyed by normalized company name, iterating in first-seen order.
#[derive(Debug, Default)]
struct ContactIndex {
    records: Vec<ContactRecord>,
    positions: HashMap<String, usize>,
}

impl ContactIndex {
    /// Insert under `key`, replacing any earlier contact with the same key.
    /// Returns the replaced contact's display name.
    fn upsert(&mut self, key: String, record: ContactRecord) -> Option<String> {
        match self.positions.get(&key) {
            Some(&position) => {
                let previous = std::mem::replace(&mut self.records[position], record);
                Some(previous.name)
            }
            None => {
                self.positions.insert(key, self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut ContactRecord> {
        let position = *self.positions.get(key)?;
        self.records.get_mut(position)
    }
}

pub struct CatalogBuilder<'a> {
    columns: &'a ContactColumns,
    services_company_column: usize,
    header_scan_rows: usize,
}

impl<'a> CatalogBuilder<'a> {
    pub fn new(
        columns: &'a ContactColumns,
        services_company_column: usize,
        header_scan_rows: usize,
    ) -> Self {
        Self {
            columns,
            services_company_column,
            header_scan_rows,
        }
    }

    pub fn from_config<C: SourceConfig>(config: &'a C) -> Self {
        Self::new(
            config.contact_columns(),
            config.services_company_column(),
            config.header_scan_rows(),
        )
    }

    pub fn build(&self, tables: &SourceTables) -> Result<TransformResult> {
        let mut diagnostics = CatalogDiagnostics::default();

        let header = detect_service_header(
            &tables.services,
            self.header_scan_rows,
            self.services_company_column,
        );
        let data_start = match &header {
            Some(header) => {
                tracing::info!(
                    "Detected service header at row {} with {} service columns",
                    header.row,
                    header.columns.len()
                );
                for column in &header.columns {
                    tracing::info!("  col {} → {}", column.column, column.code);
                }
                for unrecognized in &header.unrecognized {
                    tracing::warn!(
                        "Ignoring unrecognized service header in col {}: {:?}",
                        unrecognized.column,
                        unrecognized.label
                    );
                }
                diagnostics.header_row = Some(header.row);
                diagnostics.service_columns = header.columns.clone();
                diagnostics.unrecognized_headers = header.unrecognized.clone();
                header.data_start()
            }
            None => {
                tracing::warn!(
                    "No service header found in the first {} rows of the services sheet",
                    self.header_scan_rows
                );
                tables.services.row_count()
            }
        };

        let mut index = self.index_contacts(&tables.contacts, &mut diagnostics)?;

        for row in data_start..tables.services.row_count() {
            let company = tables.services.cell(row, self.services_company_column);
            let Some(name) = company.as_text() else {
                continue;
            };

            let key = normalize_cell(company);
            let Some(contact) = index.get_mut(&key) else {
                tracing::debug!("No contact match for services row {}: {:?}", row, name);
                diagnostics.unmatched_service_rows.push(name.to_string());
                continue;
            };

            diagnostics.matched_rows += 1;
            for column in &diagnostics.service_columns {
                if is_truthy(tables.services.cell(row, column.column)) {
                    contact.services.push(column.code);
                    diagnostics.service_assignments += 1;
                }
            }
        }

        tracing::info!("Matched plumbers with contacts: {}", diagnostics.matched_rows);
        tracing::info!("Total service assignments: {}", diagnostics.service_assignments);

        let mut records = Vec::with_capacity(index.records.len());
        for mut contact in index.records {
            contact.services.sort_by(|a, b| a.as_str().cmp(b.as_str()));
            contact.services.dedup();
            if contact.services.is_empty() {
                diagnostics.contacts_without_services.push(contact.name);
            } else {
                records.push(contact);
            }
        }

        Ok(TransformResult {
            records,
            diagnostics,
        })
    }

    fn index_contacts(
        &self,
        contacts: &Table,
        diagnostics: &mut CatalogDiagnostics,
    ) -> Result<ContactIndex> {
        let company_column = self.required_column(contacts, &self.columns.company)?;
        let phone = contacts.header_index(&self.columns.phone);
        let email = contacts.header_index(&self.columns.email);
        let location = contacts.header_index(&self.columns.location);
        let rating_note = contacts.header_index(&self.columns.rating_note);

        let field = |row: usize, column: Option<usize>| {
            column.and_then(|column| contacts.cell(row, column).display_value())
        };

        let mut index = ContactIndex::default();
        for row in contacts.data_rows() {
            let company = contacts.cell(row, company_column);
            let Some(name) = company.as_text() else {
                continue;
            };

            let record = ContactRecord {
                id: slugify(name),
                name: name.to_string(),
                phone: field(row, phone),
                email: field(row, email),
                location: field(row, location),
                rating_note: field(row, rating_note),
                services: Vec::new(),
            };

            if let Some(replaced) = index.upsert(normalize_cell(company), record) {
                tracing::warn!("Contact {:?} overwritten by {:?} (same normalized name)", replaced, name);
                diagnostics.overwritten_contacts.push(replaced);
            }
        }

        tracing::debug!("Indexed {} contacts", index.records.len());
        Ok(index)
    }

    fn required_column(&self, table: &Table, name: &str) -> Result<usize> {
        table
            .header_index(name)
            .ok_or_else(|| EtlError::MissingColumnError {
                table: "contacts".to_string(),
                column: name.to_string(),
            })
    }
}
