// Adapters layer: concrete implementations for external systems (spreadsheet files).

pub mod spreadsheet;
