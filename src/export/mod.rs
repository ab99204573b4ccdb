//! Export module for spendlog
//!
//! - JSON: machine-readable full backup
//! - YAML: human-readable full backup
//! - CSV: expense list for spreadsheets

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_expenses_csv;
pub use json::{export_full_json, import_from_json, ExportMetadata, FullExport, ImportSummary};
pub use yaml::{export_full_yaml, import_from_yaml};
