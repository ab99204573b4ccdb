//! YAML backup export and import
//!
//! Same document as the JSON backup, with a short comment header for people
//! opening the file by hand.

use std::io::Write;

use crate::error::{SpendError, SpendResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the full store to YAML
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> SpendResult<()> {
    let export = FullExport::from_storage(storage);

    let header = format!(
        "# spendlog backup\n# Generated: {}\n# App Version: {}\n# Expenses: {}\n#\n# Restore with `spendlog import <file>`.\n\n",
        export.exported_at, export.app_version, export.metadata.expense_count
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| SpendError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| SpendError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a YAML backup
pub fn import_from_yaml(yaml_str: &str) -> SpendResult<FullExport> {
    let export: FullExport = serde_yaml::from_str(yaml_str)?;

    export.validate().map_err(SpendError::Import)?;

    Ok(export)
}
