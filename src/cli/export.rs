//! CLI commands for backup export and import

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};

use crate::error::{SpendError, SpendResult};
use crate::export::{csv, json, yaml, FullExport};
use crate::storage::Storage;

use super::ensure_persisted;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// JSON full backup
    Json,
    /// YAML full backup, human-readable
    Yaml,
    /// CSV of expenses only
    Csv,
}

impl ExportFormat {
    /// Guess a backup format from a file extension; anything else is JSON
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// Arguments for `export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output format
    #[arg(value_enum)]
    pub format: ExportFormat,

    /// Output file path (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write JSON on a single line
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for `import`
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Backup file written by `export json` or `export yaml`
    pub file: PathBuf,

    /// Backup format, guessed from the extension when omitted
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> SpendResult<()> {
    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                SpendError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(storage, &mut writer, args.format, args.compact)?;
            writer
                .flush()
                .map_err(|e| SpendError::Export(e.to_string()))?;
            eprintln!("Exported to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_export(storage, &mut writer, args.format, args.compact)?;
            writeln!(writer).map_err(|e| SpendError::Export(e.to_string()))?;
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    storage: &Storage,
    writer: &mut W,
    format: ExportFormat,
    compact: bool,
) -> SpendResult<()> {
    match format {
        ExportFormat::Json => json::export_full_json(storage, writer, !compact),
        ExportFormat::Yaml => yaml::export_full_yaml(storage, writer),
        ExportFormat::Csv => csv::export_expenses_csv(storage, writer),
    }
}

/// Handle the import command
pub fn handle_import_command(storage: &mut Storage, args: ImportArgs) -> SpendResult<()> {
    let contents = fs::read_to_string(&args.file).map_err(|e| {
        SpendError::Import(format!("Failed to read {}: {}", args.file.display(), e))
    })?;

    let export: FullExport = match args.format.unwrap_or_else(|| ExportFormat::from_path(&args.file)) {
        ExportFormat::Json => json::import_from_json(&contents)?,
        ExportFormat::Yaml => yaml::import_from_yaml(&contents)?,
        ExportFormat::Csv => {
            return Err(SpendError::Import(
                "CSV exports cannot be imported; use a JSON or YAML backup".to_string(),
            ))
        }
    };

    let summary = export.apply_to(storage);
    ensure_persisted(storage)?;

    println!("Imported {}", args.file.display());
    println!(
        "  Expenses:   {} added, {} replaced",
        summary.expenses_inserted, summary.expenses_replaced
    );
    println!(
        "  Categories: {} added, {} replaced",
        summary.categories_inserted, summary.categories_replaced
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("backup.yaml")), ExportFormat::Yaml);
        assert_eq!(ExportFormat::from_path(Path::new("backup.YML")), ExportFormat::Yaml);
        assert_eq!(ExportFormat::from_path(Path::new("expenses.csv")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("backup.json")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("backup")), ExportFormat::Json);
    }
}
