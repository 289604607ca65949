//! CSV export of the operation log.

use serde::Serialize;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{LogbookError, LogbookResult};
use crate::model::Operation;

/// Extension given to destinations that have none
pub const CSV_EXTENSION: &str = "csv";

/// Writes a log snapshot to a row/column file
pub trait TabularExporter {
    /// Write header and rows for `entries` to `path`
    fn write(&self, entries: &[Operation], path: &Path) -> io::Result<()>;
}

/// One CSV row; field order is the column order
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Timestamp")]
    timestamp: &'a str,
    #[serde(rename = "Command")]
    command: &'a str,
    #[serde(rename = "Targets")]
    targets: String,
    #[serde(rename = "Kill Chain Step")]
    kill_chain_step: &'a str,
}

impl<'a> From<&'a Operation> for ExportRow<'a> {
    fn from(op: &'a Operation) -> Self {
        ExportRow {
            timestamp: op.timestamp(),
            command: op.command(),
            targets: op.targets_joined(),
            kill_chain_step: op.kill_chain_step(),
        }
    }
}

/// CSV writer with standard quoting
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvExporter;

impl TabularExporter for CsvExporter {
    fn write(&self, entries: &[Operation], path: &Path) -> io::Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(file);

        for op in entries {
            writer.serialize(ExportRow::from(op))?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// Destination with `.csv` appended when it has no extension
pub fn resolve_destination(destination: &Path) -> PathBuf {
    if destination.extension().is_some() {
        destination.to_path_buf()
    } else {
        destination.with_extension(CSV_EXTENSION)
    }
}

/// Export `entries` to `destination` using `exporter`
///
/// Rows go to a sibling `.partial` file that is renamed onto the destination
/// once complete, so a failed write never leaves a truncated export behind.
///
/// # Errors
/// Returns a validation error if `entries` is empty or no destination was
/// given, or an export error if the destination is a directory or any file
/// operation fails
pub fn export_with(
    exporter: &dyn TabularExporter,
    entries: &[Operation],
    destination: &Path,
) -> LogbookResult<PathBuf> {
    if entries.is_empty() {
        return Err(LogbookError::validation("No operations to export."));
    }
    if destination.as_os_str().is_empty() {
        return Err(LogbookError::validation("No export destination given."));
    }
    if destination.is_dir() {
        return Err(LogbookError::Export {
            path: destination.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "destination is a directory"),
        });
    }

    let path = resolve_destination(destination);
    let partial = partial_path(&path);

    let written = exporter
        .write(entries, &partial)
        .and_then(|()| fs::rename(&partial, &path));

    if let Err(source) = written {
        // Best effort; the partial file may never have been created
        let _ = fs::remove_file(&partial);
        return Err(LogbookError::Export { path, source });
    }

    let resolved = fs::canonicalize(&path).unwrap_or(path);
    log::info!("Exported {} operations to {}", entries.len(), resolved.display());
    Ok(resolved)
}

/// Export `entries` to `destination` as CSV
pub fn export(entries: &[Operation], destination: &Path) -> LogbookResult<PathBuf> {
    export_with(&CsvExporter, entries, destination)
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}
