//! # `bulletin-sheets`: Spreadsheet Export
//!
//! Writes a flattened bulletin to disk: an Excel workbook with a "Metadata"
//! sheet followed by one sheet per detected table, optional per-table CSV files,
//! and an optional pretty-printed dump of the raw LLM answer.

mod csv_files;
mod json_dump;
mod xlsx;

pub use csv_files::write_csv;
pub use json_dump::write_json;
pub use xlsx::{sheet_name, write_workbook, MAX_CELL_CHARS, MAX_SHEET_NAME_CHARS};

use bulletin::{EngineType, ExtractedBulletin, FlattenedBulletin};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

// --- Error Definitions ---

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Failed to create output directory '{path}': {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error while exporting: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),
}

// --- Data Structures ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(SheetError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        };
        f.write_str(name)
    }
}

// --- Public Helper Functions ---

/// `"{file stem}_{ENGINE}"`, the base name shared by every output of one input.
pub fn output_stem(source_name: &str, engine: EngineType) -> String {
    let stem = Path::new(source_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "bulletin".to_string());
    format!("{stem}_{engine}")
}

/// Returns `base` if it is not in `taken`, else the first free `"{base}_{n}"`
/// counting from 2.
pub fn unique_stem(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}_{n}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Writes every requested format into `out_dir` under the default stem and
/// returns the written paths.
pub fn export(
    extracted: &ExtractedBulletin,
    flattened: &FlattenedBulletin,
    out_dir: &Path,
    formats: &[ExportFormat],
) -> Result<Vec<PathBuf>, SheetError> {
    let stem = output_stem(&extracted.source_name, extracted.engine);
    export_as(extracted, flattened, out_dir, &stem, formats)
}

/// Same as `export`, with every file named after `stem`.
pub fn export_as(
    extracted: &ExtractedBulletin,
    flattened: &FlattenedBulletin,
    out_dir: &Path,
    stem: &str,
    formats: &[ExportFormat],
) -> Result<Vec<PathBuf>, SheetError> {
    std::fs::create_dir_all(out_dir).map_err(|source| SheetError::CreateDir {
        path: out_dir.display().to_string(),
        source,
    })?;

    let mut written = Vec::new();

    for format in formats {
        match format {
            ExportFormat::Xlsx => {
                let path = out_dir.join(format!("{stem}.xlsx"));
                write_workbook(flattened, &path)?;
                written.push(path);
            }
            ExportFormat::Csv => {
                written.extend(write_csv(flattened, out_dir, stem)?);
            }
            ExportFormat::Json => {
                let path = out_dir.join(format!("{stem}.json"));
                write_json(extracted, &path)?;
                written.push(path);
            }
        }
    }

    info!(
        "Exported '{}' to {} file(s) in '{}'.",
        extracted.source_name,
        written.len(),
        out_dir.display()
    );
    Ok(written)
}
