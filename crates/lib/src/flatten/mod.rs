//! # Flattening
//!
//! Turns the nested JSON returned by the LLM into plain tables: one single-row
//! "Metadata" table and one table per non-empty list section. Whatever the
//! model left out becomes an empty cell; nothing here fails.

pub mod cell;
mod metadata;
mod tables;

pub use cell::Cell;
pub use metadata::METADATA_SHEET;
pub use tables::{rows_to_table, VALUE_COLUMN};

use crate::types::ExtractedBulletin;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// How the metadata row is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataStyle {
    /// Fixed, human-readable columns per engine family.
    #[default]
    Labeled,
    /// Every `documentInfo` key as-is, nested values as JSON text.
    Raw,
}

impl FromStr for MetadataStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "labeled" => Ok(MetadataStyle::Labeled),
            "raw" => Ok(MetadataStyle::Raw),
            other => Err(format!("unknown metadata style '{other}'")),
        }
    }
}

impl fmt::Display for MetadataStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataStyle::Labeled => f.write_str("labeled"),
            MetadataStyle::Raw => f.write_str("raw"),
        }
    }
}

/// A named table with a header row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Returns the cell under `header` in row `row`, if both exist.
    pub fn cell(&self, row: usize, header: &str) -> Option<&Cell> {
        let column = self.headers.iter().position(|h| h == header)?;
        self.rows.get(row)?.get(column)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlattenedBulletin {
    pub metadata: Table,
    pub tables: Vec<Table>,
}

impl FlattenedBulletin {
    /// All tables in sheet order, metadata first.
    pub fn sheets(&self) -> impl Iterator<Item = &Table> {
        std::iter::once(&self.metadata).chain(self.tables.iter())
    }
}

pub fn flatten_bulletin(bulletin: &ExtractedBulletin, style: MetadataStyle) -> FlattenedBulletin {
    let metadata = metadata::metadata_table(bulletin, style);
    let tables = tables::detected_tables(bulletin);
    debug!(
        "Flattened '{}' into {} metadata columns and {} tables.",
        bulletin.source_name,
        metadata.headers.len(),
        tables.len()
    );
    FlattenedBulletin { metadata, tables }
}

/// Strict path lookup through nested objects.
pub(crate) fn get_path<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

/// Path lookup that steps into the first element whenever an array sits in
/// the middle of the path.
pub(crate) fn get_path_first<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| {
        let current = match current {
            Value::Array(items) => items.first()?,
            other => other,
        };
        current.get(*key)
    })
}
