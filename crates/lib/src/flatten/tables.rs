//! Detection of the list-valued sections that become their own sheets.

use super::{cell::Cell, get_path, Table};
use crate::{engine::EngineType, types::ExtractedBulletin};
use serde_json::Value;

struct TableSpec {
    sheet: &'static str,
    /// Candidate locations, tried in order.
    paths: &'static [&'static [&'static str]],
}

const CFM_TABLES: &[TableSpec] = &[
    TableSpec {
        sheet: "Parts",
        paths: &[&["materialInformation", "parts"]],
    },
    TableSpec {
        sheet: "ConfigurationChanges",
        paths: &[&["configurationChanges"]],
    },
];

// The LEAP schema nests the spares under `documentInfo`, but models
// regularly hoist them, so every plausible location is accepted.
const LEAP_TABLES: &[TableSpec] = &[
    TableSpec {
        sheet: "ListOfSpares",
        paths: &[
            &["materialInformation", "listOfSpares"],
            &["documentInfo", "materialInformation", "listOfSpares"],
            &["documentInfo", "listOfSpares"],
            &["listOfSpares"],
        ],
    },
    TableSpec {
        sheet: "RemovedSpares",
        paths: &[
            &["materialInformation", "listOfRemovedSpares"],
            &["documentInfo", "materialInformation", "listOfRemovedSpares"],
            &["documentInfo", "listOfRemovedSpares"],
            &["listOfRemovedSpares"],
        ],
    },
];

const CFM_ID_PATH: &[&str] = &["documentInfo", "documentTitle"];
const LEAP_ID_PATH: &[&str] = &["documentInfo", "documentName"];

/// Column used when a list entry is not an object.
pub const VALUE_COLUMN: &str = "value";

pub(crate) fn detected_tables(bulletin: &ExtractedBulletin) -> Vec<Table> {
    let (specs, id_column, id_path) = match bulletin.engine {
        EngineType::Cfm => (CFM_TABLES, "DocumentTitle", CFM_ID_PATH),
        EngineType::Leap => (LEAP_TABLES, "DocumentName", LEAP_ID_PATH),
    };
    let document_id = Cell::from_optional(get_path(&bulletin.data, id_path));

    specs
        .iter()
        .filter_map(|spec| {
            let rows = spec
                .paths
                .iter()
                .find_map(|path| get_path(&bulletin.data, path).and_then(Value::as_array))?;
            if rows.is_empty() {
                return None;
            }
            Some(rows_to_table(spec.sheet, id_column, &document_id, rows))
        })
        .collect()
}

/// Builds a table from a list of records. Columns are the union of the record
/// keys in first-appearance order; a key a record lacks becomes an empty cell.
/// A record key that equals `id_column` keeps its own value under
/// `"{id_column} (record)"`.
pub fn rows_to_table(sheet: &str, id_column: &str, document_id: &Cell, rows: &[Value]) -> Table {
    let mut columns: Vec<Column> = Vec::new();
    for row in rows {
        match row.as_object() {
            Some(record) => {
                for key in record.keys() {
                    if !columns.iter().any(|c| matches!(c, Column::Key(k) if k == key)) {
                        columns.push(Column::Key(key.clone()));
                    }
                }
            }
            None => {
                if !columns.contains(&Column::Value) {
                    columns.push(Column::Value);
                }
            }
        }
    }

    let headers = std::iter::once(id_column.to_string())
        .chain(columns.iter().map(|column| match column {
            Column::Key(key) if key == id_column => format!("{key} (record)"),
            Column::Key(key) => key.clone(),
            Column::Value => VALUE_COLUMN.to_string(),
        }))
        .collect();

    let rows = rows
        .iter()
        .map(|row| {
            std::iter::once(document_id.clone())
                .chain(columns.iter().map(|column| match (column, row) {
                    (Column::Key(key), Value::Object(record)) => {
                        Cell::from_optional(record.get(key))
                    }
                    (Column::Value, other) if !other.is_object() => Cell::from_json(other),
                    _ => Cell::Empty,
                }))
                .collect()
        })
        .collect();

    Table {
        name: sheet.to_string(),
        headers,
        rows,
    }
}

#[derive(Debug, PartialEq)]
enum Column {
    Key(String),
    /// Entries that are not objects.
    Value,
}
