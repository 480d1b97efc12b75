use serde::Serialize;
use serde_json::{Number, Value};
use std::fmt;

/// One spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// Converts a JSON value into a cell. Arrays and objects are kept as
    /// compact JSON text so no information is dropped.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Cell::Empty,
            Value::Bool(b) => Cell::Bool(*b),
            Value::Number(n) => number_cell(n),
            Value::String(s) => Cell::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => Cell::Text(value.to_string()),
        }
    }

    /// Same as `from_json`, treating an absent value as an empty cell.
    pub fn from_optional(value: Option<&Value>) -> Self {
        value.map(Cell::from_json).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Largest integer magnitude an `f64` holds exactly (2^53).
const MAX_EXACT_INTEGER: u64 = 1 << 53;

// Integers an f64 cannot hold exactly stay text so no digits are lost.
fn number_cell(n: &Number) -> Cell {
    let exact = match (n.as_u64(), n.as_i64()) {
        (Some(u), _) => u <= MAX_EXACT_INTEGER,
        (None, Some(i)) => i.unsigned_abs() <= MAX_EXACT_INTEGER,
        (None, None) => true,
    };
    match n.as_f64() {
        Some(f) if exact => Cell::Number(f),
        _ => Cell::Text(n.to_string()),
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}
