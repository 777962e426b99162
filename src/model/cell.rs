//! Spreadsheet cell values as handed over by external sheet readers.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One cell of a position-addressed tabular row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn type_name(&self) -> &'static str {
        match self {
            Cell::Empty => "EMPTY",
            Cell::Bool(_) => "BOOLEAN",
            Cell::Number(_) => "NUMBER",
            Cell::Text(_) => "TEXT",
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The node name this cell refers to, if any.
    ///
    /// Endpoint identifiers are often plain numbers in circuit sheets, so
    /// numeric cells are rendered the way the sheet displays them
    /// (`101.0` → `"101"`). Empty, whitespace-only and boolean cells name
    /// no node.
    pub fn node_name(&self) -> Option<Cow<'_, str>> {
        match self {
            Cell::Text(s) if !s.trim().is_empty() => Some(Cow::Borrowed(s)),
            Cell::Number(n) if n.is_finite() => Some(Cow::Owned(format_number(*n))),
            _ => None,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Number(n) => f.write_str(&format_number(*n)),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<&str> for Cell {
    fn from(s: &str) -> Self { Cell::Text(s.to_owned()) }
}

impl From<String> for Cell {
    fn from(s: String) -> Self { Cell::Text(s) }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self { Cell::Number(n) }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self { Cell::Number(n as f64) }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self { Cell::Bool(b) }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Cell::Empty)
    }
}

/// Sheet readers commonly emit rows as JSON arrays. Nested containers have
/// no cell meaning and are kept as their JSON text.
impl From<serde_json::Value> for Cell {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Cell::Empty,
            serde_json::Value::Bool(b) => Cell::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Empty),
            serde_json::Value::String(s) => Cell::Text(s),
            other => Cell::Text(other.to_string()),
        }
    }
}
