//! BatchRow — a positional record of cells.

use serde::{Deserialize, Serialize};
use super::Cell;

/// A spreadsheet row addressed by column index.
///
/// Reads past the end see [`Cell::Empty`]; writes past the end pad the row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchRow(pub Vec<Cell>);

impl BatchRow {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn get(&self, column: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.0.get(column).unwrap_or(&EMPTY)
    }

    /// Write a cell. A column no row could ever reach (`usize::MAX`) is
    /// ignored.
    pub fn set(&mut self, column: usize, value: impl Into<Cell>) {
        if column >= self.0.len() {
            let Some(len) = column.checked_add(1) else {
                tracing::warn!(column, "cell write past addressable columns ignored");
                return;
            };
            self.0.resize(len, Cell::Empty);
        }
        self.0[column] = value.into();
    }

    /// Builder: set a column and return the row.
    pub fn with(mut self, column: usize, value: impl Into<Cell>) -> Self {
        self.set(column, value);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.0
    }
}

impl From<Vec<Cell>> for BatchRow {
    fn from(cells: Vec<Cell>) -> Self {
        Self(cells)
    }
}

impl From<serde_json::Value> for BatchRow {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Array(items) => Self(items.into_iter().map(Cell::from).collect()),
            serde_json::Value::Null => Self::new(),
            other => Self(vec![Cell::from(other)]),
        }
    }
}
