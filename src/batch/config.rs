//! Batch layout configuration.
//!
//! Column positions are a contract with the external circuit sheet. The
//! defaults reproduce the reference layout.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Index of the last column a spreadsheet can hold (`XFD`).
pub const MAX_COLUMN: usize = 16_383;

/// Cell values written to the two output columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    pub reachable: String,
    pub not_reachable: String,
    /// Written in the distance column when no route exists.
    pub route_not_found: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            reachable: "reachable".into(),
            not_reachable: "not reachable".into(),
            route_not_found: "route not found".into(),
        }
    }
}

impl Markers {
    /// Markers used by legacy Spanish-language circuit sheets.
    pub fn spanish() -> Self {
        Self {
            reachable: "Sí".into(),
            not_reachable: "No".into(),
            route_not_found: "Ruta no encontrada".into(),
        }
    }
}

/// Where to read endpoints from and where to write results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub start_column: usize,
    pub end_column: usize,
    pub distance_column: usize,
    pub reachable_column: usize,
    /// Leading rows passed through untouched and excluded from progress.
    pub header_rows: usize,
    /// Rows processed between two yields to the host.
    pub chunk_size: usize,
    pub markers: Markers,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            start_column: 15,
            end_column: 8,
            distance_column: 22,
            reachable_column: 23,
            header_rows: 2,
            chunk_size: 200,
            markers: Markers::default(),
        }
    }
}

impl BatchConfig {
    /// Parse a (possibly partial) JSON layout; missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_header_rows(mut self, header_rows: usize) -> Self {
        self.header_rows = header_rows;
        self
    }

    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    pub fn with_columns(mut self, start: usize, end: usize, distance: usize, reachable: usize) -> Self {
        self.start_column = start;
        self.end_column = end;
        self.distance_column = distance;
        self.reachable_column = reachable;
        self
    }

    /// Reject layouts that would overwrite their own inputs or address
    /// columns no sheet can have.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::InvalidConfig("chunk_size must be at least 1".into()));
        }
        for (field, column) in [
            ("start_column", self.start_column),
            ("end_column", self.end_column),
            ("distance_column", self.distance_column),
            ("reachable_column", self.reachable_column),
        ] {
            if column > MAX_COLUMN {
                return Err(Error::InvalidConfig(format!(
                    "{field} {column} is past the last sheet column {MAX_COLUMN}"
                )));
            }
        }
        if self.distance_column == self.reachable_column {
            return Err(Error::InvalidConfig(format!(
                "distance and reachability share column {}",
                self.distance_column
            )));
        }
        for output in [self.distance_column, self.reachable_column] {
            if output == self.start_column || output == self.end_column {
                return Err(Error::InvalidConfig(format!(
                    "output column {output} overlaps an input column"
                )));
            }
        }
        Ok(())
    }
}
