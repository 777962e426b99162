//! PathResult — a least-cost route between two named nodes.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Node names along a route. Most routes through a harness are short.
pub type NodePath = SmallVec<[String; 8]>;

/// Render millimeters with two decimals, exact halves rounding away from zero.
///
/// Plain `{:.2}` rounds exact binary halves to even (`0.125` → `"0.12"`);
/// sheets written by the legacy tool show `"0.13"`. The only values sitting
/// exactly between two hundredths are odd multiples of 1/8, and for those
/// `value * 100.0` is exact. Everything else keeps `{:.2}`, so `2.675`
/// (stored just below the half) still renders as `"2.67"`.
pub fn format_mm(value: f64) -> String {
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        return format!("{:.2}", (value * 100.0).round() / 100.0);
    }
    format!("{value:.2}")
}

/// A found route: total length and the node names from start to end inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// Sum of edge weights along `path`, in millimeters.
    pub distance: f64,
    /// Always starts with the start node and ends with the end node.
    pub path: NodePath,
}

impl PathResult {
    /// The trivial route from a node to itself.
    pub fn trivial(node: impl Into<String>) -> Self {
        let mut path = NodePath::new();
        path.push(node.into());
        Self { distance: 0.0, path }
    }

    pub fn start(&self) -> &str {
        self.path.first().map(String::as_str).unwrap_or_default()
    }

    pub fn end(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }

    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Distance rendered with exactly two decimals, as written to sheets.
    pub fn formatted_distance(&self) -> String {
        format_mm(self.distance)
    }
}

impl fmt::Display for PathResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mm: ", format_mm(self.distance))?;
        for (i, node) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str(" → ")?;
            }
            f.write_str(node)?;
        }
        Ok(())
    }
}
