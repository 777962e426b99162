//! # cable-router — Route Graph for Wiring Layouts
//!
//! Shortest-path engine over the line segments of a cable/wiring layout
//! drawing, plus chunked batch validation of circuit sheets against it.
//!
//! ## Design Principles
//!
//! 1. **Graphs are derived**: `graph::build` is a pure function of the
//!    segments; a graph is never mutated after it is built
//! 2. **Not found is a value**: missing or disconnected endpoints yield
//!    `None` / marker cells, never errors
//! 3. **Cooperative batches**: a batch run advances one chunk at a time
//!    and hands control back to the host in between
//!
//! ## Quick Start
//!
//! ```rust
//! use cable_router::{Segment, graph, route};
//!
//! let segments = vec![
//!     Segment::named("A", "B", 100.0),
//!     Segment::named("B", "C", 50.0),
//!     Segment::named("A", "C", 200.0),
//! ];
//! let g = graph::build(&segments);
//!
//! let result = route::shortest_path(&g, "A", "C").unwrap();
//! assert_eq!(result.distance, 150.0);
//! assert_eq!(result.to_string(), "150.00 mm: A → B → C");
//! ```
//!
//! ## Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | (default) | Synchronous and cooperative batch drivers, `ImmediateScheduler` |
//! | `tokio` | `TokioScheduler`, yielding to the tokio runtime between chunks |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod graph;
pub mod route;
pub mod batch;
pub mod drawing;
pub mod export;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Point, EndpointKind, Segment, SegmentEnd, SegmentPatch,
    PathResult, NodePath, Cell, BatchRow, format_mm,
};

// ============================================================================
// Re-exports: Graph, routing, batch
// ============================================================================

pub use graph::RouteGraph;
pub use route::{shortest_path, shortest_path_tree, ShortestPathTree};
pub use batch::{
    BatchConfig, BatchOutcome, BatchRun, BatchStatus, BatchSummary, BatchValidator,
    CancelToken, ImmediateScheduler, Markers, Progress, Scheduler,
};
#[cfg(feature = "tokio")]
pub use batch::TokioScheduler;
pub use drawing::Drawing;
pub use export::{line_table, LineRecord};

// ============================================================================
// Error Types
// ============================================================================

/// Errors from configuration, graph decoding and drawing edits.
///
/// Route queries and batch rows never produce these: an endpoint that
/// cannot be reached is an ordinary result.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid batch configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid route graph: {0}")]
    InvalidGraph(String),

    #[error("Segment index {index} out of range (drawing has {len} segments)")]
    SegmentIndex { index: usize, len: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
