//! # Route Model
//!
//! Clean DTOs shared by the graph builder, the shortest-path engine and the
//! batch validator. These types cross every boundary: drawing ↔ graph ↔
//! route ↔ batch ↔ host.
//!
//! Design rule: this module is pure data — no I/O, no state, no async.

pub mod segment;
pub mod path;
pub mod cell;
pub mod row;

pub use segment::{Point, EndpointKind, Segment, SegmentEnd, SegmentPatch};
pub use path::{format_mm, PathResult, NodePath};
pub use cell::Cell;
pub use row::BatchRow;
