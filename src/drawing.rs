//! Host-side segment collection.
//!
//! The drawing surface owns the list of segments and edits it as the user
//! draws, annotates and erases lines. Route queries never look at the live
//! list: [`Drawing::route_graph`] builds a graph from a snapshot, so edits
//! made after the build have no effect on a query or batch already running.
//!
//! ## Limitations
//!
//! - Segments are addressed by position, as in the drawing's line table.
//!   Removing a segment shifts the indices of every later one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::graph::{self, RouteGraph};
use crate::model::{EndpointKind, PathResult, Segment, SegmentEnd, SegmentPatch};
use crate::route;
use crate::{Error, Result};

/// Shared, thread-safe collection of drawn segments. Clones share state.
#[derive(Clone, Default)]
pub struct Drawing {
    inner: Arc<DrawingInner>,
}

#[derive(Default)]
struct DrawingInner {
    segments: RwLock<Vec<Segment>>,
    /// Bumped on every mutation, while the write lock is still held.
    revision: AtomicU64,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<Segment>) -> Self {
        let drawing = Self::new();
        *drawing.inner.segments.write() = segments;
        drawing
    }

    fn touch(&self) {
        self.inner.revision.fetch_add(1, Ordering::Relaxed);
    }

    fn check_index(len: usize, index: usize) -> Result<()> {
        if index < len {
            Ok(())
        } else {
            Err(Error::SegmentIndex { index, len })
        }
    }

    // ========================================================================
    // Edits
    // ========================================================================

    /// Append a segment and return its index.
    pub fn add_segment(&self, segment: Segment) -> usize {
        let mut segments = self.inner.segments.write();
        segments.push(segment);
        self.touch();
        segments.len() - 1
    }

    pub fn update_segment(&self, index: usize, patch: SegmentPatch) -> Result<()> {
        let mut segments = self.inner.segments.write();
        Self::check_index(segments.len(), index)?;
        segments[index].apply(patch);
        self.touch();
        Ok(())
    }

    pub fn set_endpoint_kind(&self, index: usize, end: SegmentEnd, kind: EndpointKind) -> Result<()> {
        let mut segments = self.inner.segments.write();
        Self::check_index(segments.len(), index)?;
        segments[index].set_kind(end, kind);
        self.touch();
        Ok(())
    }

    pub fn remove_segment(&self, index: usize) -> Result<Segment> {
        let mut segments = self.inner.segments.write();
        Self::check_index(segments.len(), index)?;
        let removed = segments.remove(index);
        self.touch();
        Ok(removed)
    }

    /// Replace the whole collection (e.g. after an import).
    pub fn set_segments(&self, replacement: Vec<Segment>) {
        let mut segments = self.inner.segments.write();
        *segments = replacement;
        self.touch();
    }

    pub fn reset(&self) {
        let mut segments = self.inner.segments.write();
        segments.clear();
        self.touch();
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub fn segments(&self) -> Vec<Segment> {
        self.inner.segments.read().clone()
    }

    pub fn segment(&self, index: usize) -> Option<Segment> {
        self.inner.segments.read().get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.segments.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.segments.read().is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.inner.revision.load(Ordering::Relaxed)
    }

    /// Build a fresh graph from the current segments.
    pub fn route_graph(&self) -> RouteGraph {
        let segments = self.inner.segments.read();
        graph::build(segments.iter())
    }

    /// Ad hoc route query against the current drawing.
    pub fn shortest_path(&self, start: &str, end: &str) -> Option<PathResult> {
        route::shortest_path(&self.route_graph(), start, end)
    }
}

impl std::fmt::Debug for Drawing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Drawing")
            .field("segments", &self.len())
            .field("revision", &self.revision())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
