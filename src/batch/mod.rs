//! # Batch Validation
//!
//! Annotates the rows of a circuit sheet with the shortest route length
//! between each row's two endpoints.
//!
//! ```text
//! rows ──► BatchRun (one chunk per next()) ──► Progress ──► host
//!                     │
//!                     └── into_outcome() ──► BatchOutcome { rows, summary }
//! ```
//!
//! The run borrows the graph immutably for its whole lifetime, so the
//! drawing can keep changing underneath without affecting the batch: the
//! host rebuilds a fresh graph for the next run.
//!
//! Rows never fail the batch. A row whose endpoints are missing, malformed
//! or disconnected is annotated with the "not found" markers and the run
//! moves on.

pub mod config;
pub mod scheduler;

use chrono::{DateTime, Utc};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::graph::RouteGraph;
use crate::model::{format_mm, BatchRow};
use crate::route::{ShortestPathTree, shortest_path_tree};
use crate::Result;

pub use config::{BatchConfig, Markers, MAX_COLUMN};
pub use scheduler::{CancelToken, ImmediateScheduler, Scheduler};
#[cfg(feature = "tokio")]
pub use scheduler::TokioScheduler;

// ============================================================================
// Progress & outcome
// ============================================================================

/// Rows processed so far out of the data rows in the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
}

impl Progress {
    /// Completed share in `[0, 1]`. An empty sheet counts as complete.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.processed as f64 / self.total as f64
        }
    }

    pub fn is_complete(&self) -> bool {
        self.processed >= self.total
    }
}

/// Terminal state of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchStatus {
    Done,
    /// Stopped at a chunk boundary; rows past `processed` are untouched.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub processed: usize,
    pub reachable: usize,
    pub unreachable: usize,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: i64,
}

/// The annotated rows, ready for an external sheet writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub status: BatchStatus,
    pub rows: Vec<BatchRow>,
    pub summary: BatchSummary,
}

impl BatchOutcome {
    pub fn is_done(&self) -> bool {
        self.status == BatchStatus::Done
    }
}

// ============================================================================
// BatchRun
// ============================================================================

/// An in-progress batch. Each call to `next()` processes exactly one chunk
/// and reports progress; the host decides when to call it again.
pub struct BatchRun<'g> {
    graph: &'g RouteGraph,
    config: BatchConfig,
    rows: Vec<BatchRow>,
    first_data_row: usize,
    cursor: usize,
    /// Single-source results per start name; `None` for names not in the graph.
    trees: HashMap<String, Option<ShortestPathTree<'g>>>,
    reachable: usize,
    unreachable: usize,
    started_at: DateTime<Utc>,
}

impl<'g> BatchRun<'g> {
    fn new(graph: &'g RouteGraph, config: BatchConfig, rows: Vec<BatchRow>) -> Self {
        let first_data_row = config.header_rows.min(rows.len());
        tracing::info!(
            rows = rows.len() - first_data_row,
            chunk_size = config.chunk_size,
            nodes = graph.node_count(),
            "batch validation started"
        );
        Self {
            graph,
            config,
            rows,
            first_data_row,
            cursor: first_data_row,
            trees: HashMap::new(),
            reachable: 0,
            unreachable: 0,
            started_at: Utc::now(),
        }
    }

    pub fn progress(&self) -> Progress {
        Progress {
            processed: self.cursor - self.first_data_row,
            total: self.rows.len() - self.first_data_row,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.rows.len()
    }

    /// Rows as annotated so far.
    pub fn rows(&self) -> &[BatchRow] {
        &self.rows
    }

    /// Stop here. The status is `Done` only if every row was processed.
    pub fn into_outcome(self) -> BatchOutcome {
        let progress = self.progress();
        let status = if self.is_finished() { BatchStatus::Done } else { BatchStatus::Cancelled };
        let elapsed_ms = (Utc::now() - self.started_at).num_milliseconds();

        tracing::info!(
            ?status,
            processed = progress.processed,
            total = progress.total,
            reachable = self.reachable,
            elapsed_ms,
            "batch validation finished"
        );

        BatchOutcome {
            status,
            summary: BatchSummary {
                total: progress.total,
                processed: progress.processed,
                reachable: self.reachable,
                unreachable: self.unreachable,
                started_at: self.started_at,
                elapsed_ms,
            },
            rows: self.rows,
        }
    }

    fn distance(&mut self, start: &str, end: &str) -> Option<f64> {
        if !self.graph.contains(end) {
            return None;
        }
        let graph = self.graph;
        self.trees
            .entry_ref(start)
            .or_insert_with(|| shortest_path_tree(graph, start))
            .as_ref()?
            .distance_to(end)
    }

    fn annotate(&mut self, index: usize) {
        let (start_column, end_column) = (self.config.start_column, self.config.end_column);
        let row = &self.rows[index];
        let start = row.get(start_column).node_name().map(|n| n.into_owned());
        let end = row.get(end_column).node_name().map(|n| n.into_owned());

        let distance = match (start, end) {
            (Some(start), Some(end)) => self.distance(&start, &end),
            _ => None,
        };

        let markers = &self.config.markers;
        let (distance_cell, reachable_cell) = match distance {
            Some(d) => {
                self.reachable += 1;
                (format_mm(d), markers.reachable.clone())
            }
            None => {
                self.unreachable += 1;
                (markers.route_not_found.clone(), markers.not_reachable.clone())
            }
        };

        let row = &mut self.rows[index];
        row.set(self.config.distance_column, distance_cell);
        row.set(self.config.reachable_column, reachable_cell);
    }
}

impl Iterator for BatchRun<'_> {
    type Item = Progress;

    fn next(&mut self) -> Option<Progress> {
        if self.is_finished() {
            return None;
        }
        let end = self.cursor.saturating_add(self.config.chunk_size).min(self.rows.len());
        for index in self.cursor..end {
            self.annotate(index);
        }
        self.cursor = end;

        let progress = self.progress();
        tracing::debug!(processed = progress.processed, total = progress.total, "batch chunk done");
        Some(progress)
    }
}

// ============================================================================
// BatchValidator
// ============================================================================

/// Applies shortest-path queries to sheet rows against one graph snapshot.
#[derive(Debug, Clone)]
pub struct BatchValidator<'g> {
    graph: &'g RouteGraph,
    config: BatchConfig,
}

impl<'g> BatchValidator<'g> {
    pub fn new(graph: &'g RouteGraph, config: BatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { graph, config })
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Begin a run that the caller drives chunk by chunk.
    pub fn start(&self, rows: Vec<BatchRow>) -> BatchRun<'g> {
        BatchRun::new(self.graph, self.config.clone(), rows)
    }

    /// Process every chunk back to back, reporting progress after each.
    pub fn validate<F>(&self, rows: Vec<BatchRow>, mut on_progress: F) -> BatchOutcome
    where
        F: FnMut(Progress),
    {
        let mut run = self.start(rows);
        for progress in &mut run {
            on_progress(progress);
        }
        run.into_outcome()
    }

    /// Cooperative driver: yields to `scheduler` after every chunk and
    /// checks `cancel` before starting the next one.
    pub async fn validate_async<S, F>(
        &self,
        rows: Vec<BatchRow>,
        scheduler: &S,
        cancel: &CancelToken,
        mut on_progress: F,
    ) -> BatchOutcome
    where
        S: Scheduler + ?Sized,
        F: FnMut(Progress),
    {
        let mut run = self.start(rows);
        loop {
            if cancel.is_cancelled() {
                tracing::info!(processed = run.progress().processed, "batch validation cancelled");
                break;
            }
            let Some(progress) = run.next() else { break };
            on_progress(progress);
            scheduler.yield_now().await;
        }
        run.into_outcome()
    }
}

/// One-shot synchronous validation with the given layout.
pub fn validate<F>(
    graph: &RouteGraph,
    rows: Vec<BatchRow>,
    config: BatchConfig,
    on_progress: F,
) -> Result<BatchOutcome>
where
    F: FnMut(Progress),
{
    Ok(BatchValidator::new(graph, config)?.validate(rows, on_progress))
}

// ============================================================================
// Tests
// ============================================================================
