//! # Route Graph
//!
//! Weighted undirected graph derived from the drawn segments.
//!
//! The graph is a pure derived view: it is rebuilt from the current segment
//! collection whenever it is needed and never mutated afterwards. Queries and
//! batch runs therefore always work against an immutable snapshot.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::model::Segment;
use crate::{Error, Result};

/// Neighbor name → edge weight (mm).
pub type Neighbors = HashMap<String, f64>;

/// Adjacency map from node name to its weighted neighbors.
///
/// Symmetric: if `a → b` has weight `w`, so does `b → a`. Weights are
/// positive and finite. Deserializing checks both and fails otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRouteGraph")]
pub struct RouteGraph {
    adjacency: HashMap<String, Neighbors>,
}

#[derive(Deserialize)]
struct RawRouteGraph {
    adjacency: HashMap<String, Neighbors>,
}

impl TryFrom<RawRouteGraph> for RouteGraph {
    type Error = Error;

    fn try_from(raw: RawRouteGraph) -> Result<Self> {
        let adjacency = raw.adjacency;
        for (a, neighbors) in &adjacency {
            if a.is_empty() || neighbors.is_empty() {
                return Err(Error::InvalidGraph(format!("node {a:?} has no name or no edges")));
            }
            for (b, &weight) in neighbors {
                if !(weight.is_finite() && weight > 0.0) {
                    return Err(Error::InvalidGraph(format!(
                        "edge between {a:?} and {b:?} has non-positive weight {weight}"
                    )));
                }
                let back = adjacency.get(b).and_then(|n| n.get(a.as_str()));
                if back != Some(&weight) {
                    return Err(Error::InvalidGraph(format!(
                        "edge {a:?} → {b:?} has no matching reverse edge"
                    )));
                }
            }
        }
        Ok(Self { adjacency })
    }
}

impl RouteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or overwrite) the undirected edge `a — b`.
    fn connect(&mut self, a: &str, b: &str, weight: f64) {
        self.adjacency
            .entry_ref(a)
            .or_default()
            .insert(b.to_owned(), weight);
        self.adjacency
            .entry_ref(b)
            .or_default()
            .insert(a.to_owned(), weight);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.adjacency.contains_key(name)
    }

    /// The graph-owned copy of `name`, so search state can borrow names
    /// for the graph's lifetime instead of cloning them.
    pub fn node_key(&self, name: &str) -> Option<&str> {
        self.adjacency.get_key_value(name).map(|(k, _)| k.as_str())
    }

    pub fn neighbors(&self, name: &str) -> Option<&Neighbors> {
        self.adjacency.get(name)
    }

    pub fn weight(&self, a: &str, b: &str) -> Option<f64> {
        self.adjacency.get(a)?.get(b).copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Undirected edges, each pair counted once (self-loops included).
    pub fn edge_count(&self) -> usize {
        self.adjacency
            .iter()
            .flat_map(|(a, nbrs)| nbrs.keys().filter(move |b| a.as_str() <= b.as_str()))
            .count()
    }

    /// All undirected edges as `(a, b, weight)` with `a <= b`, sorted.
    pub fn edges(&self) -> Vec<(String, String, f64)> {
        let mut edges: Vec<_> = self
            .adjacency
            .iter()
            .flat_map(|(a, nbrs)| {
                nbrs.iter()
                    .filter(move |(b, _)| a.as_str() <= b.as_str())
                    .map(move |(b, w)| (a.clone(), b.clone(), *w))
            })
            .collect();
        edges.sort_by(|x, y| (&x.0, &x.1).cmp(&(&y.0, &y.1)));
        edges
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Build a route graph from drawn segments.
///
/// Segments without a name on both ends, or without a positive finite
/// length, are skipped silently: drawings are built up incrementally and a
/// half-annotated line is normal. When several segments join the same pair,
/// the last one wins.
pub fn build<'a, I>(segments: I) -> RouteGraph
where
    I: IntoIterator<Item = &'a Segment>,
{
    let mut graph = RouteGraph::new();
    let mut used = 0usize;
    let mut skipped = 0usize;

    for segment in segments {
        if !segment.is_routable() {
            skipped += 1;
            continue;
        }
        // is_routable() guarantees a length
        let Some(weight) = segment.length_mm else { continue };
        graph.connect(&segment.name_a, &segment.name_b, weight);
        used += 1;
    }

    tracing::debug!(
        nodes = graph.node_count(),
        segments = used,
        skipped,
        "built route graph"
    );
    graph
}

// ============================================================================
// Tests
// ============================================================================
