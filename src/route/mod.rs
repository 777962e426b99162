//! # Shortest Paths
//!
//! Label-setting (Dijkstra) search over a [`RouteGraph`].
//!
//! ## Ties
//!
//! When several routes share the minimum length, which one is returned
//! depends on neighbor iteration order and is not stable across graph
//! rebuilds. The distance is always exact; callers that compare routes
//! should compare distances, or check that a path's edge weights sum to
//! its distance.
//!
//! Not finding a route is a normal outcome and is reported as `None`: both
//! an endpoint missing from the graph and two disconnected endpoints end up
//! there.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::{HashMap, HashSet};

use crate::graph::RouteGraph;
use crate::model::{NodePath, PathResult};

// ============================================================================
// Frontier
// ============================================================================

/// Frontier entry. `BinaryHeap` is a max-heap, so ordering is reversed to
/// pop the smallest tentative distance first.
#[derive(Debug)]
struct Frontier<'g> {
    dist: f64,
    node: &'g str,
}

impl PartialEq for Frontier<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier<'_> {}

impl Ord for Frontier<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.dist.total_cmp(&self.dist)
    }
}

impl PartialOrd for Frontier<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================================
// Search
// ============================================================================

/// Settled distances and predecessor links of one search.
#[derive(Debug, Default)]
struct Search<'g> {
    dist: HashMap<&'g str, f64>,
    prev: HashMap<&'g str, &'g str>,
}

impl<'g> Search<'g> {
    /// Run from `start` until the frontier is empty or `target` is settled.
    fn run(graph: &'g RouteGraph, start: &'g str, target: Option<&str>) -> Self {
        let mut search = Search::default();
        let mut settled: HashSet<&'g str> = HashSet::new();
        let mut frontier = BinaryHeap::new();

        search.dist.insert(start, 0.0);
        frontier.push(Frontier { dist: 0.0, node: start });

        while let Some(Frontier { dist, node }) = frontier.pop() {
            if !settled.insert(node) {
                continue;
            }
            if target == Some(node) {
                break;
            }
            let Some(neighbors) = graph.neighbors(node) else { continue };

            for (next, weight) in neighbors {
                if settled.contains(next.as_str()) {
                    continue;
                }
                let candidate = dist + weight;
                let improves = search
                    .dist
                    .get(next.as_str())
                    .is_none_or(|&known| candidate < known);
                if improves {
                    search.dist.insert(next.as_str(), candidate);
                    search.prev.insert(next.as_str(), node);
                    frontier.push(Frontier { dist: candidate, node: next.as_str() });
                }
            }
        }

        tracing::trace!(start, settled = settled.len(), "shortest-path search finished");
        search
    }

    /// Walk predecessor links back from `end`.
    fn path_to(&self, start: &str, end: &str) -> Option<PathResult> {
        let distance = *self.dist.get(end)?;
        let mut path = NodePath::new();
        let mut current = end;
        path.push(current.to_owned());
        while current != start {
            current = *self.prev.get(current)?;
            path.push(current.to_owned());
        }
        path.reverse();
        Some(PathResult { distance, path })
    }
}

/// Least-cost route from `start` to `end`.
///
/// Returns `None` when either name is not a node of the graph or when the
/// two are not connected. `start == end` yields distance 0 and the
/// single-node path `[start]`.
pub fn shortest_path(graph: &RouteGraph, start: &str, end: &str) -> Option<PathResult> {
    let start = graph.node_key(start)?;
    if !graph.contains(end) {
        return None;
    }
    if start == end {
        return Some(PathResult::trivial(start));
    }
    Search::run(graph, start, Some(end)).path_to(start, end)
}

// ============================================================================
// Single-source tree
// ============================================================================

/// All shortest distances from one start node.
///
/// Useful when many queries share a start, as in batch validation.
#[derive(Debug)]
pub struct ShortestPathTree<'g> {
    start: &'g str,
    search: Search<'g>,
}

impl<'g> ShortestPathTree<'g> {
    pub fn start(&self) -> &str {
        self.start
    }

    pub fn distance_to(&self, end: &str) -> Option<f64> {
        self.search.dist.get(end).copied()
    }

    pub fn path_to(&self, end: &str) -> Option<PathResult> {
        self.search.path_to(self.start, end)
    }

    /// Number of nodes reachable from the start, the start included.
    pub fn reachable_count(&self) -> usize {
        self.search.dist.len()
    }
}

/// Run a full single-source search. `None` if `start` is not in the graph.
pub fn shortest_path_tree<'g>(graph: &'g RouteGraph, start: &str) -> Option<ShortestPathTree<'g>> {
    let start = graph.node_key(start)?;
    Some(ShortestPathTree { start, search: Search::run(graph, start, None) })
}

// ============================================================================
// Tests
// ============================================================================
