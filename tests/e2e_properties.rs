//! Property tests for graph construction, shortest paths and batch output.

use cable_router::batch;
use cable_router::{graph, route, BatchConfig, BatchRow, RouteGraph, Segment};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

const NAMES: &[&str] = &["A", "B", "C", "D", "E", "F", "G", "H", ""];

fn name() -> impl Strategy<Value = String> {
    prop::sample::select(NAMES).prop_map(String::from)
}

/// Lengths include invalid ones (zero, negative) that must be skipped.
fn length() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => (1u32..500).prop_map(f64::from),
        1 => Just(0.0),
        1 => Just(-10.0),
    ]
}

fn segments() -> impl Strategy<Value = Vec<Segment>> {
    prop::collection::vec(
        (name(), name(), length()).prop_map(|(a, b, len)| Segment::named(a, b, len)),
        0..24,
    )
}

fn path_weight(g: &RouteGraph, path: &[String]) -> Option<f64> {
    path.windows(2).map(|pair| g.weight(&pair[0], &pair[1])).sum()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_graph_is_symmetric(segs in segments()) {
        let g = graph::build(&segs);
        for (a, b, w) in g.edges() {
            prop_assert_eq!(g.weight(&a, &b), Some(w));
            prop_assert_eq!(g.weight(&b, &a), Some(w));
            prop_assert!(w > 0.0);
            prop_assert!(!a.is_empty() && !b.is_empty());
        }
    }

    #[test]
    fn prop_build_is_deterministic(segs in segments()) {
        prop_assert_eq!(graph::build(&segs).edges(), graph::build(&segs).edges());
    }

    #[test]
    fn prop_self_route_is_trivial(segs in segments()) {
        let g = graph::build(&segs);
        for node in g.nodes() {
            let result = route::shortest_path(&g, node, node).unwrap();
            prop_assert_eq!(result.distance, 0.0);
            prop_assert_eq!(result.path.to_vec(), vec![node.to_string()]);
        }
    }

    #[test]
    fn prop_absent_names_not_found(segs in segments()) {
        let g = graph::build(&segs);
        prop_assert!(route::shortest_path(&g, "nowhere", "elsewhere").is_none());
        prop_assert!(route::shortest_path(&g, "nowhere", "A").is_none());
    }

    #[test]
    fn prop_path_weight_equals_distance(segs in segments(), s in name(), e in name()) {
        let g = graph::build(&segs);
        if let Some(result) = route::shortest_path(&g, &s, &e) {
            prop_assert_eq!(result.start(), s.as_str());
            prop_assert_eq!(result.end(), e.as_str());
            let weight = path_weight(&g, &result.path);
            prop_assert!(weight.is_some(), "path uses a missing edge: {:?}", result.path);
            prop_assert!((weight.unwrap() - result.distance).abs() < 1e-6);
        }
    }

    #[test]
    fn prop_distance_is_symmetric(segs in segments(), s in name(), e in name()) {
        let g = graph::build(&segs);
        let forward = route::shortest_path(&g, &s, &e).map(|r| r.distance);
        let backward = route::shortest_path(&g, &e, &s).map(|r| r.distance);
        match (forward, backward) {
            (Some(f), Some(b)) => { prop_assert!((f - b).abs() < 1e-6); }
            (f, b) => { prop_assert_eq!(f, b); }
        }
    }

    #[test]
    fn prop_overwrite_keeps_last(first in 1.0f64..1000.0, second in 1.0f64..1000.0) {
        let g = graph::build(&[Segment::named("A", "B", first), Segment::named("B", "A", second)]);
        prop_assert_eq!(g.weight("A", "B"), Some(second));
        prop_assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn prop_batch_independent_of_chunk_size(
        segs in segments(),
        pairs in prop::collection::vec((name(), name()), 0..60),
        chunk_size in 1usize..80,
    ) {
        let g = graph::build(&segs);
        let rows: Vec<BatchRow> = pairs
            .iter()
            .map(|(s, e)| BatchRow::new().with(0, s.as_str()).with(1, e.as_str()))
            .collect();
        let base = BatchConfig::default().with_columns(0, 1, 2, 3).with_header_rows(0);

        let whole = batch::validate(&g, rows.clone(), base.clone().with_chunk_size(usize::MAX), |_| {}).unwrap();
        let chunked = batch::validate(&g, rows, base.with_chunk_size(chunk_size), |_| {}).unwrap();
        prop_assert_eq!(whole.rows, chunked.rows);
    }
}
