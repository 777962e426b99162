//! End-to-end tests for graph construction and shortest-path queries.
//!
//! Each test exercises: segments -> graph::build -> route::shortest_path.

use cable_router::{graph, route, Drawing, EndpointKind, Point, RouteGraph, Segment};
use pretty_assertions::assert_eq;

// ============================================================================
// Helpers
// ============================================================================

fn build(edges: &[(&str, &str, f64)]) -> RouteGraph {
    let segments: Vec<Segment> = edges
        .iter()
        .map(|(a, b, len)| Segment::named(*a, *b, *len))
        .collect();
    graph::build(&segments)
}

/// Sum of edge weights along consecutive path nodes.
fn path_weight(g: &RouteGraph, path: &[String]) -> f64 {
    path.windows(2)
        .map(|pair| g.weight(&pair[0], &pair[1]).expect("consecutive path nodes share an edge"))
        .sum()
}

// ============================================================================
// 1. Reference scenarios
// ============================================================================

#[test]
fn test_two_hop_beats_direct_edge() {
    let g = build(&[("A", "B", 100.0), ("B", "C", 50.0), ("A", "C", 200.0)]);
    let result = route::shortest_path(&g, "A", "C").unwrap();

    assert_eq!(result.distance, 150.0);
    assert_eq!(result.path.to_vec(), vec!["A", "B", "C"]);
}

#[test]
fn test_absent_end_is_not_found() {
    let g = build(&[("A", "B", 10.0)]);
    assert!(route::shortest_path(&g, "A", "Z").is_none());
}

#[test]
fn test_missing_first_name_contributes_no_edge() {
    let g = build(&[("", "B", 50.0)]);
    assert_eq!(g.edge_count(), 0);
    assert_eq!(g.node_count(), 0);
}

// ============================================================================
// 2. Graph construction
// ============================================================================

#[test]
fn test_overwrite_keeps_later_length() {
    let g = build(&[("A", "B", 30.0), ("C", "D", 1.0), ("B", "A", 70.0)]);
    assert_eq!(g.weight("A", "B"), Some(70.0));
    assert_eq!(route::shortest_path(&g, "A", "B").unwrap().distance, 70.0);
}

#[test]
fn test_build_is_idempotent() {
    let segments = vec![
        Segment::named("X1", "S1", 120.0),
        Segment::named("S1", "B2", 80.5),
        Segment::named("B2", "X3", 42.0),
        Segment::named("S1", "X3", 300.0),
    ];
    assert_eq!(graph::build(&segments).edges(), graph::build(&segments).edges());
    assert_eq!(graph::build(&segments), graph::build(&segments));
}

#[test]
fn test_geometry_and_kinds_do_not_affect_routing() {
    let segment = Segment::new(Point::new(0.0, 0.0), Point::new(500.0, 0.0))
        .with_names("X1", "S1")
        .with_kinds(EndpointKind::Connector, EndpointKind::Splice)
        .with_length(12.0);
    let g = graph::build(&[segment]);
    assert_eq!(route::shortest_path(&g, "X1", "S1").unwrap().distance, 12.0);
}

#[test]
fn test_imported_drawing_file() {
    let json = r#"[
        {"p1": {"x": 0, "y": 0}, "p2": {"x": 10, "y": 0}, "obj1": "Conector", "obj2": "BRK",
         "nombre_obj1": "X1", "nombre_obj2": "BRK1", "dimension_mm": 250},
        {"p1": {"x": 10, "y": 0}, "p2": {"x": 10, "y": 5}, "obj1": "BRK", "obj2": "Conector",
         "nombre_obj1": "BRK1", "nombre_obj2": "X2", "dimension_mm": "75"},
        {"p1": {"x": 10, "y": 5}, "p2": {"x": 20, "y": 5}, "obj1": "Ninguno", "obj2": "Ninguno",
         "nombre_obj1": "", "nombre_obj2": "", "dimension_mm": null}
    ]"#;
    let segments: Vec<Segment> = serde_json::from_str(json).unwrap();
    let drawing = Drawing::from_segments(segments);

    let result = drawing.shortest_path("X1", "X2").unwrap();
    assert_eq!(result.distance, 325.0);
    assert_eq!(result.path.to_vec(), vec!["X1", "BRK1", "X2"]);
    assert_eq!(drawing.route_graph().edge_count(), 2);
}

// ============================================================================
// 3. Path validity
// ============================================================================

#[test]
fn test_path_weight_matches_distance_on_grid() {
    // 4x4 grid with uneven weights
    let mut edges = Vec::new();
    let name = |r: usize, c: usize| format!("N{r}{c}");
    for r in 0..4 {
        for c in 0..4 {
            if c + 1 < 4 {
                edges.push((name(r, c), name(r, c + 1), 1.0 + ((r * 7 + c * 3) % 5) as f64));
            }
            if r + 1 < 4 {
                edges.push((name(r, c), name(r + 1, c), 1.0 + ((r * 5 + c * 11) % 4) as f64));
            }
        }
    }
    let segments: Vec<Segment> = edges
        .iter()
        .map(|(a, b, w)| Segment::named(a.clone(), b.clone(), *w))
        .collect();
    let g = graph::build(&segments);

    let result = route::shortest_path(&g, "N00", "N33").unwrap();
    assert_eq!(result.start(), "N00");
    assert_eq!(result.end(), "N33");
    assert!((path_weight(&g, &result.path) - result.distance).abs() < 1e-9);

    let reverse = route::shortest_path(&g, "N33", "N00").unwrap();
    assert!((reverse.distance - result.distance).abs() < 1e-9);
}

#[test]
fn test_tied_routes_report_exact_distance() {
    // Two equal-length routes A-B-D and A-C-D
    let g = build(&[("A", "B", 5.0), ("B", "D", 5.0), ("A", "C", 4.0), ("C", "D", 6.0)]);
    let result = route::shortest_path(&g, "A", "D").unwrap();

    assert_eq!(result.distance, 10.0);
    assert_eq!(result.hops(), 2);
    assert_eq!(path_weight(&g, &result.path), 10.0);
}

#[test]
fn test_fractional_lengths() {
    let g = build(&[("A", "B", 0.1), ("B", "C", 0.2)]);
    let result = route::shortest_path(&g, "A", "C").unwrap();
    assert!((result.distance - 0.3).abs() < 1e-12);
    assert_eq!(result.formatted_distance(), "0.30");
}
