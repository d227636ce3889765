use parapaths::algorithm::dijkstra::Dijkstra;
use parapaths::algorithm::johnson::Johnson;
use parapaths::algorithm::ShortestPathAlgorithm;
use parapaths::graph::generators::generate_grid;
use parapaths::graph::{DirectedGraph, Graph, MutableGraph};

const WIDTH: usize = 10;

fn key(x: usize, y: usize) -> usize {
    y * WIDTH + x + 1
}

// Cut every edge touching the vertex, leaving it in place
fn isolate(graph: &mut DirectedGraph<f64>, vertex: usize) {
    for other in 1..=graph.vertex_count() {
        while graph.remove_edge(other, vertex).unwrap().is_some() {}
        while graph.remove_edge(vertex, other).unwrap().is_some() {}
    }
}

fn assert_path_uses_edges(graph: &DirectedGraph<f64>, path: &[usize]) {
    for pair in path.windows(2) {
        assert!(
            graph.find_edge(pair[0], pair[1]).unwrap().is_some(),
            "Path should only use existing edges"
        );
    }
}

// Test that paths can be found in a simple grid
#[test]
fn test_path_finding_simple_grid() {
    let graph = generate_grid(WIDTH, WIDTH, 1.0).unwrap();
    let source = key(0, 0);
    let target = key(9, 9);

    let result = Dijkstra::new().compute_shortest_paths(&graph, source).unwrap();
    assert_eq!(result.distance(target), Some(18.0));

    let path = result.path(target).unwrap();
    assert_eq!(path[0], source, "Path should start at source");
    assert_eq!(path[path.len() - 1], target, "Path should end at target");
    assert_eq!(path.len(), 19);
    assert_path_uses_edges(&graph, path);
}

// Test path finding with obstacles
#[test]
fn test_path_finding_with_obstacles() {
    let mut graph = generate_grid(WIDTH, WIDTH, 1.0).unwrap();

    // A wall in column 5, open only in the two bottom rows
    for y in 0..8 {
        isolate(&mut graph, key(5, y));
    }
    for y in 0..8 {
        assert!(graph.get_vertex(key(5, y)).unwrap().is_isolated());
    }

    let source = key(0, 0);
    let target = key(9, 0);
    let result = Dijkstra::new().compute_shortest_paths(&graph, source).unwrap();

    // down 8 rows, across 9 columns, back up 8 rows
    assert_eq!(result.distance(target), Some(25.0));
    let path = result.path(target).unwrap();
    assert_path_uses_edges(&graph, path);
    assert!(path.iter().all(|&v| v != key(5, 0)));
    assert!(!result.is_reachable(key(5, 3)));
}

// Walled-off regions stay unreachable in every all-pairs row
#[test]
fn test_all_pairs_on_split_grid() {
    let mut graph = generate_grid(WIDTH, 4, 2.0).unwrap();
    for y in 0..4 {
        isolate(&mut graph, key(4, y));
    }
    let edges_before = graph.edge_count();

    let result = Johnson::new().with_threads(3).compute(&mut graph).unwrap();
    assert_eq!(graph.edge_count(), edges_before);

    let left = key(0, 0);
    let right = key(9, 3);
    assert_eq!(result.distance(left, key(3, 3)), Some(12.0));
    assert_eq!(result.distance(right, key(5, 0)), Some(14.0));
    assert_eq!(result.distance(left, right), None);
    assert!(result.path(right, left).is_none());

    for row in result.rows() {
        assert_eq!(row.distance(row.source()), Some(0.0));
    }
}
