use lwwgraph_core::{EdgeKey, Error, LwwGraphState};

fn pair() -> LwwGraphState<&'static str> {
    let mut graph = LwwGraphState::new();
    graph.add_vertex("A", 1.0);
    graph.add_vertex("B", 1.0);
    graph
}

#[test]
fn add_and_remove_edge() {
    let mut graph = pair();
    assert!(graph.add_edge("A", "B", 1.0));
    assert!(graph.edge_exists(&EdgeKey::new("A", "B")));

    assert!(graph.remove_edge(EdgeKey::new("A", "B"), 2.0));
    assert!(!graph.edge_exists(&EdgeKey::new("A", "B")));
}

#[test]
fn edge_needs_both_endpoints() {
    let mut graph = pair();
    assert!(!graph.add_edge("A", "C", 1.0));
    assert!(!graph.add_edge("C", "A", 1.0));
    assert_eq!(
        graph.try_add_edge("C", "D", 1.0),
        Err(Error::VertexMissing("\"C\"".into()))
    );
    assert!(graph.add_edges().is_empty());
}

#[test]
fn removed_edge_needs_newer_add_to_return() {
    let mut graph = pair();
    assert!(graph.add_edge("A", "B", 1.0));
    assert!(graph.remove_edge(EdgeKey::new("A", "B"), 5.0));

    assert!(graph.add_edge("A", "B", 4.0));
    assert!(!graph.edge_exists(&EdgeKey::new("A", "B")));
    assert!(graph.add_edge("A", "B", 5.0));
    assert!(!graph.edge_exists(&EdgeKey::new("A", "B")));
    assert!(graph.add_edge("A", "B", 6.0));
    assert!(graph.edge_exists(&EdgeKey::new("A", "B")));
}

#[test]
fn removing_absent_edge_is_rejected() {
    let mut graph = pair();
    assert!(!graph.remove_edge(EdgeKey::new("A", "B"), 1.0));
    assert!(graph.add_edge("A", "B", 1.0));
    assert!(!graph.remove_edge(EdgeKey::new("B", "A"), 2.0));
    assert!(matches!(
        graph.try_remove_edge(EdgeKey::new("A", "C"), 2.0),
        Err(Error::EdgeMissing(_))
    ));
    assert!(graph.remove_edges().is_empty());
}

#[test]
fn edge_keys_keep_endpoint_order() {
    let mut graph = pair();
    assert!(graph.add_edge("A", "B", 1.0));
    assert!(!graph.edge_exists(&EdgeKey::new("B", "A")));
    assert!(graph.add_edge("B", "A", 1.0));
    assert_eq!(graph.add_edges().len(), 2);
    assert_eq!(graph.connected_vertices(&"A"), vec!["B", "B"]);
}

#[test]
fn repeated_add_edge_is_idempotent() {
    let mut once = pair();
    assert!(once.add_edge("A", "B", 3.0));
    let mut twice = pair();
    assert!(twice.add_edge("A", "B", 3.0));
    assert!(twice.add_edge("A", "B", 3.0));
    assert_eq!(once, twice);
}

#[test]
fn connected_vertices_after_re_add() {
    let mut graph = LwwGraphState::new();
    for (i, v) in ["A", "B", "C", "D", "E", "F", "G"].into_iter().enumerate() {
        graph.add_vertex(v, 100.0 + i as f64);
    }
    assert!(graph.add_edge("A", "B", 100.0));
    assert!(graph.remove_edge(EdgeKey::new("A", "B"), 101.0));
    assert!(graph.add_edge("A", "B", 109.0));
    assert_eq!(graph.connected_vertices(&"A"), vec!["B"]);
    assert!(graph.connected_vertices(&"F").is_empty());
}
