#![cfg(feature = "serde")]

use lwwgraph_core::{EdgeKey, Error, GraphConfig, LwwGraphState, MergePolicy, Operation};

#[test]
fn json_round_trip_preserves_replica() {
    let mut graph = LwwGraphState::with_config(
        GraphConfig::default().with_merge_policy(MergePolicy::MaxTimestamp),
    );
    graph.add_vertex("A".to_string(), 1.0);
    graph.add_vertex("B".to_string(), 1.5);
    assert!(graph.add_edge("A".to_string(), "B".to_string(), 2.0));
    assert!(graph.remove_edge(EdgeKey::new("A".to_string(), "B".to_string()), 3.0));

    let json = graph.to_json().unwrap();
    let decoded = LwwGraphState::<String>::from_json(&json).unwrap();
    assert_eq!(decoded, graph);
    assert_eq!(decoded.config().merge_policy, MergePolicy::MaxTimestamp);
}

#[test]
fn decoded_replica_merges_like_the_sender() {
    let mut local = LwwGraphState::new();
    local.add_vertex(1u64, 1.0);

    let mut remote = LwwGraphState::new();
    remote.add_vertex(2u64, 2.0);
    let wire = remote.to_json().unwrap();

    local.merge(&LwwGraphState::from_json(&wire).unwrap());
    assert_eq!(local.vertices().copied().collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn missing_config_defaults_to_overwrite() {
    let json = r#"{
        "add_vertices": [[1, 1.0]],
        "remove_vertices": [],
        "add_edges": [],
        "remove_edges": []
    }"#;
    let graph = LwwGraphState::<u32>::from_json(json).unwrap();
    assert_eq!(graph.config().merge_policy, MergePolicy::Overwrite);
    assert!(graph.vertex_exists(&1));
}

#[test]
fn malformed_json_is_reported() {
    assert!(matches!(
        LwwGraphState::<u32>::from_json("{\"add_vertices\": 3}"),
        Err(Error::Serialization(_))
    ));
}

#[test]
fn operations_serialize_with_kind_tag() {
    let op = Operation::add_edge(1u32, 2u32, 4.0);
    let value = serde_json::to_value(&op).unwrap();
    assert_eq!(value["kind"], "add_edge");
    assert_eq!(value["edge"], serde_json::json!([1, 2]));
    let back: Operation<u32> = serde_json::from_value(value).unwrap();
    assert_eq!(back, op);
}

#[test]
fn config_parses_kebab_case_policy() {
    let config: GraphConfig = serde_json::from_str(r#"{"merge_policy":"max-timestamp"}"#).unwrap();
    assert_eq!(config.merge_policy, MergePolicy::MaxTimestamp);
    let config: GraphConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, GraphConfig::default());
}
