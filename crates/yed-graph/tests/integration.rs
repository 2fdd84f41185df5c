//! Integration tests for yed-graph.

use yed_core::{ArrowType, PropertyScope, PropertyType, Shape};
use yed_graph::{EdgeOptions, Graph, GraphError, NodeOptions, Scope};

#[test]
fn build_small_diagram() {
    // Build: foo -> bar, both inside a group, plus a root edge to the group
    let mut graph = Graph::new();
    let group = graph.add_group("cluster").unwrap();
    let (foo, bar) = {
        let mut scope = graph.group(group).unwrap();
        let foo = scope.add_node("foo").unwrap();
        let square = NodeOptions::new().with("shape", "diamond").unwrap();
        let bar = scope.add_node_with("bar", &square).unwrap();
        scope.add_edge("foo", "bar").unwrap();
        (foo, bar)
    };
    let outside = graph.add_node("outside").unwrap();
    graph.add_edge(outside, group).unwrap();

    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.members(Scope::Group(group)).unwrap().nodes(), &[foo, bar]);
    assert_eq!(graph.node(bar).unwrap().style.shape, Shape::Diamond);
    assert_eq!(graph.node(foo).unwrap().parent(), Some(group));
    assert!(graph.is_ancestor(group, bar));
    assert!(!graph.is_ancestor(group, outside));
    graph.validate().unwrap();
}

#[test]
fn duplicate_names_are_distinct_nodes() {
    let mut graph = Graph::new();
    let first = graph.add_node("same").unwrap();
    let second = graph.add_node("same").unwrap();
    assert_ne!(first, second);
    assert_eq!(graph.find_by_name("same"), vec![first, second]);

    // ids still work where names are ambiguous
    graph.add_edge(first, second).unwrap();
    assert!(matches!(
        graph.add_edge("same", first),
        Err(GraphError::AmbiguousEndpoint { .. })
    ));
}

#[test]
fn nested_groups_nest_scopes() {
    let mut graph = Graph::new();
    let outer = graph.add_group("outer").unwrap();
    let inner = graph.group(outer).unwrap().add_group("inner").unwrap();
    let deep = graph
        .group(outer)
        .unwrap()
        .group(inner)
        .unwrap()
        .add_node("deep")
        .unwrap();

    assert_eq!(graph.scope_of(deep), Some(Scope::Group(inner)));
    assert!(graph.is_ancestor(outer, deep));
    // an edge owned by the outer group may reach into the inner one
    graph.group(outer).unwrap().add_edge(deep, inner).unwrap();
    assert_eq!(graph.stats().max_depth, 2);
}

#[test]
fn edge_options_become_style_and_labels() {
    let mut graph = Graph::new();
    graph
        .define_custom_property(PropertyScope::Edge, "weight", PropertyType::Double, "1.0")
        .unwrap();
    let a = graph.add_node("a").unwrap();
    let b = graph.add_node("b").unwrap();
    let options = EdgeOptions::from_pairs([
        ("arrowhead", "white_delta"),
        ("line_type", "dashed"),
        ("label", "uses"),
        ("target_label", "*"),
    ])
    .unwrap()
    .property("weight", "2.5");
    let e = graph.add_edge_with(Scope::Root, a, b, &options).unwrap();

    let edge = graph.edge(e).unwrap();
    assert_eq!(edge.style.arrowhead, ArrowType::WhiteDelta);
    assert_eq!(edge.labels.len(), 2);
    assert_eq!(edge.labels[1].position.as_deref(), Some("thead"));
    assert_eq!(edge.properties["weight"], "2.5");
}

#[test]
fn failed_edge_leaves_graph_unchanged() {
    let mut graph = Graph::new();
    let a = graph.add_node("a").unwrap();
    let before = graph.clone();
    assert!(graph.add_edge(a, "missing").is_err());
    assert_eq!(graph, before);
    // the failed attempt did not consume an id
    assert_eq!(graph.add_edge(a, a).unwrap().to_string(), "e0");
}

#[test]
fn remove_and_ungroup_keep_graph_valid() {
    let mut graph = Graph::new();
    let g = graph.add_group("g").unwrap();
    let ids: Vec<_> = (0..3)
        .map(|i| graph.group(g).unwrap().add_node(format!("n{i}")).unwrap())
        .collect();
    graph.group(g).unwrap().add_edge(ids[0], ids[1]).unwrap();
    graph.add_edge(ids[1], ids[2]).unwrap();

    graph.remove_node(ids[1]).unwrap();
    assert_eq!(graph.edge_count(), 0);
    graph.validate().unwrap();

    graph.ungroup(g).unwrap();
    assert!(graph.node(g).is_none());
    assert_eq!(graph.root().nodes(), &[ids[0], ids[2]]);
    graph.validate().unwrap();
}
