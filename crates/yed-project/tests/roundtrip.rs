use yed_core::{PropertyScope, PropertyType};
use yed_graph::{EdgeOptions, Graph, GraphError, NodeOptions, Scope};
use yed_graphml::{from_graphml, to_graphml};
use yed_project::schema::*;
use yed_project::{
    ProjectError, build_graph, export_graph, load_def, load_json, load_yaml, save_json, save_yaml,
};

const DESCRIPTION: &str = r##"
version: 1
properties:
  - scope: node
    name: owner
    type: string
  - scope: edge
    name: latency
    type: double
    default: "0.5"
nodes:
  - key: edge
    name: Edge tier
    group: true
    style:
      fill: "#DDEEFF"
    nodes:
      - key: lb
        name: Load balancer
        style:
          shape: hexagon
      - key: cache
    edges:
      - source: lb
        target: cache
        style:
          line_type: dashed
  - key: db
    style:
      shape: ellipse
    properties:
      owner: data team
edges:
  - source: lb
    target: db
    style:
      label: reads
      target_label: "*"
    properties:
      latency: "2.0"
"##;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("yed_project_{}_{name}", std::process::id()))
}

#[test]
fn yaml_description_builds() {
    let def: GraphDef = serde_yaml::from_str(DESCRIPTION).unwrap();
    assert_eq!(def.id, "G");
    assert!(def.directed);

    let graph = build_graph(&def).unwrap();
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 2);
    let lb = graph.find_by_name("Load balancer")[0];
    let db = graph.find_by_name("db")[0];
    assert_eq!(graph.node(db).unwrap().properties["owner"], "data team");
    assert_eq!(graph.node(lb).unwrap().properties["owner"], "");

    let edge = graph.edges().find(|edge| edge.target() == db).unwrap();
    assert_eq!(edge.properties["latency"], "2.0");
    assert_eq!(edge.labels.len(), 2);
    assert_eq!(edge.owner(), Scope::Root);
}

#[test]
fn description_roundtrip_serializes_identically() {
    let def: GraphDef = serde_yaml::from_str(DESCRIPTION).unwrap();
    let graph = build_graph(&def).unwrap();
    let exported = export_graph(&graph);
    let rebuilt = build_graph(&exported).unwrap();
    assert_eq!(to_graphml(&rebuilt).unwrap(), to_graphml(&graph).unwrap());
    // and exporting again is stable
    assert_eq!(export_graph(&rebuilt), exported);
}

#[test]
fn api_built_graph_roundtrips_through_description() {
    let mut graph = Graph::new();
    graph
        .define_custom_property(PropertyScope::Node, "rank", PropertyType::Int, "0")
        .unwrap();
    let a = graph.add_node("a").unwrap();
    let group = graph
        .add_group_with(Scope::Root, "folder", &NodeOptions::new().with("closed", "true").unwrap())
        .unwrap();
    let b = graph
        .group(group)
        .unwrap()
        .add_node_with(
            "b",
            &NodeOptions::from_pairs([("uml_stereotype", "service"), ("uml_methods", "run()")])
                .unwrap()
                .property("rank", "3"),
        )
        .unwrap();
    let options = EdgeOptions::from_pairs([
        ("target_label", "many"),
        ("label", "calls"),
        ("label_border_color", "#FF0000"),
        ("directed", "false"),
    ])
    .unwrap();
    graph.add_edge_with(Scope::Root, b, a, &options).unwrap();
    graph.add_edge(a, group).unwrap();

    let rebuilt = build_graph(&export_graph(&graph)).unwrap();
    assert_eq!(to_graphml(&rebuilt).unwrap(), to_graphml(&graph).unwrap());
}

#[test]
fn group_with_lower_keyed_member_rebuilds_from_export() {
    let text = r#"<graphml><graph id="G" edgedefault="directed">
        <node id="n1" yfiles.foldertype="group"><graph id="n1:"><node id="n0"/></graph></node>
        <node id="n2"/>
        <edge id="e0" source="n2" target="n0"/>
    </graph></graphml>"#;
    let graph = from_graphml(text).unwrap();
    let def = export_graph(&graph);

    let rebuilt = build_graph(&def).unwrap();
    assert_eq!(rebuilt.node_count(), 3);
    assert_eq!(rebuilt.edge_count(), 1);
    let group = rebuilt.find_by_name("n1")[0];
    let member = rebuilt.find_by_name("n0")[0];
    assert!(rebuilt.node(group).unwrap().is_group());
    assert_eq!(rebuilt.node(member).unwrap().parent(), Some(group));
    assert!(rebuilt.is_ancestor(group, member));
}

#[test]
fn files_roundtrip_in_both_formats() {
    let def = export_graph(&build_graph(&serde_yaml::from_str(DESCRIPTION).unwrap()).unwrap());

    let yaml = temp_path("roundtrip.yaml");
    save_yaml(&yaml, &def).unwrap();
    assert_eq!(load_yaml(&yaml).unwrap(), def);
    assert_eq!(load_def(&yaml).unwrap(), def);

    let json = temp_path("roundtrip.json");
    save_json(&json, &def).unwrap();
    assert_eq!(load_json(&json).unwrap(), def);
    assert_eq!(load_def(&json).unwrap(), def);

    std::fs::remove_file(yaml).unwrap();
    std::fs::remove_file(json).unwrap();
}

#[test]
fn unknown_style_key_fails() {
    let mut def: GraphDef = serde_yaml::from_str(DESCRIPTION).unwrap();
    def.nodes[1].style.insert("colour".into(), "red".into());
    let err = build_graph(&def).unwrap_err();
    assert!(matches!(
        err,
        ProjectError::Graph(GraphError::UnknownOption { .. })
    ));
}

#[test]
fn unknown_property_type_fails_to_parse() {
    let text = "version: 1\nproperties:\n  - scope: node\n    name: x\n    type: float\n";
    assert!(serde_yaml::from_str::<GraphDef>(text).is_err());
}
