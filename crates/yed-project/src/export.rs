//! Graph → description.

use yed_core::{EdgeDefault, PropertyScope};
use yed_graph::{EdgeOptions, Graph, NodeOptions, PropertyValues, Scope};

use crate::schema::{EdgeDef, GraphDef, NodeDef, PropertyDef, PropertyMap, StyleMap};
use crate::validate::LATEST_VERSION;

/// Describe `graph`. Node keys are node ids and styles list only
/// non-default options; content without an option form is not exported.
pub fn export_graph(graph: &Graph) -> GraphDef {
    GraphDef {
        version: LATEST_VERSION,
        id: graph.id().to_string(),
        directed: graph.edge_default() == EdgeDefault::Directed,
        properties: graph
            .custom_properties()
            .iter()
            .map(|def| PropertyDef {
                scope: def.scope,
                name: def.name.clone(),
                kind: def.kind,
                default: Some(def.default.clone()),
            })
            .collect(),
        nodes: export_nodes(graph, Scope::Root),
        edges: export_edges(graph, Scope::Root),
    }
}

fn export_nodes(graph: &Graph, scope: Scope) -> Vec<NodeDef> {
    let Some(members) = graph.members(scope) else {
        return Vec::new();
    };
    members
        .nodes()
        .iter()
        .filter_map(|id| graph.node(*id))
        .map(|node| {
            let key = node.id().to_string();
            let style: StyleMap = NodeOptions::from_node(node)
                .to_pairs()
                .into_iter()
                .map(|(option, value)| (option.as_str().to_string(), value))
                .collect();
            let (nodes, edges) = if node.is_group() {
                let inner = Scope::Group(node.id());
                (export_nodes(graph, inner), export_edges(graph, inner))
            } else {
                (Vec::new(), Vec::new())
            };
            NodeDef {
                name: (node.name != key).then(|| node.name.clone()),
                key,
                group: node.is_group(),
                style,
                properties: changed_properties(graph, PropertyScope::Node, &node.properties),
                nodes,
                edges,
            }
        })
        .collect()
}

fn export_edges(graph: &Graph, scope: Scope) -> Vec<EdgeDef> {
    let Some(members) = graph.members(scope) else {
        return Vec::new();
    };
    members
        .edges()
        .iter()
        .filter_map(|id| graph.edge(*id))
        .map(|edge| EdgeDef {
            key: Some(edge.id().to_string()),
            source: edge.source().to_string(),
            target: edge.target().to_string(),
            style: EdgeOptions::from_edge(edge)
                .to_pairs()
                .into_iter()
                .map(|(option, value)| (option.as_str().to_string(), value))
                .collect(),
            properties: changed_properties(graph, PropertyScope::Edge, &edge.properties),
        })
        .collect()
}

/// Values that differ from their declared default.
fn changed_properties(graph: &Graph, scope: PropertyScope, values: &PropertyValues) -> PropertyMap {
    values
        .iter()
        .filter(|(name, value)| {
            graph
                .custom_property(scope, name)
                .is_none_or(|def| &def.default != *value)
        })
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use yed_core::PropertyType;

    #[test]
    fn exports_tree_with_non_default_values() {
        let mut graph = Graph::new();
        graph
            .define_custom_property(PropertyScope::Node, "tier", PropertyType::Int, "0")
            .unwrap();
        let group = graph.add_group("backend").unwrap();
        let db = graph
            .group(group)
            .unwrap()
            .add_node_with("db", &NodeOptions::new().with("shape", "hexagon").unwrap().property("tier", "2"))
            .unwrap();
        let web = graph.add_node("web").unwrap();
        graph.add_edge(web, db).unwrap();

        let def = export_graph(&graph);
        assert_eq!(def.nodes.len(), 2);
        let backend = &def.nodes[0];
        assert!(backend.group);
        assert_eq!(backend.key, group.to_string());
        assert_eq!(backend.name.as_deref(), Some("backend"));
        let db_def = &backend.nodes[0];
        assert_eq!(db_def.style.get("shape").map(String::as_str), Some("hexagon"));
        assert_eq!(db_def.properties.get("tier").map(String::as_str), Some("2"));
        assert!(def.nodes[1].properties.is_empty());
        assert_eq!(def.edges[0].source, web.to_string());
        assert_eq!(def.edges[0].key.as_deref(), Some("e0"));
    }
}
