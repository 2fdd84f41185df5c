//! Description → Graph.
//!
//! Styles go through the string-keyed option sets, so a description fails
//! on exactly the keys and values the builder API rejects.

use std::collections::{HashMap, HashSet};

use tracing::debug;
use yed_core::{CompactId, EdgeDefault, EdgeId, NodeId};
use yed_graph::{EdgeOptions, Graph, NodeOptions, Scope};

use crate::schema::{EdgeDef, GraphDef, NodeDef};
use crate::validate::validate_def;
use crate::{ProjectError, ProjectResult};

pub fn build_graph(def: &GraphDef) -> ProjectResult<Graph> {
    validate_def(def)?;

    let edge_default = if def.directed {
        EdgeDefault::Directed
    } else {
        EdgeDefault::Undirected
    };
    let mut graph = Graph::with_id(def.id.clone(), edge_default);
    for property in &def.properties {
        let default = property
            .default
            .clone()
            .unwrap_or_else(|| property.kind.zero_value().to_string());
        graph.define_custom_property(property.scope, property.name.clone(), property.kind, default)?;
    }

    let mut nodes = Vec::new();
    flatten_nodes(&def.nodes, None, &mut nodes);
    let nodes = parents_first(creation_order(nodes, |(_, node)| node.key.parse::<NodeId>().ok()));

    let mut ids: HashMap<&str, NodeId> = HashMap::new();
    for (parent, node) in nodes {
        let scope = match parent {
            None => Scope::Root,
            Some(key) => Scope::Group(lookup(&ids, key)?),
        };
        let options = node_options(node)?;
        let id = if node.group {
            graph.add_group_with(scope, node.display_name(), &options)?
        } else {
            graph.add_node_with(scope, node.display_name(), &options)?
        };
        ids.insert(node.key.as_str(), id);
    }

    let mut edges: Vec<(Option<&str>, &EdgeDef)> = def.edges.iter().map(|edge| (None, edge)).collect();
    flatten_edges(&def.nodes, &mut edges);
    let edges = creation_order(edges, |(_, edge)| {
        edge.key.as_deref().and_then(|key| key.parse::<EdgeId>().ok())
    });

    for (owner, edge) in edges {
        let scope = match owner {
            None => Scope::Root,
            Some(key) => Scope::Group(lookup(&ids, key)?),
        };
        let source = lookup(&ids, &edge.source)?;
        let target = lookup(&ids, &edge.target)?;
        graph.add_edge_with(scope, source, target, &edge_options(edge)?)?;
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built graph from description"
    );
    Ok(graph)
}

fn lookup(ids: &HashMap<&str, NodeId>, key: &str) -> ProjectResult<NodeId> {
    ids.get(key).copied().ok_or_else(|| ProjectError::Build {
        what: format!("node '{key}' is used before it is created"),
    })
}

/// Pre-order: every group comes before its members.
fn flatten_nodes<'a>(nodes: &'a [NodeDef], parent: Option<&'a str>, out: &mut Vec<(Option<&'a str>, &'a NodeDef)>) {
    for node in nodes {
        out.push((parent, node));
        flatten_nodes(&node.nodes, Some(&node.key), out);
    }
}

fn flatten_edges<'a>(nodes: &'a [NodeDef], out: &mut Vec<(Option<&'a str>, &'a EdgeDef)>) {
    for node in nodes {
        out.extend(node.edges.iter().map(|edge| (Some(node.key.as_str()), edge)));
        flatten_edges(&node.nodes, out);
    }
}

/// Id order when every entry carries a canonical id, so a description
/// exported from a graph recreates the same ids. Document order otherwise.
fn creation_order<T, I: CompactId>(items: Vec<T>, id: impl Fn(&T) -> Option<I>) -> Vec<T> {
    let indices: Option<Vec<u32>> = items.iter().map(|item| id(item).map(|id| id.index())).collect();
    let Some(indices) = indices else {
        return items;
    };
    let mut keyed: Vec<(u32, T)> = indices.into_iter().zip(items).collect();
    keyed.sort_by_key(|(index, _)| *index);
    keyed.into_iter().map(|(_, item)| item).collect()
}

type NodeEntry<'a> = (Option<&'a str>, &'a NodeDef);

/// Stable reorder that holds each member back until its group exists.
fn parents_first(nodes: Vec<NodeEntry<'_>>) -> Vec<NodeEntry<'_>> {
    let mut out = Vec::with_capacity(nodes.len());
    let mut created: HashSet<&str> = HashSet::new();
    let mut waiting: HashMap<&str, Vec<NodeEntry<'_>>> = HashMap::new();
    for entry in nodes {
        match entry.0 {
            Some(parent) if !created.contains(parent) => waiting.entry(parent).or_default().push(entry),
            _ => {
                let mut ready = vec![entry];
                while let Some(entry) = ready.pop() {
                    let key = entry.1.key.as_str();
                    created.insert(key);
                    out.push(entry);
                    if let Some(members) = waiting.remove(key) {
                        ready.extend(members.into_iter().rev());
                    }
                }
            }
        }
    }
    out
}

fn node_options(node: &NodeDef) -> ProjectResult<NodeOptions> {
    let mut options = NodeOptions::new();
    for (key, value) in &node.style {
        options.set(key, value)?;
    }
    options.properties = node.properties.clone();
    Ok(options)
}

fn edge_options(edge: &EdgeDef) -> ProjectResult<EdgeOptions> {
    let mut options = EdgeOptions::new();
    for (key, value) in &edge.style {
        options.set(key, value)?;
    }
    options.properties = edge.properties.clone();
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PropertyDef;
    use yed_core::{PropertyScope, PropertyType, Shape};
    use yed_graph::GraphError;

    fn sample() -> GraphDef {
        let mut group = NodeDef::new("backend");
        group.group = true;
        group.nodes.push(NodeDef::new("db"));
        group.nodes.push(NodeDef::new("api"));
        group.edges.push(EdgeDef::new("api", "db"));

        let mut web = NodeDef::new("web");
        web.style.insert("shape".into(), "ellipse".into());
        web.properties.insert("tier".into(), "1".into());

        GraphDef {
            version: 1,
            id: "G".to_string(),
            directed: true,
            properties: vec![PropertyDef {
                scope: PropertyScope::Node,
                name: "tier".to_string(),
                kind: PropertyType::Int,
                default: None,
            }],
            nodes: vec![group, web],
            edges: vec![EdgeDef::new("web", "api")],
        }
    }

    #[test]
    fn builds_groups_styles_and_properties() {
        let graph = build_graph(&sample()).unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 2);

        let web = graph.find_by_name("web")[0];
        let api = graph.find_by_name("api")[0];
        let backend = graph.find_by_name("backend")[0];
        assert_eq!(graph.node(web).unwrap().style.shape, Shape::Ellipse);
        assert_eq!(graph.node(web).unwrap().properties["tier"], "1");
        assert_eq!(graph.node(api).unwrap().properties["tier"], "0");
        assert_eq!(graph.node(api).unwrap().parent(), Some(backend));
        graph.validate().unwrap();
    }

    #[test]
    fn bad_style_fails_like_the_api() {
        let mut def = sample();
        def.nodes[1].style.insert("shape".into(), "blob".into());
        let err = build_graph(&def).unwrap_err();
        assert!(matches!(err, ProjectError::Graph(GraphError::Value(_))), "{err}");

        let mut def = sample();
        def.edges[0].style.insert("colour".into(), "#000000".into());
        let err = build_graph(&def).unwrap_err();
        assert!(
            matches!(err, ProjectError::Graph(GraphError::UnknownOption { .. })),
            "{err}"
        );
    }

    #[test]
    fn canonical_keys_fix_creation_order() {
        let mut def = sample();
        // keys say `web` was created first
        fn rekey(node: &mut NodeDef, key: &str) {
            node.name = Some(node.key.clone());
            node.key = key.to_string();
        }
        rekey(&mut def.nodes[1], "n0");
        rekey(&mut def.nodes[0], "n1");
        rekey(&mut def.nodes[0].nodes[0], "n2");
        rekey(&mut def.nodes[0].nodes[1], "n3");
        def.nodes[0].edges[0] = EdgeDef::new("n3", "n2");
        def.edges[0] = EdgeDef::new("n0", "n3");

        let graph = build_graph(&def).unwrap();
        assert_eq!(graph.find_by_name("web"), vec![NodeId::from_index(0)]);
        assert_eq!(graph.find_by_name("backend"), vec![NodeId::from_index(1)]);
        assert_eq!(graph.find_by_name("api"), vec![NodeId::from_index(3)]);
    }

    #[test]
    fn members_keyed_below_their_group_still_build() {
        let mut def = sample();
        def.nodes[0].key = "n3".to_string();
        def.nodes[0].name = Some("backend".to_string());
        def.nodes[0].nodes[0].key = "n0".to_string();
        def.nodes[0].nodes[0].name = Some("db".to_string());
        def.nodes[0].nodes[1].key = "n1".to_string();
        def.nodes[0].nodes[1].name = Some("api".to_string());
        def.nodes[0].edges[0] = EdgeDef::new("n1", "n0");
        def.nodes[1].key = "n2".to_string();
        def.nodes[1].name = Some("web".to_string());
        def.edges[0] = EdgeDef::new("n2", "n1");

        let graph = build_graph(&def).unwrap();
        let backend = graph.find_by_name("backend")[0];
        let db = graph.find_by_name("db")[0];
        let web = graph.find_by_name("web")[0];
        assert_eq!(graph.node(db).unwrap().parent(), Some(backend));
        assert_eq!(graph.node(web).unwrap().parent(), None);
        assert!(backend < db);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn mixed_keys_keep_document_order() {
        let mut def = sample();
        def.nodes[1].key = "n0".to_string();
        def.nodes[1].name = Some("web".to_string());
        def.edges[0].source = "n0".to_string();
        let graph = build_graph(&def).unwrap();
        assert_eq!(graph.find_by_name("backend"), vec![NodeId::from_index(0)]);
    }
}
