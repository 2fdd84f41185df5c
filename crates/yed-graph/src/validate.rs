//! Graph validation logic.

use std::collections::BTreeSet;

use yed_core::PropertyScope;

use crate::error::{GraphError, GraphResult};
use crate::graph::{Graph, Scope};
use crate::property::PropertyValues;

fn inconsistent(what: impl Into<String>) -> GraphError {
    GraphError::Inconsistent { what: what.into() }
}

/// Validate membership, nesting, edge ownership and custom property values.
pub(crate) fn validate_graph(graph: &Graph) -> GraphResult<()> {
    validate_members(graph)?;
    validate_reachability(graph)?;
    validate_edges(graph)?;
    validate_properties(graph)
}

fn validate_members(graph: &Graph) -> GraphResult<()> {
    if !graph.members.contains_key(&Scope::Root) {
        return Err(inconsistent("root scope is missing"));
    }

    let mut listed = BTreeSet::new();
    for (scope, members) in &graph.members {
        if let Scope::Group(group) = scope {
            match graph.nodes.get(group) {
                Some(node) if node.is_group() => {}
                _ => return Err(inconsistent(format!("scope {group} is not a live group"))),
            }
        }
        for id in &members.nodes {
            let node = graph
                .nodes
                .get(id)
                .ok_or_else(|| inconsistent(format!("{scope:?} lists unknown node {id}")))?;
            if Scope::of_parent(node.parent) != *scope {
                return Err(inconsistent(format!("node {id} is listed outside its parent")));
            }
            if !listed.insert(*id) {
                return Err(inconsistent(format!("node {id} is listed twice")));
            }
        }
        for id in &members.edges {
            let edge = graph
                .edges
                .get(id)
                .ok_or_else(|| inconsistent(format!("{scope:?} lists unknown edge {id}")))?;
            if edge.owner != *scope {
                return Err(inconsistent(format!("edge {id} is listed outside its owner")));
            }
        }
    }

    for node in graph.nodes.values() {
        if !listed.contains(&node.id) {
            return Err(inconsistent(format!("node {} is not listed in any scope", node.id)));
        }
        let has_scope = graph.members.contains_key(&Scope::Group(node.id));
        if node.is_group() != has_scope {
            return Err(inconsistent(format!(
                "node {} group kind disagrees with its scope",
                node.id
            )));
        }
    }
    Ok(())
}

/// Every node must be reachable from the root; catches parent cycles.
fn validate_reachability(graph: &Graph) -> GraphResult<()> {
    let mut seen = BTreeSet::new();
    let mut stack = vec![Scope::Root];
    while let Some(scope) = stack.pop() {
        let Some(members) = graph.members.get(&scope) else {
            continue;
        };
        for id in &members.nodes {
            if seen.insert(*id) {
                stack.push(Scope::Group(*id));
            }
        }
    }
    if seen.len() != graph.nodes.len() {
        return Err(inconsistent("group nesting contains a cycle"));
    }
    Ok(())
}

fn validate_edges(graph: &Graph) -> GraphResult<()> {
    for edge in graph.edges.values() {
        for endpoint in [edge.source, edge.target] {
            if !graph.nodes.contains_key(&endpoint) {
                return Err(GraphError::MissingEndpoint {
                    endpoint: endpoint.to_string(),
                });
            }
        }
        graph.check_edge_scope(edge.owner, edge.source, edge.target)?;
    }
    Ok(())
}

fn validate_properties(graph: &Graph) -> GraphResult<()> {
    for node in graph.nodes.values() {
        check_values(graph, PropertyScope::Node, &node.properties)?;
    }
    for edge in graph.edges.values() {
        check_values(graph, PropertyScope::Edge, &edge.properties)?;
    }
    Ok(())
}

fn check_values(graph: &Graph, scope: PropertyScope, values: &PropertyValues) -> GraphResult<()> {
    for (name, value) in values {
        let def = graph
            .custom_property(scope, name)
            .ok_or_else(|| GraphError::UnknownCustomProperty {
                scope,
                name: name.clone(),
            })?;
        def.kind
            .check_value(value)
            .map_err(|reason| GraphError::InvalidPropertyValue {
                name: name.clone(),
                reason,
            })?;
    }
    for def in graph.custom_properties().iter().filter(|def| def.scope == scope) {
        if !values.contains_key(&def.name) {
            return Err(inconsistent(format!("missing value for property '{}'", def.name)));
        }
    }
    Ok(())
}
