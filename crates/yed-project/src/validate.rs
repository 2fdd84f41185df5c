//! Description validation logic.

use std::collections::HashSet;

use crate::schema::{EdgeDef, GraphDef, NodeDef};

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Unsupported feature: {feature} - {reason}")]
    Unsupported { feature: String, reason: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_def(def: &GraphDef) -> Result<(), ValidationError> {
    if def.version == 0 || def.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: def.version,
        });
    }

    let mut properties = HashSet::new();
    for property in &def.properties {
        if !properties.insert((property.scope, property.name.as_str())) {
            return Err(ValidationError::DuplicateId {
                id: property.name.clone(),
                context: format!("{} properties", property.scope),
            });
        }
    }

    let mut keys = HashSet::new();
    collect_keys(&def.nodes, &mut keys)?;

    let mut edge_keys = HashSet::new();
    validate_edges(&def.edges, "root", &keys, &mut edge_keys)?;
    validate_nested_edges(&def.nodes, &keys, &mut edge_keys)
}

fn collect_keys<'a>(nodes: &'a [NodeDef], keys: &mut HashSet<&'a str>) -> Result<(), ValidationError> {
    for node in nodes {
        if !keys.insert(node.key.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: node.key.clone(),
                context: "nodes".to_string(),
            });
        }
        if !node.group && (!node.nodes.is_empty() || !node.edges.is_empty()) {
            return Err(ValidationError::Unsupported {
                feature: "children".to_string(),
                reason: format!("node '{}' is not a group", node.key),
            });
        }
        collect_keys(&node.nodes, keys)?;
    }
    Ok(())
}

fn validate_nested_edges<'a>(
    nodes: &'a [NodeDef],
    keys: &HashSet<&str>,
    edge_keys: &mut HashSet<&'a str>,
) -> Result<(), ValidationError> {
    for node in nodes {
        validate_edges(&node.edges, &node.key, keys, edge_keys)?;
        validate_nested_edges(&node.nodes, keys, edge_keys)?;
    }
    Ok(())
}

fn validate_edges<'a>(
    edges: &'a [EdgeDef],
    owner: &str,
    keys: &HashSet<&str>,
    edge_keys: &mut HashSet<&'a str>,
) -> Result<(), ValidationError> {
    for edge in edges {
        for endpoint in [&edge.source, &edge.target] {
            if !keys.contains(endpoint.as_str()) {
                return Err(ValidationError::MissingReference {
                    id: endpoint.clone(),
                    context: format!("edges of '{owner}'"),
                });
            }
        }
        if let Some(key) = &edge.key {
            if !edge_keys.insert(key.as_str()) {
                return Err(ValidationError::DuplicateId {
                    id: key.clone(),
                    context: "edges".to_string(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(nodes: Vec<NodeDef>, edges: Vec<EdgeDef>) -> GraphDef {
        GraphDef {
            version: 1,
            id: "G".to_string(),
            directed: true,
            properties: vec![],
            nodes,
            edges,
        }
    }

    #[test]
    fn accepts_nested_references() {
        let mut group = NodeDef::new("g");
        group.group = true;
        group.nodes.push(NodeDef::new("a"));
        group.edges.push(EdgeDef::new("a", "b"));
        validate_def(&def(vec![group, NodeDef::new("b")], vec![])).unwrap();
    }

    #[test]
    fn rejects_bad_descriptions() {
        let mut bad_version = def(vec![], vec![]);
        bad_version.version = 7;
        assert!(matches!(
            validate_def(&bad_version),
            Err(ValidationError::UnsupportedVersion { version: 7 })
        ));

        let mut group = NodeDef::new("g");
        group.group = true;
        group.nodes.push(NodeDef::new("a"));
        let duplicate = def(vec![group, NodeDef::new("a")], vec![]);
        assert!(matches!(
            validate_def(&duplicate),
            Err(ValidationError::DuplicateId { .. })
        ));

        let dangling = def(vec![NodeDef::new("a")], vec![EdgeDef::new("a", "z")]);
        assert!(matches!(
            validate_def(&dangling),
            Err(ValidationError::MissingReference { .. })
        ));

        let mut leaf = NodeDef::new("leaf");
        leaf.nodes.push(NodeDef::new("child"));
        assert!(matches!(
            validate_def(&def(vec![leaf], vec![])),
            Err(ValidationError::Unsupported { .. })
        ));
    }
}
