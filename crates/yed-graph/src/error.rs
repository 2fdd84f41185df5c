//! Graph-specific error types.

use yed_core::{EdgeId, NodeId, PropertyScope, ValueError};

pub type GraphResult<T> = Result<T, GraphError>;

/// Graph construction and validation errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An edge endpoint does not resolve to any node.
    #[error("Missing endpoint: no node matches '{endpoint}'")]
    MissingEndpoint { endpoint: String },

    /// An endpoint name matches more than one node.
    #[error("Ambiguous endpoint: '{name}' matches {count} nodes")]
    AmbiguousEndpoint { name: String, count: usize },

    #[error("Unknown node {id}")]
    UnknownNode { id: NodeId },

    #[error("Unknown edge {id}")]
    UnknownEdge { id: EdgeId },

    #[error("Node {id} is not a group")]
    NotAGroup { id: NodeId },

    /// GraphML nesting rule: an edge lives in a graph that contains both endpoints.
    #[error("Group {group} is not an ancestor of both {from} and {to}")]
    EdgeOutsideScope {
        group: NodeId,
        from: NodeId,
        to: NodeId,
    },

    #[error("Unknown {scope} option '{key}'")]
    UnknownOption { scope: &'static str, key: String },

    #[error("Unknown {scope} custom property '{name}'")]
    UnknownCustomProperty { scope: PropertyScope, name: String },

    #[error("Custom property '{name}' is already defined for {scope}")]
    DuplicateCustomProperty { scope: PropertyScope, name: String },

    /// `url` and `description` have their own keys.
    #[error("Custom property name '{name}' is reserved")]
    ReservedPropertyName { name: String },

    #[error("Invalid value for custom property '{name}': {reason}")]
    InvalidPropertyValue { name: String, reason: ValueError },

    #[error("Duplicate id {id}")]
    DuplicateId { id: String },

    /// Internal bookkeeping disagrees (usually after hand-editing through `node_mut`).
    #[error("Inconsistent graph: {what}")]
    Inconsistent { what: String },

    #[error(transparent)]
    Value(#[from] ValueError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_entities() {
        let err = GraphError::EdgeOutsideScope {
            group: NodeId::from_index(3),
            from: NodeId::from_index(0),
            to: NodeId::from_index(5),
        };
        assert_eq!(err.to_string(), "Group n3 is not an ancestor of both n0 and n5");

        let err: GraphError = ValueError::InvalidColor {
            value: "red".into(),
        }
        .into();
        assert!(err.to_string().contains("red"));
    }
}
