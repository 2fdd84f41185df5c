//! Custom data keys declared on a graph.

use std::collections::BTreeMap;

use yed_core::{PropertyScope, PropertyType};

/// Values of custom properties on one entity, by property name.
pub type PropertyValues = BTreeMap<String, String>;

/// One custom property: a GraphML `<key>` with `attr.name`, `attr.type` and a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomPropertyDef {
    pub scope: PropertyScope,
    pub name: String,
    pub kind: PropertyType,
    pub default: String,
}

impl CustomPropertyDef {
    /// Key id used in the document, e.g. `node_cost`.
    pub fn key_id(&self) -> String {
        format!("{}_{}", self.scope, self.name)
    }
}
