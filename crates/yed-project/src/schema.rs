//! Graph description schema.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use yed_core::{PropertyScope, PropertyType};

/// String-keyed option values, as accepted by `NodeOptions`/`EdgeOptions`.
pub type StyleMap = BTreeMap<String, String>;
pub type PropertyMap = BTreeMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphDef {
    pub version: u32,
    #[serde(default = "default_graph_id")]
    pub id: String,
    #[serde(default = "default_directed")]
    pub directed: bool,
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
    #[serde(default)]
    pub edges: Vec<EdgeDef>,
}

fn default_graph_id() -> String {
    yed_graph::defaults::GRAPH_ID.to_string()
}

fn default_directed() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyDef {
    pub scope: PropertyScope,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    /// Falls back to the type's zero value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDef {
    /// Reference used by edges; unique across the whole description.
    pub key: String,
    /// Display name, defaults to the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub group: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style: StyleMap,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: PropertyMap,
    /// Members; groups only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<NodeDef>,
    /// Edges owned by this group.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<EdgeDef>,
}

impl NodeDef {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: None,
            group: false,
            style: StyleMap::new(),
            properties: PropertyMap::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.key)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeDef {
    /// Optional edge id, fixes creation order when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style: StyleMap,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: PropertyMap,
}

impl EdgeDef {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            key: None,
            source: source.into(),
            target: target.into(),
            style: StyleMap::new(),
            properties: PropertyMap::new(),
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
