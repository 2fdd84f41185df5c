use core::fmt;

use yed_core::{EdgeId, NodeId};

use crate::extension::{ForeignAttributes, Fragment};
use crate::graph::Scope;
use crate::label::EdgeLabel;
use crate::options::EdgeOptions;
use crate::property::PropertyValues;
use crate::style::{EdgeRealizer, EdgeStyle};

/// A connection between two nodes, owned by one scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub(crate) id: EdgeId,
    pub(crate) source: NodeId,
    pub(crate) target: NodeId,
    pub(crate) owner: Scope,
    pub labels: Vec<EdgeLabel>,
    pub style: EdgeStyle,
    pub realizer: EdgeRealizer,
    pub directed: Option<bool>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub properties: PropertyValues,
    pub extensions: Vec<Fragment>,
    pub graphics_extensions: Vec<Fragment>,
    /// Attributes of the realizer element, e.g. a GenericNode `configuration`.
    pub graphics_attributes: ForeignAttributes,
}

impl Edge {
    pub fn new(id: EdgeId, source: NodeId, target: NodeId) -> Self {
        Self {
            id,
            source,
            target,
            owner: Scope::Root,
            labels: Vec::new(),
            style: EdgeStyle::default(),
            realizer: EdgeRealizer::default(),
            directed: None,
            url: None,
            description: None,
            properties: PropertyValues::new(),
            extensions: Vec::new(),
            graphics_extensions: Vec::new(),
            graphics_attributes: Vec::new(),
        }
    }

    pub(crate) fn from_options(id: EdgeId, source: NodeId, target: NodeId, options: &EdgeOptions) -> Self {
        Self {
            style: options.style.clone(),
            realizer: options.realizer.clone(),
            labels: options.labels.clone(),
            directed: options.directed,
            url: options.url.clone(),
            description: options.description.clone(),
            ..Self::new(id, source, target)
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Scope whose `<graph>` element holds this edge.
    pub fn owner(&self) -> Scope {
        self.owner
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// How a caller names an edge endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Id(NodeId),
    /// Must match exactly one node name.
    Name(String),
}

impl From<NodeId> for Endpoint {
    fn from(id: NodeId) -> Self {
        Endpoint::Id(id)
    }
}

impl From<&str> for Endpoint {
    fn from(name: &str) -> Self {
        Endpoint::Name(name.to_string())
    }
}

impl From<String> for Endpoint {
    fn from(name: String) -> Self {
        Endpoint::Name(name)
    }
}

impl From<&String> for Endpoint {
    fn from(name: &String) -> Self {
        Endpoint::Name(name.clone())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Id(id) => write!(f, "{id}"),
            Endpoint::Name(name) => f.write_str(name),
        }
    }
}
