use yed_core::NodeId;

use crate::extension::{ForeignAttributes, Fragment};
use crate::label::NodeLabel;
use crate::options::NodeOptions;
use crate::property::PropertyValues;
use crate::style::{NodeRealizer, NodeStyle, UmlData};

/// A node or group. Groups own a nested scope of members.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<NodeId>,
    pub name: String,
    pub labels: Vec<NodeLabel>,
    pub style: NodeStyle,
    pub kind: NodeKind,
    pub url: Option<String>,
    pub description: Option<String>,
    pub properties: PropertyValues,
    /// Unrecognized `<data>` children of the `<node>` element.
    pub extensions: Vec<Fragment>,
    /// Unrecognized children of the realizer element.
    pub graphics_extensions: Vec<Fragment>,
    /// Attributes of the realizer element, e.g. a GenericNode `configuration`.
    pub graphics_attributes: ForeignAttributes,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Shape {
        realizer: NodeRealizer,
        uml: Option<UmlData>,
    },
    Group(GroupState),
}

/// Group-only state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupState {
    pub closed: bool,
    /// Attributes of `y:State` other than `closed`.
    pub state_attributes: ForeignAttributes,
    /// Realizers after the first one inside `y:Realizers`, verbatim.
    pub extra_realizers: Vec<Fragment>,
}

impl Node {
    /// A plain shape node labelled with its name.
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            parent: None,
            labels: vec![NodeLabel::new(name.clone())],
            name,
            style: NodeStyle::default(),
            kind: NodeKind::Shape {
                realizer: NodeRealizer::ShapeNode,
                uml: None,
            },
            url: None,
            description: None,
            properties: PropertyValues::new(),
            extensions: Vec::new(),
            graphics_extensions: Vec::new(),
            graphics_attributes: Vec::new(),
        }
    }

    /// An empty group titled with its name.
    pub fn new_group(id: NodeId, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            labels: vec![NodeLabel::group_title(name.clone())],
            kind: NodeKind::Group(GroupState::default()),
            ..Self::new(id, name)
        }
    }

    pub(crate) fn from_options(id: NodeId, name: String, options: &NodeOptions, group: bool) -> Self {
        let mut node = if group {
            Self::new_group(id, name)
        } else {
            Self::new(id, name)
        };
        node.style = options.style.clone();
        for label in &mut node.labels {
            label.style = options.label.clone();
        }
        node.kind = match node.kind {
            NodeKind::Group(state) => NodeKind::Group(GroupState {
                closed: options.closed,
                ..state
            }),
            NodeKind::Shape { .. } => NodeKind::Shape {
                realizer: options.realizer.clone(),
                uml: options.uml.clone(),
            },
        };
        node.url = options.url.clone();
        node.description = options.description.clone();
        node
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Owning group, `None` at the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group(_))
    }

    pub fn group_state(&self) -> Option<&GroupState> {
        match &self.kind {
            NodeKind::Group(state) => Some(state),
            NodeKind::Shape { .. } => None,
        }
    }

    pub fn group_state_mut(&mut self) -> Option<&mut GroupState> {
        match &mut self.kind {
            NodeKind::Group(state) => Some(state),
            NodeKind::Shape { .. } => None,
        }
    }

    /// Text of the first label, if any.
    pub fn label_text(&self) -> Option<&str> {
        self.labels.first().map(|label| label.text.as_str())
    }
}
