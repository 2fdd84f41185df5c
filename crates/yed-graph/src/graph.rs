use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};
use yed_core::{EdgeDefault, EdgeId, IdCounter, NodeId, PropertyScope, PropertyType};

use crate::defaults;
use crate::edge::{Edge, Endpoint};
use crate::error::{GraphError, GraphResult};
use crate::extension::{ForeignAttributes, Fragment};
use crate::label::NodeLabel;
use crate::node::Node;
use crate::options::{EdgeOptions, NodeOptions};
use crate::property::{CustomPropertyDef, PropertyValues};
use crate::scope::GroupScope;
use crate::stats::GraphStats;
use crate::validate;

const RESERVED_PROPERTY_NAMES: &[&str] = &["url", "description"];

/// Where an entity lives: the top-level graph or inside a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    Root,
    Group(NodeId),
}

impl Scope {
    pub fn group(self) -> Option<NodeId> {
        match self {
            Scope::Root => None,
            Scope::Group(id) => Some(id),
        }
    }

    pub(crate) fn of_parent(parent: Option<NodeId>) -> Self {
        parent.map_or(Scope::Root, Scope::Group)
    }
}

impl From<NodeId> for Scope {
    fn from(id: NodeId) -> Self {
        Scope::Group(id)
    }
}

/// Ordered members of one scope, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Members {
    pub(crate) nodes: Vec<NodeId>,
    pub(crate) edges: Vec<EdgeId>,
}

impl Members {
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Document-level content carried through unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphExtensions {
    /// `<key>` declarations with no modelled meaning.
    pub keys: Vec<Fragment>,
    /// `<data>` children of the top-level `<graph>`.
    pub graph_data: Vec<Fragment>,
    /// Other children of `<graphml>`, such as the `y:Resources` data block.
    pub document_data: Vec<Fragment>,
    /// Attributes on `<graphml>` besides the standard namespaces.
    pub document_attributes: ForeignAttributes,
}

/// A yEd diagram: nodes, groups and edges in nested scopes.
///
/// Entities live in id-keyed arenas; each scope keeps its members in
/// insertion order, which is the order they are written in.
#[derive(Debug, Clone)]
pub struct Graph {
    id: String,
    edge_default: EdgeDefault,
    pub(crate) nodes: BTreeMap<NodeId, Node>,
    pub(crate) edges: BTreeMap<EdgeId, Edge>,
    pub(crate) members: BTreeMap<Scope, Members>,
    pub(crate) properties: Vec<CustomPropertyDef>,
    pub extensions: GraphExtensions,
    node_ids: IdCounter<NodeId>,
    edge_ids: IdCounter<EdgeId>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

/// Id counters are allocation state, not content, and are not compared.
impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.edge_default == other.edge_default
            && self.nodes == other.nodes
            && self.edges == other.edges
            && self.members == other.members
            && self.properties == other.properties
            && self.extensions == other.extensions
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::with_id(defaults::GRAPH_ID, EdgeDefault::Directed)
    }

    pub fn with_id(id: impl Into<String>, edge_default: EdgeDefault) -> Self {
        let mut members = BTreeMap::new();
        members.insert(Scope::Root, Members::default());
        Self {
            id: id.into(),
            edge_default,
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            members,
            properties: Vec::new(),
            extensions: GraphExtensions::default(),
            node_ids: IdCounter::new(),
            edge_ids: IdCounter::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn edge_default(&self) -> EdgeDefault {
        self.edge_default
    }

    pub fn set_edge_default(&mut self, edge_default: EdgeDefault) {
        self.edge_default = edge_default;
    }

    // ---- Construction ----

    pub fn add_node(&mut self, name: impl Into<String>) -> GraphResult<NodeId> {
        self.add_node_with(Scope::Root, name, &NodeOptions::default())
    }

    /// Create a node in `scope` styled by `options`.
    pub fn add_node_with(
        &mut self,
        scope: Scope,
        name: impl Into<String>,
        options: &NodeOptions,
    ) -> GraphResult<NodeId> {
        self.create_node(scope, name.into(), options, false)
    }

    pub fn add_group(&mut self, name: impl Into<String>) -> GraphResult<NodeId> {
        self.add_group_with(Scope::Root, name, &NodeOptions::default())
    }

    pub fn add_group_with(
        &mut self,
        scope: Scope,
        name: impl Into<String>,
        options: &NodeOptions,
    ) -> GraphResult<NodeId> {
        self.create_node(scope, name.into(), options, true)
    }

    /// Handle for building inside an existing group.
    pub fn group(&mut self, id: NodeId) -> GraphResult<GroupScope<'_>> {
        self.ensure_scope(Scope::Group(id))?;
        Ok(GroupScope::new(self, id))
    }

    pub fn add_edge(
        &mut self,
        source: impl Into<Endpoint>,
        target: impl Into<Endpoint>,
    ) -> GraphResult<EdgeId> {
        self.add_edge_with(Scope::Root, source, target, &EdgeOptions::default())
    }

    /// Create an edge owned by `scope`.
    ///
    /// Both endpoints must already exist. An edge owned by a group must have
    /// both endpoints inside that group (at any depth).
    pub fn add_edge_with(
        &mut self,
        scope: Scope,
        source: impl Into<Endpoint>,
        target: impl Into<Endpoint>,
        options: &EdgeOptions,
    ) -> GraphResult<EdgeId> {
        self.ensure_scope(scope)?;
        let source = self.resolve(&source.into())?;
        let target = self.resolve(&target.into())?;
        self.check_edge_scope(scope, source, target)?;
        let properties = self.complete_properties(PropertyScope::Edge, &options.properties)?;

        let id = self.edge_ids.allocate()?;
        let mut edge = Edge::from_options(id, source, target, options);
        edge.properties = properties;
        self.attach_edge(scope, edge);
        debug!(%id, %source, %target, "added edge");
        Ok(id)
    }

    fn create_node(
        &mut self,
        scope: Scope,
        name: String,
        options: &NodeOptions,
        group: bool,
    ) -> GraphResult<NodeId> {
        self.ensure_scope(scope)?;
        let properties = self.complete_properties(PropertyScope::Node, &options.properties)?;

        let id = self.node_ids.allocate()?;
        let mut node = Node::from_options(id, name, options, group);
        node.properties = properties;
        debug!(%id, name = %node.name, group, "added node");
        self.attach_node(scope, node);
        Ok(id)
    }

    /// Insert a node that already carries its id, e.g. one read from a file.
    ///
    /// Missing custom property values are filled with their defaults and the
    /// id counter is moved past `node`'s id.
    pub fn restore_node(&mut self, scope: Scope, mut node: Node) -> GraphResult<NodeId> {
        self.ensure_scope(scope)?;
        let id = node.id;
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateId { id: id.to_string() });
        }
        node.properties = self.complete_properties(PropertyScope::Node, &node.properties)?;
        self.node_ids.reserve(id);
        self.attach_node(scope, node);
        Ok(id)
    }

    /// Insert an edge that already carries its id and endpoints.
    pub fn restore_edge(&mut self, scope: Scope, mut edge: Edge) -> GraphResult<EdgeId> {
        self.ensure_scope(scope)?;
        let id = edge.id;
        if self.edges.contains_key(&id) {
            return Err(GraphError::DuplicateId { id: id.to_string() });
        }
        for endpoint in [edge.source, edge.target] {
            if !self.nodes.contains_key(&endpoint) {
                return Err(GraphError::MissingEndpoint {
                    endpoint: endpoint.to_string(),
                });
            }
        }
        self.check_edge_scope(scope, edge.source, edge.target)?;
        edge.properties = self.complete_properties(PropertyScope::Edge, &edge.properties)?;
        self.edge_ids.reserve(id);
        self.attach_edge(scope, edge);
        Ok(id)
    }

    fn attach_node(&mut self, scope: Scope, mut node: Node) {
        let id = node.id;
        node.parent = scope.group();
        if node.is_group() {
            self.members.entry(Scope::Group(id)).or_default();
        }
        self.members.entry(scope).or_default().nodes.push(id);
        self.nodes.insert(id, node);
    }

    fn attach_edge(&mut self, scope: Scope, mut edge: Edge) {
        let id = edge.id;
        edge.owner = scope;
        self.members.entry(scope).or_default().edges.push(id);
        self.edges.insert(id, edge);
    }

    fn ensure_scope(&self, scope: Scope) -> GraphResult<()> {
        match scope {
            Scope::Root => Ok(()),
            Scope::Group(id) => match self.nodes.get(&id) {
                None => Err(GraphError::UnknownNode { id }),
                Some(node) if !node.is_group() => Err(GraphError::NotAGroup { id }),
                Some(_) => Ok(()),
            },
        }
    }

    pub(crate) fn check_edge_scope(
        &self,
        scope: Scope,
        source: NodeId,
        target: NodeId,
    ) -> GraphResult<()> {
        match scope {
            Scope::Root => Ok(()),
            Scope::Group(group) => {
                if self.is_ancestor(group, source) && self.is_ancestor(group, target) {
                    Ok(())
                } else {
                    Err(GraphError::EdgeOutsideScope {
                        group,
                        from: source,
                        to: target,
                    })
                }
            }
        }
    }

    // ---- Lookup ----

    /// Resolve an endpoint to a node id.
    pub fn resolve(&self, endpoint: &Endpoint) -> GraphResult<NodeId> {
        match endpoint {
            Endpoint::Id(id) if self.nodes.contains_key(id) => Ok(*id),
            Endpoint::Id(id) => Err(GraphError::MissingEndpoint {
                endpoint: id.to_string(),
            }),
            Endpoint::Name(name) => match self.find_by_name(name).as_slice() {
                [] => Err(GraphError::MissingEndpoint {
                    endpoint: name.clone(),
                }),
                [id] => Ok(*id),
                many => Err(GraphError::AmbiguousEndpoint {
                    name: name.clone(),
                    count: many.len(),
                }),
            },
        }
    }

    /// Every node named `name`, in id order.
    pub fn find_by_name(&self, name: &str) -> Vec<NodeId> {
        self.nodes
            .values()
            .filter(|node| node.name == name)
            .map(|node| node.id)
            .collect()
    }

    /// True if `node` is nested (at any depth) inside `group`.
    pub fn is_ancestor(&self, group: NodeId, node: NodeId) -> bool {
        let mut current = self.nodes.get(&node).and_then(|n| n.parent);
        // bounded so a hand-made parent cycle cannot hang the walk
        for _ in 0..self.nodes.len() {
            match current {
                Some(parent) if parent == group => return true,
                Some(parent) => current = self.nodes.get(&parent).and_then(|n| n.parent),
                None => return false,
            }
        }
        false
    }

    /// Scope that owns `node`.
    pub fn scope_of(&self, node: NodeId) -> Option<Scope> {
        self.nodes.get(&node).map(|n| Scope::of_parent(n.parent))
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(&id)
    }

    /// All nodes and groups, in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Members of `scope`, or `None` if it is not a live group.
    pub fn members(&self, scope: Scope) -> Option<&Members> {
        self.members.get(&scope)
    }

    pub fn root(&self) -> &Members {
        // the root entry is created in `with_id` and never removed
        static EMPTY: Members = Members {
            nodes: Vec::new(),
            edges: Vec::new(),
        };
        self.members.get(&Scope::Root).unwrap_or(&EMPTY)
    }

    /// Edges that touch `node` as source or target.
    pub fn incident_edges(&self, node: NodeId) -> Vec<EdgeId> {
        self.edges
            .values()
            .filter(|edge| edge.source == node || edge.target == node)
            .map(|edge| edge.id)
            .collect()
    }

    // ---- Mutation ----

    pub fn remove_edge(&mut self, id: EdgeId) -> GraphResult<Edge> {
        let edge = self.edges.remove(&id).ok_or(GraphError::UnknownEdge { id })?;
        if let Some(members) = self.members.get_mut(&edge.owner) {
            members.edges.retain(|e| *e != id);
        }
        debug!(%id, "removed edge");
        Ok(edge)
    }

    /// Remove a node. A group takes all of its members with it, and every
    /// edge touching a removed node is dropped, whichever scope owns it.
    pub fn remove_node(&mut self, id: NodeId) -> GraphResult<Node> {
        if !self.nodes.contains_key(&id) {
            return Err(GraphError::UnknownNode { id });
        }
        let doomed = self.subtree(id);
        let dangling: Vec<EdgeId> = self
            .edges
            .values()
            .filter(|edge| doomed.contains(&edge.source) || doomed.contains(&edge.target))
            .map(|edge| edge.id)
            .collect();
        for edge in dangling {
            self.remove_edge(edge)?;
        }

        let scope = self.scope_of(id).unwrap_or(Scope::Root);
        if let Some(members) = self.members.get_mut(&scope) {
            members.nodes.retain(|n| *n != id);
        }
        let mut removed = None;
        for node in &doomed {
            self.members.remove(&Scope::Group(*node));
            let taken = self.nodes.remove(node);
            if *node == id {
                removed = taken;
            }
        }
        debug!(%id, count = doomed.len(), "removed node");
        removed.ok_or(GraphError::UnknownNode { id })
    }

    /// `id` and every node nested inside it.
    fn subtree(&self, id: NodeId) -> BTreeSet<NodeId> {
        let mut found = BTreeSet::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !found.insert(current) {
                continue;
            }
            if let Some(members) = self.members.get(&Scope::Group(current)) {
                stack.extend(members.nodes.iter().copied());
            }
        }
        found
    }

    /// Dissolve a group. Its members take the group's place in the parent
    /// scope; edges attached to the group itself are dropped.
    pub fn ungroup(&mut self, id: NodeId) -> GraphResult<Vec<NodeId>> {
        self.ensure_scope(Scope::Group(id))?;
        for edge in self.incident_edges(id) {
            self.remove_edge(edge)?;
        }

        let parent = self.scope_of(id).unwrap_or(Scope::Root);
        let moved = self.members.remove(&Scope::Group(id)).unwrap_or_default();
        for child in &moved.nodes {
            if let Some(node) = self.nodes.get_mut(child) {
                node.parent = parent.group();
            }
        }
        for edge in &moved.edges {
            if let Some(edge) = self.edges.get_mut(edge) {
                edge.owner = parent;
            }
        }

        let siblings = self.members.entry(parent).or_default();
        match siblings.nodes.iter().position(|n| *n == id) {
            Some(at) => {
                siblings.nodes.splice(at..=at, moved.nodes.iter().copied());
            }
            None => siblings.nodes.extend(moved.nodes.iter().copied()),
        }
        siblings.edges.extend(moved.edges.iter().copied());
        self.nodes.remove(&id);
        debug!(%id, moved = moved.nodes.len(), "ungrouped");
        Ok(moved.nodes)
    }

    /// Change a node's name and the text of its first label.
    pub fn rename_node(&mut self, id: NodeId, name: impl Into<String>) -> GraphResult<()> {
        let group = self.nodes.get(&id).is_some_and(Node::is_group);
        let node = self.nodes.get_mut(&id).ok_or(GraphError::UnknownNode { id })?;
        let name = name.into();
        match node.labels.first_mut() {
            Some(label) => label.text = name.clone(),
            None if group => node.labels.push(NodeLabel::group_title(name.clone())),
            None => node.labels.push(NodeLabel::new(name.clone())),
        }
        node.name = name;
        Ok(())
    }

    // ---- Custom properties ----

    /// Declare a custom property. Existing entities of `scope` get the default.
    pub fn define_custom_property(
        &mut self,
        scope: PropertyScope,
        name: impl Into<String>,
        kind: PropertyType,
        default: impl Into<String>,
    ) -> GraphResult<()> {
        let name = name.into();
        let default = default.into();
        if RESERVED_PROPERTY_NAMES.contains(&name.as_str()) {
            return Err(GraphError::ReservedPropertyName { name });
        }
        if self.custom_property(scope, &name).is_some() {
            return Err(GraphError::DuplicateCustomProperty { scope, name });
        }
        kind.check_value(&default)
            .map_err(|reason| GraphError::InvalidPropertyValue {
                name: name.clone(),
                reason,
            })?;

        match scope {
            PropertyScope::Node => {
                for node in self.nodes.values_mut() {
                    node.properties.insert(name.clone(), default.clone());
                }
            }
            PropertyScope::Edge => {
                for edge in self.edges.values_mut() {
                    edge.properties.insert(name.clone(), default.clone());
                }
            }
        }
        debug!(%scope, %name, %kind, "defined custom property");
        self.properties.push(CustomPropertyDef {
            scope,
            name,
            kind,
            default,
        });
        Ok(())
    }

    /// Declared custom properties, in declaration order.
    pub fn custom_properties(&self) -> &[CustomPropertyDef] {
        &self.properties
    }

    pub fn custom_property(&self, scope: PropertyScope, name: &str) -> Option<&CustomPropertyDef> {
        self.properties
            .iter()
            .find(|def| def.scope == scope && def.name == name)
    }

    pub fn set_node_property(&mut self, id: NodeId, name: &str, value: impl Into<String>) -> GraphResult<()> {
        let value = self.check_property(PropertyScope::Node, name, value.into())?;
        let node = self.nodes.get_mut(&id).ok_or(GraphError::UnknownNode { id })?;
        node.properties.insert(name.to_string(), value);
        Ok(())
    }

    pub fn set_edge_property(&mut self, id: EdgeId, name: &str, value: impl Into<String>) -> GraphResult<()> {
        let value = self.check_property(PropertyScope::Edge, name, value.into())?;
        let edge = self.edges.get_mut(&id).ok_or(GraphError::UnknownEdge { id })?;
        edge.properties.insert(name.to_string(), value);
        Ok(())
    }

    fn check_property(&self, scope: PropertyScope, name: &str, value: String) -> GraphResult<String> {
        let def = self
            .custom_property(scope, name)
            .ok_or_else(|| GraphError::UnknownCustomProperty {
                scope,
                name: name.to_string(),
            })?;
        def.kind
            .check_value(&value)
            .map_err(|reason| GraphError::InvalidPropertyValue {
                name: name.to_string(),
                reason,
            })?;
        Ok(value)
    }

    /// Check `given` against the declarations of `scope` and fill in defaults.
    pub(crate) fn complete_properties(
        &self,
        scope: PropertyScope,
        given: &PropertyValues,
    ) -> GraphResult<PropertyValues> {
        let mut values = PropertyValues::new();
        for (name, value) in given {
            let value = self.check_property(scope, name, value.clone())?;
            values.insert(name.clone(), value);
        }
        for def in self.properties.iter().filter(|def| def.scope == scope) {
            values
                .entry(def.name.clone())
                .or_insert_with(|| def.default.clone());
        }
        Ok(values)
    }

    // ---- Reports ----

    pub fn stats(&self) -> GraphStats {
        GraphStats::collect(self)
    }

    /// Check structural consistency: membership, nesting, edge scopes and
    /// custom property values.
    pub fn validate(&self) -> GraphResult<()> {
        validate::validate_graph(self)
    }

    /// Re-home an edge whose owning scope no longer contains both endpoints.
    pub fn relocate_edge(&mut self, id: EdgeId, scope: Scope) -> GraphResult<()> {
        self.ensure_scope(scope)?;
        let edge = self.edges.get(&id).ok_or(GraphError::UnknownEdge { id })?;
        let (old, source, target) = (edge.owner, edge.source, edge.target);
        self.check_edge_scope(scope, source, target)?;
        if let Some(members) = self.members.get_mut(&old) {
            members.edges.retain(|e| *e != id);
        }
        self.members.entry(scope).or_default().edges.push(id);
        if let Some(edge) = self.edges.get_mut(&id) {
            edge.owner = scope;
        }
        warn!(%id, from = ?old, to = ?scope, "relocated edge");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::NodeRealizer;

    fn names(graph: &Graph, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .map(|id| graph.node(*id).unwrap().name.clone())
            .collect()
    }

    #[test]
    fn ids_are_sequential_and_never_reused() {
        let mut graph = Graph::new();
        let a = graph.add_node("a").unwrap();
        let b = graph.add_node("b").unwrap();
        assert_eq!((a.to_string(), b.to_string()), ("n0".into(), "n1".into()));

        graph.remove_node(b).unwrap();
        let c = graph.add_node("c").unwrap();
        assert_eq!(c.to_string(), "n2");

        let e = graph.add_edge(a, c).unwrap();
        assert_eq!(e.to_string(), "e0");
    }

    #[test]
    fn endpoints_resolve_by_name() {
        let mut graph = Graph::new();
        let a = graph.add_node("a").unwrap();
        let b = graph.add_node("b").unwrap();
        let e = graph.add_edge("a", "b").unwrap();
        let edge = graph.edge(e).unwrap();
        assert_eq!((edge.source(), edge.target()), (a, b));

        let err = graph.add_edge("a", "zzz").unwrap_err();
        assert_eq!(
            err,
            GraphError::MissingEndpoint {
                endpoint: "zzz".into()
            }
        );

        graph.add_node("a").unwrap();
        let err = graph.add_edge("a", "b").unwrap_err();
        assert!(matches!(err, GraphError::AmbiguousEndpoint { count: 2, .. }));
    }

    #[test]
    fn group_edges_must_stay_inside() {
        let mut graph = Graph::new();
        let outside = graph.add_node("x").unwrap();
        let g = graph.add_group("g").unwrap();
        let inner = graph.group(g).unwrap().add_node("i").unwrap();

        let err = graph
            .group(g)
            .unwrap()
            .add_edge(inner, outside)
            .unwrap_err();
        assert!(matches!(err, GraphError::EdgeOutsideScope { .. }));

        // the root may connect anything
        graph.add_edge(inner, outside).unwrap();
        // self loops inside a group are fine
        graph.group(g).unwrap().add_edge(inner, inner).unwrap();
    }

    #[test]
    fn leaf_is_not_a_scope() {
        let mut graph = Graph::new();
        let a = graph.add_node("a").unwrap();
        assert_eq!(graph.group(a).unwrap_err(), GraphError::NotAGroup { id: a });
    }

    #[test]
    fn removing_group_drops_subtree_and_dangling_edges() {
        let mut graph = Graph::new();
        let top = graph.add_node("top").unwrap();
        let g = graph.add_group("g").unwrap();
        let (inner, nested) = {
            let mut scope = graph.group(g).unwrap();
            let inner = scope.add_node("inner").unwrap();
            let nested = scope.add_group("nested").unwrap();
            (inner, nested)
        };
        let deep = graph.group(nested).unwrap().add_node("deep").unwrap();
        graph.add_edge(top, deep).unwrap();
        graph.group(g).unwrap().add_edge(inner, deep).unwrap();

        graph.remove_node(g).unwrap();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.members(Scope::Group(nested)).is_none());
        assert_eq!(graph.root().nodes(), &[top]);
        graph.validate().unwrap();
    }

    #[test]
    fn ungroup_splices_members_in_place() {
        let mut graph = Graph::new();
        graph.add_node("before").unwrap();
        let g = graph.add_group("g").unwrap();
        graph.add_node("after").unwrap();
        let (a, b) = {
            let mut scope = graph.group(g).unwrap();
            (scope.add_node("a").unwrap(), scope.add_node("b").unwrap())
        };
        let inner_edge = graph.group(g).unwrap().add_edge(a, b).unwrap();
        graph.add_edge(g, a).unwrap();

        let moved = graph.ungroup(g).unwrap();
        assert_eq!(moved, vec![a, b]);
        let root = graph.root().nodes().to_vec();
        assert_eq!(names(&graph, &root), vec!["before", "a", "b", "after"]);
        assert_eq!(graph.edge(inner_edge).unwrap().owner(), Scope::Root);
        assert_eq!(graph.edge_count(), 1);
        graph.validate().unwrap();
    }

    #[test]
    fn rename_updates_first_label() {
        let mut graph = Graph::new();
        let a = graph.add_node("a").unwrap();
        graph.rename_node(a, "renamed").unwrap();
        let node = graph.node(a).unwrap();
        assert_eq!(node.name, "renamed");
        assert_eq!(node.label_text(), Some("renamed"));
        assert_eq!(graph.find_by_name("renamed"), vec![a]);
    }

    #[test]
    fn custom_properties_fill_defaults_and_check_types() {
        let mut graph = Graph::new();
        let early = graph.add_node("early").unwrap();
        graph
            .define_custom_property(PropertyScope::Node, "cost", PropertyType::Int, "0")
            .unwrap();
        assert_eq!(graph.node(early).unwrap().properties["cost"], "0");

        let options = NodeOptions::new().property("cost", "356");
        let late = graph.add_node_with(Scope::Root, "late", &options).unwrap();
        assert_eq!(graph.node(late).unwrap().properties["cost"], "356");

        let bad = NodeOptions::new().property("cost", "lots");
        assert!(matches!(
            graph.add_node_with(Scope::Root, "bad", &bad),
            Err(GraphError::InvalidPropertyValue { .. })
        ));
        let unknown = NodeOptions::new().property("weight", "1");
        assert!(matches!(
            graph.add_node_with(Scope::Root, "bad", &unknown),
            Err(GraphError::UnknownCustomProperty { .. })
        ));
        assert!(matches!(
            graph.define_custom_property(PropertyScope::Node, "cost", PropertyType::Int, "1"),
            Err(GraphError::DuplicateCustomProperty { .. })
        ));
        assert!(
            graph
                .define_custom_property(PropertyScope::Edge, "ok", PropertyType::Boolean, "maybe")
                .is_err()
        );
        assert!(matches!(
            graph.define_custom_property(PropertyScope::Edge, "url", PropertyType::String, ""),
            Err(GraphError::ReservedPropertyName { .. })
        ));
        // a failed add leaves no trace
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn restore_keeps_ids_and_advances_counter() {
        let mut graph = Graph::new();
        let mut node = Node::new(NodeId::from_index(7), "seven");
        if let crate::node::NodeKind::Shape { realizer, .. } = &mut node.kind {
            *realizer = NodeRealizer::GenericNode;
        }
        graph.restore_node(Scope::Root, node.clone()).unwrap();
        assert!(matches!(
            graph.restore_node(Scope::Root, node),
            Err(GraphError::DuplicateId { .. })
        ));
        let next = graph.add_node("next").unwrap();
        assert_eq!(next.to_string(), "n8");
    }

    #[test]
    fn relocating_edge_rechecks_scope() {
        let mut graph = Graph::new();
        let g = graph.add_group("g").unwrap();
        let a = graph.group(g).unwrap().add_node("a").unwrap();
        let e = graph.add_edge(a, a).unwrap();
        graph.relocate_edge(e, Scope::Group(g)).unwrap();
        assert_eq!(graph.members(Scope::Group(g)).unwrap().edges(), &[e]);
        assert!(graph.root().edges().is_empty());
    }
}
