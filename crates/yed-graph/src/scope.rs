use yed_core::{EdgeId, NodeId};

use crate::edge::Endpoint;
use crate::error::GraphResult;
use crate::graph::{Graph, Scope};
use crate::options::{EdgeOptions, NodeOptions};

/// Builder handle that adds entities inside one group.
///
/// Obtained from [`Graph::group`]; ids stay global, only ownership changes.
#[derive(Debug)]
pub struct GroupScope<'a> {
    graph: &'a mut Graph,
    group: NodeId,
}

impl<'a> GroupScope<'a> {
    pub(crate) fn new(graph: &'a mut Graph, group: NodeId) -> Self {
        Self { graph, group }
    }

    pub fn id(&self) -> NodeId {
        self.group
    }

    fn scope(&self) -> Scope {
        Scope::Group(self.group)
    }

    pub fn add_node(&mut self, name: impl Into<String>) -> GraphResult<NodeId> {
        self.add_node_with(name, &NodeOptions::default())
    }

    pub fn add_node_with(&mut self, name: impl Into<String>, options: &NodeOptions) -> GraphResult<NodeId> {
        let scope = self.scope();
        self.graph.add_node_with(scope, name, options)
    }

    pub fn add_group(&mut self, name: impl Into<String>) -> GraphResult<NodeId> {
        self.add_group_with(name, &NodeOptions::default())
    }

    pub fn add_group_with(&mut self, name: impl Into<String>, options: &NodeOptions) -> GraphResult<NodeId> {
        let scope = self.scope();
        self.graph.add_group_with(scope, name, options)
    }

    pub fn add_edge(
        &mut self,
        source: impl Into<Endpoint>,
        target: impl Into<Endpoint>,
    ) -> GraphResult<EdgeId> {
        self.add_edge_with(source, target, &EdgeOptions::default())
    }

    pub fn add_edge_with(
        &mut self,
        source: impl Into<Endpoint>,
        target: impl Into<Endpoint>,
        options: &EdgeOptions,
    ) -> GraphResult<EdgeId> {
        let scope = self.scope();
        self.graph.add_edge_with(scope, source, target, options)
    }

    /// Descend into a nested group.
    pub fn group(self, id: NodeId) -> GraphResult<GroupScope<'a>> {
        let graph = self.graph;
        graph.group(id)
    }
}
