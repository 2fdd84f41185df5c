//! Graph statistics.

use yed_core::{EdgeId, NodeId};

use crate::graph::{Graph, Scope};

/// Entity lists gathered by one depth-first walk, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphStats {
    /// Non-group nodes at any depth.
    pub all_nodes: Vec<NodeId>,
    pub all_groups: Vec<NodeId>,
    pub all_edges: Vec<EdgeId>,
    /// Deepest group nesting; 0 when there are no groups.
    pub max_depth: usize,
}

impl GraphStats {
    pub(crate) fn collect(graph: &Graph) -> Self {
        let mut stats = Self::default();
        stats.walk(graph, Scope::Root, 0);
        stats
    }

    fn walk(&mut self, graph: &Graph, scope: Scope, depth: usize) {
        let Some(members) = graph.members(scope) else {
            return;
        };
        for id in members.nodes() {
            match graph.node(*id) {
                Some(node) if node.is_group() => {
                    self.all_groups.push(*id);
                    self.max_depth = self.max_depth.max(depth + 1);
                    self.walk(graph, Scope::Group(*id), depth + 1);
                }
                Some(_) => self.all_nodes.push(*id),
                None => {}
            }
        }
        self.all_edges.extend_from_slice(members.edges());
    }

    /// Nodes and groups together.
    pub fn all_objects(&self) -> Vec<NodeId> {
        let mut objects: Vec<NodeId> = self
            .all_nodes
            .iter()
            .chain(&self.all_groups)
            .copied()
            .collect();
        objects.sort();
        objects
    }

    /// Nodes, groups and edges.
    pub fn all_graph_items(&self) -> usize {
        self.all_nodes.len() + self.all_groups.len() + self.all_edges.len()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} nodes, {} groups, {} edges, max depth {}",
            self.all_nodes.len(),
            self.all_groups.len(),
            self.all_edges.len(),
            self.max_depth
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_through_nested_groups() {
        let mut graph = Graph::new();
        let a = graph.add_node("a").unwrap();
        let g = graph.add_group("g").unwrap();
        let (b, inner) = {
            let mut scope = graph.group(g).unwrap();
            (scope.add_node("b").unwrap(), scope.add_group("inner").unwrap())
        };
        let c = graph.group(inner).unwrap().add_node("c").unwrap();
        graph.add_edge(a, c).unwrap();
        graph.group(g).unwrap().add_edge(b, c).unwrap();

        let stats = graph.stats();
        assert_eq!(stats.all_nodes, vec![a, b, c]);
        assert_eq!(stats.all_groups, vec![g, inner]);
        assert_eq!(stats.all_edges.len(), 2);
        assert_eq!(stats.all_objects().len(), 5);
        assert_eq!(stats.all_graph_items(), 7);
        assert_eq!(stats.max_depth, 2);
    }

    #[test]
    fn empty_graph_has_no_items() {
        let stats = Graph::new().stats();
        assert_eq!(stats.all_graph_items(), 0);
        assert_eq!(stats.summary(), "0 nodes, 0 groups, 0 edges, max depth 0");
    }
}
