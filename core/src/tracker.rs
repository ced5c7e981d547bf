use crate::graph::{Graph, NeighborhoodWeight, Node, NodeId};
use crate::reference::ReferenceGraph;

/// The operation contract shared by [`Graph`] and [`ReferenceGraph`].
///
/// Implementations share no state; callers pick one and drive it through this
/// surface (the bench driver and differential tests do exactly that).
pub trait NeighborhoodTracker {
    /// Build over `nodes` with no edges.
    fn from_nodes(nodes: &[Node]) -> Self
    where
        Self: Sized;

    fn max_neighborhood_weight(&self) -> Option<Node>;

    /// Neighborhood weight, or [`NOT_FOUND`](crate::NOT_FOUND) for an id that is not live.
    fn neighborhood_weight(&self, id: NodeId) -> NeighborhoodWeight;

    fn add_edge(&mut self, a: NodeId, b: NodeId) -> bool;

    fn delete_node(&mut self, id: NodeId) -> bool;

    fn num_nodes(&self) -> usize;

    fn num_edges(&self) -> usize;
}

impl NeighborhoodTracker for Graph {
    fn from_nodes(nodes: &[Node]) -> Self {
        Graph::new(nodes)
    }

    fn max_neighborhood_weight(&self) -> Option<Node> {
        Graph::max_neighborhood_weight(self)
    }

    fn neighborhood_weight(&self, id: NodeId) -> NeighborhoodWeight {
        Graph::neighborhood_weight(self, id)
    }

    fn add_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        Graph::add_edge(self, a, b)
    }

    fn delete_node(&mut self, id: NodeId) -> bool {
        Graph::delete_node(self, id)
    }

    fn num_nodes(&self) -> usize {
        Graph::num_nodes(self)
    }

    fn num_edges(&self) -> usize {
        Graph::num_edges(self)
    }
}

impl NeighborhoodTracker for ReferenceGraph {
    fn from_nodes(nodes: &[Node]) -> Self {
        ReferenceGraph::new(nodes)
    }

    fn max_neighborhood_weight(&self) -> Option<Node> {
        ReferenceGraph::max_neighborhood_weight(self)
    }

    fn neighborhood_weight(&self, id: NodeId) -> NeighborhoodWeight {
        ReferenceGraph::neighborhood_weight(self, id)
    }

    fn add_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        ReferenceGraph::add_edge(self, a, b)
    }

    fn delete_node(&mut self, id: NodeId) -> bool {
        ReferenceGraph::delete_node(self, id)
    }

    fn num_nodes(&self) -> usize {
        ReferenceGraph::num_nodes(self)
    }

    fn num_edges(&self) -> usize {
        ReferenceGraph::num_edges(self)
    }
}
