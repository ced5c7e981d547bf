//! Baseline tracker built from standard collections.
//!
//! Used as a correctness oracle and a timing baseline for [`Graph`](crate::Graph).
//! Each touched node is re-keyed in an ordered set, so edge insertion is
//! O(log n) and deletion is O(deg · log n) plus hashing overhead.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::graph::{NeighborhoodWeight, Node, NodeId, Weight, NOT_FOUND};

#[derive(Debug, Clone)]
struct RefEntry {
    weight: Weight,
    neighborhood: NeighborhoodWeight,
    neighbors: HashSet<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceGraph {
    nodes: HashMap<NodeId, RefEntry>,
    /// `(neighborhood weight, id)` of every live node; the maximum is last.
    order: BTreeSet<(NeighborhoodWeight, NodeId)>,
    edge_count: usize,
}

impl ReferenceGraph {
    /// Build over `nodes` with no edges. A repeated id keeps its first occurrence.
    pub fn new(nodes: &[Node]) -> Self {
        let mut graph = Self {
            nodes: HashMap::with_capacity(nodes.len()),
            order: BTreeSet::new(),
            edge_count: 0,
        };
        for node in nodes {
            if graph.nodes.contains_key(&node.id()) {
                continue;
            }
            graph.nodes.insert(
                node.id(),
                RefEntry {
                    weight: node.weight(),
                    neighborhood: node.weight().into(),
                    neighbors: HashSet::new(),
                },
            );
            graph.order.insert((node.weight().into(), node.id()));
        }
        graph
    }

    pub fn max_neighborhood_weight(&self) -> Option<Node> {
        let &(_, id) = self.order.last()?;
        self.nodes.get(&id).map(|e| Node::new(id, e.weight))
    }

    pub fn neighborhood_weight(&self, id: NodeId) -> NeighborhoodWeight {
        self.nodes.get(&id).map_or(NOT_FOUND, |e| e.neighborhood)
    }

    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        if a == b {
            return false;
        }
        let (Some(weight_a), Some(weight_b)) = (
            self.nodes.get(&a).map(|e| e.weight),
            self.nodes.get(&b).map(|e| e.weight),
        ) else {
            return false;
        };
        self.shift(a, weight_b.into(), Some(b), None);
        self.shift(b, weight_a.into(), Some(a), None);
        self.edge_count += 1;
        true
    }

    pub fn delete_node(&mut self, id: NodeId) -> bool {
        let Some(entry) = self.nodes.remove(&id) else {
            return false;
        };
        self.order.remove(&(entry.neighborhood, id));
        for neighbor in entry.neighbors {
            self.shift(neighbor, -NeighborhoodWeight::from(entry.weight), None, Some(id));
            self.edge_count -= 1;
        }
        true
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edge_count
    }

    /// Neighbor ids of `id`, unordered.
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&id)
            .map(|e| e.neighbors.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Re-key `id` by `delta`, optionally linking or unlinking one neighbor.
    fn shift(
        &mut self,
        id: NodeId,
        delta: NeighborhoodWeight,
        link: Option<NodeId>,
        unlink: Option<NodeId>,
    ) {
        let Some(entry) = self.nodes.get_mut(&id) else {
            return;
        };
        self.order.remove(&(entry.neighborhood, id));
        entry.neighborhood += delta;
        if let Some(n) = link {
            entry.neighbors.insert(n);
        }
        if let Some(n) = unlink {
            entry.neighbors.remove(&n);
        }
        self.order.insert((entry.neighborhood, id));
    }
}
