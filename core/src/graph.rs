use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::adjacency::{AdjacencyList, RelationArena};
use crate::config::GraphConfig;
use crate::error::{GraphError, Result};
use crate::heap::{HeapEntry, MaxHeap};
use crate::index::{IdentityIndex, UniversalHash};

/// External node identifier. Unique for the lifetime of a graph; never reused.
pub type NodeId = i64;

/// Node weight.
pub type Weight = i32;

/// Sum of a node's weight and its neighbors' weights. Wide enough that no
/// sum over fewer than 2^32 nodes can overflow.
pub type NeighborhoodWeight = i64;

/// Returned by [`Graph::neighborhood_weight`] for an id that is not live.
pub const NOT_FOUND: NeighborhoodWeight = -1;

/// An immutable `(id, weight)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    weight: Weight,
}

impl Node {
    pub const fn new(id: NodeId, weight: Weight) -> Self {
        Self { id, weight }
    }

    pub const fn id(&self) -> NodeId {
        self.id
    }

    pub const fn weight(&self) -> Weight {
        self.weight
    }
}

/// Per-node record held in the flat node array.
#[derive(Debug, Clone)]
struct NodeEntry {
    node: Node,
    adjacency: AdjacencyList,
}

/// Undirected simple graph that tracks the node of maximum neighborhood weight.
///
/// A node's neighborhood weight is its own weight plus the weights of its live
/// neighbors. Three structures are kept in lockstep:
/// - an identity index (id → node slot, universal hashing, fixed capacity),
/// - an indexed max-heap of neighborhood weights keyed by node slot,
/// - cross-linked adjacency lists in a shared relation arena.
///
/// Nodes are supplied once at construction. Afterwards the graph only grows
/// edges and loses nodes.
#[derive(Debug, Clone)]
pub struct Graph {
    index: IdentityIndex,
    heap: MaxHeap,
    nodes: Vec<Option<NodeEntry>>,
    relations: RelationArena,
    node_count: usize,
    edge_count: usize,
}

impl Graph {
    /// Build a graph over `nodes` with no edges, using random hash coefficients.
    ///
    /// Ids are expected to be distinct; a repeated id keeps its first
    /// occurrence and later ones are skipped. O(n).
    pub fn new(nodes: &[Node]) -> Self {
        let config = GraphConfig::default();
        let mut rng = StdRng::from_entropy();
        let hash = UniversalHash::new(&mut rng, config.hash_prime, config.bucket_count(nodes.len()));
        Self::build(nodes, hash)
    }

    /// Build a graph with explicit settings. Fails only if `config` is invalid.
    pub fn with_config(nodes: &[Node], config: &GraphConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let hash = UniversalHash::new(&mut rng, config.hash_prime, config.bucket_count(nodes.len()));
        Ok(Self::build(nodes, hash))
    }

    fn build(nodes: &[Node], hash: UniversalHash) -> Self {
        let mut index = IdentityIndex::new(hash);
        let mut entries = Vec::with_capacity(nodes.len());
        let mut heap_entries = Vec::with_capacity(nodes.len());
        let mut skipped = 0usize;

        for &node in nodes {
            let slot = entries.len();
            if !index.insert(node.id, slot) {
                warn!(id = node.id, "duplicate node id skipped");
                skipped += 1;
                continue;
            }
            entries.push(Some(NodeEntry {
                node,
                adjacency: AdjacencyList::default(),
            }));
            heap_entries.push(HeapEntry {
                key: node.weight.into(),
                id: node.id,
                slot,
            });
        }

        let node_count = entries.len();
        debug!(
            nodes = node_count,
            buckets = index.bucket_count(),
            skipped,
            "graph constructed"
        );

        Self {
            index,
            heap: MaxHeap::build(heap_entries),
            nodes: entries,
            relations: RelationArena::new(),
            node_count,
            edge_count: 0,
        }
    }

    /// The live node with maximum neighborhood weight, or `None` if the graph
    /// is empty. Ties resolve to any of the maximal nodes. O(1).
    pub fn max_neighborhood_weight(&self) -> Option<Node> {
        let top = self.heap.peek_max()?;
        self.entry(top.slot).map(|e| e.node)
    }

    /// Neighborhood weight of `id`, or [`NOT_FOUND`] if `id` is not live.
    pub fn neighborhood_weight(&self, id: NodeId) -> NeighborhoodWeight {
        self.try_neighborhood_weight(id).unwrap_or(NOT_FOUND)
    }

    /// Neighborhood weight of `id`, or `None` if `id` is not live.
    pub fn try_neighborhood_weight(&self, id: NodeId) -> Option<NeighborhoodWeight> {
        let slot = self.index.get(id)?;
        let pos = self.heap.position_of(slot)?;
        self.heap.get(pos).map(|e| e.key)
    }

    /// Add the undirected edge `{a, b}`.
    ///
    /// Returns false without mutating anything if `a == b` or either id is not
    /// live. The caller guarantees the edge is not already present.
    /// O(log n).
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        if a == b {
            trace!(id = a, "add_edge rejected: self loop");
            return false;
        }
        let (Some(slot_a), Some(slot_b)) = (self.index.get(a), self.index.get(b)) else {
            trace!(a, b, "add_edge rejected: endpoint not live");
            return false;
        };
        let (Some(weight_a), Some(weight_b)) = (
            self.entry(slot_a).map(|e| e.node.weight),
            self.entry(slot_b).map(|e| e.node.weight),
        ) else {
            return false;
        };

        let rel_a = match self.nodes[slot_a].as_mut() {
            Some(entry) => self.relations.insert_front(&mut entry.adjacency, slot_b),
            None => return false,
        };
        let rel_b = match self.nodes[slot_b].as_mut() {
            Some(entry) => self.relations.insert_front(&mut entry.adjacency, slot_a),
            None => return false,
        };
        self.relations.pair(rel_a, rel_b);

        if let Some(pos) = self.heap.position_of(slot_a) {
            self.heap.adjust_key(pos, weight_b.into());
        }
        if let Some(pos) = self.heap.position_of(slot_b) {
            self.heap.adjust_key(pos, weight_a.into());
        }
        self.edge_count += 1;
        trace!(a, b, "edge added");
        true
    }

    /// Delete node `id` and every edge incident to it.
    ///
    /// Returns false if `id` is not live. Each former neighbor loses `id`'s
    /// weight from its neighborhood weight. O((deg + 1) · log n).
    pub fn delete_node(&mut self, id: NodeId) -> bool {
        let Some(slot) = self.index.remove(id) else {
            trace!(id, "delete_node rejected: not live");
            return false;
        };
        if let Some(pos) = self.heap.position_of(slot) {
            self.heap.delete_at(pos);
        }
        let Some(mut entry) = self.nodes[slot].take() else {
            return false;
        };
        self.node_count -= 1;

        let weight = NeighborhoodWeight::from(entry.node.weight);
        let relations = self.relations.drain(&mut entry.adjacency);
        let degree = relations.len();
        for relation in relations {
            let neighbor = relation.neighbor;
            if let Some(n) = self.nodes[neighbor].as_mut() {
                self.relations.unlink(&mut n.adjacency, relation.mirror);
            }
            if let Some(pos) = self.heap.position_of(neighbor) {
                self.heap.adjust_key(pos, -weight);
            }
            self.edge_count -= 1;
        }

        debug!(id, degree, "node deleted");
        true
    }

    pub fn num_nodes(&self) -> usize {
        self.node_count
    }

    pub fn num_edges(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.get(id).is_some()
    }

    /// The `(id, weight)` record of a live node.
    pub fn node(&self, id: NodeId) -> Option<Node> {
        self.index.get(id).and_then(|slot| self.entry(slot)).map(|e| e.node)
    }

    /// Number of live neighbors of `id`.
    pub fn degree(&self, id: NodeId) -> Option<usize> {
        self.index
            .get(id)
            .and_then(|slot| self.entry(slot))
            .map(|e| e.adjacency.len())
    }

    /// Live neighbors of `id`, most recently connected first. Empty if `id`
    /// is not live. O(degree).
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = Node> + '_ {
        let list = self
            .index
            .get(id)
            .and_then(|slot| self.entry(slot))
            .map(|e| e.adjacency)
            .unwrap_or_default();
        self.relations
            .iter(&list)
            .filter_map(move |(_, r)| self.entry(r.neighbor).map(|e| e.node))
    }

    /// Live nodes in slot order.
    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        self.nodes.iter().flatten().map(|e| e.node)
    }

    /// Bucket count of the identity index (fixed at construction).
    pub fn bucket_count(&self) -> usize {
        self.index.bucket_count()
    }

    /// Longest bucket chain in the identity index.
    pub fn max_bucket_chain(&self) -> usize {
        self.index.max_chain()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        self.index.memory_usage()
            + self.heap.memory_usage()
            + self.nodes.capacity() * size_of::<Option<NodeEntry>>()
            + self.relations.memory_usage()
    }

    /// Audit every structural invariant. O(n + m).
    ///
    /// Checks that index, heap and node array describe the same live set,
    /// that heap positions and order hold, that every key equals the node's
    /// weight plus its live neighbors' weights, that mirrors are symmetric, and
    /// that the counters match.
    pub fn verify(&self) -> Result<()> {
        let fail = |msg: String| Err(GraphError::Inconsistent(msg));

        self.heap.audit().map_err(GraphError::Inconsistent)?;

        let live = self.nodes.iter().flatten().count();
        if live != self.node_count || self.index.len() != self.node_count || self.heap.len() != self.node_count {
            return fail(format!(
                "live counts disagree: counter {}, node array {}, index {}, heap {}",
                self.node_count,
                live,
                self.index.len(),
                self.heap.len()
            ));
        }

        for entry in self.index.entries() {
            match self.entry(entry.slot) {
                Some(e) if e.node.id == entry.id => {}
                _ => return fail(format!("index binds {} to a foreign slot {}", entry.id, entry.slot)),
            }
        }

        let mut degree_sum = 0usize;
        for (slot, entry) in self.nodes.iter().enumerate() {
            let Some(entry) = entry else { continue };
            let id = entry.node.id;
            if self.index.get(id) != Some(slot) {
                return fail(format!("node {} at slot {} is not indexed", id, slot));
            }

            let mut expected = NeighborhoodWeight::from(entry.node.weight);
            let mut walked = 0usize;
            for (rel_id, relation) in self.relations.iter(&entry.adjacency) {
                walked += 1;
                let Some(other) = self.entry(relation.neighbor) else {
                    return fail(format!("node {} has a relation to a deleted slot", id));
                };
                if other.node.id == id {
                    return fail(format!("node {} has a self loop", id));
                }
                match self.relations.get(relation.mirror) {
                    Some(m) if m.mirror == rel_id && m.neighbor == slot => {}
                    _ => return fail(format!("edge {}-{} has a broken mirror", id, other.node.id)),
                }
                expected += NeighborhoodWeight::from(other.node.weight);
            }
            if walked != entry.adjacency.len() {
                return fail(format!(
                    "node {} list length {} but {} relations linked",
                    id,
                    entry.adjacency.len(),
                    walked
                ));
            }
            degree_sum += walked;

            let Some(pos) = self.heap.position_of(slot) else {
                return fail(format!("node {} has no heap entry", id));
            };
            match self.heap.get(pos) {
                Some(h) if h.id == id && h.key == expected => {}
                Some(h) => {
                    return fail(format!(
                        "node {} heap key {} (id {}), expected {}",
                        id, h.key, h.id, expected
                    ))
                }
                None => return fail(format!("node {} heap position {} out of range", id, pos)),
            }
        }

        if degree_sum != 2 * self.edge_count || self.relations.live() != degree_sum {
            return fail(format!(
                "edge counter {} but degree sum {} and {} live relations",
                self.edge_count,
                degree_sum,
                self.relations.live()
            ));
        }
        Ok(())
    }

    fn entry(&self, slot: usize) -> Option<&NodeEntry> {
        self.nodes.get(slot).and_then(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(nodes: &[(NodeId, Weight)]) -> Graph {
        let nodes: Vec<Node> = nodes.iter().map(|&(id, w)| Node::new(id, w)).collect();
        Graph::with_config(&nodes, &GraphConfig::seeded(7)).unwrap()
    }

    fn scenario_a() -> Graph {
        graph(&[(1, 5), (2, 3), (3, 7)])
    }

    fn degree_sum(g: &Graph) -> usize {
        g.nodes().map(|n| g.degree(n.id()).unwrap()).sum()
    }

    // --- Scenarios ---

    #[test]
    fn test_scenario_a_initial_max() {
        let g = scenario_a();
        assert_eq!(g.max_neighborhood_weight().unwrap().id(), 3);
        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.num_edges(), 0);
        for (id, w) in [(1, 5), (2, 3), (3, 7)] {
            assert_eq!(g.neighborhood_weight(id), w);
        }
        g.verify().unwrap();
    }

    #[test]
    fn test_scenario_b_edge_moves_max() {
        let mut g = scenario_a();
        assert!(g.add_edge(1, 2));
        assert_eq!(g.neighborhood_weight(1), 8);
        assert_eq!(g.neighborhood_weight(2), 8);
        let max = g.max_neighborhood_weight().unwrap();
        assert!(max.id() == 1 || max.id() == 2, "max was {}", max.id());
        assert_eq!(g.neighborhood_weight(max.id()), 8);
        g.verify().unwrap();
    }

    #[test]
    fn test_scenario_c_delete_isolated() {
        let mut g = scenario_a();
        assert!(g.add_edge(1, 2));
        assert!(g.delete_node(3));
        assert_eq!(g.num_nodes(), 2);
        assert_eq!(g.num_edges(), 1);
        assert_eq!(g.neighborhood_weight(1), 8);
        assert_eq!(g.neighborhood_weight(3), NOT_FOUND);
        g.verify().unwrap();
    }

    #[test]
    fn test_scenario_d_rejections() {
        let mut g = scenario_a();
        assert!(!g.add_edge(1, 1));
        assert!(!g.add_edge(99, 1));
        assert!(!g.add_edge(1, 99));
        assert_eq!(g.num_edges(), 0);
        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.neighborhood_weight(1), 5);
        g.verify().unwrap();
    }

    #[test]
    fn test_scenario_e_single_node() {
        let mut g = graph(&[(1, 10)]);
        assert_eq!(g.max_neighborhood_weight().unwrap().id(), 1);
        assert_eq!(g.neighborhood_weight(1), 10);
        assert!(g.delete_node(1));
        assert!(g.max_neighborhood_weight().is_none());
        assert!(g.is_empty());
        g.verify().unwrap();
    }

    // --- Properties ---

    #[test]
    fn test_self_loop_rejected_for_any_id() {
        let mut g = scenario_a();
        for id in [1, 2, 3, 99, -4] {
            assert!(!g.add_edge(id, id));
        }
        assert_eq!(g.num_edges(), 0);
        assert_eq!(g.num_nodes(), 3);
    }

    #[test]
    fn test_add_edge_symmetry() {
        let mut g = graph(&[(10, 4), (20, 9), (30, 1)]);
        g.add_edge(10, 30);
        let before_10 = g.neighborhood_weight(10);
        let before_20 = g.neighborhood_weight(20);
        assert!(g.add_edge(20, 10));
        assert_eq!(g.neighborhood_weight(10), before_10 + 9);
        assert_eq!(g.neighborhood_weight(20), before_20 + 4);
        assert_eq!(g.neighborhood_weight(30), 1 + 4);
        g.verify().unwrap();
    }

    #[test]
    fn test_delete_cascade() {
        // Star: hub 0 (weight 100) with leaves 1..=5 (weight = id), plus 1-2.
        let mut nodes = vec![(0, 100)];
        nodes.extend((1..=5).map(|i| (i, i as Weight)));
        let mut g = graph(&nodes);
        for leaf in 1..=5 {
            assert!(g.add_edge(0, leaf));
        }
        assert!(g.add_edge(1, 2));
        assert_eq!(g.max_neighborhood_weight().unwrap().id(), 0);
        assert_eq!(g.neighborhood_weight(0), 115);

        let before: Vec<NeighborhoodWeight> = (1..=5).map(|i| g.neighborhood_weight(i)).collect();
        assert_eq!(g.degree(0), Some(5));
        assert!(g.delete_node(0));

        for (i, b) in (1..=5).zip(before) {
            assert_eq!(g.neighborhood_weight(i), b - 100);
        }
        assert_eq!(g.num_edges(), 1);
        assert_eq!(g.num_nodes(), 5);
        assert_eq!(g.neighborhood_weight(0), NOT_FOUND);
        assert_eq!(g.degree(0), None);
        // 1 and 2 are now 1+2 = 3 each, 5 stays 5.
        assert_eq!(g.max_neighborhood_weight().unwrap().id(), 5);
        g.verify().unwrap();
    }

    #[test]
    fn test_delete_missing_and_twice() {
        let mut g = scenario_a();
        assert!(!g.delete_node(42));
        assert!(g.delete_node(2));
        assert!(!g.delete_node(2));
        assert_eq!(g.num_nodes(), 2);
        g.verify().unwrap();
    }

    #[test]
    fn test_add_edge_to_deleted_node_rejected() {
        let mut g = scenario_a();
        g.delete_node(3);
        assert!(!g.add_edge(1, 3));
        assert!(!g.add_edge(3, 2));
        assert_eq!(g.num_edges(), 0);
        g.verify().unwrap();
    }

    #[test]
    fn test_edge_count_matches_degree_sum() {
        let n = 30;
        let nodes: Vec<(NodeId, Weight)> = (0..n).map(|i| (i, (i % 7 + 1) as Weight)).collect();
        let mut g = graph(&nodes);
        for i in 0..n {
            for j in (i + 1)..n {
                if (i * 31 + j * 17) % 5 == 0 {
                    assert!(g.add_edge(i, j));
                }
            }
        }
        assert_eq!(g.num_edges() * 2, degree_sum(&g));
        for id in (0..n).step_by(3) {
            g.delete_node(id);
            assert_eq!(g.num_edges() * 2, degree_sum(&g));
        }
        g.verify().unwrap();
    }

    #[test]
    fn test_neighbors_iteration() {
        let mut g = graph(&[(1, 1), (2, 2), (3, 3), (4, 4)]);
        g.add_edge(1, 2);
        g.add_edge(1, 3);
        g.add_edge(4, 1);
        let mut ids: Vec<NodeId> = g.neighbors(1).map(|n| n.id()).collect();
        ids.sort();
        assert_eq!(ids, vec![2, 3, 4]);
        assert_eq!(g.neighbors(1).count(), g.neighbors(1).count());
        assert_eq!(g.neighbors(99).count(), 0);

        g.delete_node(3);
        let mut ids: Vec<NodeId> = g.neighbors(1).map(|n| n.id()).collect();
        ids.sort();
        assert_eq!(ids, vec![2, 4]);
        assert_eq!(g.neighbors(3).count(), 0);
    }

    #[test]
    fn test_negative_ids_and_weights() {
        let mut g = graph(&[(-5, -2), (-1, 10), (0, 0), (7, -8)]);
        assert!(g.add_edge(-5, -1));
        assert!(g.add_edge(7, -1));
        assert_eq!(g.neighborhood_weight(-1), 10 - 2 - 8);
        assert_eq!(g.neighborhood_weight(-5), 8);
        assert_eq!(g.max_neighborhood_weight().unwrap().id(), -5);
        assert!(g.delete_node(-1));
        assert_eq!(g.neighborhood_weight(-5), -2);
        assert_eq!(g.max_neighborhood_weight().unwrap().id(), 0);
        g.verify().unwrap();
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let g = graph(&[(1, 5), (2, 3), (1, 100)]);
        assert_eq!(g.num_nodes(), 2);
        assert_eq!(g.node(1), Some(Node::new(1, 5)));
        assert_eq!(g.max_neighborhood_weight().unwrap().id(), 1);
        g.verify().unwrap();
    }

    #[test]
    fn test_empty_graph() {
        let mut g = Graph::new(&[]);
        assert!(g.max_neighborhood_weight().is_none());
        assert_eq!(g.neighborhood_weight(0), NOT_FOUND);
        assert_eq!(g.try_neighborhood_weight(0), None);
        assert!(!g.add_edge(0, 1));
        assert!(!g.delete_node(0));
        assert_eq!(g.bucket_count(), 1);
        g.verify().unwrap();
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = GraphConfig {
            bucket_ratio: 0.0,
            ..GraphConfig::default()
        };
        assert!(Graph::with_config(&[Node::new(1, 1)], &config).is_err());

        let huge = GraphConfig {
            bucket_ratio: 1e30,
            ..GraphConfig::seeded(1)
        };
        let err = Graph::with_config(&[Node::new(1, 1), Node::new(2, 2)], &huge).unwrap_err();
        assert!(matches!(err, GraphError::Config(_)));
    }

    #[test]
    fn test_bucket_count_follows_ratio() {
        let nodes: Vec<Node> = (0..100).map(|i| Node::new(i, 1)).collect();
        let g = Graph::new(&nodes);
        assert_eq!(g.bucket_count(), 250);
    }

    #[test]
    fn test_delete_all_nodes() {
        let nodes: Vec<(NodeId, Weight)> = (0..20).map(|i| (i, (20 - i) as Weight)).collect();
        let mut g = graph(&nodes);
        for i in 0..19 {
            g.add_edge(i, i + 1);
        }
        for i in (0..20).rev() {
            assert!(g.delete_node(i));
            g.verify().unwrap();
        }
        assert!(g.is_empty());
        assert_eq!(g.num_edges(), 0);
        assert!(g.max_neighborhood_weight().is_none());
    }

    #[test]
    fn test_max_tracks_heaviest_after_each_op() {
        let nodes: Vec<(NodeId, Weight)> = (0..50).map(|i| (i * 3, ((i * 37) % 23) as Weight)).collect();
        let mut g = graph(&nodes);
        let check = |g: &Graph| {
            let best = g.nodes().map(|n| g.neighborhood_weight(n.id())).max();
            let max = g.max_neighborhood_weight().map(|n| g.neighborhood_weight(n.id()));
            assert_eq!(max, best);
        };
        for i in 0..50 {
            g.add_edge(i * 3, (i + 1) * 3);
            check(&g);
            g.add_edge(i * 3, (i + 7) * 3);
            check(&g);
        }
        for i in (0..50).step_by(4) {
            g.delete_node(i * 3);
            check(&g);
        }
        g.verify().unwrap();
    }

    #[test]
    fn test_memory_usage_nonzero() {
        let mut g = scenario_a();
        g.add_edge(1, 3);
        assert!(g.memory_usage() > 0);
    }

    #[test]
    fn test_single_bucket_chains_everything() {
        let config = GraphConfig {
            bucket_ratio: 0.01,
            ..GraphConfig::seeded(9)
        };
        let nodes: Vec<Node> = (0..50).map(|i| Node::new(i * 13, 1)).collect();
        let g = Graph::with_config(&nodes, &config).unwrap();
        assert_eq!(g.bucket_count(), 1);
        assert_eq!(g.max_bucket_chain(), 50);
        assert!(g.verify().is_ok());
    }

    #[test]
    fn test_extreme_weights_do_not_overflow() {
        // Clique of heavy nodes: every sum exceeds the node weight range.
        let heavy: Vec<(NodeId, Weight)> = (0..8).map(|i| (i, Weight::MAX)).collect();
        let mut g = graph(&heavy);
        for i in 0..8 {
            for j in (i + 1)..8 {
                assert!(g.add_edge(i, j));
            }
        }
        let full = 8 * NeighborhoodWeight::from(Weight::MAX);
        assert_eq!(g.neighborhood_weight(0), full);
        assert_eq!(g.neighborhood_weight(g.max_neighborhood_weight().unwrap().id()), full);
        g.verify().unwrap();

        assert!(g.delete_node(0));
        assert_eq!(g.neighborhood_weight(1), full - NeighborhoodWeight::from(Weight::MAX));

        let lo = NeighborhoodWeight::from(Weight::MIN);
        let hi = NeighborhoodWeight::from(Weight::MAX);
        let mut g = graph(&[(1, Weight::MIN), (2, Weight::MIN), (3, Weight::MAX)]);
        assert!(g.add_edge(1, 2));
        assert!(g.add_edge(1, 3));
        assert_eq!(g.neighborhood_weight(1), 2 * lo + hi);
        assert_eq!(g.neighborhood_weight(3), lo + hi);
        assert_eq!(g.max_neighborhood_weight().unwrap().id(), 3);
        assert!(g.delete_node(3));
        assert_eq!(g.neighborhood_weight(1), 2 * lo);
        g.verify().unwrap();
    }
}
