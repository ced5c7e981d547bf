//! Workload generators: node sets plus simple (loop-free, duplicate-free)
//! edge lists over a few characteristic topologies.
//!
//! All generators are O(n + edges), single-threaded and deterministic for a
//! given seed.

use std::collections::{HashSet, VecDeque};

use heavyhood_core::{Node, NodeId, Weight};
use rand::rngs::StdRng;
use rand::Rng;

pub struct Workload {
    pub nodes: Vec<Node>,
    pub edges: Vec<(NodeId, NodeId)>,
}

pub type Generator = fn(u64, &mut StdRng) -> Workload;

pub const TOPOLOGIES: &[(&str, &str, Generator)] = &[
    ("tree", "Branching tree (fan-out 3)", gen_tree),
    ("scalefree", "Scale-free (edge sampling)", gen_scale_free),
    ("smallworld", "Small-world (Watts-Strogatz)", gen_small_world),
    ("random", "Erdos-Renyi random", gen_random),
    ("barbell", "Barbell (clique-bridge-clique)", gen_barbell),
    ("dla", "DLA (organic branching)", gen_dla),
];

/// Accumulates an edge list, dropping self loops and repeated pairs so the
/// result satisfies the graph's no-duplicate precondition.
struct EdgeSet {
    seen: HashSet<(NodeId, NodeId)>,
    edges: Vec<(NodeId, NodeId)>,
}

impl EdgeSet {
    fn with_capacity(n: usize) -> Self {
        Self {
            seen: HashSet::with_capacity(n),
            edges: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, a: NodeId, b: NodeId) -> bool {
        if a == b || !self.seen.insert((a.min(b), a.max(b))) {
            return false;
        }
        self.edges.push((a, b));
        true
    }

    fn len(&self) -> usize {
        self.edges.len()
    }
}

fn weighted_nodes(node_count: u64, rng: &mut StdRng) -> Vec<Node> {
    (0..node_count as NodeId)
        .map(|id| Node::new(id, rng.gen_range(1..=100)))
        .collect()
}

/// `node_count` nodes of unit weight, so a neighborhood weight is degree + 1.
pub fn unit_nodes(node_count: u64) -> Vec<Node> {
    (0..node_count as NodeId).map(|id| Node::new(id, 1)).collect()
}

/// `count` distinct random edges over ids `0..node_count`.
///
/// `count` must not exceed the number of possible pairs.
pub fn random_edges(node_count: u64, count: usize, rng: &mut StdRng) -> Vec<(NodeId, NodeId)> {
    let mut set = EdgeSet::with_capacity(count);
    while set.len() < count {
        let a = rng.gen_range(0..node_count as NodeId);
        let b = rng.gen_range(0..node_count as NodeId);
        set.push(a, b);
    }
    set.edges
}

/// `count` distinct ids in `0..bound`, each with a weight in `0..bound`.
pub fn sparse_nodes(count: usize, bound: Weight, rng: &mut StdRng) -> Vec<Node> {
    let mut ids = HashSet::with_capacity(count);
    let mut nodes = Vec::with_capacity(count);
    while nodes.len() < count {
        let id = NodeId::from(rng.gen_range(0..bound));
        if ids.insert(id) {
            nodes.push(Node::new(id, rng.gen_range(0..bound)));
        }
    }
    nodes
}

/// Every node spawns three children. Deep, sparse, degree at most 4.
fn gen_tree(node_count: u64, rng: &mut StdRng) -> Workload {
    let nodes = weighted_nodes(node_count, rng);
    let mut set = EdgeSet::with_capacity(node_count as usize);
    let branching = 3;

    for child in 1..node_count as NodeId {
        set.push((child - 1) / branching, child);
    }

    Workload { nodes, edges: set.edges }
}

/// Preferential attachment by picking a random existing edge endpoint, so
/// nodes with more edges are more likely to gain more. Produces heavy hubs.
fn gen_scale_free(node_count: u64, rng: &mut StdRng) -> Workload {
    let edges_per_node = 10u64;
    let nodes = weighted_nodes(node_count, rng);
    let mut set = EdgeSet::with_capacity((node_count * edges_per_node) as usize);
    let mut endpoints: Vec<NodeId> = Vec::with_capacity((node_count * edges_per_node * 2) as usize);

    let seed = 5.min(node_count) as NodeId;
    for i in 0..seed {
        for j in (i + 1)..seed {
            set.push(i, j);
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for new_node in seed..node_count as NodeId {
        if endpoints.is_empty() {
            break;
        }
        let attach = edges_per_node.min(new_node as u64);
        for _ in 0..attach {
            let target = endpoints[rng.gen_range(0..endpoints.len())];
            if set.push(new_node, target) {
                endpoints.push(new_node);
                endpoints.push(target);
            }
        }
    }

    Workload { nodes, edges: set.edges }
}

/// Ring lattice with `k` forward neighbors per node, each edge rewired to a
/// random target with probability `p`.
fn gen_small_world(node_count: u64, rng: &mut StdRng) -> Workload {
    let k = 10u64;
    let p = 0.05f64;
    let nodes = weighted_nodes(node_count, rng);
    let mut set = EdgeSet::with_capacity((node_count * k) as usize);

    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = (i + j) % node_count;
            let target = if rng.gen_bool(p) {
                rng.gen_range(0..node_count)
            } else {
                neighbor
            };
            set.push(i as NodeId, target as NodeId);
        }
    }

    Workload { nodes, edges: set.edges }
}

/// Uniform random edges, about ten per node.
fn gen_random(node_count: u64, rng: &mut StdRng) -> Workload {
    let nodes = weighted_nodes(node_count, rng);
    let mut set = EdgeSet::with_capacity((node_count * 10) as usize);
    if node_count > 1 {
        for _ in 0..node_count * 10 {
            let a = rng.gen_range(0..node_count) as NodeId;
            let b = rng.gen_range(0..node_count) as NodeId;
            set.push(a, b);
        }
    }
    Workload { nodes, edges: set.edges }
}

/// Two dense clusters joined by a chain of ten bridge nodes.
fn gen_barbell(node_count: u64, rng: &mut StdRng) -> Workload {
    let bridge_len = 10u64;
    let nodes = weighted_nodes(node_count, rng);
    let clique_size = node_count.saturating_sub(bridge_len) / 2;
    let mut set = EdgeSet::with_capacity((clique_size * 40 + bridge_len) as usize);

    add_cluster(&mut set, 0, clique_size, rng);

    let bridge_start = clique_size;
    for i in 0..bridge_len {
        let id = bridge_start + i;
        if id > 0 && id < node_count {
            set.push(id as NodeId - 1, id as NodeId);
        }
    }

    let b_start = bridge_start + bridge_len;
    if b_start < node_count {
        set.push(b_start as NodeId - 1, b_start as NodeId);
        add_cluster(&mut set, b_start, clique_size, rng);
    }

    Workload { nodes, edges: set.edges }
}

/// About twenty random links per node inside `start..start + size`.
fn add_cluster(set: &mut EdgeSet, start: u64, size: u64, rng: &mut StdRng) {
    for i in 0..size {
        for _ in 0..20u64.min(size.saturating_sub(1)) {
            let target = rng.gen_range(0..size);
            set.push((start + i) as NodeId, (start + target) as NodeId);
        }
    }
}

/// Each new node attaches to a random recent "surface" node, with a 10%
/// chance of a second long-range link.
fn gen_dla(node_count: u64, rng: &mut StdRng) -> Workload {
    let nodes = weighted_nodes(node_count, rng);
    let mut set = EdgeSet::with_capacity((node_count * 2) as usize);

    let surface_max = 10_000usize;
    let mut surface: VecDeque<NodeId> = VecDeque::with_capacity(surface_max + 1);
    surface.push_back(0);

    for new_node in 1..node_count as NodeId {
        let attach_to = surface[rng.gen_range(0..surface.len())];
        set.push(new_node, attach_to);

        if rng.gen_range(0..10) == 0 && new_node > 1 {
            let other = rng.gen_range(0..new_node);
            set.push(new_node, other);
        }

        surface.push_back(new_node);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    Workload { nodes, edges: set.edges }
}
