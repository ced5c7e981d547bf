//! heavyhood-core: heaviest-neighborhood tracking on a dynamic graph.
//!
//! A pure Rust library that maintains an undirected graph of weighted nodes
//! under edge insertion and node deletion, and answers "which node has the
//! largest neighborhood weight?" in O(1). No I/O, no global state.
//!
//! [`Graph`] is the optimized structure. [`ReferenceGraph`] is a baseline
//! built from standard collections; both implement [`NeighborhoodTracker`].

mod adjacency;
mod config;
mod error;
mod graph;
mod heap;
mod index;
mod reference;
mod tracker;

pub use config::{GraphConfig, DEFAULT_BUCKET_RATIO, DEFAULT_HASH_PRIME, MAX_BUCKET_RATIO};
pub use error::{GraphError, Result};
pub use graph::{Graph, NeighborhoodWeight, Node, NodeId, Weight, NOT_FOUND};
pub use reference::ReferenceGraph;
pub use tracker::NeighborhoodTracker;
