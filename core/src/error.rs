//! Error types for heavyhood-core.
//!
//! Graph operations themselves never fail: rejected mutations return `false`
//! and unknown ids read as [`NOT_FOUND`](crate::NOT_FOUND). These errors cover
//! configuration and the consistency audit.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration JSON could not be parsed.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// `Graph::verify` found a broken invariant.
    #[error("inconsistent graph: {0}")]
    Inconsistent(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;
