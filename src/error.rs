//! Error types for dataset ingestion.
//!
//! Queries against a loaded [`GraphStore`](crate::graph::GraphStore) never
//! fail: unknown ids come back as `None` and empty traversals as empty
//! vectors. Only turning raw fixtures into a store can go wrong.

use thiserror::Error;

/// Errors raised while loading a graph dataset.
#[derive(Debug, Error)]
pub enum AtlasError {
	/// A node or edge collection could not be decoded.
	#[error("failed to decode {collection}: {source}")]
	Decode {
		/// Which collection was being read.
		collection: &'static str,
		/// Underlying JSON error.
		#[source]
		source: serde_json::Error,
	},

	/// Two nodes share an id. Ids form a single namespace across every node kind.
	#[error("duplicate node id '{id}'")]
	DuplicateNodeId {
		/// The colliding id.
		id: String,
	},
}

/// Convenience alias used by the loaders.
pub type Result<T, E = AtlasError> = std::result::Result<T, E>;
