//! Static dataset ingestion.

use serde::{Deserialize, Serialize};

use super::types::{Edge, Node};
use crate::error::{AtlasError, Result};

/// The raw collections a [`GraphStore`](super::GraphStore) is built from.
///
/// Collections keep their fixture order. The store concatenates them as
/// macro, sector, theme, company.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDataset {
	/// Macro variable nodes.
	#[serde(default, rename = "macro")]
	pub macros: Vec<Node>,
	/// Sector nodes.
	#[serde(default)]
	pub sectors: Vec<Node>,
	/// Theme nodes.
	#[serde(default)]
	pub themes: Vec<Node>,
	/// Company nodes.
	#[serde(default)]
	pub companies: Vec<Node>,
	/// Authored causal edges, in authored order.
	#[serde(default)]
	pub causal_edges: Vec<Edge>,
}

impl GraphDataset {
	/// Decodes a single document holding all five collections.
	pub fn from_json(json: &str) -> Result<Self> {
		serde_json::from_str(json).map_err(|source| AtlasError::Decode {
			collection: "dataset",
			source,
		})
	}

	/// Decodes the five collections from separate documents, the way the
	/// fixtures are laid out on disk.
	pub fn from_collections(
		macros: &str,
		sectors: &str,
		themes: &str,
		companies: &str,
		causal_edges: &str,
	) -> Result<Self> {
		Ok(Self {
			macros: decode("macro nodes", macros)?,
			sectors: decode("sector nodes", sectors)?,
			themes: decode("theme nodes", themes)?,
			companies: decode("company nodes", companies)?,
			causal_edges: decode("causal edges", causal_edges)?,
		})
	}

	/// Splits into all nodes, in load order, and the causal edges.
	pub fn into_parts(self) -> (Vec<Node>, Vec<Edge>) {
		let mut nodes = self.macros;
		nodes.extend(self.sectors);
		nodes.extend(self.themes);
		nodes.extend(self.companies);
		(nodes, self.causal_edges)
	}
}

fn decode<T: serde::de::DeserializeOwned>(collection: &'static str, json: &str) -> Result<Vec<T>> {
	serde_json::from_str(json).map_err(|source| AtlasError::Decode { collection, source })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decode_error_names_the_collection() {
		let err = GraphDataset::from_collections("[]", "[]", "{", "[]", "[]").unwrap_err();
		assert!(err.to_string().contains("theme nodes"), "{err}");
	}

	#[test]
	fn single_document_with_missing_collections_defaults_empty() {
		let data = GraphDataset::from_json(r#"{"causalEdges": []}"#).unwrap();
		assert!(data.macros.is_empty());
		assert!(data.companies.is_empty());
	}
}
