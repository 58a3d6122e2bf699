//! The immutable, lazily-indexed graph store.

use std::collections::HashMap;
use std::sync::OnceLock;

use indexmap::IndexSet;
use log::debug;
use serde::Serialize;

use super::dataset::GraphDataset;
use super::derive::{membership_edges, supply_chain_edges};
use super::types::{
	CompanyAttrs, Edge, EdgeKind, MacroAttrs, Node, NodeKind, NodeType, SectorAttrs, Strength,
	ThemeAttrs,
};
use crate::error::{AtlasError, Result};

/// Holds every node and edge of the causal map.
///
/// Built once from a [`GraphDataset`] and never mutated afterwards. The node
/// index is built eagerly so duplicate ids are rejected at load time; the
/// merged edge list and the adjacency indices are built on first use and
/// cached for the lifetime of the store.
#[derive(Debug)]
pub struct GraphStore {
	nodes: Vec<Node>,
	index: HashMap<String, usize>,
	causal: Vec<Edge>,
	edges: OnceLock<Vec<Edge>>,
	adjacency: OnceLock<HashMap<String, Vec<usize>>>,
	causal_out: OnceLock<HashMap<String, Vec<usize>>>,
}

/// Node and edge counts, as shown in the map header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
	/// All nodes.
	pub total_nodes: usize,
	/// Macro nodes.
	pub macro_nodes: usize,
	/// Sector nodes.
	pub sector_nodes: usize,
	/// Theme nodes.
	pub theme_count: usize,
	/// Company nodes.
	pub company_count: usize,
	/// Authored plus derived edges.
	pub total_edges: usize,
	/// Authored causal edges.
	pub causal_edges: usize,
	/// Edges of any kind graded strong.
	pub strong_edges: usize,
}

impl GraphStore {
	/// Builds a store, rejecting id collisions across node kinds.
	pub fn new(dataset: GraphDataset) -> Result<Self> {
		let (nodes, causal) = dataset.into_parts();
		let mut index = HashMap::with_capacity(nodes.len());
		for (i, node) in nodes.iter().enumerate() {
			if index.insert(node.id.clone(), i).is_some() {
				return Err(AtlasError::DuplicateNodeId { id: node.id.clone() });
			}
		}
		debug!("graph store loaded {} nodes, {} causal edges", nodes.len(), causal.len());
		Ok(Self {
			nodes,
			index,
			causal,
			edges: OnceLock::new(),
			adjacency: OnceLock::new(),
			causal_out: OnceLock::new(),
		})
	}

	/// Every node, in load order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Nodes of one kind, in load order.
	pub fn nodes_of(&self, node_type: NodeType) -> impl Iterator<Item = &Node> {
		self.nodes.iter().filter(move |n| n.node_type() == node_type)
	}

	/// Looks a node up by id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	/// Looks a macro node up by id.
	pub fn macro_node(&self, id: &str) -> Option<(&Node, &MacroAttrs)> {
		self.node(id).and_then(|n| match &n.kind {
			NodeKind::Macro(attrs) => Some((n, attrs)),
			_ => None,
		})
	}

	/// Looks a sector up by id.
	pub fn sector(&self, id: &str) -> Option<(&Node, &SectorAttrs)> {
		self.node(id).and_then(|n| match &n.kind {
			NodeKind::Sector(attrs) => Some((n, attrs)),
			_ => None,
		})
	}

	/// Looks a theme up by id.
	pub fn theme(&self, id: &str) -> Option<(&Node, &ThemeAttrs)> {
		self.node(id).and_then(|n| match &n.kind {
			NodeKind::Theme(attrs) => Some((n, attrs)),
			_ => None,
		})
	}

	/// Looks a company up by id.
	pub fn company(&self, id: &str) -> Option<(&Node, &CompanyAttrs)> {
		self.node(id).and_then(|n| match &n.kind {
			NodeKind::Company(attrs) => Some((n, attrs)),
			_ => None,
		})
	}

	/// Authored causal edges, in authored order.
	pub fn causal_edges(&self) -> &[Edge] {
		&self.causal
	}

	/// Causal edges, then supply-chain edges, then membership edges.
	pub fn edges(&self) -> &[Edge] {
		self.edges.get_or_init(|| {
			let mut all = self.causal.clone();
			all.extend(supply_chain_edges(&self.nodes, &self.index));
			all.extend(membership_edges(&self.nodes, &self.index));
			all
		})
	}

	/// Only the derived (supply-chain and membership) edges.
	pub fn derived_edges(&self) -> &[Edge] {
		&self.edges()[self.causal.len()..]
	}

	fn adjacency(&self) -> &HashMap<String, Vec<usize>> {
		self.adjacency.get_or_init(|| {
			let mut adjacency: HashMap<String, Vec<usize>> = HashMap::new();
			for (i, e) in self.edges().iter().enumerate() {
				adjacency.entry(e.source.clone()).or_default().push(i);
				adjacency.entry(e.target.clone()).or_default().push(i);
			}
			debug!("edge index built for {} endpoints", adjacency.len());
			adjacency
		})
	}

	/// All edges where `id` is source or target, in merged-edge order.
	///
	/// A self-loop appears twice.
	pub fn edges_touching(&self, id: &str) -> Vec<&Edge> {
		let edges = self.edges();
		self.adjacency()
			.get(id)
			.map(|ids| ids.iter().map(|&i| &edges[i]).collect())
			.unwrap_or_default()
	}

	/// Neighbours over every edge kind, in first-seen order.
	pub fn connected_node_ids(&self, id: &str) -> IndexSet<&str> {
		let mut ids = IndexSet::new();
		for e in self.edges_touching(id) {
			if e.source == id {
				ids.insert(e.target.as_str());
			}
			if e.target == id {
				ids.insert(e.source.as_str());
			}
		}
		ids
	}

	/// Neighbours that resolve to a node in the store.
	pub fn connected_nodes(&self, id: &str) -> Vec<&Node> {
		self.connected_node_ids(id)
			.into_iter()
			.filter_map(|n| self.node(n))
			.collect()
	}

	/// Causal edges leaving `id`, in authored order.
	pub fn outgoing_causal(&self, id: &str) -> impl Iterator<Item = &Edge> {
		let out = self.causal_out.get_or_init(|| {
			let mut out: HashMap<String, Vec<usize>> = HashMap::new();
			for (i, e) in self.causal.iter().enumerate() {
				if e.kind == EdgeKind::Causal {
					out.entry(e.source.clone()).or_default().push(i);
				}
			}
			out
		});
		out.get(id)
			.into_iter()
			.flatten()
			.map(|&i| &self.causal[i])
	}

	/// Themes with `node_id` listed in one of their tiers.
	pub fn themes_containing(&self, node_id: &str) -> Vec<&Node> {
		self.nodes
			.iter()
			.filter(|n| match &n.kind {
				NodeKind::Theme(t) => t.tiers.iter().any(|tier| tier.nodes.iter().any(|m| m == node_id)),
				_ => false,
			})
			.collect()
	}

	/// Tier index of `node_id` within `theme_id`.
	pub fn tier_in_theme(&self, node_id: &str, theme_id: &str) -> Option<u32> {
		let (_, theme) = self.theme(theme_id)?;
		theme
			.tiers
			.iter()
			.find(|tier| tier.nodes.iter().any(|m| m == node_id))
			.map(|tier| tier.tier)
	}

	/// Ids of nodes matching a search query, in load order.
	///
	/// Returns `None` for a blank query, meaning no search filter is active.
	pub fn search(&self, query: &str) -> Option<IndexSet<&str>> {
		let query = query.trim().to_lowercase();
		if query.is_empty() {
			return None;
		}
		Some(
			self.nodes
				.iter()
				.filter(|n| n.matches_query(&query))
				.map(|n| n.id.as_str())
				.collect(),
		)
	}

	/// Node and edge counts.
	pub fn stats(&self) -> GraphStats {
		let edges = self.edges();
		GraphStats {
			total_nodes: self.nodes.len(),
			macro_nodes: self.nodes_of(NodeType::Macro).count(),
			sector_nodes: self.nodes_of(NodeType::Sector).count(),
			theme_count: self.nodes_of(NodeType::Theme).count(),
			company_count: self.nodes_of(NodeType::Company).count(),
			total_edges: edges.len(),
			causal_edges: self.causal.len(),
			strong_edges: edges.iter().filter(|e| e.strength == Some(Strength::Strong)).count(),
		}
	}
}
