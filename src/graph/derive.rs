//! Implicit edges synthesized from node attributes.
//!
//! Both passes are pure functions of the node set: running them twice yields
//! the same edges in the same order. Dangling ids are skipped silently.

use std::collections::{HashMap, HashSet};

use log::debug;

use super::types::{Edge, EdgeDirection, EdgeKind, Node, NodeKind, Strength};

/// Supply-chain edges between consecutive tiers of every theme.
///
/// Each member of tier `i` (after sorting by tier index) is linked to each
/// member of tier `i + 1`. Self-loops are skipped and a `(source, target)`
/// pair is emitted at most once across all themes.
pub fn supply_chain_edges(nodes: &[Node], index: &HashMap<String, usize>) -> Vec<Edge> {
	let mut edges = Vec::new();
	let mut seen: HashSet<(&str, &str)> = HashSet::new();

	for theme in nodes {
		let NodeKind::Theme(attrs) = &theme.kind else {
			continue;
		};
		let mut tiers: Vec<_> = attrs.tiers.iter().collect();
		tiers.sort_by_key(|t| t.tier);

		for pair in tiers.windows(2) {
			let (upstream, downstream) = (pair[0], pair[1]);
			let up = upstream.nodes.iter().filter(|id| index.contains_key(id.as_str()));
			for src in up {
				let down = downstream.nodes.iter().filter(|id| index.contains_key(id.as_str()));
				for tgt in down {
					if src == tgt || !seen.insert((src.as_str(), tgt.as_str())) {
						continue;
					}
					edges.push(Edge {
						id: format!("sc_{}_{}_{}", theme.id, src, tgt),
						source: src.clone(),
						target: tgt.clone(),
						kind: EdgeKind::SupplyChain,
						direction: Some(EdgeDirection::Positive),
						strength: Some(Strength::Medium),
						time_lag: None,
						mechanism: Some(format!(
							"{} → {} ({})",
							upstream.name, downstream.name, theme.name
						)),
					});
				}
			}
		}
	}

	debug!("derived {} supply-chain edges", edges.len());
	edges
}

/// One membership edge per company whose sector id resolves to a sector node.
pub fn membership_edges(nodes: &[Node], index: &HashMap<String, usize>) -> Vec<Edge> {
	let edges: Vec<Edge> = nodes
		.iter()
		.filter_map(|company| {
			let NodeKind::Company(attrs) = &company.kind else {
				return None;
			};
			let sector = index.get(&attrs.sector_id).map(|&i| &nodes[i])?;
			if !matches!(sector.kind, NodeKind::Sector(_)) {
				return None;
			}
			Some(Edge {
				id: format!("bt_{}_{}", company.id, sector.id),
				source: company.id.clone(),
				target: sector.id.clone(),
				kind: EdgeKind::BelongsTo,
				direction: None,
				strength: Some(Strength::Strong),
				time_lag: None,
				mechanism: Some(format!("{} ∈ {}", company.name, sector.name)),
			})
		})
		.collect();

	debug!("derived {} membership edges", edges.len());
	edges
}
