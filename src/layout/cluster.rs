//! 3D clustered layout and the scene description handed to a 3D renderer.
//!
//! Nodes are grouped by kind, each group is placed on a ring around a fixed
//! offset from the origin, then a bounded number of spring passes pull linked
//! nodes together. There is no repulsion; the result only has to look tidy.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use super::visual::{direction_color, movement_color, node_color, node_size_3d, strength_width};
use crate::graph::{Edge, Movement, Node, NodeType};
use crate::rng::RandomSource;

/// 3D layout tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClusterConfig {
	/// Lower bound on the layout radius.
	pub min_radius: f64,
	/// Layout radius per node.
	pub radius_per_node: f64,
	/// Ring radius per group member.
	pub ring_per_node: f64,
	/// Height of the vertical jitter band.
	pub jitter: f64,
	/// Spring passes over the edge list.
	pub iterations: usize,
	/// Linked nodes closer than this are left alone.
	pub ideal_distance: f64,
	/// Fraction of the excess distance removed per pass, per endpoint.
	pub pull: f64,
}

impl Default for ClusterConfig {
	fn default() -> Self {
		Self {
			min_radius: 8.0,
			radius_per_node: 0.4,
			ring_per_node: 0.6,
			jitter: 3.0,
			iterations: 30,
			ideal_distance: 4.0,
			pull: 0.02,
		}
	}
}

impl ClusterConfig {
	/// Same config with a different number of spring passes.
	pub fn with_iterations(self, iterations: usize) -> Self {
		Self { iterations, ..self }
	}
}

/// Position of every node, keyed by id, in input order.
pub type Positions = IndexMap<String, [f64; 3]>;

fn group_offset(node_type: NodeType, radius: f64) -> (f64, f64) {
	match node_type {
		NodeType::Macro => (0.0, 0.0),
		NodeType::Sector => (radius * 0.6, radius * 0.3),
		NodeType::Theme => (-radius * 0.6, radius * 0.3),
		NodeType::Company => (0.0, -radius * 0.6),
	}
}

/// Lays nodes out in 3D. `y` is up; groups spread over the `x`/`z` plane.
///
/// Edges whose endpoints are not both laid out are ignored.
pub fn cluster_layout<'a>(
	nodes: impl IntoIterator<Item = &'a Node>,
	edges: &[Edge],
	config: &ClusterConfig,
	rng: &mut impl RandomSource,
) -> Positions {
	let mut groups: IndexMap<NodeType, Vec<&Node>> = IndexMap::new();
	let mut total = 0usize;
	for node in nodes {
		groups.entry(node.node_type()).or_default().push(node);
		total += 1;
	}
	let radius = config.min_radius.max(total as f64 * config.radius_per_node);

	let mut positions = Positions::with_capacity(total);
	for (node_type, members) in &groups {
		let (ox, oz) = group_offset(*node_type, radius);
		let count = members.len() as f64;
		let ring = (radius * 0.5).min(count * config.ring_per_node);
		for (i, node) in members.iter().enumerate() {
			let angle = 2.0 * PI * i as f64 / count;
			let y = (rng.next_f64() - 0.5) * config.jitter;
			positions.insert(node.id.clone(), [ox + angle.cos() * ring, y, oz + angle.sin() * ring]);
		}
	}

	let links: Vec<(usize, usize)> = edges
		.iter()
		.filter_map(|e| Some((positions.get_index_of(&e.source)?, positions.get_index_of(&e.target)?)))
		.filter(|(s, t)| s != t)
		.collect();

	for _ in 0..config.iterations {
		for &(s, t) in &links {
			let (sp, tp) = (positions[s], positions[t]);
			let d = [tp[0] - sp[0], tp[1] - sp[1], tp[2] - sp[2]];
			let dist = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
			if dist <= config.ideal_distance {
				continue;
			}
			let force = (dist - config.ideal_distance) * config.pull;
			let f = d.map(|c| c / dist * force);
			positions[s] = [sp[0] + f[0], sp[1] + f[1], sp[2] + f[2]];
			positions[t] = [tp[0] - f[0], tp[1] - f[1], tp[2] - f[2]];
		}
	}

	debug!("cluster layout placed {} nodes in {} groups", positions.len(), groups.len());
	positions
}

/// A node as the 3D renderer should draw it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNode {
	/// Node id.
	pub id: String,
	/// Label text.
	pub name: String,
	/// `[x, y, z]`.
	pub position: [f64; 3],
	/// Fill colour.
	pub color: &'static str,
	/// Base sphere size.
	pub size: f64,
	/// Emphasis multiplier on `size`.
	pub scale: f64,
	/// Material opacity.
	pub opacity: f64,
	/// Scenario movement, for the pulse ring.
	pub scenario: Option<Movement>,
}

/// An edge as the 3D renderer should draw it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneEdge {
	/// Edge id.
	pub id: String,
	/// Source position.
	pub from: [f64; 3],
	/// Target position.
	pub to: [f64; 3],
	/// Line colour.
	pub color: &'static str,
	/// Line width.
	pub width: f64,
	/// Line opacity.
	pub opacity: f64,
	/// Touches the focus or a highlighted node.
	pub highlighted: bool,
}

/// Everything a 3D renderer needs for one frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Scene3d {
	/// Nodes in input order.
	pub nodes: Vec<SceneNode>,
	/// Edges in input order.
	pub edges: Vec<SceneEdge>,
}

/// Emphasis inputs for [`Scene3d::build`].
#[derive(Clone, Debug, Default)]
pub struct SceneFocus<'a> {
	/// The focused node.
	pub focus: Option<&'a str>,
	/// Nodes to emphasise besides the focus.
	pub highlighted: HashSet<&'a str>,
	/// Scenario movements by node id.
	pub scenario: HashMap<&'a str, Movement>,
}

impl Scene3d {
	/// Combines layout positions with focus, highlight and scenario state.
	///
	/// Nodes and edges without a position are left out.
	pub fn build<'a>(
		nodes: impl IntoIterator<Item = &'a Node>,
		edges: &[Edge],
		positions: &Positions,
		state: &SceneFocus<'_>,
	) -> Self {
		let nodes = nodes
			.into_iter()
			.filter_map(|node| {
				let position = *positions.get(&node.id)?;
				let id = node.id.as_str();
				let focused = state.focus == Some(id);
				let highlighted = state.highlighted.contains(id);
				let scenario = state.scenario.get(id).copied();
				Some(SceneNode {
					id: node.id.clone(),
					name: node.name.clone(),
					position,
					color: scenario.map_or_else(|| node_color(node.node_type()), movement_color),
					size: node_size_3d(node.node_type()),
					scale: if focused {
						1.8
					} else if highlighted {
						1.4
					} else {
						1.0
					},
					opacity: if focused || highlighted { 1.0 } else { 0.6 },
					scenario,
				})
			})
			.collect();

		let edges = edges
			.iter()
			.filter_map(|e| {
				let (from, to) = (*positions.get(&e.source)?, *positions.get(&e.target)?);
				let highlighted = [e.source.as_str(), e.target.as_str()]
					.iter()
					.any(|end| state.focus == Some(*end) || state.highlighted.contains(end));
				Some(SceneEdge {
					id: e.id.clone(),
					from,
					to,
					color: direction_color(e.direction),
					width: strength_width(e.strength),
					opacity: if highlighted { 0.8 } else { 0.12 },
					highlighted,
				})
			})
			.collect();

		Self { nodes, edges }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::fixtures::{causal, company, macro_node, sector};
	use crate::graph::{EdgeDirection, Strength};
	use crate::rng::{ParkMiller, SequenceSource};

	fn dist(a: [f64; 3], b: [f64; 3]) -> f64 {
		((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt()
	}

	#[test]
	fn groups_sit_on_rings_around_their_offsets() {
		let nodes = vec![
			macro_node("a"),
			macro_node("b"),
			macro_node("c"),
			macro_node("d"),
			company("x", "s"),
		];
		// 0.5 jitter sample -> y == 0
		let mut rng = SequenceSource::new(vec![0.5]);
		let pos = cluster_layout(&nodes, &[], &ClusterConfig::default(), &mut rng);
		assert_eq!(pos.len(), 5);

		// radius = max(8, 5 * 0.4) = 8; macro ring = min(4, 2.4)
		for id in ["a", "b", "c", "d"] {
			let [x, y, z] = pos[id];
			assert!(((x * x + z * z).sqrt() - 2.4).abs() < 1e-9);
			assert_eq!(y, 0.0);
		}
		// a lone company sits at its group offset shifted by a 0.6 ring
		let [x, _, z] = pos["x"];
		assert!((x - 0.6).abs() < 1e-9);
		assert!((z + 4.8).abs() < 1e-9);
	}

	#[test]
	fn same_seed_same_layout() {
		let nodes = vec![macro_node("a"), sector("s"), company("x", "s")];
		let edges = vec![causal("a", "s", "positive", "strong")];
		let config = ClusterConfig::default();
		let first = cluster_layout(&nodes, &edges, &config, &mut ParkMiller::new(7));
		let second = cluster_layout(&nodes, &edges, &config, &mut ParkMiller::new(7));
		assert_eq!(first, second);
		for [_, y, _] in first.values() {
			assert!(y.abs() <= 1.5);
		}
	}

	#[test]
	fn springs_pull_linked_nodes_closer() {
		let nodes = vec![macro_node("a"), sector("s")];
		let edges = vec![causal("a", "s", "positive", "strong")];
		let loose = cluster_layout(&nodes, &[], &ClusterConfig::default(), &mut SequenceSource::new(vec![0.5]));
		let tight = cluster_layout(&nodes, &edges, &ClusterConfig::default(), &mut SequenceSource::new(vec![0.5]));
		let before = dist(loose["a"], loose["s"]);
		let after = dist(tight["a"], tight["s"]);
		assert!(after < before);
		assert!(after > 4.0);
	}

	#[test]
	fn short_links_are_left_alone() {
		let nodes = vec![macro_node("a"), macro_node("b")];
		let edges = vec![causal("a", "b", "positive", "strong")];
		let config = ClusterConfig::default();
		let without = cluster_layout(&nodes, &[], &config, &mut SequenceSource::new(vec![0.5]));
		let with = cluster_layout(&nodes, &edges, &config, &mut SequenceSource::new(vec![0.5]));
		assert_eq!(without, with);
	}

	#[test]
	fn scene_applies_focus_and_scenario() {
		let nodes = vec![macro_node("a"), macro_node("b"), company("x", "s")];
		let mut edges = vec![causal("a", "b", "negative", "medium")];
		edges.push(causal("b", "ghost", "positive", "weak"));
		let pos = cluster_layout(&nodes, &edges, &ClusterConfig::default(), &mut ParkMiller::new(1));

		let state = SceneFocus {
			focus: Some("a"),
			highlighted: HashSet::new(),
			scenario: [("b", Movement::Up)].into_iter().collect(),
		};
		let scene = Scene3d::build(&nodes, &edges, &pos, &state);
		assert_eq!(scene.nodes.len(), 3);
		assert_eq!(scene.edges.len(), 1);

		let a = &scene.nodes[0];
		assert_eq!((a.scale, a.opacity, a.size), (1.8, 1.0, 1.2));
		let b = &scene.nodes[1];
		assert_eq!(b.color, "#10B981");
		assert_eq!(b.opacity, 0.6);
		assert_eq!(scene.nodes[2].size, 0.8);

		let e = &scene.edges[0];
		assert!(e.highlighted);
		assert_eq!(e.color, direction_color(Some(EdgeDirection::Negative)));
		assert_eq!(e.width, strength_width(Some(Strength::Medium)));
		assert_eq!(e.opacity, 0.8);
	}
}
