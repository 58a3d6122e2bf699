//! 2D force simulation with focus-mode steering.
//!
//! A velocity-Verlet style simulation in the manner of d3-force: every
//! [`Simulation::tick`] cools `alpha`, accumulates link, charge, centering,
//! collision, gravity and focus forces into node velocities, then integrates
//! positions. Rendering is not involved; a host loop calls [`Simulation::step`]
//! once per frame until it reports the layout has settled.

use std::collections::HashMap;
use std::f64::consts::PI;

use log::debug;

use super::visual::node_radius;
use crate::graph::{Edge, EdgeKind, GraphStore, Node, NodeType, Strength};

const JIGGLE: f64 = 1e-6;

/// Rest length and stiffness of one edge kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkProfile {
	/// Rest length in world units.
	pub distance: f64,
	/// Stiffness in `[0, 1]`.
	pub strength: f64,
}

/// Simulation tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceConfig {
	/// Causal links: long and weak.
	pub causal_link: LinkProfile,
	/// Supply-chain links: medium.
	pub supply_chain_link: LinkProfile,
	/// Membership links: short and strong.
	pub membership_link: LinkProfile,
	/// Many-body strength; negative repels.
	pub charge_strength: f64,
	/// Pairs further apart than this ignore each other.
	pub charge_distance_max: f64,
	/// Pairs closer than this are treated as this far apart.
	pub charge_distance_min: f64,
	/// World-space point the layout is centered on.
	pub center: (f64, f64),
	/// How strongly the centroid is shifted back to `center` each tick.
	pub center_strength: f64,
	/// Per-node pull towards `center`.
	pub gravity_strength: f64,
	/// Added to the node radius for collision.
	pub collide_padding: f64,
	/// Collision stiffness.
	pub collide_strength: f64,
	/// Fraction of the remaining distance to `alpha_target` covered per tick.
	pub alpha_decay: f64,
	/// Below this the simulation is considered settled.
	pub alpha_min: f64,
	/// Fraction of velocity lost per tick.
	pub velocity_decay: f64,
	/// Energy the simulation is reheated to on a selection change.
	pub restart_alpha: f64,
	/// Pull of focus targets on connected nodes.
	pub focus_strength: f64,
	/// Vertical offset of causes (above) and effects (below) the focus.
	pub causal_offset: f64,
	/// Horizontal offset of upstream (left) and downstream (right) tiers.
	pub supply_chain_offset: f64,
	/// Vertical offset of membership neighbours (below).
	pub membership_offset: f64,
	/// Radius of the circle nodes start on.
	pub initial_radius: f64,
}

impl Default for ForceConfig {
	fn default() -> Self {
		Self {
			causal_link: LinkProfile {
				distance: 100.0,
				strength: 0.15,
			},
			supply_chain_link: LinkProfile {
				distance: 70.0,
				strength: 0.3,
			},
			membership_link: LinkProfile {
				distance: 40.0,
				strength: 0.8,
			},
			charge_strength: -180.0,
			charge_distance_max: 350.0,
			charge_distance_min: 1.0,
			center: (0.0, 0.0),
			center_strength: 0.05,
			gravity_strength: 0.02,
			collide_padding: 4.0,
			collide_strength: 1.0,
			alpha_decay: 0.02,
			alpha_min: 0.001,
			velocity_decay: 0.4,
			restart_alpha: 0.5,
			focus_strength: 0.15,
			causal_offset: 180.0,
			supply_chain_offset: 200.0,
			membership_offset: 100.0,
			initial_radius: 100.0,
		}
	}
}

impl ForceConfig {
	/// Link profile for an edge kind.
	pub fn link_profile(&self, kind: EdgeKind) -> LinkProfile {
		match kind {
			EdgeKind::Causal => self.causal_link,
			EdgeKind::SupplyChain => self.supply_chain_link,
			EdgeKind::BelongsTo => self.membership_link,
		}
	}

	/// Same config centered on another point.
	pub fn with_center(self, x: f64, y: f64) -> Self {
		Self {
			center: (x, y),
			..self
		}
	}
}

/// A node as seen by the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct SimNode {
	/// Node id.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Node kind, for colour and radius.
	pub node_type: NodeType,
	/// Drawn radius.
	pub radius: f64,
	/// Position.
	pub x: f64,
	/// Position.
	pub y: f64,
	/// Velocity.
	pub vx: f64,
	/// Velocity.
	pub vy: f64,
	/// Pinned position, if any.
	pub fixed: Option<(f64, f64)>,
}

/// An edge as seen by the simulation, by node index.
#[derive(Clone, Debug, PartialEq)]
pub struct SimLink {
	/// Edge id.
	pub id: String,
	/// Source node index.
	pub source: usize,
	/// Target node index.
	pub target: usize,
	/// Edge kind.
	pub kind: EdgeKind,
	/// Edge strength, for line width.
	pub strength: Option<Strength>,
}

/// The running layout.
#[derive(Clone, Debug)]
pub struct Simulation {
	config: ForceConfig,
	nodes: Vec<SimNode>,
	links: Vec<SimLink>,
	index: HashMap<String, usize>,
	link_bias: Vec<f64>,
	alpha: f64,
	alpha_target: f64,
	focus: Option<usize>,
	focus_targets: Vec<Option<(f64, f64)>>,
}

impl Simulation {
	/// Builds a simulation from nodes and edges.
	///
	/// Edges with an endpoint outside `nodes`, and self-loops, are dropped.
	/// Nodes start evenly spaced on a circle around the center.
	pub fn new<'a>(
		nodes: impl IntoIterator<Item = &'a Node>,
		edges: impl IntoIterator<Item = &'a Edge>,
		config: ForceConfig,
	) -> Self {
		let nodes: Vec<&Node> = nodes.into_iter().collect();
		let count = nodes.len().max(1) as f64;
		let (cx, cy) = config.center;

		let sim_nodes: Vec<SimNode> = nodes
			.iter()
			.enumerate()
			.map(|(i, node)| {
				let angle = (i as f64) * 2.0 * PI / count;
				SimNode {
					id: node.id.clone(),
					name: node.name.clone(),
					node_type: node.node_type(),
					radius: node_radius(node.node_type()),
					x: cx + config.initial_radius * angle.cos(),
					y: cy + config.initial_radius * angle.sin(),
					vx: 0.0,
					vy: 0.0,
					fixed: None,
				}
			})
			.collect();
		let index: HashMap<String, usize> =
			sim_nodes.iter().enumerate().map(|(i, n)| (n.id.clone(), i)).collect();

		let links: Vec<SimLink> = edges
			.into_iter()
			.filter_map(|e| {
				let (&source, &target) = (index.get(&e.source)?, index.get(&e.target)?);
				(source != target).then(|| SimLink {
					id: e.id.clone(),
					source,
					target,
					kind: e.kind,
					strength: e.strength,
				})
			})
			.collect();

		let mut degree = vec![0usize; sim_nodes.len()];
		for l in &links {
			degree[l.source] += 1;
			degree[l.target] += 1;
		}
		let link_bias = links
			.iter()
			.map(|l| degree[l.source] as f64 / (degree[l.source] + degree[l.target]) as f64)
			.collect();

		debug!("simulation built with {} nodes, {} links", sim_nodes.len(), links.len());
		Self {
			focus_targets: vec![None; sim_nodes.len()],
			config,
			nodes: sim_nodes,
			links,
			index,
			link_bias,
			alpha: 1.0,
			alpha_target: 0.0,
			focus: None,
		}
	}

	/// Builds a simulation over the whole store, keeping only edges of `kinds`.
	pub fn from_store(store: &GraphStore, kinds: &[EdgeKind], config: ForceConfig) -> Self {
		Self::new(
			store.nodes(),
			store.edges().iter().filter(|e| kinds.contains(&e.kind)),
			config,
		)
	}

	/// Simulation nodes, in draw order.
	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	/// Simulation links.
	pub fn links(&self) -> &[SimLink] {
		&self.links
	}

	/// Tuning in effect.
	pub fn config(&self) -> &ForceConfig {
		&self.config
	}

	/// Index of a node id.
	pub fn node_index(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Current position of a node.
	pub fn position(&self, id: &str) -> Option<(f64, f64)> {
		self.node_index(id).map(|i| (self.nodes[i].x, self.nodes[i].y))
	}

	/// Current energy.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// True until alpha has decayed below `alpha_min`.
	pub fn is_active(&self) -> bool {
		self.alpha >= self.config.alpha_min
	}

	/// Index of the focused node.
	pub fn focus(&self) -> Option<usize> {
		self.focus
	}

	/// The point a node is steered towards in focus mode.
	pub fn focus_target(&self, idx: usize) -> Option<(f64, f64)> {
		self.focus_targets.get(idx).copied().flatten()
	}

	/// Indices of nodes linked to `idx`.
	pub fn neighbors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
		self.links.iter().filter_map(move |l| {
			if l.source == idx {
				Some(l.target)
			} else if l.target == idx {
				Some(l.source)
			} else {
				None
			}
		})
	}

	/// Raises the energy so the layout starts moving again.
	pub fn reheat(&mut self, alpha: f64) {
		self.alpha = alpha;
	}

	/// Pins a node at a world position.
	pub fn pin(&mut self, idx: usize, x: f64, y: f64) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.fixed = Some((x, y));
			node.x = x;
			node.y = y;
		}
	}

	/// Releases a pinned node.
	pub fn unpin(&mut self, idx: usize) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.fixed = None;
		}
	}

	/// Enters focus mode on `id`, or leaves it with `None`.
	///
	/// The focus node is pinned at the center and its neighbours are steered
	/// by edge kind: causes above, effects below, upstream tiers left,
	/// downstream tiers right, membership neighbours slightly below. Leaving
	/// focus mode unpins every node. Either way the simulation is reheated.
	/// An unknown id behaves like `None`.
	pub fn set_focus(&mut self, id: Option<&str>) {
		let focus = id.and_then(|id| self.node_index(id));
		if let Some(prev) = self.focus.filter(|&prev| Some(prev) != focus) {
			self.unpin(prev);
		}
		self.focus = focus;
		self.focus_targets = vec![None; self.nodes.len()];

		match focus {
			Some(f) => {
				let (cx, cy) = self.config.center;
				self.pin(f, cx, cy);
				for link in &self.links {
					let other = if link.source == f {
						link.target
					} else if link.target == f {
						link.source
					} else {
						continue;
					};
					// the first link joining a neighbour decides its target
					if self.focus_targets[other].is_none() {
						self.focus_targets[other] = Some(self.steer(link, f));
					}
				}
				debug!("focus on node {}", self.nodes[f].id);
			}
			None => {
				for node in &mut self.nodes {
					node.fixed = None;
				}
				debug!("focus cleared");
			}
		}
		self.reheat(self.config.restart_alpha);
	}

	fn steer(&self, link: &SimLink, focus: usize) -> (f64, f64) {
		let c = &self.config;
		let (cx, cy) = c.center;
		let into_focus = link.target == focus;
		match link.kind {
			EdgeKind::Causal if into_focus => (cx, cy - c.causal_offset),
			EdgeKind::Causal => (cx, cy + c.causal_offset),
			EdgeKind::SupplyChain if into_focus => (cx - c.supply_chain_offset, cy),
			EdgeKind::SupplyChain => (cx + c.supply_chain_offset, cy),
			EdgeKind::BelongsTo => (cx, cy + c.membership_offset),
		}
	}

	/// Advances one tick if the simulation is still active.
	///
	/// Returns whether it is still active afterwards.
	pub fn step(&mut self) -> bool {
		if !self.is_active() {
			return false;
		}
		self.tick();
		self.is_active()
	}

	/// Ticks until settled or `max_ticks` is reached; returns ticks taken.
	pub fn run_until_settled(&mut self, max_ticks: usize) -> usize {
		let mut ticks = 0;
		while ticks < max_ticks && self.step() {
			ticks += 1;
		}
		ticks
	}

	/// One unconditional simulation tick.
	pub fn tick(&mut self) {
		self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;
		let alpha = self.alpha;

		self.apply_links(alpha);
		self.apply_charge(alpha);
		self.apply_center();
		self.apply_collide();
		self.apply_gravity(alpha);
		self.apply_focus(alpha);

		let keep = 1.0 - self.config.velocity_decay;
		for node in &mut self.nodes {
			match node.fixed {
				Some((fx, fy)) => {
					node.x = fx;
					node.y = fy;
					node.vx = 0.0;
					node.vy = 0.0;
				}
				None => {
					node.vx *= keep;
					node.vy *= keep;
					node.x += node.vx;
					node.y += node.vy;
				}
			}
		}
	}

	fn apply_links(&mut self, alpha: f64) {
		for (link, &bias) in self.links.iter().zip(&self.link_bias) {
			let profile = self.config.link_profile(link.kind);
			let (s, t) = (&self.nodes[link.source], &self.nodes[link.target]);
			let mut x = t.x + t.vx - s.x - s.vx;
			let y = t.y + t.vy - s.y - s.vy;
			if x == 0.0 && y == 0.0 {
				x = JIGGLE;
			}
			let l = (x * x + y * y).sqrt();
			let k = (l - profile.distance) / l * alpha * profile.strength;
			let (x, y) = (x * k, y * k);

			let t = &mut self.nodes[link.target];
			t.vx -= x * bias;
			t.vy -= y * bias;
			let s = &mut self.nodes[link.source];
			s.vx += x * (1.0 - bias);
			s.vy += y * (1.0 - bias);
		}
	}

	fn apply_charge(&mut self, alpha: f64) {
		let c = &self.config;
		let (max2, min2) = (c.charge_distance_max.powi(2), c.charge_distance_min.powi(2));
		let n = self.nodes.len();
		let mut dv = vec![(0.0, 0.0); n];
		for i in 0..n {
			for j in 0..n {
				if i == j {
					continue;
				}
				let (a, b) = (&self.nodes[i], &self.nodes[j]);
				let mut dx = b.x - a.x;
				let dy = b.y - a.y;
				if dx == 0.0 && dy == 0.0 {
					dx = if i < j { JIGGLE } else { -JIGGLE };
				}
				let mut l2 = dx * dx + dy * dy;
				if l2 >= max2 {
					continue;
				}
				if l2 < min2 {
					l2 = (min2 * l2).sqrt();
				}
				let w = c.charge_strength * alpha / l2;
				dv[i].0 += dx * w;
				dv[i].1 += dy * w;
			}
		}
		for (node, (dx, dy)) in self.nodes.iter_mut().zip(dv) {
			node.vx += dx;
			node.vy += dy;
		}
	}

	fn apply_center(&mut self) {
		if self.nodes.is_empty() {
			return;
		}
		let n = self.nodes.len() as f64;
		let (cx, cy) = self.config.center;
		let (sx, sy) = self.nodes.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
		let s = self.config.center_strength;
		let (sx, sy) = ((sx / n - cx) * s, (sy / n - cy) * s);
		for node in &mut self.nodes {
			node.x -= sx;
			node.y -= sy;
		}
	}

	fn apply_collide(&mut self) {
		let (pad, strength) = (self.config.collide_padding, self.config.collide_strength);
		let n = self.nodes.len();
		for i in 0..n {
			for j in (i + 1)..n {
				let (a, b) = (&self.nodes[i], &self.nodes[j]);
				let (ri, rj) = (a.radius + pad, b.radius + pad);
				let r = ri + rj;
				let mut x = (a.x + a.vx) - (b.x + b.vx);
				let y = (a.y + a.vy) - (b.y + b.vy);
				let mut l2 = x * x + y * y;
				if l2 >= r * r {
					continue;
				}
				if l2 == 0.0 {
					x = JIGGLE;
					l2 = x * x;
				}
				let l = l2.sqrt();
				let k = (r - l) / l * strength;
				let (x, y) = (x * k, y * k);
				let share = rj * rj / (ri * ri + rj * rj);

				let a = &mut self.nodes[i];
				a.vx += x * share;
				a.vy += y * share;
				let b = &mut self.nodes[j];
				b.vx -= x * (1.0 - share);
				b.vy -= y * (1.0 - share);
			}
		}
	}

	fn apply_gravity(&mut self, alpha: f64) {
		let (cx, cy) = self.config.center;
		let k = self.config.gravity_strength * alpha;
		for node in &mut self.nodes {
			node.vx += (cx - node.x) * k;
			node.vy += (cy - node.y) * k;
		}
	}

	fn apply_focus(&mut self, alpha: f64) {
		if self.focus.is_none() {
			return;
		}
		let k = self.config.focus_strength * alpha;
		for (node, target) in self.nodes.iter_mut().zip(&self.focus_targets) {
			if let Some((tx, ty)) = target {
				node.vx += (tx - node.x) * k;
				node.vy += (ty - node.y) * k;
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::fixtures::{causal, company, dataset, macro_chain, macro_node, sector};
	use crate::graph::{EdgeDirection, GraphStore};

	fn supply(source: &str, target: &str) -> Edge {
		Edge {
			id: format!("sc_{source}_{target}"),
			source: source.into(),
			target: target.into(),
			kind: EdgeKind::SupplyChain,
			direction: Some(EdgeDirection::Positive),
			strength: Some(Strength::Medium),
			time_lag: None,
			mechanism: None,
		}
	}

	fn sim(store: &GraphStore) -> Simulation {
		Simulation::from_store(store, &EdgeKind::ALL, ForceConfig::default())
	}

	#[test]
	fn dangling_links_are_dropped() {
		let store = macro_chain(&["a", "b"], vec![causal("a", "b", "positive", "strong"), causal("a", "ghost", "positive", "weak")]);
		let sim = sim(&store);
		assert_eq!(sim.links().len(), 1);
		assert_eq!(sim.nodes().len(), 2);
	}

	#[test]
	fn edge_filter_limits_links() {
		let store = GraphStore::new(dataset(
			vec![],
			vec![sector("s")],
			vec![],
			vec![company("c", "s")],
			vec![],
		))
		.unwrap();
		let all = Simulation::from_store(&store, &EdgeKind::ALL, ForceConfig::default());
		let causal_only = Simulation::from_store(&store, &[EdgeKind::Causal], ForceConfig::default());
		assert_eq!(all.links().len(), 1);
		assert!(causal_only.links().is_empty());
	}

	#[test]
	fn simulation_settles() {
		let store = macro_chain(
			&["a", "b", "c"],
			vec![causal("a", "b", "positive", "strong"), causal("b", "c", "negative", "weak")],
		);
		let mut sim = sim(&store);
		let ticks = sim.run_until_settled(10_000);
		assert!(ticks < 10_000);
		assert!(!sim.is_active());
		assert!(!sim.step());
		for node in sim.nodes() {
			assert!(node.x.is_finite() && node.y.is_finite());
		}
	}

	#[test]
	fn membership_links_rest_shorter_than_causal() {
		let causal_store = macro_chain(&["a", "b"], vec![causal("a", "b", "positive", "strong")]);
		let member_store = GraphStore::new(dataset(
			vec![],
			vec![sector("s")],
			vec![],
			vec![company("c", "s")],
			vec![],
		))
		.unwrap();

		let dist = |store: &GraphStore, a: &str, b: &str| {
			let mut sim = sim(store);
			sim.run_until_settled(10_000);
			let (ax, ay) = sim.position(a).unwrap();
			let (bx, by) = sim.position(b).unwrap();
			((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
		};
		assert!(dist(&member_store, "c", "s") < dist(&causal_store, "a", "b"));
	}

	#[test]
	fn focus_targets_follow_edge_kind() {
		let ids = ["cause", "focus", "effect", "up", "down", "loner"];
		let store = GraphStore::new(dataset(
			ids.iter().map(|id| macro_node(id)).collect(),
			vec![],
			vec![],
			vec![],
			vec![
				causal("cause", "focus", "positive", "strong"),
				causal("focus", "effect", "negative", "weak"),
				supply("up", "focus"),
				supply("focus", "down"),
			],
		))
		.unwrap();
		let mut sim = sim(&store);
		sim.set_focus(Some("focus"));

		let target = |id: &str| sim.focus_target(sim.node_index(id).unwrap());
		assert_eq!(target("cause"), Some((0.0, -180.0)));
		assert_eq!(target("effect"), Some((0.0, 180.0)));
		assert_eq!(target("up"), Some((-200.0, 0.0)));
		assert_eq!(target("down"), Some((200.0, 0.0)));
		assert_eq!(target("loner"), None);
		assert_eq!(target("focus"), None);
		assert_eq!(sim.alpha(), 0.5);
	}

	#[test]
	fn membership_neighbours_are_pulled_below() {
		let store = GraphStore::new(dataset(
			vec![],
			vec![sector("s")],
			vec![],
			vec![company("c", "s")],
			vec![],
		))
		.unwrap();
		let mut sim = sim(&store);
		sim.set_focus(Some("c"));
		assert_eq!(sim.focus_target(sim.node_index("s").unwrap()), Some((0.0, 100.0)));
	}

	#[test]
	fn focus_node_is_pinned_at_center() {
		let store = macro_chain(
			&["a", "b", "c"],
			vec![causal("a", "b", "positive", "strong"), causal("b", "c", "negative", "weak")],
		);
		let mut sim = sim(&store);
		sim.set_focus(Some("b"));
		for _ in 0..200 {
			sim.tick();
			assert_eq!(sim.position("b"), Some((0.0, 0.0)));
		}
	}

	#[test]
	fn first_tick_moves_neighbours_towards_their_sides() {
		// three nodes start on a circle: effect at 0°, focus at 120°, cause at 240°
		let store = macro_chain(
			&["effect", "focus", "cause"],
			vec![causal("cause", "focus", "positive", "strong"), causal("focus", "effect", "positive", "strong")],
		);
		let mut sim = sim(&store);
		sim.set_focus(Some("focus"));
		let before_effect = sim.position("effect").unwrap();
		let before_cause = sim.position("cause").unwrap();
		sim.tick();
		assert!(sim.position("effect").unwrap().1 > before_effect.1);
		assert!(sim.position("cause").unwrap().1 < before_cause.1);
	}

	#[test]
	fn settled_focus_layout_keeps_causes_above_effects_below() {
		// four nodes on the start circle: focus right, effect below, other left, cause above
		let store = macro_chain(
			&["focus", "effect", "other", "cause"],
			vec![causal("cause", "focus", "positive", "strong"), causal("focus", "effect", "positive", "strong")],
		);
		let mut sim = sim(&store);
		sim.set_focus(Some("focus"));
		sim.run_until_settled(10_000);
		assert!(sim.position("cause").unwrap().1 < 0.0);
		assert!(sim.position("effect").unwrap().1 > 0.0);
	}

	#[test]
	fn clearing_focus_unpins_everything() {
		let store = macro_chain(&["a", "b"], vec![causal("a", "b", "positive", "strong")]);
		let mut sim = sim(&store);
		sim.pin(1, 50.0, 50.0);
		sim.set_focus(Some("a"));
		sim.run_until_settled(10_000);
		sim.set_focus(None);
		assert!(sim.nodes().iter().all(|n| n.fixed.is_none()));
		assert_eq!(sim.focus(), None);
		assert_eq!(sim.focus_target(1), None);
		assert!(sim.is_active());
	}

	#[test]
	fn moving_focus_releases_the_previous_node() {
		let store = macro_chain(
			&["a", "b", "c"],
			vec![causal("a", "b", "positive", "strong"), causal("b", "c", "negative", "weak")],
		);
		let mut sim = sim(&store);
		sim.set_focus(Some("a"));
		sim.set_focus(Some("c"));
		assert_eq!(sim.nodes()[0].fixed, None);
		assert_eq!(sim.nodes()[2].fixed, Some((0.0, 0.0)));

		sim.run_until_settled(5_000);
		assert_eq!(sim.position("c"), Some((0.0, 0.0)));
		assert_ne!(sim.position("a"), Some((0.0, 0.0)));
	}

	#[test]
	fn refocusing_the_same_node_keeps_it_pinned() {
		let store = macro_chain(&["a", "b"], vec![causal("a", "b", "positive", "strong")]);
		let mut sim = sim(&store);
		sim.set_focus(Some("a"));
		sim.set_focus(Some("a"));
		assert_eq!(sim.nodes()[0].fixed, Some((0.0, 0.0)));
	}

	#[test]
	fn unknown_focus_clears() {
		let store = macro_chain(&["a"], vec![]);
		let mut sim = sim(&store);
		sim.set_focus(Some("ghost"));
		assert_eq!(sim.focus(), None);
	}
}
