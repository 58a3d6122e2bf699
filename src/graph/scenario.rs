//! Multi-hop scenario propagation over causal edges.
//!
//! Answers "if this variable increases, what moves downstream, which way and
//! how strongly". The traversal is a layered breadth-first search: each node
//! is annotated by the first edge that reaches it and never revisited, so the
//! output depends on authored edge order when several edges tie at the same
//! depth.

use std::collections::{HashSet, VecDeque};

use log::debug;
use serde::{Deserialize, Serialize};

use super::store::GraphStore;
use super::types::{Edge, EdgeDirection, Strength};

/// The hypothetical move applied to the source node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stimulus {
	/// The source variable rises.
	Increase,
	/// The source variable falls.
	Decrease,
}

/// Inferred movement of a downstream node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
	/// Expected to rise.
	Up,
	/// Expected to fall.
	Down,
	/// Indeterminate.
	Complex,
}

impl From<Stimulus> for Movement {
	fn from(stimulus: Stimulus) -> Self {
		match stimulus {
			Stimulus::Increase => Movement::Up,
			Stimulus::Decrease => Movement::Down,
		}
	}
}

impl Movement {
	fn inverted(self) -> Movement {
		match self {
			Movement::Up => Movement::Down,
			Movement::Down => Movement::Up,
			Movement::Complex => Movement::Complex,
		}
	}

	/// Movement of an edge's target when its source moves `self`.
	///
	/// A complex parent or a complex (or unsigned) edge always yields complex.
	pub fn through(self, direction: Option<EdgeDirection>) -> Movement {
		match (self, direction) {
			(Movement::Complex, _) => Movement::Complex,
			(parent, Some(EdgeDirection::Positive)) => parent,
			(parent, Some(EdgeDirection::Negative)) => parent.inverted(),
			(_, Some(EdgeDirection::Complex) | None) => Movement::Complex,
		}
	}
}

/// Tuning for scenario runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScenarioConfig {
	/// Maximum number of hops from the source.
	pub max_depth: usize,
	/// Strength assumed for causal edges without one.
	pub default_strength: Strength,
}

impl Default for ScenarioConfig {
	fn default() -> Self {
		Self {
			max_depth: 3,
			default_strength: Strength::Medium,
		}
	}
}

impl ScenarioConfig {
	/// Same config with a different hop limit.
	pub fn with_max_depth(self, max_depth: usize) -> Self {
		Self { max_depth, ..self }
	}
}

/// One node reached by a scenario.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioImpact {
	/// The affected node.
	pub node_id: String,
	/// Inferred movement.
	#[serde(rename = "expectedDirection")]
	pub movement: Movement,
	/// Attenuated strength.
	pub strength: Strength,
	/// Mechanism of the edge that reached this node.
	pub mechanism: String,
	/// Time lag of the edge that reached this node.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub time_lag: Option<String>,
	/// Hop count from the source, starting at 1.
	pub depth: usize,
}

/// Runs a scenario with the default three-hop limit.
pub fn run_scenario(store: &GraphStore, source_id: &str, stimulus: Stimulus) -> Vec<ScenarioImpact> {
	run_scenario_with(store, source_id, stimulus, &ScenarioConfig::default())
}

/// Propagates `stimulus` from `source_id` along causal edges.
///
/// Strength at depth `d` is the triggering edge's own strength stepped down
/// `d - 1` grades. The source is never part of the result, and an unknown or
/// isolated source yields an empty result.
pub fn run_scenario_with(
	store: &GraphStore,
	source_id: &str,
	stimulus: Stimulus,
	config: &ScenarioConfig,
) -> Vec<ScenarioImpact> {
	let mut impacts = Vec::new();
	if config.max_depth == 0 {
		return impacts;
	}

	let mut visited: HashSet<&str> = HashSet::from([source_id]);
	let mut queue: VecDeque<(&str, Movement, usize)> = VecDeque::new();
	queue.push_back((source_id, Movement::from(stimulus), 0));

	while let Some((id, movement, depth)) = queue.pop_front() {
		if depth >= config.max_depth {
			continue;
		}
		for edge in store.outgoing_causal(id) {
			if !visited.insert(edge.target.as_str()) {
				continue;
			}
			let next = movement.through(edge.direction);
			impacts.push(impact(edge, next, depth + 1, config));
			queue.push_back((edge.target.as_str(), next, depth + 1));
		}
	}

	debug!(
		"scenario {:?} from '{}' reached {} nodes",
		stimulus,
		source_id,
		impacts.len()
	);
	impacts
}

fn impact(edge: &Edge, movement: Movement, depth: usize, config: &ScenarioConfig) -> ScenarioImpact {
	let strength = edge.strength.unwrap_or(config.default_strength);
	ScenarioImpact {
		node_id: edge.target.clone(),
		movement,
		strength: strength.weakened(depth - 1),
		mechanism: edge.mechanism.clone().unwrap_or_default(),
		time_lag: edge.time_lag.clone(),
		depth,
	}
}

/// Stable sort putting strong impacts first.
pub fn sort_by_strength(impacts: &mut [ScenarioImpact]) {
	impacts.sort_by(|a, b| b.strength.cmp(&a.strength));
}

/// Tally of a scenario result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioSummary {
	/// Impacts moving up.
	pub up: usize,
	/// Impacts moving down.
	pub down: usize,
	/// Indeterminate impacts.
	pub complex: usize,
	/// Impacts graded strong.
	pub strong: usize,
}

impl ScenarioSummary {
	/// Counts impacts by movement and strength.
	pub fn of(impacts: &[ScenarioImpact]) -> Self {
		impacts.iter().fold(Self::default(), |mut s, i| {
			match i.movement {
				Movement::Up => s.up += 1,
				Movement::Down => s.down += 1,
				Movement::Complex => s.complex += 1,
			}
			if i.strength == Strength::Strong {
				s.strong += 1;
			}
			s
		})
	}
}
