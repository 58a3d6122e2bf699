//! Colours, sizes and highlight state shared by both layouts.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::graph::{EdgeDirection, EdgeKind, MacroCategory, Movement, NodeType, Strength};

/// Scenario colour for rising nodes.
pub const UP_COLOR: &str = "#10B981";
/// Scenario colour for falling nodes.
pub const DOWN_COLOR: &str = "#EF4444";
/// Scenario colour for indeterminate nodes, also the selection accent.
pub const COMPLEX_COLOR: &str = "#F59E0B";

/// Base colour of a node kind.
pub fn node_color(node_type: NodeType) -> &'static str {
	match node_type {
		NodeType::Macro => "#06B6D4",
		NodeType::Sector => "#8B5CF6",
		NodeType::Theme => "#F59E0B",
		NodeType::Company => "#34D399",
	}
}

/// 2D radius in world units.
pub fn node_radius(node_type: NodeType) -> f64 {
	match node_type {
		NodeType::Macro => 8.0,
		NodeType::Sector => 12.0,
		NodeType::Theme => 10.0,
		NodeType::Company => 7.0,
	}
}

/// 3D sphere size.
pub fn node_size_3d(node_type: NodeType) -> f64 {
	match node_type {
		NodeType::Macro => 1.2,
		NodeType::Company => 0.8,
		NodeType::Sector | NodeType::Theme => 1.0,
	}
}

/// Accent colour of a macro category.
pub fn category_color(category: MacroCategory) -> &'static str {
	match category {
		MacroCategory::MonetaryPolicy => "#06B6D4",
		MacroCategory::Currency => "#3B82F6",
		MacroCategory::Bond => "#8B5CF6",
		MacroCategory::Commodity => "#F59E0B",
		MacroCategory::CommodityEnergy => "#EF4444",
		MacroCategory::CommodityMetal => "#D97706",
		MacroCategory::CommodityAgri => "#84CC16",
		MacroCategory::Indicator => "#10B981",
		MacroCategory::Flow => "#EC4899",
		MacroCategory::Index => "#6366F1",
	}
}

/// Colour of a scenario movement.
pub fn movement_color(movement: Movement) -> &'static str {
	match movement {
		Movement::Up => UP_COLOR,
		Movement::Down => DOWN_COLOR,
		Movement::Complex => COMPLEX_COLOR,
	}
}

/// 2D edge stroke: muted by default, saturated when touching the selection.
pub fn edge_color(kind: EdgeKind, highlighted: bool) -> &'static str {
	match (kind, highlighted) {
		(EdgeKind::Causal, false) => "rgba(6, 182, 212, 0.4)",
		(EdgeKind::Causal, true) => "rgba(6, 182, 212, 0.9)",
		(EdgeKind::SupplyChain, false) => "rgba(245, 158, 11, 0.4)",
		(EdgeKind::SupplyChain, true) => "rgba(245, 158, 11, 0.9)",
		(EdgeKind::BelongsTo, false) => "rgba(139, 92, 246, 0.15)",
		(EdgeKind::BelongsTo, true) => "rgba(139, 92, 246, 0.5)",
	}
}

/// 3D edge colour by causal sign.
pub fn direction_color(direction: Option<EdgeDirection>) -> &'static str {
	match direction {
		Some(EdgeDirection::Positive) => UP_COLOR,
		Some(EdgeDirection::Negative) => DOWN_COLOR,
		Some(EdgeDirection::Complex) | None => COMPLEX_COLOR,
	}
}

/// 3D line width by strength.
pub fn strength_width(strength: Option<Strength>) -> f64 {
	match strength {
		Some(Strength::Strong) => 2.5,
		Some(Strength::Medium) => 1.8,
		Some(Strength::Weak) | None => 1.0,
	}
}

/// How one 2D node should be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NodeVisual {
	/// Fill colour.
	pub color: &'static str,
	/// Global alpha.
	pub opacity: f64,
	/// Multiplier on the base radius.
	pub scale: f64,
	/// Selected, hovered or connected: draw a border and always label.
	pub emphasized: bool,
}

/// How one 2D edge should be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EdgeVisual {
	/// Stroke colour.
	pub color: &'static str,
	/// Line width.
	pub width: f64,
	/// Global alpha.
	pub opacity: f64,
	/// Draw an arrowhead at the target.
	pub arrow: bool,
}

/// Selection, search and scenario state driving 2D emphasis.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Highlight {
	selected: Option<String>,
	connected: HashSet<String>,
	search: Option<HashSet<String>>,
	scenario: HashMap<String, Movement>,
}

impl Highlight {
	/// Sets or clears the selected node and its neighbourhood.
	pub fn select(&mut self, selected: Option<String>, connected: impl IntoIterator<Item = String>) {
		self.connected = match selected {
			Some(_) => connected.into_iter().collect(),
			None => HashSet::new(),
		};
		self.selected = selected;
	}

	/// Sets the nodes matching the current search, `None` when no search is active.
	pub fn set_search(&mut self, matches: Option<HashSet<String>>) {
		self.search = matches;
	}

	/// Sets the scenario movements used to recolour nodes. Empty clears them.
	pub fn set_scenario(&mut self, movements: HashMap<String, Movement>) {
		self.scenario = movements;
	}

	/// The selected node id.
	pub fn selected(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	/// Whether `id` neighbours the selection.
	pub fn is_connected(&self, id: &str) -> bool {
		self.connected.contains(id)
	}

	/// True while a selection is active.
	pub fn has_focus(&self) -> bool {
		self.selected.is_some()
	}

	/// Scenario movement of `id`, if any.
	pub fn scenario_movement(&self, id: &str) -> Option<Movement> {
		self.scenario.get(id).copied()
	}

	/// Visual for node `id` of `node_type`.
	///
	/// Search dimming wins over focus dimming.
	pub fn node_visual(&self, id: &str, node_type: NodeType, hovered: bool) -> NodeVisual {
		let selected = self.selected.as_deref() == Some(id);
		let connected = self.connected.contains(id);

		let mut opacity = 1.0;
		if self.has_focus() && !selected && !connected {
			opacity = 0.12;
		}
		if self.search.as_ref().is_some_and(|m| !m.contains(id)) {
			opacity = 0.08;
		}

		let scale = if selected {
			1.8
		} else if hovered {
			1.4
		} else {
			1.0
		};

		let color = if selected {
			COMPLEX_COLOR
		} else if let Some(m) = self.scenario_movement(id) {
			movement_color(m)
		} else {
			node_color(node_type)
		};

		NodeVisual {
			color,
			opacity,
			scale,
			emphasized: selected || hovered || connected,
		}
	}

	/// Visual for an edge between `source` and `target`.
	pub fn edge_visual(&self, source: &str, target: &str, kind: EdgeKind, strength: Option<Strength>) -> EdgeVisual {
		let touching = self
			.selected
			.as_deref()
			.is_some_and(|s| s == source || s == target);
		if touching {
			EdgeVisual {
				color: edge_color(kind, true),
				width: if strength == Some(Strength::Strong) { 2.0 } else { 1.2 },
				opacity: 1.0,
				arrow: kind == EdgeKind::Causal,
			}
		} else {
			EdgeVisual {
				color: edge_color(kind, false),
				width: 0.5,
				opacity: if self.has_focus() { 0.05 } else { 0.5 },
				arrow: false,
			}
		}
	}
}
