use std::collections::{HashMap, HashSet};

use log::debug;

use crate::graph::{EdgeKind, GraphStore, Movement};
use crate::layout::{ForceConfig, Highlight, Simulation, ViewTransform, ViewportConfig, hit_test};

/// Screen-space distance a press may travel and still count as a click.
const CLICK_SLOP: f64 = 4.0;

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<usize>,
	pub highlight_t: f64,
	pub prev_node: Option<usize>,
	delay_t: f64,
}

/// What a released pointer amounted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerUp {
	/// A press and release on a node without dragging it.
	ClickNode(usize),
	/// A press and release on empty canvas without panning.
	ClickBackground,
	/// A drag or pan ended.
	Gesture,
}

pub struct ForceGraphState {
	pub sim: Simulation,
	pub transform: ViewTransform,
	pub viewport: ViewportConfig,
	pub highlight: Highlight,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
}

impl ForceGraphState {
	pub fn new(store: &GraphStore, kinds: &[EdgeKind], width: f64, height: f64) -> Self {
		Self {
			sim: Simulation::from_store(store, kinds, ForceConfig::default()),
			transform: ViewTransform::centered(width, height),
			viewport: ViewportConfig::default(),
			highlight: Highlight::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			flow_time: 0.0,
		}
	}

	/// Rebuilds the simulation over another set of edge kinds, keeping the
	/// view and re-entering focus mode on the current selection.
	pub fn rebuild(&mut self, store: &GraphStore, kinds: &[EdgeKind]) {
		let selected = self.highlight.selected().map(str::to_owned);
		self.sim = Simulation::from_store(store, kinds, ForceConfig::default());
		self.drag = DragState::default();
		self.hover = HoverState::default();
		self.highlight.select(None, Vec::new());
		self.select(selected.as_deref());
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		hit_test(self.sim.nodes(), &self.transform, sx, sy, self.viewport.hit_tolerance)
	}

	/// Enters or leaves focus mode and refreshes the neighbourhood highlight.
	pub fn select(&mut self, id: Option<&str>) {
		if self.highlight.selected() == id {
			return;
		}
		self.sim.set_focus(id);
		let focus = self.sim.focus();
		let connected: Vec<String> = focus
			.map(|f| self.sim.neighbors(f).map(|n| self.sim.nodes()[n].id.clone()).collect())
			.unwrap_or_default();
		let selected = focus.map(|f| self.sim.nodes()[f].id.clone());
		debug!("canvas selection {:?} with {} neighbours", selected, connected.len());
		self.highlight.select(selected, connected);
	}

	pub fn set_search(&mut self, matches: Option<HashSet<String>>) {
		self.highlight.set_search(matches);
	}

	pub fn set_scenario(&mut self, movements: HashMap<String, Movement>) {
		self.highlight.set_scenario(movements);
	}

	pub fn begin_pointer(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.node_at_position(x, y) {
			let node = &self.sim.nodes()[idx];
			self.drag = DragState {
				active: true,
				node_idx: Some(idx),
				start_x: x,
				start_y: y,
				node_start_x: node.x,
				node_start_y: node.y,
				moved: false,
			};
		} else {
			self.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
				moved: false,
			};
		}
	}

	pub fn move_pointer(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered);
		}

		if self.drag.active {
			let Some(idx) = self.drag.node_idx else {
				return;
			};
			if !self.drag.moved && travelled(self.drag.start_x, self.drag.start_y, x, y) <= CLICK_SLOP {
				return;
			}
			self.drag.moved = true;
			let (dx, dy) = (
				(x - self.drag.start_x) / self.transform.k,
				(y - self.drag.start_y) / self.transform.k,
			);
			// the focus node stays pinned at the center
			if self.sim.focus() != Some(idx) {
				self.sim.pin(idx, self.drag.node_start_x + dx, self.drag.node_start_y + dy);
				self.sim.reheat(self.sim.alpha().max(0.3));
			}
		} else if self.pan.active {
			self.pan.moved |= travelled(self.pan.start_x, self.pan.start_y, x, y) > CLICK_SLOP;
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// Ends a gesture. Dragged nodes stay pinned where they were dropped.
	pub fn end_pointer(&mut self) -> PointerUp {
		let outcome = if self.drag.active {
			match (self.drag.node_idx, self.drag.moved) {
				(Some(idx), false) => PointerUp::ClickNode(idx),
				_ => PointerUp::Gesture,
			}
		} else if self.pan.active && !self.pan.moved {
			PointerUp::ClickBackground
		} else {
			PointerUp::Gesture
		};
		self.drag = DragState::default();
		self.pan = PanState::default();
		outcome
	}

	pub fn leave(&mut self) {
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.set_hover(None);
	}

	pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64) {
		self.transform.wheel(x, y, delta_y, &self.viewport);
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// keep the old node around while it fades out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
		} else {
			self.hover.prev_node = None;
		}

		self.hover.node = node;
		if node.is_some() && !was_hovering {
			self.hover.delay_t = 0.0;
		}
	}

	pub fn is_hovered(&self, idx: usize) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn hovered_id(&self) -> Option<&str> {
		self.hover.node.map(|i| self.sim.nodes()[i].id.as_str())
	}

	pub fn tick(&mut self, dt: f64) {
		self.sim.step();
		self.flow_time += dt;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}

fn travelled(x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
	((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::fixtures::{causal, macro_chain};

	fn state() -> ForceGraphState {
		let store = macro_chain(&["fed", "cpi"], vec![causal("fed", "cpi", "negative", "strong")]);
		ForceGraphState::new(&store, &EdgeKind::ALL, 800.0, 600.0)
	}

	fn screen_of(s: &ForceGraphState, id: &str) -> (f64, f64) {
		let (x, y) = s.sim.position(id).unwrap();
		s.transform.world_to_screen(x, y)
	}

	#[test]
	fn press_and_release_on_node_is_a_click() {
		let mut s = state();
		let (x, y) = screen_of(&s, "fed");
		s.begin_pointer(x, y);
		s.move_pointer(x + 1.0, y);
		assert_eq!(s.end_pointer(), PointerUp::ClickNode(0));
	}

	#[test]
	fn dragging_pins_the_node() {
		let mut s = state();
		let (x, y) = screen_of(&s, "cpi");
		s.begin_pointer(x, y);
		s.move_pointer(x + 40.0, y + 10.0);
		assert_eq!(s.end_pointer(), PointerUp::Gesture);
		let node = &s.sim.nodes()[1];
		assert!(node.fixed.is_some());
	}

	#[test]
	fn background_press_pans_or_clicks() {
		let mut s = state();
		s.begin_pointer(5.0, 5.0);
		assert_eq!(s.end_pointer(), PointerUp::ClickBackground);

		s.begin_pointer(5.0, 5.0);
		s.move_pointer(55.0, 5.0);
		assert_eq!(s.end_pointer(), PointerUp::Gesture);
		assert_eq!(s.transform.x, 450.0);
	}

	#[test]
	fn selection_highlights_neighbours() {
		let mut s = state();
		s.select(Some("fed"));
		assert_eq!(s.highlight.selected(), Some("fed"));
		assert!(s.highlight.is_connected("cpi"));
		assert_eq!(s.sim.focus(), Some(0));
		s.select(None);
		assert!(!s.highlight.has_focus());
	}

	#[test]
	fn rebuild_keeps_selection() {
		let store = macro_chain(&["fed", "cpi"], vec![causal("fed", "cpi", "negative", "strong")]);
		let mut s = ForceGraphState::new(&store, &EdgeKind::ALL, 800.0, 600.0);
		s.select(Some("cpi"));
		s.rebuild(&store, &[EdgeKind::BelongsTo]);
		assert!(s.sim.links().is_empty());
		assert_eq!(s.highlight.selected(), Some("cpi"));
		assert_eq!(s.sim.position("cpi"), Some((0.0, 0.0)));
		assert!(!s.highlight.is_connected("fed"));
	}

	#[test]
	fn hover_fades_out() {
		let mut s = state();
		s.set_hover(Some(0));
		for _ in 0..60 {
			s.tick(0.016);
		}
		assert!(s.hover.highlight_t > 0.5);
		s.set_hover(None);
		assert!(s.is_hovered(0));
		for _ in 0..400 {
			s.tick(0.016);
		}
		assert_eq!(s.hover.highlight_t, 0.0);
		assert!(!s.is_hovered(0));
	}
}
