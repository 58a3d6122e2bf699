//! Screen/world mapping, zoom and node picking.

use super::force::SimNode;

/// Zoom limits and picking slack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportConfig {
	/// Furthest zoom out.
	pub min_zoom: f64,
	/// Furthest zoom in.
	pub max_zoom: f64,
	/// Extra world-space distance around a node that still counts as a hit.
	pub hit_tolerance: f64,
	/// Zoom factor per wheel notch.
	pub wheel_step: f64,
}

impl Default for ViewportConfig {
	fn default() -> Self {
		Self {
			min_zoom: 0.15,
			max_zoom: 5.0,
			hit_tolerance: 4.0,
			wheel_step: 1.1,
		}
	}
}

/// Pan offset `(x, y)` in screen pixels and zoom `k`.
///
/// `screen = world * k + (x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	/// Horizontal pan.
	pub x: f64,
	/// Vertical pan.
	pub y: f64,
	/// Zoom.
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self { x: 0.0, y: 0.0, k: 1.0 }
	}
}

impl ViewTransform {
	/// Identity zoom with the world origin at the middle of the viewport.
	pub fn centered(width: f64, height: f64) -> Self {
		Self {
			x: width / 2.0,
			y: height / 2.0,
			k: 1.0,
		}
	}

	/// Inverse of the view transform.
	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Applies the view transform.
	pub fn world_to_screen(&self, wx: f64, wy: f64) -> (f64, f64) {
		(wx * self.k + self.x, wy * self.k + self.y)
	}

	/// Scales by `factor` around a screen point, which stays fixed.
	///
	/// The resulting zoom is clamped to the configured range.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64, config: &ViewportConfig) {
		let k = (self.k * factor).clamp(config.min_zoom, config.max_zoom);
		let (wx, wy) = self.screen_to_world(sx, sy);
		self.k = k;
		self.x = sx - wx * k;
		self.y = sy - wy * k;
	}

	/// One wheel notch: negative `delta_y` zooms in.
	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64, config: &ViewportConfig) {
		let factor = if delta_y < 0.0 {
			config.wheel_step
		} else {
			1.0 / config.wheel_step
		};
		self.zoom_at(sx, sy, factor, config);
	}

	/// Shifts the view by a screen-space delta.
	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.x += dx;
		self.y += dy;
	}
}

/// The node under a screen point.
///
/// Picks the nearest node whose center lies within its radius plus
/// `tolerance`. On equal distance the later node, drawn on top, wins.
pub fn hit_test(nodes: &[SimNode], transform: &ViewTransform, sx: f64, sy: f64, tolerance: f64) -> Option<usize> {
	let (wx, wy) = transform.screen_to_world(sx, sy);
	let mut best: Option<(usize, f64)> = None;
	for (i, node) in nodes.iter().enumerate().rev() {
		let dist = ((node.x - wx).powi(2) + (node.y - wy).powi(2)).sqrt();
		if dist >= node.radius + tolerance {
			continue;
		}
		if best.is_none_or(|(_, d)| dist < d) {
			best = Some((i, dist));
		}
	}
	best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::NodeType;

	fn node(id: &str, x: f64, y: f64) -> SimNode {
		SimNode {
			id: id.into(),
			name: id.into(),
			node_type: NodeType::Macro,
			radius: 8.0,
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			fixed: None,
		}
	}

	#[test]
	fn screen_world_round_trip() {
		let t = ViewTransform { x: 400.0, y: 300.0, k: 2.0 };
		assert_eq!(t.screen_to_world(420.0, 280.0), (10.0, -10.0));
		assert_eq!(t.world_to_screen(10.0, -10.0), (420.0, 280.0));
	}

	#[test]
	fn zoom_keeps_anchor_fixed_and_clamps() {
		let config = ViewportConfig::default();
		let mut t = ViewTransform::centered(800.0, 600.0);
		let before = t.screen_to_world(100.0, 50.0);
		t.zoom_at(100.0, 50.0, 2.0, &config);
		assert_eq!(t.k, 2.0);
		let after = t.screen_to_world(100.0, 50.0);
		assert!((before.0 - after.0).abs() < 1e-9 && (before.1 - after.1).abs() < 1e-9);

		t.zoom_at(0.0, 0.0, 100.0, &config);
		assert_eq!(t.k, 5.0);
		t.zoom_at(0.0, 0.0, 0.0001, &config);
		assert_eq!(t.k, 0.15);
	}

	#[test]
	fn wheel_direction() {
		let config = ViewportConfig::default();
		let mut t = ViewTransform::default();
		t.wheel(0.0, 0.0, -120.0, &config);
		assert!(t.k > 1.0);
		t.wheel(0.0, 0.0, 120.0, &config);
		t.wheel(0.0, 0.0, 120.0, &config);
		assert!(t.k < 1.0);
	}

	#[test]
	fn hit_test_uses_radius_plus_tolerance() {
		let t = ViewTransform::centered(200.0, 200.0);
		let nodes = vec![node("a", 0.0, 0.0), node("b", 50.0, 0.0)];
		assert_eq!(hit_test(&nodes, &t, 100.0, 100.0, 4.0), Some(0));
		assert_eq!(hit_test(&nodes, &t, 111.0, 100.0, 4.0), Some(0));
		assert_eq!(hit_test(&nodes, &t, 113.0, 100.0, 4.0), None);
		assert_eq!(hit_test(&nodes, &t, 148.0, 100.0, 4.0), Some(1));
	}

	#[test]
	fn hit_test_prefers_nearest_then_topmost() {
		let t = ViewTransform::default();
		let nodes = vec![node("under", 0.0, 0.0), node("over", 6.0, 0.0)];
		assert_eq!(hit_test(&nodes, &t, 1.0, 0.0, 4.0), Some(0));
		assert_eq!(hit_test(&nodes, &t, 3.0, 0.0, 4.0), Some(1));
	}

	#[test]
	fn hit_test_follows_zoom() {
		let mut t = ViewTransform::default();
		t.zoom_at(0.0, 0.0, 2.0, &ViewportConfig::default());
		let nodes = vec![node("a", 10.0, 10.0)];
		assert_eq!(hit_test(&nodes, &t, 20.0, 20.0, 4.0), Some(0));
		assert_eq!(hit_test(&nodes, &t, 40.0, 40.0, 4.0), None);
	}
}
