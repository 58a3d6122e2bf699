//! Spatial layouts of the causal map.
//!
//! Two strategies consume the same nodes and edges: a 2D force simulation
//! with focus mode ([`Simulation`]) and a 3D clustered layout
//! ([`cluster_layout`]). Neither touches the DOM; the canvas component drives
//! the simulation and paints what [`Highlight`] says.

mod cluster;
mod force;
mod viewport;
mod visual;

pub use cluster::{ClusterConfig, Positions, Scene3d, SceneEdge, SceneFocus, SceneNode, cluster_layout};
pub use force::{ForceConfig, LinkProfile, SimLink, SimNode, Simulation};
pub use viewport::{ViewTransform, ViewportConfig, hit_test};
pub use visual::{
	COMPLEX_COLOR, DOWN_COLOR, EdgeVisual, Highlight, NodeVisual, UP_COLOR, category_color, direction_color,
	edge_color, movement_color, node_color, node_radius, node_size_3d, strength_width,
};
