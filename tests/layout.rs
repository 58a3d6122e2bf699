//! Force and cluster layouts over the bundled dataset.

mod common;

use std::collections::HashSet;

use causal_atlas::graph::{EdgeKind, Movement};
use causal_atlas::layout::{
	ClusterConfig, ForceConfig, Scene3d, SceneFocus, Simulation, ViewTransform, ViewportConfig, cluster_layout,
	hit_test,
};
use causal_atlas::rng::ParkMiller;

use common::bundled_store;

#[test]
fn every_store_edge_becomes_a_link() {
	let store = bundled_store();
	let all = Simulation::from_store(&store, &EdgeKind::ALL, ForceConfig::default());
	assert_eq!(all.nodes().len(), 16);
	assert_eq!(all.links().len(), 16);

	let causal_only = Simulation::from_store(&store, &[EdgeKind::Causal], ForceConfig::default());
	assert_eq!(causal_only.nodes().len(), 16);
	assert_eq!(causal_only.links().len(), 9);
}

#[test]
fn focus_steers_causes_up_and_effects_down() {
	let store = bundled_store();
	let mut sim = Simulation::from_store(&store, &EdgeKind::ALL, ForceConfig::default());
	sim.set_focus(Some("us_fed_rate"));

	let target = |id: &str| sim.focus_target(sim.node_index(id).expect("known node"));
	assert_eq!(target("us_cpi"), Some((0.0, -180.0)));
	assert_eq!(target("us_10y"), Some((0.0, 180.0)));
	assert_eq!(target("usd_krw"), Some((0.0, 180.0)));
	assert_eq!(target("kospi"), None);
}

#[test]
fn focus_on_a_company_spreads_its_value_chain() {
	let store = bundled_store();
	let mut sim = Simulation::from_store(&store, &EdgeKind::ALL, ForceConfig::default());
	sim.set_focus(Some("hanmi_semi"));

	let target = |id: &str| sim.focus_target(sim.node_index(id).expect("known node"));
	assert_eq!(target("sk_hynix"), Some((200.0, 0.0)));
	assert_eq!(target("samsung_elec"), Some((200.0, 0.0)));
	assert_eq!(target("semiconductor"), Some((0.0, 100.0)));
}

#[test]
fn focused_layout_settles_with_focus_pinned_at_center() {
	let store = bundled_store();
	let mut sim = Simulation::from_store(&store, &EdgeKind::ALL, ForceConfig::default());
	sim.set_focus(Some("us_fed_rate"));

	let ticks = sim.run_until_settled(5_000);
	assert!(ticks < 5_000, "did not settle");
	assert!(!sim.is_active());
	assert_eq!(sim.position("us_fed_rate"), Some((0.0, 0.0)));
	assert!(sim.nodes().iter().all(|n| n.x.is_finite() && n.y.is_finite()));

	let transform = ViewTransform::centered(800.0, 600.0);
	let picked = hit_test(sim.nodes(), &transform, 400.0, 300.0, ViewportConfig::default().hit_tolerance);
	assert_eq!(picked, sim.node_index("us_fed_rate"));
}

#[test]
fn cluster_layout_is_reproducible_for_a_seed() {
	let store = bundled_store();
	let config = ClusterConfig::default();
	let first = cluster_layout(store.nodes(), store.edges(), &config, &mut ParkMiller::new(7));
	let second = cluster_layout(store.nodes(), store.edges(), &config, &mut ParkMiller::new(7));

	assert_eq!(first.len(), 16);
	assert_eq!(first, second);
	assert!(first.values().flatten().all(|c| c.is_finite()));
}

#[test]
fn scene_emphasises_the_focus_neighbourhood() {
	let store = bundled_store();
	let positions = cluster_layout(store.nodes(), store.edges(), &ClusterConfig::default(), &mut ParkMiller::new(1));

	let highlighted: HashSet<&str> = store.connected_node_ids("us_fed_rate").into_iter().collect();
	let focus = SceneFocus {
		focus: Some("us_fed_rate"),
		highlighted,
		scenario: [("us_10y", Movement::Up)].into_iter().collect(),
	};
	let scene = Scene3d::build(store.nodes(), store.edges(), &positions, &focus);
	assert_eq!(scene.nodes.len(), 16);
	assert_eq!(scene.edges.len(), 16);

	let node = |id: &str| scene.nodes.iter().find(|n| n.id == id).expect("node in scene");
	assert_eq!(node("us_fed_rate").scale, 1.8);
	assert_eq!(node("us_cpi").opacity, 1.0);
	assert_eq!(node("us_10y").scenario, Some(Movement::Up));
	assert_eq!(node("kospi").opacity, 0.6);

	let emphasised = scene.edges.iter().filter(|e| e.highlighted).count();
	// every edge touching fed, cpi, 10y or usd/krw
	assert_eq!(emphasised, 7);
}
