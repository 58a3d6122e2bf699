//! Property tests over randomly wired graphs.

mod common;

use std::collections::HashSet;

use causal_atlas::graph::{EdgeKind, GraphStore, Stimulus, Strength, find_path, run_scenario};
use proptest::prelude::*;
use serde_json::json;

use common::{causal_json, company_json, macro_json, sector_json, store_from, theme_json};

const DIRECTIONS: [&str; 3] = ["positive", "negative", "complex"];
const STRENGTHS: [&str; 3] = ["strong", "medium", "weak"];

fn macro_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize, usize, usize)>)> {
	(2usize..10).prop_flat_map(|n| {
		let edge = (0..n, 0..n, 0..DIRECTIONS.len(), 0..STRENGTHS.len());
		(Just(n), prop::collection::vec(edge, 0..30))
	})
}

fn build_macro_store(n: usize, edges: &[(usize, usize, usize, usize)]) -> GraphStore {
	let macros: Vec<_> = (0..n).map(|i| macro_json(&format!("m{i}"))).collect();
	let edges: Vec<_> = edges
		.iter()
		.enumerate()
		.map(|(k, &(s, t, d, st))| {
			causal_json(&format!("e{k}"), &format!("m{s}"), &format!("m{t}"), DIRECTIONS[d], STRENGTHS[st])
		})
		.collect();
	store_from(json!({ "macro": macros, "causalEdges": edges }))
}

fn value_chain() -> impl Strategy<Value = Vec<(u32, Vec<String>)>> {
	let member = (0usize..6).prop_map(|i| format!("c{i}"));
	prop::collection::vec((0u32..4, prop::collection::vec(member, 0..4)), 0..5)
}

fn build_theme_store(tiers: &[(u32, Vec<String>)]) -> GraphStore {
	let companies: Vec<_> = (0..6).map(|i| company_json(&format!("c{i}"), "s")).collect();
	store_from(json!({
		"sectors": [sector_json("s")],
		"themes": [theme_json("t", tiers)],
		"companies": companies,
	}))
}

proptest! {
	#[test]
	fn scenario_visits_each_node_once((n, edges) in macro_graph(), source in 0usize..10) {
		let store = build_macro_store(n, &edges);
		let source = format!("m{}", source % n);
		let impacts = run_scenario(&store, &source, Stimulus::Increase);

		let mut seen = HashSet::new();
		for impact in &impacts {
			prop_assert!(seen.insert(impact.node_id.as_str()), "{} reached twice", impact.node_id);
			prop_assert_ne!(&impact.node_id, &source);
			prop_assert!((1..=3).contains(&impact.depth));
		}
		prop_assert!(impacts.len() < n);
	}

	#[test]
	fn scenario_depths_are_breadth_first_and_attenuated((n, edges) in macro_graph(), source in 0usize..10) {
		let store = build_macro_store(n, &edges);
		let impacts = run_scenario(&store, &format!("m{}", source % n), Stimulus::Decrease);

		for pair in impacts.windows(2) {
			prop_assert!(pair[0].depth <= pair[1].depth);
		}
		for impact in &impacts {
			prop_assert!(impact.strength <= Strength::Strong.weakened(impact.depth - 1));
		}
	}

	#[test]
	fn paths_are_chains_of_touching_edges((n, edges) in macro_graph(), from in 0usize..10, to in 0usize..10) {
		let store = build_macro_store(n, &edges);
		let (from, to) = (format!("m{}", from % n), format!("m{}", to % n));
		if let Some(path) = find_path(&store, &from, &to) {
			prop_assert_eq!(path.nodes.first().copied(), Some(from.as_str()));
			prop_assert_eq!(path.nodes.last().copied(), Some(to.as_str()));
			prop_assert_eq!(path.edges.len() + 1, path.nodes.len());
			for (i, edge) in path.edges.iter().enumerate() {
				prop_assert_eq!(edge.other_end(path.nodes[i]), Some(path.nodes[i + 1]));
			}
		}
	}

	#[test]
	fn derived_edges_are_stable_and_unique(tiers in value_chain()) {
		let first = build_theme_store(&tiers);
		let second = build_theme_store(&tiers);
		prop_assert_eq!(first.derived_edges(), second.derived_edges());

		let mut pairs = HashSet::new();
		for edge in first.derived_edges() {
			prop_assert_ne!(&edge.source, &edge.target);
			if edge.kind == EdgeKind::SupplyChain {
				prop_assert!(pairs.insert((edge.source.clone(), edge.target.clone())));
			}
		}
		let memberships = first.derived_edges().iter().filter(|e| e.kind == EdgeKind::BelongsTo).count();
		prop_assert_eq!(memberships, 6);
	}
}
