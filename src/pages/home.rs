use std::sync::Arc;

use leptos::prelude::*;
use log::error;

use crate::bundled_dataset;
use crate::components::force_graph::ForceGraphCanvas;
use crate::graph::{
	EdgeKind, GraphStore, Movement, NoLiveQuotes, ScenarioImpact, ScenarioSummary, Stimulus, find_path,
	resolve_display_value, run_scenario, sort_by_strength,
};
use crate::layout::movement_color;

fn movement_label(m: Movement) -> &'static str {
	match m {
		Movement::Up => "▲",
		Movement::Down => "▼",
		Movement::Complex => "◆",
	}
}

/// The causal map explorer.
#[component]
pub fn Home() -> impl IntoView {
	let store = match bundled_dataset().and_then(GraphStore::new) {
		Ok(store) => Arc::new(store),
		Err(e) => {
			error!("failed to load the causal map: {e}");
			return view! { <p class="load-error">"The causal map could not be loaded: " {e.to_string()}</p> }
				.into_any();
		}
	};
	let stats = store.stats();

	let selected = RwSignal::new(None::<String>);
	let search = RwSignal::new(String::new());
	let show_supply = RwSignal::new(true);
	let show_membership = RwSignal::new(true);
	let scenario_source = RwSignal::new(None::<(String, Stimulus)>);

	let edge_kinds = Signal::derive(move || {
		let mut kinds = vec![EdgeKind::Causal];
		if show_supply.get() {
			kinds.push(EdgeKind::SupplyChain);
		}
		if show_membership.get() {
			kinds.push(EdgeKind::BelongsTo);
		}
		kinds
	});

	let store_scn = store.clone();
	let impacts = Memo::new(move |_| {
		scenario_source.with(|source| {
			source
				.as_ref()
				.map(|(id, stimulus)| {
					let mut impacts = run_scenario(&store_scn, id, *stimulus);
					sort_by_strength(&mut impacts);
					impacts
				})
				.unwrap_or_default()
		})
	});

	let store_details = store.clone();
	let details = move || {
		let id = selected.get()?;
		let node = store_details.node(&id)?.clone();
		let value = resolve_display_value(&node, &NoLiveQuotes);
		let neighbours = store_details.connected_node_ids(&id).len();
		let path = scenario_source.with(|source| {
			let (from, _) = source.as_ref()?;
			if *from == id {
				return None;
			}
			find_path(&store_details, from, &id).map(|p| {
				p.nodes
					.iter()
					.filter_map(|n| store_details.node(n).map(|n| n.name.clone()))
					.collect::<Vec<_>>()
					.join(" → ")
			})
		});
		let (run_up, run_down) = (id.clone(), id);
		Some(view! {
			<section class="node-details">
				<h2>{node.name.clone()}</h2>
				<p class="subtitle">{node.name_en.clone()}</p>
				<p>{node.description.clone()}</p>
				{value.map(|v| view! {
					<p class="value">
						{v.value} " " {v.change.unwrap_or_default()}
					</p>
				})}
				<p class="meta">{format!("{neighbours} connections")}</p>
				{path.map(|p| view! { <p class="path">"Path from scenario source: " {p}</p> })}
				<div class="scenario-buttons">
					<button on:click=move |_| scenario_source.set(Some((run_up.clone(), Stimulus::Increase)))>
						"If this rises"
					</button>
					<button on:click=move |_| scenario_source.set(Some((run_down.clone(), Stimulus::Decrease)))>
						"If this falls"
					</button>
				</div>
			</section>
		})
	};

	let store_results = store.clone();
	let results = move || {
		let list: Vec<ScenarioImpact> = impacts.get();
		if list.is_empty() {
			return None;
		}
		let summary = ScenarioSummary::of(&list);
		let rows = list
			.into_iter()
			.map(|impact| {
				let name = store_results
					.node(&impact.node_id)
					.map(|n| n.name.clone())
					.unwrap_or_else(|| impact.node_id.clone());
				let color = format!("color: {}", movement_color(impact.movement));
				let id = impact.node_id.clone();
				view! {
					<li on:click=move |_| selected.set(Some(id.clone()))>
						<span style=color>{movement_label(impact.movement)}</span>
						" " {name}
						<span class="meta">{format!(" {:?} · hop {}", impact.strength, impact.depth)}</span>
						<p class="mechanism">{impact.mechanism}</p>
					</li>
				}
			})
			.collect_view();
		Some(view! {
			<section class="scenario-results">
				<h3>
					{format!(
						"▲ {} · ▼ {} · ◆ {} · strong {}",
						summary.up,
						summary.down,
						summary.complex,
						summary.strong,
					)}
				</h3>
				<button on:click=move |_| scenario_source.set(None)>"Clear scenario"</button>
				<ul>{rows}</ul>
			</section>
		})
	};

	view! {
		<div class="fullscreen-graph">
			<ForceGraphCanvas
				store=store.clone()
				selected=selected
				scenario=impacts
				search=search
				edge_kinds=edge_kinds
				fullscreen=true
			/>
			<div class="graph-overlay">
				<h1>"Causal Atlas"</h1>
				<p class="subtitle">
					{format!(
						"{} nodes · {} edges · {} causal · {} strong",
						stats.total_nodes,
						stats.total_edges,
						stats.causal_edges,
						stats.strong_edges,
					)}
				</p>
				<input
					type="search"
					placeholder="Search nodes"
					prop:value=move || search.get()
					on:input=move |ev| search.set(event_target_value(&ev))
				/>
				<label>
					<input
						type="checkbox"
						prop:checked=move || show_supply.get()
						on:change=move |ev| show_supply.set(event_target_checked(&ev))
					/>
					"Supply chain"
				</label>
				<label>
					<input
						type="checkbox"
						prop:checked=move || show_membership.get()
						on:change=move |ev| show_membership.set(event_target_checked(&ev))
					/>
					"Sector membership"
				</label>
				<a href="/backtest">"Backtest"</a>
				{details}
				{results}
			</div>
		</div>
	}
	.into_any()
}
