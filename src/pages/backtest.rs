use std::sync::Arc;

use leptos::prelude::*;
use log::{error, info};

use crate::backtest::{BacktestParams, Holding, run_backtest};
use crate::bundled_dataset;
use crate::graph::{GraphStore, NodeType};

/// Equal-weight portfolio of every bundled company, simulated over a
/// chosen year range.
#[component]
pub fn Backtest() -> impl IntoView {
	let store = match bundled_dataset().and_then(GraphStore::new) {
		Ok(store) => Arc::new(store),
		Err(e) => {
			error!("failed to load companies: {e}");
			return view! { <p class="load-error">"Companies could not be loaded: " {e.to_string()}</p> }
				.into_any();
		}
	};

	let start_year = RwSignal::new(2020);
	let end_year = RwSignal::new(2025);
	let capital = 10_000_000.0;

	let store_run = store.clone();
	let result = Memo::new(move |_| {
		let params = BacktestParams {
			holdings: store_run
				.nodes_of(NodeType::Company)
				.map(|n| Holding {
					company_id: n.id.clone(),
					weight: 1.0,
				})
				.collect(),
			start_year: start_year.get(),
			end_year: end_year.get(),
			initial_capital: capital,
		};
		info!("backtesting {} holdings over {}..{}", params.holdings.len(), params.start_year, params.end_year);
		run_backtest(&params, &store_run)
	});

	let year_input = move |signal: RwSignal<i32>| {
		view! {
			<input
				type="number"
				min="2000"
				max="2030"
				prop:value=move || signal.get().to_string()
				on:change=move |ev| {
					if let Ok(year) = event_target_value(&ev).parse::<i32>() {
						signal.set(year);
					}
				}
			/>
		}
	};

	view! {
		<div class="backtest-page">
			<h1>"Synthetic backtest"</h1>
			<p class="disclaimer">{move || result.with(|r| r.disclaimer())}</p>
			<label>"From " {year_input(start_year)}</label>
			<label>"To " {year_input(end_year)}</label>
			{move || {
				result
					.with(|r| {
						view! {
							<table class="stats">
								<tr><td>"Total return"</td><td>{format!("{:.2}%", r.total_return)}</td></tr>
								<tr><td>"CAGR"</td><td>{format!("{:.2}%", r.cagr)}</td></tr>
								<tr><td>"Max drawdown"</td><td>{format!("{:.2}%", r.max_drawdown)}</td></tr>
								<tr><td>"Volatility"</td><td>{format!("{:.2}%", r.volatility)}</td></tr>
								<tr><td>"Sharpe"</td><td>{format!("{:.2}", r.sharpe_ratio)}</td></tr>
								<tr><td>"Benchmark"</td><td>{format!("{:.2}%", r.benchmark_total_return)}</td></tr>
							</table>
							<ul class="contributions">
								{r
									.holdings
									.iter()
									.map(|h| {
										view! {
											<li>{format!("{} ({:.1}%): {:+.2}%", h.name, h.weight, h.contribution)}</li>
										}
									})
									.collect_view()}
							</ul>
						}
					})
			}}
			<a href="/">"Back to the map"</a>
		</div>
	}
	.into_any()
}
