//! Causal Atlas: a macro-economic causal map.
//!
//! The engine lives in plain modules that never touch the DOM:
//! [`graph`] (store, scenario propagation, path finding), [`layout`]
//! (2D force simulation and 3D clustered layout), [`backtest`] (synthetic
//! portfolio simulation) and [`rng`]. The Leptos client-side app wires them
//! to a canvas.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

pub mod backtest;
pub mod error;
pub mod graph;
pub mod layout;
pub mod rng;

// Modules
mod components;
mod pages;

// Top-Level pages
use crate::pages::backtest::Backtest;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

pub use error::{AtlasError, Result};

const BUNDLED_DATASET: &str = include_str!("../data/atlas.json");

/// The dataset shipped with the app.
pub fn bundled_dataset() -> Result<graph::GraphDataset> {
	graph::GraphDataset::from_json(BUNDLED_DATASET)
}

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router with the map, the backtest page and a 404 fallback.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="Causal Atlas" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/backtest") view=Backtest />
			</Routes>
		</Router>
	}
}
