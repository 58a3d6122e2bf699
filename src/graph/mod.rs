//! The causal map: data model, store and traversals.

mod dataset;
mod derive;
mod live;
mod path;
mod scenario;
mod store;
mod types;

pub use dataset::GraphDataset;
pub use derive::{membership_edges, supply_chain_edges};
pub use live::{DisplayValue, LiveQuote, NoLiveQuotes, QuoteProvider, ValueSource, resolve_display_value};
pub use path::{GraphPath, find_path};
pub use scenario::{
	Movement, ScenarioConfig, ScenarioImpact, ScenarioSummary, Stimulus, run_scenario,
	run_scenario_with, sort_by_strength,
};
pub use store::{GraphStats, GraphStore};
pub use types::{
	CompanyAttrs, Edge, EdgeDirection, EdgeKind, Financials, MacroAttrs, MacroCategory, Market, Node,
	NodeKind, NodeType, Region, SectorAttrs, Strength, ThemeAttrs, Tier, Trend, Valuation,
};
