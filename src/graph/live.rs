//! Preferring live quotes over the static snapshot embedded in a node.
//!
//! Fetching is somebody else's job. A [`QuoteProvider`] hands back whatever it
//! has for a node id; a missing or failed quote falls back to the fixture data.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::types::{Node, NodeKind, Trend};

/// A value reported by an external data provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveQuote {
	/// Latest value, display text.
	pub value: String,
	/// Change since the previous observation.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub change: Option<String>,
	/// Direction of the change.
	pub direction: Trend,
	/// Observation date.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub as_of_date: Option<String>,
	/// Provider tag, e.g. `FRED`.
	pub source_tag: String,
}

/// Source of live quotes, keyed by node id.
pub trait QuoteProvider {
	/// The latest quote for `node_id`, if the provider has one.
	fn quote(&self, node_id: &str) -> Option<LiveQuote>;
}

/// A provider that never has data.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoLiveQuotes;

impl QuoteProvider for NoLiveQuotes {
	fn quote(&self, _node_id: &str) -> Option<LiveQuote> {
		None
	}
}

impl QuoteProvider for HashMap<String, LiveQuote> {
	fn quote(&self, node_id: &str) -> Option<LiveQuote> {
		self.get(node_id).cloned()
	}
}

/// Where a displayed value came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "tag")]
pub enum ValueSource {
	/// A live quote from the named provider.
	Live(String),
	/// The snapshot bundled with the dataset.
	Static,
}

/// The value shown next to a node.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayValue {
	/// Value text.
	pub value: String,
	/// Change text.
	pub change: Option<String>,
	/// Change direction.
	pub direction: Trend,
	/// Observation date, live quotes only.
	pub as_of_date: Option<String>,
	/// Origin of the value.
	pub source: ValueSource,
}

/// Resolves the value to display for `node`.
///
/// Macro nodes fall back to their snapshot; companies fall back to the
/// valuation price. Sectors, themes and nodes without a snapshot only show
/// live data.
pub fn resolve_display_value(node: &Node, provider: &dyn QuoteProvider) -> Option<DisplayValue> {
	if let Some(quote) = provider.quote(&node.id) {
		return Some(DisplayValue {
			value: quote.value,
			change: quote.change,
			direction: quote.direction,
			as_of_date: quote.as_of_date,
			source: ValueSource::Live(quote.source_tag),
		});
	}
	match &node.kind {
		NodeKind::Macro(attrs) => attrs.current_value.as_ref().map(|value| DisplayValue {
			value: value.clone(),
			change: attrs.change.clone(),
			direction: attrs.change_direction.unwrap_or(Trend::Neutral),
			as_of_date: None,
			source: ValueSource::Static,
		}),
		NodeKind::Company(attrs) => attrs.valuation.as_ref().map(|v| DisplayValue {
			value: format!("{}", v.current_price),
			change: None,
			direction: Trend::Neutral,
			as_of_date: Some(v.last_updated.clone()).filter(|d| !d.is_empty()),
			source: ValueSource::Static,
		}),
		NodeKind::Sector(_) | NodeKind::Theme(_) => None,
	}
}
