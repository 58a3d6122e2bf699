//! Node and edge data model.
//!
//! Every node shares a common header (`id`, names, description, tags) and
//! carries exactly one [`NodeKind`] payload. Field names follow the camelCase
//! keys of the JSON fixtures, with the kind selected by the `"type"` tag.

use serde::{Deserialize, Serialize};

/// A node of the causal map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
	/// Globally unique id shared by all node kinds.
	pub id: String,
	/// Local display name.
	pub name: String,
	/// English display name.
	#[serde(default)]
	pub name_en: String,
	/// Free-text description.
	#[serde(default)]
	pub description: String,
	/// Search tags.
	#[serde(default)]
	pub tags: Vec<String>,
	/// Variant payload.
	#[serde(flatten)]
	pub kind: NodeKind,
}

impl Node {
	/// The variant tag of this node.
	pub fn node_type(&self) -> NodeType {
		match self.kind {
			NodeKind::Macro(_) => NodeType::Macro,
			NodeKind::Sector(_) => NodeType::Sector,
			NodeKind::Theme(_) => NodeType::Theme,
			NodeKind::Company(_) => NodeType::Company,
		}
	}

	/// Case-insensitive substring match over both names and the tags.
	///
	/// `query` must already be lowercased.
	pub fn matches_query(&self, query: &str) -> bool {
		self.name.to_lowercase().contains(query)
			|| self.name_en.to_lowercase().contains(query)
			|| self.tags.iter().any(|t| t.to_lowercase().contains(query))
	}
}

/// The discriminant of a [`Node`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
	/// Macro variable (rates, currencies, commodities, ...).
	Macro,
	/// Industry sector.
	Sector,
	/// Investment theme with a tiered value chain.
	Theme,
	/// Listed company.
	Company,
}

impl NodeType {
	/// All kinds in load order.
	pub const ALL: [NodeType; 4] = [
		NodeType::Macro,
		NodeType::Sector,
		NodeType::Theme,
		NodeType::Company,
	];
}

/// Kind-specific node attributes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
	/// See [`MacroAttrs`].
	Macro(MacroAttrs),
	/// See [`SectorAttrs`].
	Sector(SectorAttrs),
	/// See [`ThemeAttrs`].
	Theme(ThemeAttrs),
	/// See [`CompanyAttrs`].
	Company(CompanyAttrs),
}

/// Macro variable attributes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroAttrs {
	/// Category of the variable.
	pub category: MacroCategory,
	/// Region the variable belongs to.
	pub region: Region,
	/// Measurement unit, e.g. `%` or `KRW`.
	#[serde(default)]
	pub unit: String,
	/// Static value snapshot.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub current_value: Option<String>,
	/// Static change snapshot.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub change: Option<String>,
	/// Direction of the static change.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub change_direction: Option<Trend>,
	/// Data source identifier (e.g. `FRED`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub data_source: Option<String>,
	/// Series key understood by the data source.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub api_key: Option<String>,
}

/// Macro variable categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacroCategory {
	/// Policy rates and central bank balance sheets.
	MonetaryPolicy,
	/// FX rates.
	Currency,
	/// Bond yields and spreads.
	Bond,
	/// Commodities in general.
	Commodity,
	/// Oil, gas and other energy.
	CommodityEnergy,
	/// Industrial and precious metals.
	CommodityMetal,
	/// Agricultural commodities.
	CommodityAgri,
	/// Economic indicators (CPI, payrolls, ...).
	Indicator,
	/// Capital flows.
	Flow,
	/// Market indices.
	Index,
}

/// Region a macro variable is tracked in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
	/// United States.
	#[serde(rename = "US")]
	Us,
	/// South Korea.
	#[serde(rename = "KR")]
	Kr,
	/// Euro area.
	#[serde(rename = "EU")]
	Eu,
	/// Japan.
	#[serde(rename = "JP")]
	Jp,
	/// China.
	#[serde(rename = "CN")]
	Cn,
	/// Not tied to one region.
	Global,
}

/// Direction of a snapshot or live value change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
	/// Rising.
	Up,
	/// Falling.
	Down,
	/// Unchanged.
	Neutral,
}

/// Sector attributes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorAttrs {
	/// Reference index for the sector, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub benchmark: Option<String>,
	/// Member companies, in display order.
	#[serde(default)]
	pub company_ids: Vec<String>,
}

/// Theme attributes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeAttrs {
	/// Value-chain stages, upstream first once sorted by [`Tier::tier`].
	#[serde(default)]
	pub tiers: Vec<Tier>,
	/// Macro variables the theme is sensitive to.
	#[serde(default)]
	pub connected_macro_nodes: Vec<String>,
}

/// One stage of a theme's value chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
	/// Ordering index; lower is further upstream.
	pub tier: u32,
	/// Local stage name.
	pub name: String,
	/// English stage name.
	#[serde(default)]
	pub name_en: String,
	/// Member node ids, usually companies.
	#[serde(default)]
	pub nodes: Vec<String>,
}

/// Company attributes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyAttrs {
	/// Exchange ticker.
	pub ticker: String,
	/// Listing market.
	pub market: Market,
	/// Owning sector id.
	pub sector_id: String,
	/// Themes the company participates in.
	#[serde(default)]
	pub theme_ids: Vec<String>,
	/// Role inside its themes, free text.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub role: Option<String>,
	/// Financial ratio snapshot.
	pub financials: Financials,
	/// Valuation snapshot.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub valuation: Option<Valuation>,
}

/// Listing markets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Market {
	/// Korea Exchange main board.
	Kospi,
	/// Korea Exchange growth board.
	Kosdaq,
	/// New York Stock Exchange.
	Nyse,
	/// Nasdaq.
	Nasdaq,
	/// London Stock Exchange.
	Lse,
	/// Tokyo Stock Exchange.
	Tse,
	/// Australian Securities Exchange.
	Asx,
	/// Shanghai Stock Exchange.
	Sse,
	/// Not listed.
	Unlisted,
}

/// Financial ratio snapshot of a company.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Financials {
	/// Market capitalisation in listing currency.
	pub market_cap: f64,
	/// Price/earnings.
	pub per: f64,
	/// Price/book.
	pub pbr: f64,
	/// Return on equity, percent.
	pub roe: f64,
	/// Operating margin, percent.
	pub operating_margin: f64,
	/// Debt ratio, percent.
	pub debt_ratio: f64,
	/// Dividend yield, percent.
	pub dividend_yield: f64,
	/// Trailing 52-week price return, percent.
	#[serde(rename = "return52w")]
	pub return_52w: f64,
}

/// Valuation snapshot of a company.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Valuation {
	/// DCF fair value.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub dcf_target: Option<f64>,
	/// Residual income model fair value.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub rim_target: Option<f64>,
	/// Price at the time of the snapshot.
	pub current_price: f64,
	/// Gap between price and fair value, display text.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gap: Option<String>,
	/// Investment thesis.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub thesis: Option<String>,
	/// Date of the snapshot.
	#[serde(default)]
	pub last_updated: String,
}

/// A directed edge.
///
/// Causal edges are authored; supply-chain and membership edges are derived
/// by the store. `direction` and `strength` are optional in the fixtures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
	/// Edge id, unique within its kind.
	pub id: String,
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Relation kind.
	#[serde(rename = "type")]
	pub kind: EdgeKind,
	/// Sign of the causal effect.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub direction: Option<EdgeDirection>,
	/// Ordinal effect strength.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub strength: Option<Strength>,
	/// Expected delay, display text.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub time_lag: Option<String>,
	/// Human-readable explanation.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub mechanism: Option<String>,
}

impl Edge {
	/// True when the edge touches `id` at either end.
	pub fn touches(&self, id: &str) -> bool {
		self.source == id || self.target == id
	}

	/// The endpoint opposite to `id`, if the edge touches it.
	pub fn other_end(&self, id: &str) -> Option<&str> {
		if self.source == id {
			Some(&self.target)
		} else if self.target == id {
			Some(&self.source)
		} else {
			None
		}
	}
}

/// Edge relation kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
	/// Authored cause → effect relation.
	Causal,
	/// Upstream tier → downstream tier inside a theme.
	SupplyChain,
	/// Company → owning sector.
	BelongsTo,
}

impl EdgeKind {
	/// All kinds.
	pub const ALL: [EdgeKind; 3] = [EdgeKind::Causal, EdgeKind::SupplyChain, EdgeKind::BelongsTo];
}

/// Sign of a causal edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeDirection {
	/// Target moves with the source.
	Positive,
	/// Target moves against the source.
	Negative,
	/// Indeterminate.
	Complex,
}

/// Ordinal strength. `Strong > Medium > Weak`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
	/// Weakest grade.
	Weak,
	/// Middle grade.
	Medium,
	/// Strongest grade.
	Strong,
}

impl Strength {
	/// Steps down the scale by `steps` grades, stopping at [`Strength::Weak`].
	pub fn weakened(self, steps: usize) -> Strength {
		let rank = match self {
			Strength::Strong => 0usize,
			Strength::Medium => 1,
			Strength::Weak => 2,
		};
		match rank.saturating_add(steps).min(2) {
			0 => Strength::Strong,
			1 => Strength::Medium,
			_ => Strength::Weak,
		}
	}
}
