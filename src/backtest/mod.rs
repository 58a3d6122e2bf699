//! Portfolio backtest over synthetic return paths.
//!
//! This is an estimation tool, not historical backtesting. No price history
//! is consulted: every monthly return is generated from the company's current
//! financial ratios by a seeded random process. Results carry
//! [`SimulationMode::Synthetic`] and [`SYNTHETIC_DISCLAIMER`] so no caller can
//! mistake them for realised performance.

mod returns;

use log::debug;
use serde::{Deserialize, Serialize};

pub use returns::{ReturnProfile, VolatilityModel, benchmark_seed, holding_seed};

use crate::graph::GraphStore;
use crate::rng::{ParkMiller, SeedableSource};

/// Shown next to every backtest result.
pub const SYNTHETIC_DISCLAIMER: &str = "Simulated from current financial ratios with seeded random returns; \
	not based on historical prices.";

/// How the result series were produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationMode {
	/// Generated from financial snapshots, not from price history.
	Synthetic,
}

/// One position of the portfolio.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
	/// Company node id.
	pub company_id: String,
	/// Relative weight; weights need not sum to 100.
	pub weight: f64,
}

/// Backtest inputs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestParams {
	/// Positions.
	pub holdings: Vec<Holding>,
	/// First simulated year (January).
	pub start_year: i32,
	/// Year the simulation stops before.
	pub end_year: i32,
	/// Starting portfolio value.
	pub initial_capital: f64,
}

/// Return-model tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BacktestConfig {
	/// Annual risk-free rate used by the Sharpe ratio.
	pub risk_free_rate: f64,
	/// Per-company volatility model.
	pub volatility: VolatilityModel,
	/// Benchmark return path shape.
	pub benchmark: ReturnProfile,
}

impl Default for BacktestConfig {
	fn default() -> Self {
		Self {
			risk_free_rate: 0.035,
			volatility: VolatilityModel::default(),
			benchmark: ReturnProfile::benchmark(),
		}
	}
}

/// One month of the simulation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
	/// `YYYY-MM`.
	pub date: String,
	/// Portfolio value at month end.
	pub portfolio_value: f64,
	/// Benchmark value at month end.
	pub benchmark_value: f64,
	/// Portfolio return for the month, as a fraction.
	pub monthly_return: f64,
	/// Benchmark return for the month, as a fraction.
	pub benchmark_return: f64,
	/// Distance below the running peak, as a non-positive fraction.
	pub drawdown: f64,
}

/// How much one holding added to the total return.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingContribution {
	/// Company node id.
	pub company_id: String,
	/// Company display name.
	pub name: String,
	/// Normalised weight, percent.
	pub weight: f64,
	/// Compounded holding return times weight, percent.
	pub contribution: f64,
}

/// Backtest output. Percentages are in percent, not fractions.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestResult {
	/// Always [`SimulationMode::Synthetic`].
	pub mode: SimulationMode,
	/// Monthly series.
	pub monthly_data: Vec<MonthlyPoint>,
	/// Total portfolio return, percent.
	pub total_return: f64,
	/// Compound annual growth rate, percent.
	pub cagr: f64,
	/// Worst drawdown, percent (non-positive).
	pub max_drawdown: f64,
	/// Annualised volatility, percent.
	pub volatility: f64,
	/// Sharpe ratio.
	pub sharpe_ratio: f64,
	/// Total benchmark return, percent.
	pub benchmark_total_return: f64,
	/// Benchmark CAGR, percent.
	pub benchmark_cagr: f64,
	/// Per-holding breakdown.
	pub holdings: Vec<HoldingContribution>,
}

impl BacktestResult {
	/// The result of a run with nothing to simulate.
	pub fn empty() -> Self {
		Self {
			mode: SimulationMode::Synthetic,
			monthly_data: Vec::new(),
			total_return: 0.0,
			cagr: 0.0,
			max_drawdown: 0.0,
			volatility: 0.0,
			sharpe_ratio: 0.0,
			benchmark_total_return: 0.0,
			benchmark_cagr: 0.0,
			holdings: Vec::new(),
		}
	}

	/// Text to display alongside the result.
	pub fn disclaimer(&self) -> &'static str {
		SYNTHETIC_DISCLAIMER
	}
}

struct HoldingPath<'a> {
	company_id: &'a str,
	name: &'a str,
	weight: f64,
	returns: Vec<f64>,
}

/// Runs a backtest with the default config and the Park–Miller generator.
pub fn run_backtest(params: &BacktestParams, companies: &GraphStore) -> BacktestResult {
	run_backtest_with::<ParkMiller>(params, companies, &BacktestConfig::default())
}

/// Runs a backtest with an explicit random source type and config.
///
/// Holdings whose id does not resolve to a company are skipped, but their
/// weight still counts towards normalisation. Zero holdings or a
/// non-positive year range give [`BacktestResult::empty`].
pub fn run_backtest_with<R: SeedableSource>(
	params: &BacktestParams,
	companies: &GraphStore,
	config: &BacktestConfig,
) -> BacktestResult {
	let years = i64::from(params.end_year) - i64::from(params.start_year);
	if years <= 0 || params.holdings.is_empty() {
		return BacktestResult::empty();
	}
	let Some(months) = u32::try_from(years).ok().and_then(|y| y.checked_mul(12)) else {
		return BacktestResult::empty();
	};

	let total_weight: f64 = params.holdings.iter().map(|h| h.weight).sum();
	let paths: Vec<HoldingPath> = params
		.holdings
		.iter()
		.filter_map(|h| {
			let (node, company) = companies.company(&h.company_id)?;
			let mut rng = R::from_seed(holding_seed(&h.company_id, params.start_year));
			Some(HoldingPath {
				company_id: &h.company_id,
				name: &node.name,
				weight: if total_weight > 0.0 { h.weight / total_weight } else { 0.0 },
				returns: config.volatility.profile(&company.financials).generate(months, &mut rng),
			})
		})
		.collect();

	let mut bench_rng = R::from_seed(benchmark_seed(params.start_year));
	let benchmark = config.benchmark.generate(months, &mut bench_rng);

	let capital = params.initial_capital;
	let (mut value, mut bench_value, mut peak) = (capital, capital, capital);
	let mut monthly_data = Vec::with_capacity(months as usize);
	for m in 0..months as usize {
		let ret: f64 = paths.iter().map(|p| p.weight * p.returns[m]).sum();
		value *= 1.0 + ret;
		bench_value *= 1.0 + benchmark[m];
		peak = peak.max(value);
		let drawdown = if peak > 0.0 { (value - peak) / peak } else { 0.0 };

		monthly_data.push(MonthlyPoint {
			date: format!("{}-{:02}", params.start_year + (m / 12) as i32, m % 12 + 1),
			portfolio_value: value,
			benchmark_value: bench_value,
			monthly_return: ret,
			benchmark_return: benchmark[m],
			drawdown,
		});
	}

	let growth = |end: f64| if capital != 0.0 { (end - capital) / capital } else { 0.0 };
	let cagr = |end: f64| {
		if capital > 0.0 && end >= 0.0 {
			(end / capital).powf(1.0 / years as f64) - 1.0
		} else {
			0.0
		}
	};

	let total_return = growth(value);
	let portfolio_cagr = cagr(value);
	let max_drawdown = monthly_data.iter().map(|d| d.drawdown).fold(0.0, f64::min);
	let returns: Vec<f64> = monthly_data.iter().map(|d| d.monthly_return).collect();
	let annual_vol = sample_std_dev(&returns) * 12f64.sqrt();
	let sharpe_ratio = if annual_vol > 0.0 {
		(portfolio_cagr - config.risk_free_rate) / annual_vol
	} else {
		0.0
	};

	let holdings = paths
		.iter()
		.map(|p| {
			let compounded = p.returns.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0;
			HoldingContribution {
				company_id: p.company_id.to_string(),
				name: p.name.to_string(),
				weight: p.weight * 100.0,
				contribution: compounded * p.weight * 100.0,
			}
		})
		.collect();

	debug!(
		"backtest {}..{} over {} holdings: total {:.2}%",
		params.start_year,
		params.end_year,
		paths.len(),
		total_return * 100.0
	);

	BacktestResult {
		mode: SimulationMode::Synthetic,
		monthly_data,
		total_return: total_return * 100.0,
		cagr: portfolio_cagr * 100.0,
		max_drawdown: max_drawdown * 100.0,
		volatility: annual_vol * 100.0,
		sharpe_ratio,
		benchmark_total_return: growth(bench_value) * 100.0,
		benchmark_cagr: cagr(bench_value) * 100.0,
		holdings,
	}
}

fn sample_std_dev(xs: &[f64]) -> f64 {
	if xs.len() < 2 {
		return 0.0;
	}
	let mean = xs.iter().sum::<f64>() / xs.len() as f64;
	let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (xs.len() - 1) as f64;
	var.sqrt()
}
