//! Synthetic monthly return paths.

use crate::graph::Financials;
use crate::rng::{RandomSource, standard_normal};

/// Shape of a synthetic return path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReturnProfile {
	/// Mean monthly return.
	pub drift: f64,
	/// Monthly standard deviation of the random term.
	pub volatility: f64,
	/// Angular frequency of the cyclical term, per month.
	pub cycle_frequency: f64,
	/// Amplitude of the cyclical term.
	pub cycle_amplitude: f64,
	/// Months between drawdown shocks.
	pub shock_period: u32,
	/// Length of each shock, in months.
	pub shock_length: u32,
	/// Return added during a shock (negative).
	pub shock_return: f64,
}

/// Company-derived volatility model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolatilityModel {
	/// Monthly volatility of a mid-cap company.
	pub base: f64,
	/// Monthly volatility above `large_cap_threshold`.
	pub large_cap: f64,
	/// Monthly volatility below `small_cap_threshold`.
	pub small_cap: f64,
	/// Market cap above which a company counts as large.
	pub large_cap_threshold: f64,
	/// Market cap below which a company counts as small.
	pub small_cap_threshold: f64,
	/// Debt ratio (percent) above which volatility is scaled up.
	pub high_debt_ratio: f64,
	/// Multiplier for highly indebted companies.
	pub high_debt_factor: f64,
	/// ROE (percent) above which volatility is scaled down.
	pub high_roe: f64,
	/// Multiplier for high-ROE companies.
	pub high_roe_factor: f64,
}

impl Default for VolatilityModel {
	fn default() -> Self {
		Self {
			base: 0.06,
			large_cap: 0.04,
			small_cap: 0.08,
			large_cap_threshold: 100_000_000_000_000.0,
			small_cap_threshold: 5_000_000_000_000.0,
			high_debt_ratio: 150.0,
			high_debt_factor: 1.3,
			high_roe: 20.0,
			high_roe_factor: 0.9,
		}
	}
}

impl VolatilityModel {
	/// Monthly volatility for a company snapshot.
	pub fn monthly(&self, f: &Financials) -> f64 {
		let mut vol = self.base;
		if f.market_cap > self.large_cap_threshold {
			vol = self.large_cap;
		}
		if f.market_cap < self.small_cap_threshold {
			vol = self.small_cap;
		}
		if f.debt_ratio > self.high_debt_ratio {
			vol *= self.high_debt_factor;
		}
		if f.roe > self.high_roe {
			vol *= self.high_roe_factor;
		}
		vol
	}

	/// Return profile for a holding: drift from the trailing 52-week return.
	pub fn profile(&self, f: &Financials) -> ReturnProfile {
		ReturnProfile {
			drift: f.return_52w / 100.0 / 12.0,
			volatility: self.monthly(f),
			cycle_frequency: 0.15,
			cycle_amplitude: 0.02,
			shock_period: 36,
			shock_length: 3,
			shock_return: -0.03,
		}
	}
}

impl ReturnProfile {
	/// The broad-market benchmark profile.
	pub fn benchmark() -> Self {
		Self {
			drift: 0.006,
			volatility: 0.045,
			cycle_frequency: 0.12,
			cycle_amplitude: 0.015,
			shock_period: 42,
			shock_length: 3,
			shock_return: -0.025,
		}
	}

	/// Deterministic part of month `i`: cycle plus any shock.
	fn deterministic(&self, month: u32) -> f64 {
		let cycle = (month as f64 * self.cycle_frequency).sin() * self.cycle_amplitude;
		let in_shock = self.shock_period > 0 && month % self.shock_period < self.shock_length;
		let shock = if in_shock { self.shock_return } else { 0.0 };
		cycle + shock
	}

	/// Generates `months` monthly returns, one normal draw per month.
	pub fn generate(&self, months: u32, rng: &mut impl RandomSource) -> Vec<f64> {
		(0..months)
			.map(|m| {
				let z = standard_normal(rng);
				self.drift + self.deterministic(m) + self.volatility * z
			})
			.collect()
	}
}

/// Seed for a holding: the sum of its id's code points plus the start year.
pub fn holding_seed(company_id: &str, start_year: i32) -> u64 {
	let sum: i64 = company_id.chars().map(|c| c as i64).sum();
	(sum + start_year as i64).unsigned_abs()
}

/// Seed for the benchmark path of a run starting in `start_year`.
pub fn benchmark_seed(start_year: i32) -> u64 {
	(start_year as i64 * 12 + 7777).unsigned_abs()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rng::SequenceSource;

	fn financials(market_cap: f64, debt_ratio: f64, roe: f64) -> Financials {
		Financials {
			market_cap,
			debt_ratio,
			roe,
			return_52w: 24.0,
			..Financials::default()
		}
	}

	#[test]
	fn volatility_follows_company_characteristics() {
		let model = VolatilityModel::default();
		assert_eq!(model.monthly(&financials(2e14, 50.0, 10.0)), 0.04);
		assert_eq!(model.monthly(&financials(1e13, 50.0, 10.0)), 0.06);
		assert_eq!(model.monthly(&financials(1e12, 50.0, 10.0)), 0.08);
		let risky = model.monthly(&financials(1e12, 200.0, 10.0));
		assert!((risky - 0.08 * 1.3).abs() < 1e-12);
		let quality = model.monthly(&financials(2e14, 50.0, 25.0));
		assert!((quality - 0.04 * 0.9).abs() < 1e-12);
	}

	#[test]
	fn drift_comes_from_52_week_return() {
		let profile = VolatilityModel::default().profile(&financials(1e13, 0.0, 0.0));
		assert!((profile.drift - 0.02).abs() < 1e-12);
	}

	#[test]
	fn zero_noise_path_is_drift_cycle_and_shock() {
		// u2 = 0.25 -> cos(pi/2) = 0: the random term vanishes.
		let mut rng = SequenceSource::new(vec![0.5, 0.25]);
		let profile = ReturnProfile::benchmark();
		let path = profile.generate(4, &mut rng);
		assert!((path[0] - (0.006 - 0.025)).abs() < 1e-12);
		let expected = 0.006 + (3.0f64 * 0.12).sin() * 0.015;
		assert!((path[3] - expected).abs() < 1e-12);
	}

	#[test]
	fn seeds_mix_id_and_year() {
		assert_eq!(holding_seed("ab", 2020), 97 + 98 + 2020);
		assert_ne!(holding_seed("ab", 2020), holding_seed("ab", 2021));
		assert_eq!(benchmark_seed(2020), 2020 * 12 + 7777);
	}
}
