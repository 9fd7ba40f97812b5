//! Statistics calculation engine.
//!
//! Computes derived metrics from classified tournament data:
//! - Per-archetype play rate and win rate with a Wilson confidence interval
//! - Rank-based competition scores weighted by tournament size
//! - Card-choice breakdowns within one archetype

pub mod analysis;
pub mod competition;
pub mod results;

pub use analysis::*;
pub use competition::*;
pub use results::*;

use thiserror::Error;

/// z value for a 95% confidence interval.
pub const Z_95: f64 = 1.96;

/// Errors surfaced by statistics calculations.
#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    #[error("No results in the population, cannot compute play rate for '{0}'")]
    EmptyPopulation(String),
}

/// Wilson score interval for a binomial proportion.
///
/// Returns `(p_hat, lower, upper)` as fractions, with the bounds clamped to
/// `[0, 1]`. With no games played all three are zero.
pub fn wilson_score_interval(wins: u32, losses: u32, z: f64) -> (f64, f64, f64) {
    let n = (wins + losses) as f64;
    if n == 0.0 {
        return (0.0, 0.0, 0.0);
    }

    let p_hat = wins as f64 / n;
    let z2 = z * z;
    let denominator = 1.0 + z2 / n;

    let center = (p_hat + z2 / (2.0 * n)) / denominator;
    let half_width = z * (p_hat * (1.0 - p_hat) / n + z2 / (4.0 * n * n)).sqrt() / denominator;

    (
        p_hat,
        (center - half_width).max(0.0),
        (center + half_width).min(1.0),
    )
}

/// Convert a fraction to a percentage rounded to two decimals.
pub fn to_percent(fraction: f64) -> f64 {
    (fraction * 10_000.0).round() / 100.0
}
