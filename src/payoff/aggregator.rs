// src/payoff/aggregator.rs
use super::payoffs::PayoffVariant;
use crate::instruments::Position;
use crate::settings::Settings;

/// Total portfolio payoff at underlying price `s`
///
/// Sum of per-unit payoffs weighted by quantity; an empty portfolio is worth
/// 0. `settings` is part of the valuation context but no current formula
/// reads it: risk-free kinds pay their principal flat.
pub fn total_payoff(
    positions: &[Position],
    s: f64,
    _settings: &Settings,
    variant: PayoffVariant,
) -> f64 {
    positions
        .iter()
        .map(|position| position.payoff(s, variant))
        .sum()
}
