//! Per-instrument payoff formulas and their portfolio aggregation.

pub mod aggregator;
pub mod payoffs;

pub use aggregator::total_payoff;
pub use payoffs::PayoffVariant;
