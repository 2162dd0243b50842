//! Payoff Functions
//!
//! # Mathematical Definitions
//!
//! Per-unit payoff at the evaluation date for an underlying price `S`.
//!
//! ## Risk-free
//! - **Lend**: `+P`, **Borrow**: `-P` (flat in `S`)
//!
//! ## Linear
//! - **Long underlying / forward**: `S - K`
//! - **Short underlying / forward**: `K - S`
//!
//! ## Options
//! - **Call**: `±max(S - K, 0)`, **Put**: `±max(K - S, 0)`
//! - The full variant nets the premium: `-c` when long, `+c` when short
//!
//! # Implementation Notes
//!
//! One formula table serves both variants; [`PayoffVariant`] only decides
//! whether the option premium term is applied, so the two views cannot drift.

use crate::instruments::{InstrumentKind, Position};
use serde::{Deserialize, Serialize};

/// Which view of the payoff to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoffVariant {
    /// Profit and loss, premiums included
    #[default]
    Full,
    /// Payoff at expiry, premiums excluded
    PayoffOnly,
}

impl PayoffVariant {
    pub fn includes_premium(self) -> bool {
        matches!(self, PayoffVariant::Full)
    }
}

/// Per-unit payoff of a position, before its quantity is applied
///
/// # Parameters
/// - `kind`: instrument kind selecting the formula
/// - `s`: underlying price at the evaluation date
/// - `strike`, `cost`, `principal`: position fields; each kind reads only
///   the ones meaningful to it
/// - `variant`: whether option premiums are netted
pub fn unit_payoff(
    kind: InstrumentKind,
    s: f64,
    strike: f64,
    cost: f64,
    principal: f64,
    variant: PayoffVariant,
) -> f64 {
    let premium = if variant.includes_premium() { cost } else { 0.0 };

    match kind {
        // Lending: flat +principal at maturity
        InstrumentKind::LongRiskFree => principal,
        // Borrowing: flat -principal at maturity
        InstrumentKind::ShortRiskFree => -principal,

        // Entry price is the reference, nothing is paid up front
        InstrumentKind::LongUnderlying | InstrumentKind::LongForward => s - strike,
        InstrumentKind::ShortUnderlying | InstrumentKind::ShortForward => strike - s,

        InstrumentKind::LongCall => (s - strike).max(0.0) - premium,
        InstrumentKind::ShortCall => premium - (s - strike).max(0.0),
        InstrumentKind::LongPut => (strike - s).max(0.0) - premium,
        InstrumentKind::ShortPut => premium - (strike - s).max(0.0),
    }
}

impl Position {
    /// Per-unit payoff of this position at underlying price `s`
    pub fn unit_payoff(&self, s: f64, variant: PayoffVariant) -> f64 {
        unit_payoff(self.kind, s, self.strike, self.cost, self.principal, variant)
    }

    /// Payoff of this position at underlying price `s`, quantity applied
    pub fn payoff(&self, s: f64, variant: PayoffVariant) -> f64 {
        self.unit_payoff(s, variant) * self.quantity as f64
    }
}
