// src/risk_free.rs
//! Cash-flow view of the risk-free legs
//!
//! Lending pays the principal today and receives it compounded at maturity;
//! borrowing is the mirror image:
//! ```text
//! FV = P · e^(rT)
//! ```

use crate::instruments::{InstrumentKind, Position, PositionId};
use crate::settings::Settings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFreeRow {
    pub id: PositionId,
    pub kind: InstrumentKind,
    pub quantity: u32,
    /// Cash flow today, quantity applied
    pub value_today: f64,
    /// Cash flow at maturity, quantity applied
    pub value_at_maturity: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskFreeSummary {
    pub rows: Vec<RiskFreeRow>,
    pub total_today: f64,
    pub total_at_maturity: f64,
}

impl RiskFreeSummary {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Today and at-maturity cash flows of every risk-free position
pub fn risk_free_summary(positions: &[Position], settings: &Settings) -> RiskFreeSummary {
    let growth = settings.discount_factor().recip();

    let rows: Vec<RiskFreeRow> = positions
        .iter()
        .filter(|p| p.kind.is_risk_free())
        .map(|p| {
            let quantity = p.quantity as f64;
            // direction is +1 when lending, -1 when borrowing
            let sign = p.kind.direction();
            RiskFreeRow {
                id: p.id,
                kind: p.kind,
                quantity: p.quantity,
                value_today: -sign * p.principal * quantity,
                value_at_maturity: sign * p.principal * growth * quantity,
            }
        })
        .collect();

    RiskFreeSummary {
        total_today: rows.iter().map(|r| r.value_today).sum(),
        total_at_maturity: rows.iter().map(|r| r.value_at_maturity).sum(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lend_and_borrow() {
        let settings = Settings::default();
        let positions = [
            Position::risk_free(PositionId(1), InstrumentKind::LongRiskFree, 100.0).with_quantity(2),
            Position::risk_free(PositionId(2), InstrumentKind::ShortRiskFree, 50.0),
            Position::new(PositionId(3), InstrumentKind::LongCall, 100.0, 5.0),
        ];
        let summary = risk_free_summary(&positions, &settings);
        let fv = 0.05f64.exp();

        assert_eq!(summary.rows.len(), 2);
        assert_eq!(summary.rows[0].value_today, -200.0);
        assert_relative_eq!(summary.rows[0].value_at_maturity, 200.0 * fv, max_relative = 1e-12);
        assert_eq!(summary.rows[1].value_today, 50.0);
        assert_relative_eq!(summary.rows[1].value_at_maturity, -50.0 * fv, max_relative = 1e-12);
        assert_eq!(summary.total_today, -150.0);
        assert_relative_eq!(summary.total_at_maturity, 150.0 * fv, max_relative = 1e-12);
    }

    #[test]
    fn test_no_risk_free_positions() {
        let positions = [Position::new(PositionId(1), InstrumentKind::LongPut, 100.0, 5.0)];
        let summary = risk_free_summary(&positions, &Settings::default());
        assert!(summary.is_empty());
        assert_eq!(summary.total_today, 0.0);
        assert_eq!(summary.total_at_maturity, 0.0);
    }
}
