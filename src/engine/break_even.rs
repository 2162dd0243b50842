// src/engine/break_even.rs
use super::kinks::kink_prices;
use super::PriceRange;
use crate::instruments::Position;
use crate::payoff::{total_payoff, PayoffVariant};
use crate::settings::Settings;

/// Underlying prices in `range` where the profit and loss is zero
///
/// Between consecutive strikes the payoff is linear, so evaluating it at the
/// range ends and at each strike is enough to locate every root exactly. A
/// stretch lying flat on zero reports only the price where it begins.
pub fn break_evens(positions: &[Position], range: PriceRange, settings: &Settings) -> Vec<f64> {
    if positions.is_empty() || !(range.min <= range.max) {
        return Vec::new();
    }

    let mut nodes = Vec::with_capacity(positions.len() + 2);
    nodes.push(range.min);
    nodes.extend(kink_prices(positions, range));
    nodes.push(range.max);
    nodes.dedup();

    let values: Vec<(f64, f64)> = nodes
        .into_iter()
        .map(|x| (x, total_payoff(positions, x, settings, PayoffVariant::Full)))
        .collect();

    let mut roots = Vec::new();
    let mut previous: Option<(f64, f64)> = None;
    for &(x, y) in &values {
        match previous {
            Some((_, y0)) if y0 != 0.0 && y == 0.0 => roots.push(x),
            Some((x0, y0)) if y0 * y < 0.0 => roots.push(x0 + (x - x0) * (-y0 / (y - y0))),
            None if y == 0.0 => roots.push(x),
            _ => {}
        }
        previous = Some((x, y));
    }
    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::{InstrumentKind, PositionId};
    use approx::assert_relative_eq;

    #[test]
    fn test_long_call_single_root() {
        let positions = [Position::new(PositionId(1), InstrumentKind::LongCall, 100.0, 5.0)];
        let roots = break_evens(&positions, PriceRange::new(50.0, 150.0), &Settings::default());
        assert_eq!(roots.len(), 1);
        assert_relative_eq!(roots[0], 105.0, epsilon = 1e-9);
    }

    #[test]
    fn test_flat_zero_reports_start_only() {
        // Short put premium 0: zero everywhere above the strike
        let positions = [Position::new(PositionId(1), InstrumentKind::ShortPut, 100.0, 0.0)];
        let roots = break_evens(&positions, PriceRange::new(50.0, 150.0), &Settings::default());
        assert_eq!(roots, vec![100.0]);
    }

    #[test]
    fn test_no_roots() {
        let positions = [Position::risk_free(PositionId(1), InstrumentKind::LongRiskFree, 100.0)];
        assert!(break_evens(&positions, PriceRange::new(0.0, 200.0), &Settings::default())
            .is_empty());
        assert!(break_evens(&[], PriceRange::new(0.0, 200.0), &Settings::default()).is_empty());
    }

    #[test]
    fn test_root_at_range_start() {
        let positions = [Position::new(PositionId(1), InstrumentKind::LongUnderlying, 80.0, 80.0)];
        let roots = break_evens(&positions, PriceRange::new(80.0, 120.0), &Settings::default());
        assert_eq!(roots, vec![80.0]);
    }
}
