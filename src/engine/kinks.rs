// src/engine/kinks.rs
use super::{PayoffPoint, PriceRange};
use crate::instruments::{KindGroup, Position};
use crate::payoff::{total_payoff, PayoffVariant};
use crate::settings::Settings;

/// Strikes of struck (linear and option) positions inside `range`, ascending
/// and deduplicated
pub fn kink_prices(positions: &[Position], range: PriceRange) -> Vec<f64> {
    let mut prices: Vec<f64> = positions
        .iter()
        .filter(|p| p.kind.is_in(KindGroup::STRUCK))
        .map(|p| p.strike)
        .filter(|strike| range.contains(*strike))
        .collect();

    prices.sort_by(f64::total_cmp);
    prices.dedup();
    prices
}

/// Points where the portfolio payoff can change slope
///
/// One point per distinct strike of a linear or option position inside
/// `range`, valued with premiums included and ordered by ascending `x`.
pub fn kinks(positions: &[Position], range: PriceRange, settings: &Settings) -> Vec<PayoffPoint> {
    kink_prices(positions, range)
        .into_iter()
        .map(|x| PayoffPoint {
            x,
            y: total_payoff(positions, x, settings, PayoffVariant::Full),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::{InstrumentKind, PositionId};

    #[test]
    fn test_shared_strike_counts_once() {
        let positions = [
            Position::new(PositionId(1), InstrumentKind::LongCall, 100.0, 5.0),
            Position::new(PositionId(2), InstrumentKind::LongPut, 100.0, 5.0),
        ];
        let points = kinks(&positions, PriceRange::new(0.0, 200.0), &Settings::default());
        assert_eq!(points, vec![PayoffPoint { x: 100.0, y: -10.0 }]);
    }

    #[test]
    fn test_risk_free_never_kinks() {
        let stale = Position {
            strike: 100.0,
            ..Position::risk_free(PositionId(1), InstrumentKind::ShortRiskFree, 50.0)
        };
        assert!(kink_prices(&[stale], PriceRange::new(0.0, 200.0)).is_empty());
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let positions = [
            Position::new(PositionId(1), InstrumentKind::LongForward, 50.0, 0.0),
            Position::new(PositionId(2), InstrumentKind::ShortForward, 150.0, 0.0),
            Position::new(PositionId(3), InstrumentKind::LongCall, 151.0, 1.0),
        ];
        let prices = kink_prices(&positions, PriceRange::new(50.0, 150.0));
        assert_eq!(prices, vec![50.0, 150.0]);
    }
}
