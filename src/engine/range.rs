// src/engine/range.rs
use super::PriceRange;
use crate::instruments::Position;

/// Range shown when no strike anchors the axis
pub const FALLBACK_RANGE: PriceRange = PriceRange { min: 0.0, max: 200.0 };

/// Padding on each side when every strike coincides
const SINGLE_STRIKE_PADDING: f64 = 50.0;

/// Infer the underlying-price domain from the positions' strikes
///
/// Strikes are filtered by value (`strike > 0`), not by kind. Risk-free
/// positions must therefore carry a zero strike to stay out of the range;
/// [`crate::session::Session`] guarantees that for the positions it creates.
///
/// # Policy
/// ```text
/// spread  = max(strike) - min(strike)
/// padding = spread > 0 ? spread / 2 : 50
/// range   = [max(0, min - padding), max + padding]
/// ```
pub fn default_range(positions: &[Position]) -> PriceRange {
    let (lo, hi) = positions
        .iter()
        .map(|p| p.strike)
        .filter(|strike| *strike > 0.0)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), strike| {
            (lo.min(strike), hi.max(strike))
        });

    if lo > hi {
        return FALLBACK_RANGE;
    }

    let spread = hi - lo;
    let padding = if spread > 0.0 {
        spread * 0.5
    } else {
        SINGLE_STRIKE_PADDING
    };

    PriceRange {
        min: (lo - padding).max(0.0),
        max: hi + padding,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::{InstrumentKind, PositionId};

    fn call(id: u64, strike: f64) -> Position {
        Position::new(PositionId(id), InstrumentKind::LongCall, strike, 5.0)
    }

    #[test]
    fn test_empty_portfolio() {
        assert_eq!(default_range(&[]), PriceRange::new(0.0, 200.0));
    }

    #[test]
    fn test_no_positive_strike() {
        let positions = [
            Position::risk_free(PositionId(1), InstrumentKind::LongRiskFree, 100.0),
            call(2, 0.0),
            call(3, -10.0),
        ];
        assert_eq!(default_range(&positions), PriceRange::new(0.0, 200.0));
    }

    #[test]
    fn test_single_strike() {
        assert_eq!(default_range(&[call(1, 100.0)]), PriceRange::new(50.0, 150.0));
    }

    #[test]
    fn test_spread_padding() {
        let positions = [call(1, 90.0), call(2, 110.0), call(3, 100.0)];
        assert_eq!(default_range(&positions), PriceRange::new(80.0, 120.0));
    }

    #[test]
    fn test_min_clamped_at_zero() {
        let positions = [call(1, 10.0), call(2, 100.0)];
        assert_eq!(default_range(&positions), PriceRange::new(0.0, 145.0));
    }

    #[test]
    fn test_filter_is_by_value_not_kind() {
        // A risk-free position with a stale positive strike still counts
        let stale = Position::risk_free(PositionId(2), InstrumentKind::LongRiskFree, 100.0);
        let stale = Position { strike: 200.0, ..stale };
        let positions = [call(1, 100.0), stale];
        assert_eq!(default_range(&positions), PriceRange::new(50.0, 250.0));
    }
}
