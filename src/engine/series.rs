// src/engine/series.rs
use super::{PayoffPoint, PriceRange};
use crate::instruments::Position;
use crate::payoff::{total_payoff, PayoffVariant};
use crate::settings::Settings;

/// Samples drawn for a payoff curve
pub const DEFAULT_CURVE_POINTS: usize = 100;

/// Rows of the tabular P&L view
pub const DEFAULT_TABLE_ROWS: usize = 11;

/// `num_points` equally spaced prices from `range.min` to `range.max` inclusive
///
/// A single point degenerates to `[range.min]`; zero points is empty.
fn grid(range: PriceRange, num_points: usize) -> impl Iterator<Item = f64> {
    let step = if num_points > 1 {
        range.width() / (num_points - 1) as f64
    } else {
        0.0
    };
    (0..num_points).map(move |i| {
        // Pin the last sample so rounding never overshoots or falls short of max
        if num_points > 1 && i == num_points - 1 {
            range.max
        } else {
            range.min + i as f64 * step
        }
    })
}

/// Sample the aggregated payoff across `range`
///
/// # Returns
/// `num_points` points in ascending `x`, the first at `range.min` and the
/// last at `range.max`.
pub fn sample(
    positions: &[Position],
    range: PriceRange,
    settings: &Settings,
    num_points: usize,
    variant: PayoffVariant,
) -> Vec<PayoffPoint> {
    grid(range, num_points)
        .map(|x| PayoffPoint {
            x,
            y: total_payoff(positions, x, settings, variant),
        })
        .collect()
}

/// Profit and loss, premiums included, at `rows` equally spaced prices
pub fn pnl_table(
    positions: &[Position],
    range: PriceRange,
    settings: &Settings,
    rows: usize,
) -> Vec<PayoffPoint> {
    sample(positions, range, settings, rows, PayoffVariant::Full)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::{InstrumentKind, PositionId};

    #[test]
    fn test_grid_endpoints() {
        let xs: Vec<f64> = grid(PriceRange::new(0.0, 200.0), 11).collect();
        assert_eq!(xs.len(), 11);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[5], 100.0);
        assert_eq!(xs[10], 200.0);
    }

    #[test]
    fn test_grid_degenerate_counts() {
        assert!(grid(PriceRange::new(10.0, 20.0), 0).next().is_none());
        let single: Vec<f64> = grid(PriceRange::new(10.0, 20.0), 1).collect();
        assert_eq!(single, vec![10.0]);
    }

    #[test]
    fn test_sample_on_collapsed_range() {
        let positions = [Position::new(PositionId(1), InstrumentKind::LongPut, 100.0, 4.0)];
        let curve = sample(
            &positions,
            PriceRange::new(90.0, 90.0),
            &Settings::default(),
            5,
            PayoffVariant::Full,
        );
        assert_eq!(curve.len(), 5);
        assert!(curve.iter().all(|p| p.x == 90.0 && p.y == 6.0));
    }
}
