// src/engine/axis.rs
use super::PayoffPoint;
use serde::{Deserialize, Serialize};

/// Spans narrower than this are drawn as a flat line
const FLAT_SPAN: f64 = 0.01;
const FLAT_HALF_HEIGHT: f64 = 5.0;
const PADDING_RATIO: f64 = 0.15;

/// Vertical extent suggested for plotting a payoff curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
    /// The curve is (numerically) constant
    pub flat: bool,
}

/// Value-axis bounds covering the curve, its kinks and the zero line
///
/// A flat curve is centred in a ±5 band that always contains [-5, 5];
/// otherwise the observed span is padded by 15% on each side with zero kept
/// in view. Returns `None` for an empty curve.
pub fn axis_bounds(curve: &[PayoffPoint], kinks: &[PayoffPoint]) -> Option<AxisBounds> {
    let first = curve.first()?;

    let (lo, hi) = curve
        .iter()
        .chain(kinks)
        .map(|p| p.y)
        .fold((0.0f64, 0.0f64), |(lo, hi), y| (lo.min(y), hi.max(y)));
    let span = hi - lo;

    if span < FLAT_SPAN {
        let level = first.y;
        return Some(AxisBounds {
            min: (level - FLAT_HALF_HEIGHT).min(-FLAT_HALF_HEIGHT),
            max: (level + FLAT_HALF_HEIGHT).max(FLAT_HALF_HEIGHT),
            flat: true,
        });
    }

    // lo ≤ 0 ≤ hi by construction, so zero stays inside the padded span
    let padding = span * PADDING_RATIO;
    Some(AxisBounds {
        min: lo - padding,
        max: hi + padding,
        flat: false,
    })
}
