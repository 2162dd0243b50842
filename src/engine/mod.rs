//! Curve construction over the underlying-price axis
//!
//! Every function here is a pure function of the positions, the price range
//! and the settings: calling one twice with the same input yields the same
//! output.

pub mod axis;
pub mod break_even;
pub mod kinks;
pub mod range;
pub mod series;

pub use axis::{axis_bounds, AxisBounds};
pub use break_even::break_evens;
pub use kinks::kinks;
pub use range::default_range;
pub use series::{pnl_table, sample, DEFAULT_CURVE_POINTS, DEFAULT_TABLE_ROWS};

use serde::{Deserialize, Serialize};

/// Closed interval of underlying prices, `0 ≤ min ≤ max`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        PriceRange { min, max }
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

/// One point of a payoff curve: underlying price `x`, portfolio value `y`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoffPoint {
    pub x: f64,
    pub y: f64,
}
