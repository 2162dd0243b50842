//! Closed-form option valuation.

pub mod bs_analytic;
