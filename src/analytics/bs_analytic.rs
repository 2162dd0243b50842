// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes formulas for European options
//!
//! # Mathematical Foundation
//!
//! Under the Black-Scholes model, the underlying asset follows:
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ```
//!
//! For European options the risk-neutral price has a closed form in terms
//! of the cumulative normal distribution function Φ(x).
//!
//! # Degenerate inputs
//!
//! Expired and zero-volatility inputs are legitimate states of the valuation
//! form, so they are priced rather than rejected, in this order:
//! 1. `T ≤ 0`: intrinsic value `max(S-K, 0)` / `max(K-S, 0)`
//! 2. `σ ≤ 0`: discounted forward intrinsic `max(S - K e^(-rT), 0)` / `max(K e^(-rT) - S, 0)`
//! 3. otherwise the closed form below

use crate::instruments::InstrumentKind;
use crate::math_utils::norm_cdf;
use crate::settings::Settings;

/// d₁ and d₂ for strictly positive `t` and `sigma`
fn d1_d2(s: f64, k: f64, t: f64, r: f64, sigma: f64) -> (f64, f64) {
    let vol_sqrt_t = sigma * t.sqrt();
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Black-Scholes European call option price
///
/// # Formula
/// ```text
/// C(S,K,T,r,σ) = S*Φ(d₁) - K*e^(-rT)*Φ(d₂)
/// ```
///
/// Where:
/// ```text
/// d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
/// d₂ = d₁ - σ√T
/// ```
///
/// # Parameters
/// - `s`: Current underlying price
/// - `k`: Strike price
/// - `t`: Time to expiration in years
/// - `r`: Risk-free rate
/// - `sigma`: Volatility
pub fn bs_call_price(s: f64, k: f64, t: f64, r: f64, sigma: f64) -> f64 {
    if t <= 0.0 {
        return (s - k).max(0.0);
    }
    let discounted_strike = k * (-r * t).exp();
    if sigma <= 0.0 {
        return (s - discounted_strike).max(0.0);
    }
    let (d1, d2) = d1_d2(s, k, t, r, sigma);
    s * norm_cdf(d1) - discounted_strike * norm_cdf(d2)
}

/// Black-Scholes European put option price
///
/// # Formula
/// ```text
/// P(S,K,T,r,σ) = K*e^(-rT)*Φ(-d₂) - S*Φ(-d₁)
/// ```
pub fn bs_put_price(s: f64, k: f64, t: f64, r: f64, sigma: f64) -> f64 {
    if t <= 0.0 {
        return (k - s).max(0.0);
    }
    let discounted_strike = k * (-r * t).exp();
    if sigma <= 0.0 {
        return (discounted_strike - s).max(0.0);
    }
    let (d1, d2) = d1_d2(s, k, t, r, sigma);
    discounted_strike * norm_cdf(-d2) - s * norm_cdf(-d1)
}

/// Premium of an option kind struck at `strike` under `settings`
///
/// Long and short legs share the same price; the sign is applied by the
/// payoff formulas. Non-option kinds have no premium and price at 0.
pub fn price_for(kind: InstrumentKind, strike: f64, settings: &Settings) -> f64 {
    let Settings {
        spot_price,
        risk_free_rate,
        time_to_maturity,
        volatility,
    } = *settings;

    if kind.is_call() {
        bs_call_price(spot_price, strike, time_to_maturity, risk_free_rate, volatility)
    } else if kind.is_put() {
        bs_put_price(spot_price, strike, time_to_maturity, risk_free_rate, volatility)
    } else {
        0.0
    }
}
