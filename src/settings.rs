// src/settings.rs
//! Valuation context shared by pricing and aggregation.

use crate::error::{validation::*, PayoffResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

const DAYS_PER_YEAR: f64 = 365.0;

/// Market and horizon inputs for one valuation
///
/// `time_to_maturity = 0` means immediate expiry and `volatility = 0` means
/// no randomness; both are valid and handled by the pricer's boundary rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Current underlying price
    pub spot_price: f64,
    /// Annualized risk-free rate, decimal (0.05 = 5%)
    pub risk_free_rate: f64,
    /// Years to the evaluation date
    pub time_to_maturity: f64,
    /// Annualized volatility, decimal
    pub volatility: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            spot_price: 100.0,
            risk_free_rate: 0.05,
            time_to_maturity: 1.0,
            volatility: 0.20,
        }
    }
}

impl Settings {
    /// Validate the valuation context
    ///
    /// Optional: the valuation routines accept any numbers. Loaders call this
    /// to reject input that would make the curve meaningless.
    pub fn validate(&self) -> PayoffResult<()> {
        validate_positive("spot_price", self.spot_price)?;
        validate_finite("spot_price", self.spot_price)?;
        validate_finite("risk_free_rate", self.risk_free_rate)?;
        validate_range("risk_free_rate", self.risk_free_rate, -1.0, 1.0)?;
        validate_non_negative("time_to_maturity", self.time_to_maturity)?;
        validate_finite("time_to_maturity", self.time_to_maturity)?;
        validate_non_negative("volatility", self.volatility)?;
        validate_finite("volatility", self.volatility)?;
        Ok(())
    }

    /// Set `time_to_maturity` from calendar dates, ACT/365, floored at 0
    pub fn with_expiry(mut self, valuation_date: NaiveDate, expiry_date: NaiveDate) -> Self {
        let days = (expiry_date - valuation_date).num_days();
        self.time_to_maturity = (days as f64 / DAYS_PER_YEAR).max(0.0);
        self
    }

    /// Continuous discount factor e^(-rT)
    pub fn discount_factor(&self) -> f64 {
        (-self.risk_free_rate * self.time_to_maturity).exp()
    }
}

/// Raw valuation form input, rate and volatility in percent
///
/// Each missing, zero or non-finite entry falls back to its default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsForm {
    pub spot_price: Option<f64>,
    pub risk_free_rate_pct: Option<f64>,
    pub time_to_maturity: Option<f64>,
    pub volatility_pct: Option<f64>,
}

impl SettingsForm {
    pub fn into_settings(self) -> Settings {
        let defaults = Settings::default();
        Settings {
            spot_price: or_default("spot_price", self.spot_price, defaults.spot_price),
            risk_free_rate: or_default(
                "risk_free_rate",
                self.risk_free_rate_pct.map(|pct| pct / 100.0),
                defaults.risk_free_rate,
            ),
            time_to_maturity: or_default(
                "time_to_maturity",
                self.time_to_maturity,
                defaults.time_to_maturity,
            ),
            volatility: or_default(
                "volatility",
                self.volatility_pct.map(|pct| pct / 100.0),
                defaults.volatility,
            ),
        }
    }
}

impl From<SettingsForm> for Settings {
    fn from(form: SettingsForm) -> Self {
        form.into_settings()
    }
}

fn or_default(field: &str, value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() && v != 0.0 => v,
        Some(v) => {
            warn!(field, value = v, default, "unusable settings input, using default");
            default
        }
        None => default,
    }
}
