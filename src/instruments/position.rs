// src/instruments/position.rs
use super::kind::InstrumentKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Caller-assigned identity, stable for the lifetime of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionId(pub u64);

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One portfolio entry
///
/// `strike` and `cost` are ignored by risk-free kinds, `principal` by every
/// other kind; all of them are always present so formulas never see a hole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: PositionId,
    pub kind: InstrumentKind,
    /// Strike for options, entry or delivery price for linear kinds
    pub strike: f64,
    /// Premium for options, purchase or sale price for linear kinds
    pub cost: f64,
    /// Notional lent or borrowed by risk-free kinds
    pub principal: f64,
    /// Multiplier, always at least 1
    pub quantity: u32,
}

impl Position {
    pub fn new(id: PositionId, kind: InstrumentKind, strike: f64, cost: f64) -> Self {
        Position {
            id,
            kind,
            strike,
            cost,
            principal: 0.0,
            quantity: 1,
        }
    }

    pub fn risk_free(id: PositionId, kind: InstrumentKind, principal: f64) -> Self {
        Position {
            id,
            kind,
            strike: 0.0,
            cost: 0.0,
            principal,
            quantity: 1,
        }
    }

    pub fn with_principal(mut self, principal: f64) -> Self {
        self.principal = principal;
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity.max(1);
        self
    }

    /// Set a numeric field from raw input, non-finite input reads as 0
    pub fn set_field(&mut self, field: PositionField, value: f64) {
        let value = if value.is_finite() { value } else { 0.0 };
        match field {
            PositionField::Strike => self.strike = value,
            PositionField::Cost => self.cost = value,
            PositionField::Principal => self.principal = value,
            PositionField::Quantity => self.quantity = coerce_quantity(Some(value)),
        }
    }
}

/// Editable numeric fields of a [`Position`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionField {
    Strike,
    Cost,
    Principal,
    Quantity,
}

/// Partially specified position as found in portfolio files and templates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(rename = "type", alias = "kind")]
    pub kind: Option<InstrumentKind>,
    #[serde(default)]
    pub strike: Option<f64>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub principal: Option<f64>,
    #[serde(default)]
    pub quantity: Option<f64>,
}

impl PositionRecord {
    /// Fill the gaps: numeric fields default to 0, quantity to 1
    ///
    /// Returns `None` when the record carries no kind.
    pub fn into_position(self, fallback_id: PositionId) -> Option<Position> {
        let kind = self.kind?;
        Some(Position {
            id: self.id.map(PositionId).unwrap_or(fallback_id),
            kind,
            strike: finite_or_zero(self.strike),
            cost: finite_or_zero(self.cost),
            principal: finite_or_zero(self.principal),
            quantity: coerce_quantity(self.quantity),
        })
    }
}

impl From<&Position> for PositionRecord {
    fn from(position: &Position) -> Self {
        PositionRecord {
            id: Some(position.id.0),
            kind: Some(position.kind),
            strike: Some(position.strike),
            cost: Some(position.cost),
            principal: Some(position.principal),
            quantity: Some(position.quantity as f64),
        }
    }
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Missing, non-finite or sub-unit quantities become 1, fractions truncate
pub fn coerce_quantity(raw: Option<f64>) -> u32 {
    match raw {
        Some(q) if q.is_finite() && q >= 1.0 => q.min(u32::MAX as f64) as u32,
        None => 1,
        Some(q) => {
            warn!(quantity = q, "invalid position quantity, using 1");
            1
        }
    }
}
