// src/session.rs
//! Portfolio state owned by one valuation session
//!
//! All mutation goes through the methods below; every valuation reads the
//! current positions and settings and recomputes from scratch.

use crate::analytics::bs_analytic::price_for;
use crate::engine::{
    axis_bounds, break_evens, default_range, kinks, pnl_table, sample, AxisBounds, PayoffPoint,
    PriceRange, DEFAULT_CURVE_POINTS, DEFAULT_TABLE_ROWS,
};
use crate::error::{PayoffError, PayoffResult};
use crate::instruments::{InstrumentKind, Position, PositionField, PositionId, PositionRecord};
use crate::payoff::PayoffVariant;
use crate::settings::Settings;
use crate::strategies;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument, warn};

/// Premium given to a freshly added option before any pricing
const NEW_POSITION_COST: f64 = 5.0;
/// Notional given to a freshly added position
const NEW_POSITION_PRINCIPAL: f64 = 100.0;

/// Everything a renderer needs for one redraw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub range: PriceRange,
    /// Profit and loss, premiums included
    pub curve: Vec<PayoffPoint>,
    /// Payoff at expiry, premiums excluded
    pub payoff_curve: Vec<PayoffPoint>,
    pub kinks: Vec<PayoffPoint>,
    pub break_evens: Vec<f64>,
    pub pnl_table: Vec<PayoffPoint>,
    pub axis: Option<AxisBounds>,
}

/// Serialized session: settings plus partially specified positions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioFile {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub positions: Vec<PositionRecord>,
    #[serde(default)]
    pub auto_pricing: bool,
}

#[derive(Debug, Clone)]
pub struct Session {
    positions: Vec<Position>,
    settings: Settings,
    next_id: u64,
    auto_pricing: bool,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(Settings::default())
    }
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Session {
            positions: Vec::new(),
            settings,
            next_id: 1,
            auto_pricing: false,
        }
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn auto_pricing(&self) -> bool {
        self.auto_pricing
    }

    pub fn position(&self, id: PositionId) -> Option<&Position> {
        self.positions.iter().find(|p| p.id == id)
    }

    fn allocate_id(&mut self) -> PositionId {
        if let Some(next) = self.next_id.checked_add(1) {
            let id = PositionId(self.next_id);
            self.next_id = next;
            return id;
        }
        // Counter exhausted by a caller-supplied id; reuse the lowest free one
        let mut candidate = 1;
        while self.position(PositionId(candidate)).is_some() {
            candidate += 1;
        }
        PositionId(candidate)
    }

    /// Add a default position of `kind` struck at the current spot
    ///
    /// Risk-free positions get a zero strike so they never widen the
    /// default price range.
    pub fn add_position(&mut self, kind: InstrumentKind) -> PositionId {
        let id = self.allocate_id();
        let strike = if kind.is_risk_free() {
            0.0
        } else {
            self.settings.spot_price
        };
        let mut position =
            Position::new(id, kind, strike, NEW_POSITION_COST).with_principal(NEW_POSITION_PRINCIPAL);
        if self.auto_pricing && kind.is_option() {
            position.cost = price_for(kind, strike, &self.settings);
        }
        debug!(%id, ?kind, strike, cost = position.cost, "position added");
        self.positions.push(position);
        id
    }

    /// Insert a caller-built position, keeping ids unique
    pub fn push_position(&mut self, mut position: Position) -> PositionId {
        if self.position(position.id).is_some() {
            position.id = self.allocate_id();
        } else {
            self.next_id = self.next_id.max(position.id.0.saturating_add(1));
        }
        if self.auto_pricing && position.kind.is_option() {
            position.cost = price_for(position.kind, position.strike, &self.settings);
        }
        let id = position.id;
        self.positions.push(position);
        id
    }

    /// Edit one numeric field; an option whose strike moves is repriced
    /// when auto-pricing is on
    pub fn update_position(
        &mut self,
        id: PositionId,
        field: PositionField,
        value: f64,
    ) -> PayoffResult<()> {
        let auto_pricing = self.auto_pricing;
        let settings = self.settings;
        let position = self
            .positions
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| {
                warn!(%id, "update for unknown position");
                PayoffError::UnknownPosition { id: id.0 }
            })?;

        position.set_field(field, value);
        if auto_pricing && field == PositionField::Strike && position.kind.is_option() {
            position.cost = price_for(position.kind, position.strike, &settings);
        }
        debug!(%id, ?field, value, "position updated");
        Ok(())
    }

    pub fn remove_position(&mut self, id: PositionId) -> PayoffResult<Position> {
        let index = self
            .positions
            .iter()
            .position(|p| p.id == id)
            .ok_or(PayoffError::UnknownPosition { id: id.0 })?;
        debug!(%id, "position removed");
        Ok(self.positions.remove(index))
    }

    pub fn clear(&mut self) {
        debug!(count = self.positions.len(), "portfolio cleared");
        self.positions.clear();
    }

    /// Replace the valuation context wholesale
    pub fn replace_settings(&mut self, settings: Settings) {
        self.settings = settings;
        debug!(?settings, "settings replaced");
        if self.auto_pricing {
            self.reprice_options();
        }
    }

    /// Toggle Black-Scholes premiums; enabling reprices every option
    pub fn set_auto_pricing(&mut self, enabled: bool) {
        self.auto_pricing = enabled;
        if enabled {
            self.reprice_options();
        }
    }

    /// Overwrite every option's cost with its Black-Scholes price
    pub fn reprice_options(&mut self) {
        let settings = self.settings;
        for position in self.positions.iter_mut().filter(|p| p.kind.is_option()) {
            position.cost = price_for(position.kind, position.strike, &settings);
        }
        debug!("options repriced");
    }

    /// Replace the portfolio with a preset strategy
    pub fn load_strategy(&mut self, key: &str) -> PayoffResult<()> {
        let template = strategies::find(key).ok_or_else(|| {
            warn!(key, "unknown strategy");
            PayoffError::UnknownStrategy {
                key: key.to_string(),
            }
        })?;
        self.positions.clear();
        // Ids are drawn leg by leg so a fallback allocation sees the legs already placed
        for mut position in template.positions(|| PositionId(0)) {
            position.id = self.allocate_id();
            self.positions.push(position);
        }
        debug!(key, legs = self.positions.len(), "strategy loaded");
        if self.auto_pricing {
            self.reprice_options();
        }
        Ok(())
    }

    /// Recompute range, curves, markers and table for the current state
    #[instrument(skip_all, fields(positions = self.positions.len()))]
    pub fn valuation(&self) -> Valuation {
        let range = default_range(&self.positions);
        if self.positions.is_empty() {
            return Valuation {
                range,
                curve: Vec::new(),
                payoff_curve: Vec::new(),
                kinks: Vec::new(),
                break_evens: Vec::new(),
                pnl_table: Vec::new(),
                axis: None,
            };
        }

        let settings = &self.settings;
        let curve = sample(&self.positions, range, settings, DEFAULT_CURVE_POINTS, PayoffVariant::Full);
        let payoff_curve = sample(
            &self.positions,
            range,
            settings,
            DEFAULT_CURVE_POINTS,
            PayoffVariant::PayoffOnly,
        );
        let kinks = kinks(&self.positions, range, settings);
        let axis = axis_bounds(&curve, &kinks);
        let valuation = Valuation {
            range,
            break_evens: break_evens(&self.positions, range, settings),
            pnl_table: pnl_table(&self.positions, range, settings, DEFAULT_TABLE_ROWS),
            curve,
            payoff_curve,
            kinks,
            axis,
        };
        debug!(
            min = range.min,
            max = range.max,
            kinks = valuation.kinks.len(),
            break_evens = valuation.break_evens.len(),
            "valuation recomputed"
        );
        valuation
    }

    /// Build a session from a portfolio file's contents
    pub fn from_portfolio(file: PortfolioFile) -> PayoffResult<Self> {
        file.settings.validate()?;
        let mut session = Session::new(file.settings);
        for record in file.positions {
            let fallback = PositionId(session.next_id);
            match record.into_position(fallback) {
                Some(position) => {
                    session.push_position(position);
                }
                None => warn!("portfolio record without instrument kind skipped"),
            }
        }
        session.set_auto_pricing(file.auto_pricing);
        Ok(session)
    }

    pub fn to_portfolio(&self) -> PortfolioFile {
        PortfolioFile {
            settings: self.settings,
            positions: self.positions.iter().map(PositionRecord::from).collect(),
            auto_pricing: self.auto_pricing,
        }
    }

    pub fn from_json(json: &str) -> PayoffResult<Self> {
        Session::from_portfolio(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> PayoffResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_portfolio())?)
    }

    pub fn load(path: impl AsRef<Path>) -> PayoffResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Session::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> PayoffResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::bs_analytic::{bs_call_price, bs_put_price};

    #[test]
    fn test_ids_are_fresh_and_stable() {
        let mut session = Session::default();
        let a = session.add_position(InstrumentKind::LongCall);
        let b = session.add_position(InstrumentKind::LongPut);
        session.remove_position(a).unwrap();
        let c = session.add_position(InstrumentKind::ShortCall);
        assert_ne!(a, b);
        assert_ne!(c, a);
        assert_ne!(c, b);
        assert_eq!(session.positions().len(), 2);
        assert!(session.position(b).is_some());
    }

    #[test]
    fn test_add_position_defaults() {
        let mut session = Session::default();
        let call = session.add_position(InstrumentKind::LongCall);
        let lend = session.add_position(InstrumentKind::LongRiskFree);

        let call = session.position(call).unwrap();
        assert_eq!(call.strike, 100.0);
        assert_eq!(call.cost, 5.0);
        assert_eq!(call.quantity, 1);

        let lend = session.position(lend).unwrap();
        assert_eq!(lend.strike, 0.0);
        assert_eq!(lend.principal, 100.0);
    }

    #[test]
    fn test_auto_pricing_on_add_and_strike_edit() {
        let mut session = Session::default();
        session.set_auto_pricing(true);
        let id = session.add_position(InstrumentKind::ShortPut);
        assert_eq!(session.position(id).unwrap().cost, bs_put_price(100.0, 100.0, 1.0, 0.05, 0.2));

        session.update_position(id, PositionField::Strike, 90.0).unwrap();
        assert_eq!(session.position(id).unwrap().cost, bs_put_price(100.0, 90.0, 1.0, 0.05, 0.2));

        // Manual premium edits are kept until the next repricing trigger
        session.update_position(id, PositionField::Cost, 1.25).unwrap();
        assert_eq!(session.position(id).unwrap().cost, 1.25);
    }

    #[test]
    fn test_settings_change_reprices_only_when_enabled() {
        let mut session = Session::default();
        let id = session.add_position(InstrumentKind::LongCall);
        let higher_vol = Settings {
            volatility: 0.4,
            ..Settings::default()
        };

        session.replace_settings(higher_vol);
        assert_eq!(session.position(id).unwrap().cost, 5.0);

        session.set_auto_pricing(true);
        assert_eq!(session.position(id).unwrap().cost, bs_call_price(100.0, 100.0, 1.0, 0.05, 0.4));
    }

    #[test]
    fn test_unknown_ids_and_strategies() {
        let mut session = Session::default();
        assert!(matches!(
            session.update_position(PositionId(42), PositionField::Cost, 1.0),
            Err(PayoffError::UnknownPosition { id: 42 })
        ));
        assert!(session.remove_position(PositionId(42)).is_err());
        assert!(matches!(
            session.load_strategy("iron_condor"),
            Err(PayoffError::UnknownStrategy { .. })
        ));
    }

    #[test]
    fn test_load_strategy_replaces_portfolio() {
        let mut session = Session::default();
        session.add_position(InstrumentKind::LongForward);
        session.load_strategy("straddle").unwrap();
        assert_eq!(session.positions().len(), 2);
        assert!(session.positions().iter().all(|p| p.kind.is_option()));

        let next = session.add_position(InstrumentKind::LongCall);
        let ids: Vec<PositionId> = session.positions().iter().map(|p| p.id).collect();
        assert_eq!(ids.iter().filter(|id| **id == next).count(), 1);
    }

    #[test]
    fn test_empty_valuation() {
        let valuation = Session::default().valuation();
        assert_eq!(valuation.range, PriceRange::new(0.0, 200.0));
        assert!(valuation.curve.is_empty());
        assert!(valuation.kinks.is_empty());
        assert!(valuation.pnl_table.is_empty());
        assert!(valuation.axis.is_none());
    }

    #[test]
    fn test_ids_stay_unique_when_counter_is_exhausted() {
        let mut session = Session::default();
        session.push_position(Position::new(
            PositionId(u64::MAX - 1),
            InstrumentKind::LongCall,
            100.0,
            5.0,
        ));
        let a = session.add_position(InstrumentKind::LongPut);
        let b = session.add_position(InstrumentKind::ShortPut);
        let c = session.add_position(InstrumentKind::ShortCall);
        assert_eq!(a, PositionId(1));
        assert_eq!(b, PositionId(2));
        assert_eq!(c, PositionId(3));

        session.load_strategy("butterfly").unwrap();
        let mut ids: Vec<u64> = session.positions().iter().map(|p| p.id.0).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_push_position_keeps_ids_unique() {
        let mut session = Session::default();
        let first = session.push_position(Position::new(
            PositionId(5),
            InstrumentKind::LongCall,
            100.0,
            5.0,
        ));
        let clash = session.push_position(Position::new(
            PositionId(5),
            InstrumentKind::LongPut,
            100.0,
            5.0,
        ));
        assert_eq!(first, PositionId(5));
        assert_eq!(clash, PositionId(6));
        assert_eq!(session.add_position(InstrumentKind::ShortCall), PositionId(7));
    }
}
