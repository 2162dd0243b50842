// src/strategies.rs
//! Preset strategy templates
//!
//! Each template lists the legs of a textbook strategy. Loading one fills in
//! what the template leaves out: principal 100 and quantity 1.

use crate::instruments::InstrumentKind::{LongCall, LongPut, LongUnderlying, ShortCall, ShortPut};
use crate::instruments::{InstrumentKind, Position, PositionId};

/// Principal given to template legs
pub const TEMPLATE_PRINCIPAL: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateLeg {
    pub kind: InstrumentKind,
    pub strike: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyTemplate {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub legs: &'static [TemplateLeg],
}

impl StrategyTemplate {
    /// Materialize the legs, drawing one id per leg from `next_id`
    pub fn positions(&self, mut next_id: impl FnMut() -> PositionId) -> Vec<Position> {
        self.legs
            .iter()
            .map(|leg| {
                Position::new(next_id(), leg.kind, leg.strike, leg.cost)
                    .with_principal(TEMPLATE_PRINCIPAL)
            })
            .collect()
    }
}

const fn leg(kind: InstrumentKind, strike: f64, cost: f64) -> TemplateLeg {
    TemplateLeg { kind, strike, cost }
}

pub static PRESETS: &[StrategyTemplate] = &[
    StrategyTemplate {
        key: "straddle",
        name: "Long Straddle",
        description: "Buy call and put at same strike",
        legs: &[leg(LongCall, 100.0, 5.0), leg(LongPut, 100.0, 5.0)],
    },
    StrategyTemplate {
        key: "strangle",
        name: "Long Strangle",
        description: "Buy OTM call and OTM put",
        legs: &[leg(LongCall, 110.0, 3.0), leg(LongPut, 90.0, 3.0)],
    },
    StrategyTemplate {
        key: "butterfly",
        name: "Butterfly Spread",
        description: "Limited risk/reward symmetric strategy",
        legs: &[
            leg(LongCall, 90.0, 12.0),
            leg(ShortCall, 100.0, 6.0),
            leg(ShortCall, 100.0, 6.0),
            leg(LongCall, 110.0, 3.0),
        ],
    },
    StrategyTemplate {
        key: "collar",
        name: "Collar",
        description: "Long stock, long put, short call",
        legs: &[
            leg(LongUnderlying, 100.0, 100.0),
            leg(LongPut, 95.0, 2.0),
            leg(ShortCall, 105.0, 2.0),
        ],
    },
    StrategyTemplate {
        key: "covered_call",
        name: "Covered Call",
        description: "Long stock + short call",
        legs: &[leg(LongUnderlying, 100.0, 100.0), leg(ShortCall, 110.0, 5.0)],
    },
    StrategyTemplate {
        key: "protective_put",
        name: "Protective Put",
        description: "Long stock + long put",
        legs: &[leg(LongUnderlying, 100.0, 100.0), leg(LongPut, 95.0, 4.0)],
    },
    StrategyTemplate {
        key: "bull_spread",
        name: "Bull Call Spread",
        description: "Buy low strike call, sell high strike call",
        legs: &[leg(LongCall, 95.0, 8.0), leg(ShortCall, 105.0, 3.0)],
    },
    StrategyTemplate {
        key: "bear_spread",
        name: "Bear Put Spread",
        description: "Buy high strike put, sell low strike put",
        legs: &[leg(LongPut, 105.0, 8.0), leg(ShortPut, 95.0, 3.0)],
    },
];

pub fn find(key: &str) -> Option<&'static StrategyTemplate> {
    PRESETS.iter().find(|s| s.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_known_and_unknown() {
        assert_eq!(find("butterfly").map(|s| s.legs.len()), Some(4));
        assert!(find("iron_condor").is_none());
    }

    #[test]
    fn test_keys_are_unique() {
        for (i, a) in PRESETS.iter().enumerate() {
            assert!(PRESETS[i + 1..].iter().all(|b| b.key != a.key), "duplicate {}", a.key);
        }
    }

    #[test]
    fn test_template_defaults() {
        let mut counter = 10;
        let positions = find("collar").unwrap().positions(|| {
            counter += 1;
            PositionId(counter)
        });
        assert_eq!(positions.len(), 3);
        assert_eq!(positions[0].id, PositionId(11));
        assert_eq!(positions[2].id, PositionId(13));
        assert!(positions.iter().all(|p| p.quantity == 1 && p.principal == 100.0));
        assert_eq!(positions[1].kind, InstrumentKind::LongPut);
        assert_eq!(positions[1].strike, 95.0);
    }
}
