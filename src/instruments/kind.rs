// src/instruments/kind.rs
use crate::error::PayoffError;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

bitflags! {
    /// Behavioral groups of instrument kinds, combinable as a filter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct KindGroup: u8 {
        const RISK_FREE = 1 << 0;
        const LINEAR    = 1 << 1;
        const OPTION    = 1 << 2;
        /// Kinds whose payoff slope changes at their strike.
        const STRUCK    = Self::LINEAR.bits() | Self::OPTION.bits();
    }
}

/// Closed enumeration of portfolio building blocks
///
/// Serialized names (`long_call`, `short_risk_free`, ...) match the preset
/// template data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentKind {
    /// Lending at the risk-free rate
    LongRiskFree,
    /// Borrowing at the risk-free rate
    ShortRiskFree,
    LongUnderlying,
    ShortUnderlying,
    LongForward,
    ShortForward,
    LongCall,
    ShortCall,
    LongPut,
    ShortPut,
}

impl InstrumentKind {
    pub const ALL: [InstrumentKind; 10] = [
        InstrumentKind::LongRiskFree,
        InstrumentKind::ShortRiskFree,
        InstrumentKind::LongUnderlying,
        InstrumentKind::ShortUnderlying,
        InstrumentKind::LongForward,
        InstrumentKind::ShortForward,
        InstrumentKind::LongCall,
        InstrumentKind::ShortCall,
        InstrumentKind::LongPut,
        InstrumentKind::ShortPut,
    ];

    pub fn group(self) -> KindGroup {
        use InstrumentKind::*;
        match self {
            LongRiskFree | ShortRiskFree => KindGroup::RISK_FREE,
            LongUnderlying | ShortUnderlying | LongForward | ShortForward => KindGroup::LINEAR,
            LongCall | ShortCall | LongPut | ShortPut => KindGroup::OPTION,
        }
    }

    pub fn is_in(self, groups: KindGroup) -> bool {
        groups.contains(self.group())
    }

    pub fn is_option(self) -> bool {
        self.is_in(KindGroup::OPTION)
    }

    pub fn is_risk_free(self) -> bool {
        self.is_in(KindGroup::RISK_FREE)
    }

    pub fn is_call(self) -> bool {
        matches!(self, InstrumentKind::LongCall | InstrumentKind::ShortCall)
    }

    pub fn is_put(self) -> bool {
        matches!(self, InstrumentKind::LongPut | InstrumentKind::ShortPut)
    }

    /// `+1` for long kinds, `-1` for short kinds
    pub fn direction(self) -> f64 {
        use InstrumentKind::*;
        match self {
            LongRiskFree | LongUnderlying | LongForward | LongCall | LongPut => 1.0,
            ShortRiskFree | ShortUnderlying | ShortForward | ShortCall | ShortPut => -1.0,
        }
    }

    /// Machine name used in template data and portfolio files
    pub fn as_str(self) -> &'static str {
        use InstrumentKind::*;
        match self {
            LongRiskFree => "long_risk_free",
            ShortRiskFree => "short_risk_free",
            LongUnderlying => "long_underlying",
            ShortUnderlying => "short_underlying",
            LongForward => "long_forward",
            ShortForward => "short_forward",
            LongCall => "long_call",
            ShortCall => "short_call",
            LongPut => "long_put",
            ShortPut => "short_put",
        }
    }

    /// Human-readable label
    pub fn display_name(self) -> &'static str {
        use InstrumentKind::*;
        match self {
            LongRiskFree => "Long Risk-Free",
            ShortRiskFree => "Short Risk-Free",
            LongUnderlying => "Long Underlying",
            ShortUnderlying => "Short Underlying",
            LongForward => "Long Forward/Future",
            ShortForward => "Short Forward/Future",
            LongCall => "Long Call",
            ShortCall => "Short Call",
            LongPut => "Long Put",
            ShortPut => "Short Put",
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.display_name())
    }
}

impl FromStr for InstrumentKind {
    type Err = PayoffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InstrumentKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| PayoffError::UnknownInstrument {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_partition_all_kinds() {
        for kind in InstrumentKind::ALL {
            let hits = [KindGroup::RISK_FREE, KindGroup::LINEAR, KindGroup::OPTION]
                .iter()
                .filter(|g| kind.is_in(**g))
                .count();
            assert_eq!(hits, 1, "{:?} must sit in exactly one group", kind);
        }
    }

    #[test]
    fn test_struck_excludes_risk_free() {
        assert!(!InstrumentKind::LongRiskFree.is_in(KindGroup::STRUCK));
        assert!(InstrumentKind::ShortForward.is_in(KindGroup::STRUCK));
        assert!(InstrumentKind::LongPut.is_in(KindGroup::STRUCK));
    }

    #[test]
    fn test_parse_names() {
        for kind in InstrumentKind::ALL {
            assert_eq!(kind.as_str().parse::<InstrumentKind>().unwrap(), kind);
        }
        let err = "long_swaption".parse::<InstrumentKind>().unwrap_err();
        assert!(matches!(err, PayoffError::UnknownInstrument { .. }));
    }

    #[test]
    fn test_serde_names_match_as_str() {
        let json = serde_json::to_string(&InstrumentKind::ShortRiskFree).unwrap();
        assert_eq!(json, "\"short_risk_free\"");
        let kind: InstrumentKind = serde_json::from_str("\"long_put\"").unwrap();
        assert_eq!(kind, InstrumentKind::LongPut);
    }

    #[test]
    fn test_call_put_classification() {
        assert!(InstrumentKind::ShortCall.is_call());
        assert!(!InstrumentKind::ShortCall.is_put());
        assert!(InstrumentKind::LongPut.is_put());
        assert!(!InstrumentKind::LongForward.is_call());
        assert_eq!(InstrumentKind::ShortPut.direction(), -1.0);
    }
}
