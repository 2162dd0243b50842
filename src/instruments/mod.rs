//! Portfolio building blocks: the closed set of instrument kinds and the
//! position records a caller assembles from them.

pub mod kind;
pub mod position;

pub use kind::{InstrumentKind, KindGroup};
pub use position::{Position, PositionField, PositionId, PositionRecord};
