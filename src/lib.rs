//! # payoff-diagram: Portfolio Profit/Loss Profiles
//!
//! Computes the value of a portfolio of risk-free loans, underlying
//! positions, forwards and European options as a function of the underlying
//! price at a future evaluation date.
//!
//! ## Key Features
//!
//! - **Payoff Tables**: Full P&L (premiums netted) and payoff-only views
//! - **Black-Scholes Premiums**: Optional auto-pricing of option legs
//! - **Curve Construction**: Default price range, sampled curves, kink
//!   markers, break-even prices and a tabular P&L view
//! - **Presets**: Straddles, spreads, collars and other textbook strategies
//!
//! ## Quick Start
//!
//! ```rust
//! use payoff_diagram::instruments::{InstrumentKind, Position, PositionId};
//! use payoff_diagram::engine::{default_range, kinks, sample, DEFAULT_CURVE_POINTS};
//! use payoff_diagram::payoff::{total_payoff, PayoffVariant};
//! use payoff_diagram::Settings;
//!
//! // Long straddle at 100
//! let positions = vec![
//!     Position::new(PositionId(1), InstrumentKind::LongCall, 100.0, 5.0),
//!     Position::new(PositionId(2), InstrumentKind::LongPut, 100.0, 5.0),
//! ];
//! let settings = Settings::default();
//!
//! let range = default_range(&positions);
//! let curve = sample(&positions, range, &settings, DEFAULT_CURVE_POINTS, PayoffVariant::Full);
//! let markers = kinks(&positions, range, &settings);
//!
//! assert_eq!(curve.len(), 100);
//! assert_eq!(markers.len(), 1);
//! assert_eq!(total_payoff(&positions, 100.0, &settings, PayoffVariant::Full), -10.0);
//! ```
//!
//! ## Stateful use
//!
//! [`session::Session`] owns a portfolio and its settings, applies edits and
//! recomputes a full [`session::Valuation`] on demand.

// Module declarations
pub mod error;
pub mod math_utils;
pub mod instruments;
pub mod settings;
pub mod analytics;
pub mod payoff;
pub mod engine;
pub mod risk_free;
pub mod strategies;
pub mod session;
pub mod output;

// Re-export commonly used types for convenience
pub use error::{PayoffError, PayoffResult};
pub use settings::Settings;
pub use session::{Session, Valuation};
