//! Design-file parsing: unit-aware scalar expressions and the raw config tree.

pub mod config;
pub mod error;
pub mod eval;
pub mod expr;
pub mod units;

pub use config::{OnError, RawAirbridging, RawComponent, RawConfig};
pub use error::Error;
pub use expr::ScalarExpr;
pub use units::Units;
