// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free rolling/recurrence primitives plus the engine that
// composes them into the per-ticker indicator table. Undefined values (a
// window still warming up, an RSI with a zero down-series) are `None`, so
// callers are forced to handle insufficient history explicitly.

pub mod engine;
pub mod rolling_high;
pub mod rsi;
pub mod sma;

pub use engine::{compute, IndicatorParams, IndicatorRow};
