// =============================================================================
// Signal Evaluation Module
// =============================================================================
//
// Turns two adjacent fully-warmed indicator rows into crossover flags, a
// composite score and a summary record ready for ranking.

pub mod crossover;
pub mod score;

pub use crossover::{detect_crossover, CrossoverSignal};
pub use score::{score, summarize, ScoreParams};
