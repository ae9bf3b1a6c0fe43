// =============================================================================
// Shared types used across the Daybreak signal engine
// =============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day of OHLCV data for a single ticker.
///
/// Bars arrive oldest-first with no duplicate dates; close, high, low and
/// volume are always present (rows with missing fields are dropped at the
/// provider boundary).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Direction of the fast/slow moving-average relationship on the last row.
///
/// Binary by design: equal averages classify as `Down`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "Up"),
            Self::Down => write!(f, "Down"),
        }
    }
}

/// Per-ticker evaluation result, ready for ranking and message rendering.
///
/// Produced once per ticker per run from the last two fully-defined
/// indicator rows and never mutated afterwards (the pipeline fills in
/// `ticker` immediately after construction).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub ticker: String,
    pub trend: Trend,
    pub buy_cross: bool,
    pub sell_cross: bool,
    /// RSI rounded to 1 decimal; `None` while the down-move series is zero.
    pub rsi: Option<f64>,
    /// Proximity to the 52-week high in percent, rounded to 1 decimal.
    pub prox_52w: Option<f64>,
    /// Volume vs. its 30-day average, rounded to 2 decimals.
    pub vol_spike: Option<f64>,
    /// Day-over-day close change in percent, rounded to 2 decimals.
    pub pct_chg: f64,
    /// Composite score in [0.0, 6.0], rounded to 2 decimals.
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_display() {
        assert_eq!(Trend::Up.to_string(), "Up");
        assert_eq!(Trend::Down.to_string(), "Down");
    }

    #[test]
    fn summary_record_roundtrip() {
        let rec = SummaryRecord {
            ticker: "AAPL".to_string(),
            trend: Trend::Up,
            buy_cross: true,
            sell_cross: false,
            rsi: Some(55.3),
            prox_52w: Some(97.1),
            vol_spike: None,
            pct_chg: 1.24,
            score: 5.0,
        };
        let json = serde_json::to_string(&rec).unwrap();
        let back: SummaryRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.ticker, "AAPL");
        assert_eq!(back.trend, Trend::Up);
        assert!(back.buy_cross);
        assert_eq!(back.vol_spike, None);
        assert!((back.score - 5.0).abs() < f64::EPSILON);
    }
}
