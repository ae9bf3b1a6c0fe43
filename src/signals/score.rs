// =============================================================================
// Composite Scorer — additive trend/momentum score and summary record
// =============================================================================
//
// Each satisfied condition adds its weight; undefined indicator values simply
// earn nothing. With default weights the attainable range is 0.0 to 6.0:
//
//   +1.0  fast SMA above slow SMA (currently in an uptrend)
//   +2.0  fresh bullish crossover
//   +1.0  RSI inside the [45, 60] band
//   +1.0  close within 10% of the 52-week high (proximity >= 90)
//   +1.0  volume at least 1.2x its 30-day average

use serde::{Deserialize, Serialize};

use crate::errors::EvalError;
use crate::indicators::IndicatorRow;
use crate::signals::crossover::{detect_crossover, moving_averages};
use crate::types::{SummaryRecord, Trend};

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_trend_weight() -> f64 {
    1.0
}

fn default_crossover_weight() -> f64 {
    2.0
}

fn default_rsi_weight() -> f64 {
    1.0
}

fn default_proximity_weight() -> f64 {
    1.0
}

fn default_volume_weight() -> f64 {
    1.0
}

fn default_rsi_low() -> f64 {
    45.0
}

fn default_rsi_high() -> f64 {
    60.0
}

fn default_proximity_min() -> f64 {
    90.0
}

fn default_vol_spike_min() -> f64 {
    1.2
}

/// Weights and thresholds for the composite score.
///
/// Every field has a serde default so partial config files keep working.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreParams {
    #[serde(default = "default_trend_weight")]
    pub trend_weight: f64,

    /// Weight of a fresh bullish crossover — the strongest single signal.
    #[serde(default = "default_crossover_weight")]
    pub crossover_weight: f64,

    #[serde(default = "default_rsi_weight")]
    pub rsi_weight: f64,

    #[serde(default = "default_proximity_weight")]
    pub proximity_weight: f64,

    #[serde(default = "default_volume_weight")]
    pub volume_weight: f64,

    /// Inclusive RSI band that earns the momentum bonus.
    #[serde(default = "default_rsi_low")]
    pub rsi_low: f64,

    #[serde(default = "default_rsi_high")]
    pub rsi_high: f64,

    /// Minimum proximity (percent of 52-week high) for the proximity bonus.
    #[serde(default = "default_proximity_min")]
    pub proximity_min: f64,

    /// Minimum volume multiple for the volume bonus.
    #[serde(default = "default_vol_spike_min")]
    pub vol_spike_min: f64,
}

impl Default for ScoreParams {
    fn default() -> Self {
        Self {
            trend_weight: default_trend_weight(),
            crossover_weight: default_crossover_weight(),
            rsi_weight: default_rsi_weight(),
            proximity_weight: default_proximity_weight(),
            volume_weight: default_volume_weight(),
            rsi_low: default_rsi_low(),
            rsi_high: default_rsi_high(),
            proximity_min: default_proximity_min(),
            vol_spike_min: default_vol_spike_min(),
        }
    }
}

/// Compute the additive composite score for two adjacent fully-warmed rows.
///
/// Requires defined moving averages on both rows (precondition, enforced).
/// Other indicator values may be `None` and simply contribute nothing.
pub fn score(
    prev: &IndicatorRow,
    last: &IndicatorRow,
    params: &ScoreParams,
) -> Result<f64, EvalError> {
    let (last_fast, last_slow) = moving_averages(last, "last")?;
    let crossing = detect_crossover(prev, last)?;

    let mut total = 0.0;

    if last_fast > last_slow {
        total += params.trend_weight;
    }
    if crossing.bullish {
        total += params.crossover_weight;
    }
    if let Some(rsi) = last.rsi {
        if rsi >= params.rsi_low && rsi <= params.rsi_high {
            total += params.rsi_weight;
        }
    }
    if let Some(prox) = last.prox_52w {
        if prox >= params.proximity_min {
            total += params.proximity_weight;
        }
    }
    if let Some(spike) = last.vol_spike {
        if spike >= params.vol_spike_min {
            total += params.volume_weight;
        }
    }

    Ok(total)
}

/// Build the summary record for two adjacent fully-warmed rows.
///
/// The `ticker` field is left empty; the pipeline attaches the symbol.
pub fn summarize(
    prev: &IndicatorRow,
    last: &IndicatorRow,
    params: &ScoreParams,
) -> Result<SummaryRecord, EvalError> {
    let (last_fast, last_slow) = moving_averages(last, "last")?;
    let crossing = detect_crossover(prev, last)?;
    let total = score(prev, last, params)?;

    let trend = if last_fast > last_slow {
        Trend::Up
    } else {
        Trend::Down
    };

    Ok(SummaryRecord {
        ticker: String::new(),
        trend,
        buy_cross: crossing.bullish,
        sell_cross: crossing.bearish,
        rsi: last.rsi.map(round1),
        prox_52w: last.prox_52w.map(round1),
        vol_spike: last.vol_spike.map(round2),
        pct_chg: round2((last.close / prev.close - 1.0) * 100.0),
        score: round2(total),
    })
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    /// A baseline row with nothing earning a bonus: downtrend, RSI outside
    /// the band, far from the high, quiet volume.
    fn quiet_row() -> IndicatorRow {
        IndicatorRow {
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            close: 100.0,
            sma_fast: Some(95.0),
            sma_slow: Some(100.0),
            rsi: Some(30.0),
            high_52w: Some(150.0),
            prox_52w: Some(66.7),
            vol_avg: Some(1_000_000.0),
            vol_spike: Some(0.8),
        }
    }

    #[test]
    fn quiet_market_scores_zero() {
        let prev = quiet_row();
        let last = quiet_row();
        let s = score(&prev, &last, &ScoreParams::default()).unwrap();
        assert_eq!(s, 0.0);
    }

    #[test]
    fn score_is_monotonic_as_conditions_accumulate() {
        // Satisfy the bonus conditions one at a time, holding the rest
        // fixed; the score must never decrease, and tops out at 6.0.
        let prev = quiet_row();
        let params = ScoreParams::default();

        let mut last = quiet_row();
        let mut previous_score = score(&prev, &last, &params).unwrap();

        // Uptrend (+1). The prev row stays at-or-below, so this is also a
        // fresh crossover (+2) — apply both checks in sequence below.
        last.sma_fast = Some(101.0);
        last.sma_slow = Some(100.0);
        let s = score(&prev, &last, &params).unwrap();
        assert!(s >= previous_score);
        assert_eq!(s, 3.0); // trend + fresh crossover
        previous_score = s;

        last.rsi = Some(52.0);
        let s = score(&prev, &last, &params).unwrap();
        assert!(s >= previous_score);
        previous_score = s;

        last.prox_52w = Some(95.0);
        let s = score(&prev, &last, &params).unwrap();
        assert!(s >= previous_score);
        previous_score = s;

        last.vol_spike = Some(1.5);
        let s = score(&prev, &last, &params).unwrap();
        assert!(s >= previous_score);
        assert_eq!(s, 6.0); // maximum attainable
    }

    #[test]
    fn established_uptrend_without_fresh_cross_scores_trend_only() {
        let mut prev = quiet_row();
        prev.sma_fast = Some(101.0);
        prev.sma_slow = Some(100.0);
        let mut last = quiet_row();
        last.sma_fast = Some(102.0);
        last.sma_slow = Some(100.0);
        let s = score(&prev, &last, &ScoreParams::default()).unwrap();
        assert_eq!(s, 1.0);
    }

    #[test]
    fn undefined_optionals_contribute_nothing() {
        let prev = quiet_row();
        let mut last = quiet_row();
        last.rsi = None;
        last.prox_52w = None;
        last.vol_spike = None;
        let s = score(&prev, &last, &ScoreParams::default()).unwrap();
        assert_eq!(s, 0.0);
    }

    #[test]
    fn rsi_band_is_inclusive() {
        let prev = quiet_row();
        let params = ScoreParams::default();

        let mut last = quiet_row();
        last.rsi = Some(45.0);
        assert_eq!(score(&prev, &last, &params).unwrap(), 1.0);
        last.rsi = Some(60.0);
        assert_eq!(score(&prev, &last, &params).unwrap(), 1.0);
        last.rsi = Some(60.1);
        assert_eq!(score(&prev, &last, &params).unwrap(), 0.0);
    }

    #[test]
    fn summarize_rounds_and_classifies() {
        let mut prev = quiet_row();
        prev.close = 100.0;
        let mut last = quiet_row();
        last.close = 101.2345;
        last.sma_fast = Some(101.0);
        last.sma_slow = Some(100.0);
        last.rsi = Some(52.34);
        last.prox_52w = Some(95.67);
        last.vol_spike = Some(1.234);

        let rec = summarize(&prev, &last, &ScoreParams::default()).unwrap();
        assert_eq!(rec.trend, Trend::Up);
        assert!(rec.buy_cross);
        assert!(!rec.sell_cross);
        assert_eq!(rec.rsi, Some(52.3));
        assert_eq!(rec.prox_52w, Some(95.7));
        assert_eq!(rec.vol_spike, Some(1.23));
        assert!((rec.pct_chg - 1.23).abs() < 1e-10);
        // trend 1 + cross 2 + rsi 1 + prox 1 + vol 1
        assert!((rec.score - 6.0).abs() < 1e-10);
        assert!(rec.ticker.is_empty());
    }

    #[test]
    fn equal_averages_classify_as_down() {
        let prev = quiet_row();
        let mut last = quiet_row();
        last.sma_fast = Some(100.0);
        last.sma_slow = Some(100.0);
        let rec = summarize(&prev, &last, &ScoreParams::default()).unwrap();
        assert_eq!(rec.trend, Trend::Down);
    }

    #[test]
    fn missing_average_rejected() {
        let prev = quiet_row();
        let mut last = quiet_row();
        last.sma_slow = None;
        assert!(score(&prev, &last, &ScoreParams::default()).is_err());
        assert!(summarize(&prev, &last, &ScoreParams::default()).is_err());
    }

    #[test]
    fn params_deserialise_with_defaults() {
        let params: ScoreParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.crossover_weight, 2.0);
        assert_eq!(params.rsi_low, 45.0);
        assert_eq!(params.rsi_high, 60.0);
        assert_eq!(params.proximity_min, 90.0);
        assert_eq!(params.vol_spike_min, 1.2);
    }
}
