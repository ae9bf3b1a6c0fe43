// =============================================================================
// Indicator Engine — derived daily columns for one ticker
// =============================================================================
//
// Composes the rolling/recurrence primitives into the full indicator table:
// fast/slow SMA of close, RSI, trailing 52-week high with its proximity
// percentage, and the 30-day volume average with its spike ratio.
//
// The output is strictly causal — row i depends only on bars 0..=i — and
// positionally aligned 1:1 with the input bars. Pure function: calling it
// twice on the same bars yields identical output.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::indicators::rolling_high::rolling_max;
use crate::indicators::rsi::wilder_rsi;
use crate::indicators::sma::rolling_mean;
use crate::types::Bar;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_sma_fast() -> usize {
    20
}

fn default_sma_slow() -> usize {
    50
}

fn default_rsi_period() -> usize {
    14
}

fn default_high_window() -> usize {
    252
}

fn default_high_min_periods() -> usize {
    50
}

fn default_volume_window() -> usize {
    30
}

/// Window sizes and smoothing period for the indicator table.
///
/// Every field has a serde default so partial config files keep working.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorParams {
    /// Fast SMA window on closes (trend, short horizon).
    #[serde(default = "default_sma_fast")]
    pub sma_fast: usize,

    /// Slow SMA window on closes (trend, long horizon).
    #[serde(default = "default_sma_slow")]
    pub sma_slow: usize,

    /// RSI smoothing period (alpha = 1/period).
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    /// Trailing-high window, ~252 trading days = 52 weeks.
    #[serde(default = "default_high_window")]
    pub high_window: usize,

    /// Observations required before the trailing high is defined.
    #[serde(default = "default_high_min_periods")]
    pub high_min_periods: usize,

    /// Volume-average window.
    #[serde(default = "default_volume_window")]
    pub volume_window: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            sma_fast: default_sma_fast(),
            sma_slow: default_sma_slow(),
            rsi_period: default_rsi_period(),
            high_window: default_high_window(),
            high_min_periods: default_high_min_periods(),
            volume_window: default_volume_window(),
        }
    }
}

/// One date's derived values, aligned 1:1 with the source bar.
///
/// `date` and `close` are carried through so signal evaluation can compute
/// the day-over-day change without reaching back into the bar series.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRow {
    pub date: NaiveDate,
    pub close: f64,
    pub sma_fast: Option<f64>,
    pub sma_slow: Option<f64>,
    pub rsi: Option<f64>,
    pub high_52w: Option<f64>,
    /// Close as a percentage of the trailing high; may slightly exceed 100
    /// when today's close tops the prior high.
    pub prox_52w: Option<f64>,
    pub vol_avg: Option<f64>,
    pub vol_spike: Option<f64>,
}

impl IndicatorRow {
    /// True when every indicator column is defined (full warm-up reached and
    /// the RSI down-series is non-zero).
    pub fn fully_defined(&self) -> bool {
        self.sma_fast.is_some()
            && self.sma_slow.is_some()
            && self.rsi.is_some()
            && self.high_52w.is_some()
            && self.prox_52w.is_some()
            && self.vol_avg.is_some()
            && self.vol_spike.is_some()
    }
}

/// Compute the full indicator table for one ticker's bars.
///
/// The result has exactly one row per bar, same order. Undefined values are
/// represented as `None`, never as a sentinel float; ratio columns are also
/// `None` when their denominator is exactly zero so a degenerate series can
/// never produce a non-finite value.
pub fn compute(bars: &[Bar], params: &IndicatorParams) -> Vec<IndicatorRow> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();

    let sma_fast = rolling_mean(&closes, params.sma_fast);
    let sma_slow = rolling_mean(&closes, params.sma_slow);
    let rsi = wilder_rsi(&closes, params.rsi_period);
    let high_52w = rolling_max(&highs, params.high_window, params.high_min_periods);
    let vol_avg = rolling_mean(&volumes, params.volume_window);

    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let high = high_52w[i];
            let prox = high
                .filter(|h| *h != 0.0)
                .map(|h| bar.close / h * 100.0);
            let avg = vol_avg[i];
            let spike = avg
                .filter(|a| *a != 0.0)
                .map(|a| bar.volume / a);

            IndicatorRow {
                date: bar.date,
                close: bar.close,
                sma_fast: sma_fast[i],
                sma_slow: sma_slow[i],
                rsi: rsi[i],
                high_52w: high,
                prox_52w: prox,
                vol_avg: avg,
                vol_spike: spike,
            }
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    /// Helper: bars with the given closes; high = close, volume constant.
    fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar {
                date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
                    + chrono::Days::new(i as u64),
                open: c,
                high: c,
                low: c,
                close: c,
                volume: 1_000_000.0,
            })
            .collect()
    }

    #[test]
    fn output_aligned_with_input() {
        let bars = bars_from_closes(&[1.0, 2.0, 3.0]);
        let rows = compute(&bars, &IndicatorParams::default());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].date, bars[0].date);
        assert_eq!(rows[2].date, bars[2].date);
    }

    #[test]
    fn slow_sma_undefined_for_short_series() {
        // Any series under 50 entries never defines the slow SMA.
        let closes: Vec<f64> = (1..=49).map(|x| x as f64).collect();
        let rows = compute(&bars_from_closes(&closes), &IndicatorParams::default());
        assert!(rows.iter().all(|r| r.sma_slow.is_none()));
    }

    #[test]
    fn proximity_at_least_100_on_fresh_highs() {
        // Strictly increasing closes that always top the prior high: today's
        // close IS the trailing max, so proximity is exactly 100 (and never
        // below).
        let closes: Vec<f64> = (1..=120).map(|x| 100.0 + x as f64).collect();
        let rows = compute(&bars_from_closes(&closes), &IndicatorParams::default());
        for row in rows.iter().filter(|r| r.prox_52w.is_some()) {
            assert!(row.prox_52w.unwrap() >= 100.0 - 1e-9);
        }
    }

    #[test]
    fn volume_spike_is_one_for_constant_volume() {
        let closes: Vec<f64> = (1..=60).map(|x| x as f64).collect();
        let rows = compute(&bars_from_closes(&closes), &IndicatorParams::default());
        let last = rows.last().unwrap();
        assert!((last.vol_spike.unwrap() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn zero_volume_average_yields_none_not_infinity() {
        let closes: Vec<f64> = (1..=60).map(|x| x as f64).collect();
        let mut bars = bars_from_closes(&closes);
        for b in &mut bars {
            b.volume = 0.0;
        }
        let rows = compute(&bars, &IndicatorParams::default());
        assert!(rows.iter().all(|r| r.vol_spike.is_none()));
    }

    #[test]
    fn compute_is_idempotent() {
        let closes: Vec<f64> = (0..300)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0 + i as f64 * 0.1)
            .collect();
        let bars = bars_from_closes(&closes);
        let params = IndicatorParams::default();
        assert_eq!(compute(&bars, &params), compute(&bars, &params));
    }

    #[test]
    fn fully_defined_requires_every_column() {
        // 300 gently oscillating bars: once every warm-up has passed and a
        // down move has occurred, rows are fully defined.
        let closes: Vec<f64> = (0..300)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0)
            .collect();
        let rows = compute(&bars_from_closes(&closes), &IndicatorParams::default());
        assert!(!rows[10].fully_defined()); // still warming up
        assert!(rows.last().unwrap().fully_defined());
    }

    #[test]
    fn params_deserialise_with_defaults() {
        let params: IndicatorParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.sma_fast, 20);
        assert_eq!(params.sma_slow, 50);
        assert_eq!(params.rsi_period, 14);
        assert_eq!(params.high_window, 252);
        assert_eq!(params.high_min_periods, 50);
        assert_eq!(params.volume_window, 30);
    }
}
