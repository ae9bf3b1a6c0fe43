// =============================================================================
// Moving-Average Crossover Detection
// =============================================================================
//
// A bullish crossover is the day the fast SMA moves above the slow SMA after
// sitting at or below it; bearish is the mirror image. The prior-row check is
// deliberately non-strict (`<=` / `>=`) while the last-row check is strict:
// crossing "through" equality counts as a genuine new crossing. Do not
// tighten the operators.

use crate::errors::EvalError;
use crate::indicators::IndicatorRow;

/// Outcome of crossover detection on two adjacent rows.
///
/// Both flags false is the common case; both true is impossible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossoverSignal {
    pub bullish: bool,
    pub bearish: bool,
}

/// Detect a fresh SMA crossover between `prev` and `last`.
///
/// Both rows must carry defined fast and slow SMAs — callers guarantee this
/// by filtering warm-up rows. A missing average is a precondition violation
/// reported as [`EvalError`], never silently compared.
pub fn detect_crossover(
    prev: &IndicatorRow,
    last: &IndicatorRow,
) -> Result<CrossoverSignal, EvalError> {
    let (prev_fast, prev_slow) = moving_averages(prev, "prev")?;
    let (last_fast, last_slow) = moving_averages(last, "last")?;

    Ok(CrossoverSignal {
        bullish: last_fast > last_slow && prev_fast <= prev_slow,
        bearish: last_fast < last_slow && prev_fast >= prev_slow,
    })
}

/// Extract the fast/slow SMA pair from `row`, rejecting undefined values.
pub(crate) fn moving_averages(
    row: &IndicatorRow,
    which: &'static str,
) -> Result<(f64, f64), EvalError> {
    match (row.sma_fast, row.sma_slow) {
        (Some(fast), Some(slow)) => Ok((fast, slow)),
        _ => Err(EvalError::MissingMovingAverage { row: which }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(sma_fast: Option<f64>, sma_slow: Option<f64>) -> IndicatorRow {
        IndicatorRow {
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            close: 100.0,
            sma_fast,
            sma_slow,
            rsi: Some(50.0),
            high_52w: Some(110.0),
            prox_52w: Some(90.9),
            vol_avg: Some(1_000_000.0),
            vol_spike: Some(1.0),
        }
    }

    #[test]
    fn bullish_from_strictly_below() {
        let prev = row(Some(9.0), Some(10.0));
        let last = row(Some(11.0), Some(10.0));
        let sig = detect_crossover(&prev, &last).unwrap();
        assert!(sig.bullish);
        assert!(!sig.bearish);
    }

    #[test]
    fn bullish_through_equality() {
        // Prior state exactly equal still counts as a fresh crossing.
        let prev = row(Some(10.0), Some(10.0));
        let last = row(Some(11.0), Some(10.0));
        let sig = detect_crossover(&prev, &last).unwrap();
        assert!(sig.bullish);
        assert!(!sig.bearish);
    }

    #[test]
    fn no_signal_when_already_above() {
        let prev = row(Some(11.0), Some(10.0));
        let last = row(Some(12.0), Some(10.0));
        let sig = detect_crossover(&prev, &last).unwrap();
        assert!(!sig.bullish);
        assert!(!sig.bearish);
    }

    #[test]
    fn bearish_mirror() {
        let prev = row(Some(10.0), Some(10.0));
        let last = row(Some(9.0), Some(10.0));
        let sig = detect_crossover(&prev, &last).unwrap();
        assert!(!sig.bullish);
        assert!(sig.bearish);
    }

    #[test]
    fn equal_on_last_row_is_no_signal() {
        // Strict comparison on the last row: landing exactly on the slow SMA
        // is not a crossing in either direction.
        let prev = row(Some(9.0), Some(10.0));
        let last = row(Some(10.0), Some(10.0));
        let sig = detect_crossover(&prev, &last).unwrap();
        assert!(!sig.bullish);
        assert!(!sig.bearish);
    }

    #[test]
    fn missing_average_is_a_precondition_error() {
        let prev = row(None, Some(10.0));
        let last = row(Some(11.0), Some(10.0));
        let err = detect_crossover(&prev, &last).unwrap_err();
        assert_eq!(err, EvalError::MissingMovingAverage { row: "prev" });

        let prev = row(Some(9.0), Some(10.0));
        let last = row(Some(11.0), None);
        let err = detect_crossover(&prev, &last).unwrap_err();
        assert_eq!(err, EvalError::MissingMovingAverage { row: "last" });
    }
}
