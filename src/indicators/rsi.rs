// =============================================================================
// Relative Strength Index (RSI) — recursive exponential smoothing
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an asset is overbought or oversold.
//
// Step 1 — Split the close-to-close deltas into an up-move series
//          (`max(delta, 0)`) and a down-move series (`max(-delta, 0)`).
// Step 2 — Smooth each series with the recurrence
//            ewm[t] = alpha * x[t] + (1 - alpha) * ewm[t-1],  alpha = 1/period
//          seeded with the first observation (`ewm = x` at the first delta).
// Step 3 — RS  = up_ewm / down_ewm
//          RSI = 100 - 100 / (1 + RS)
//
// There is no delta at t=0, so both smoothed series begin at index 1. While
// the smoothed down series is exactly zero, RS is undefined and the RSI is
// reported as `None` rather than saturating at 100 — the distinction matters
// downstream, where an undefined RSI simply earns no score bonus.
// =============================================================================

/// Compute the aligned RSI series for `closes` with smoothing factor
/// `1/period`.
///
/// The result has one entry per close. Index 0 is always `None` (no delta),
/// and any index where the smoothed down-move series is zero is `None`.
///
/// # Edge cases
/// - `period == 0` => all `None` (no meaningful smoothing factor)
/// - fewer than 2 closes => all `None`
pub fn wilder_rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; closes.len()];
    if period == 0 || closes.len() < 2 {
        return result;
    }

    let alpha = 1.0 / period as f64;
    let mut up_ewm = 0.0;
    let mut down_ewm = 0.0;

    for t in 1..closes.len() {
        let delta = closes[t] - closes[t - 1];
        let up = delta.max(0.0);
        let down = (-delta).max(0.0);

        if t == 1 {
            // Seed with the first observation of each series.
            up_ewm = up;
            down_ewm = down;
        } else {
            up_ewm = alpha * up + (1.0 - alpha) * up_ewm;
            down_ewm = alpha * down + (1.0 - alpha) * down_ewm;
        }

        if down_ewm == 0.0 {
            continue; // RS undefined — leave this index as None.
        }

        let rs = up_ewm / down_ewm;
        let rsi = 100.0 - 100.0 / (1.0 + rs);
        if rsi.is_finite() {
            result[t] = Some(rsi);
        }
    }

    result
}
