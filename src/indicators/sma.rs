// =============================================================================
// Simple Moving Average (SMA) — rolling mean with warm-up
// =============================================================================
//
// The trailing mean over the last `window` observations, inclusive of the
// current one. The output is positionally aligned with the input: index i of
// the result corresponds to index i of `values`, and holds `None` until a
// full window of history exists.
//
// The same primitive backs the SMA-20/SMA-50 trend averages on closes and the
// 30-day average on volumes.

/// Compute the aligned rolling mean of `values` over `window` observations.
///
/// # Edge cases
/// - `window == 0` => all `None` (a zero-length window is meaningless)
/// - indices `< window - 1` => `None` (warm-up)
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    let mut result = Vec::with_capacity(values.len());
    let mut sum = 0.0;

    for (i, &v) in values.iter().enumerate() {
        sum += v;
        if i >= window {
            sum -= values[i - window];
        }
        if i + 1 >= window {
            result.push(Some(sum / window as f64));
        } else {
            result.push(None);
        }
    }

    result
}
