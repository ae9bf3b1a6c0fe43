// =============================================================================
// Rolling High — trailing maximum with a shortened warm-up
// =============================================================================
//
// The trailing maximum of `values` over up to `window` observations. Unlike
// the plain rolling mean, the high becomes defined once `min_periods`
// observations exist: early values are produced from a partial, growing
// window. The 52-week high uses window 252 with a 50-row warm-up so that
// names with under a year of listed history still rank.

/// Compute the aligned trailing maximum of `values`.
///
/// Index i holds the maximum of `values[i+1-w ..= i]` where
/// `w = min(window, i+1)`, or `None` while fewer than `min_periods`
/// observations exist.
///
/// # Edge cases
/// - `window == 0` => all `None`
/// - `min_periods == 0` is treated as 1
pub fn rolling_max(values: &[f64], window: usize, min_periods: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    let min_periods = min_periods.max(1);

    let mut result = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        if i + 1 < min_periods {
            result.push(None);
            continue;
        }
        let start = (i + 1).saturating_sub(window);
        let max = values[start..=i]
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        result.push(Some(max));
    }

    result
}
