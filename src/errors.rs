// =============================================================================
// Error taxonomy
// =============================================================================
//
// Per-ticker failures (`FetchError`, `EvalError`) are non-fatal: the pipeline
// converts them into a skip and moves on. Only `UniverseError` aborts a run.

use thiserror::Error;

/// A market-data fetch failed for one ticker.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider returned an empty series.
    #[error("no data returned")]
    NoData,

    /// A required field/column is absent from the response.
    #[error("response missing required field '{0}'")]
    MissingField(&'static str),

    /// The response did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// The ticker universe could not be assembled. Fatal to the run.
#[derive(Debug, Error)]
pub enum UniverseError {
    /// Fewer symbols than the configured floor were collected.
    #[error("universe too small ({size} < {min})")]
    TooSmall { size: usize, min: usize },

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// A signal-evaluation precondition was violated.
///
/// The evaluator requires both rows to carry defined moving averages; the
/// pipeline guarantees this by filtering, so seeing this error means a caller
/// skipped the warm-up filter. It is never coerced into a comparison against
/// a missing value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("moving averages undefined on the {row} row")]
    MissingMovingAverage { row: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn universe_too_small_message() {
        let err = UniverseError::TooSmall { size: 120, min: 300 };
        assert_eq!(err.to_string(), "universe too small (120 < 300)");
    }

    #[test]
    fn eval_error_names_the_row() {
        let err = EvalError::MissingMovingAverage { row: "prev" };
        assert!(err.to_string().contains("prev"));
    }
}
