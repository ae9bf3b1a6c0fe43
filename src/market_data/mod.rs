// =============================================================================
// Market Data Module
// =============================================================================

pub mod yahoo;

use async_trait::async_trait;

use crate::errors::FetchError;
use crate::types::Bar;

/// Source of daily OHLCV history, injected into the pipeline.
///
/// Implementations return bars oldest-first with no duplicate dates and all
/// required fields present; an empty series is a [`FetchError::NoData`], not
/// an empty `Ok`. The trait seam lets tests swap the HTTP client for an
/// in-memory mock.
#[async_trait]
pub trait BarProvider: Send + Sync {
    /// Fetch roughly fourteen months of daily bars for `ticker`.
    async fn fetch_daily(&self, ticker: &str) -> Result<Vec<Bar>, FetchError>;
}
