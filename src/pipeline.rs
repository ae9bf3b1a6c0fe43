// =============================================================================
// Ranked Pipeline — universe fan-out, evaluation, partition and ranking
// =============================================================================
//
// Per ticker: fetch daily bars, compute the indicator table, drop rows that
// have not finished warming up, evaluate the last two rows, and route the
// summary into buy candidates (fresh bullish crossover in an uptrend) or the
// rest. Every per-ticker failure becomes a recorded skip — a fetch error, a
// thin history, or an evaluation error never aborts the batch.
//
// Fetch + compute runs on a bounded, order-preserving worker pool; the
// partition and the single ranking sort happen only after every ticker has
// completed.

use futures_util::stream::{self, StreamExt};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::BotConfig;
use crate::indicators::{self, IndicatorParams, IndicatorRow};
use crate::market_data::BarProvider;
use crate::signals::score::summarize;
use crate::signals::ScoreParams;
use crate::types::{SummaryRecord, Trend};

/// Why a ticker was excluded from the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Too few fully-warmed indicator rows survived filtering.
    #[error("insufficient history ({rows} warmed rows < {required})")]
    InsufficientHistory { rows: usize, required: usize },

    #[error("evaluation failed: {0}")]
    Evaluation(String),
}

/// One excluded ticker and the reason it was excluded.
#[derive(Debug, Clone)]
pub struct SkippedTicker {
    pub symbol: String,
    pub reason: SkipReason,
}

/// Aggregated result of one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    /// Fresh bullish crossovers in an uptrend, ranked best-first by
    /// `(score, prox_52w)` descending.
    pub buy_candidates: Vec<SummaryRecord>,
    /// Everything else that evaluated cleanly, in universe order.
    pub others: Vec<SummaryRecord>,
    /// Excluded tickers with their typed reasons.
    pub skipped: Vec<SkippedTicker>,
}

/// The daily evaluation pipeline.
pub struct RankedPipeline {
    min_warm_rows: usize,
    fetch_concurrency: usize,
    indicators: IndicatorParams,
    score: ScoreParams,
}

impl RankedPipeline {
    pub fn new(config: &BotConfig) -> Self {
        Self {
            min_warm_rows: config.min_warm_rows,
            fetch_concurrency: config.fetch_concurrency.max(1),
            indicators: config.indicators.clone(),
            score: config.score.clone(),
        }
    }

    /// Evaluate the whole universe and rank the buy candidates.
    pub async fn run<P: BarProvider>(&self, universe: &[String], provider: &P) -> PipelineReport {
        let outcomes: Vec<(String, Result<SummaryRecord, SkipReason>)> =
            stream::iter(universe.iter().map(|symbol| {
                let symbol = symbol.clone();
                async move {
                    let outcome = self.evaluate_ticker(provider, &symbol).await;
                    (symbol, outcome)
                }
            }))
            .buffered(self.fetch_concurrency)
            .collect()
            .await;

        let report = partition_and_rank(outcomes);
        info!(
            candidates = report.buy_candidates.len(),
            others = report.others.len(),
            skipped = report.skipped.len(),
            "pipeline run complete"
        );
        report
    }

    /// Evaluate a single ticker end to end.
    async fn evaluate_ticker<P: BarProvider>(
        &self,
        provider: &P,
        symbol: &str,
    ) -> Result<SummaryRecord, SkipReason> {
        let bars = provider
            .fetch_daily(symbol)
            .await
            .map_err(|e| SkipReason::Fetch(e.to_string()))?;
        if bars.is_empty() {
            return Err(SkipReason::Fetch("no data returned".to_string()));
        }

        let rows = indicators::compute(&bars, &self.indicators);
        let warmed: Vec<IndicatorRow> =
            rows.into_iter().filter(IndicatorRow::fully_defined).collect();

        if warmed.len() < self.min_warm_rows.max(2) {
            return Err(SkipReason::InsufficientHistory {
                rows: warmed.len(),
                required: self.min_warm_rows,
            });
        }

        let prev = &warmed[warmed.len() - 2];
        let last = &warmed[warmed.len() - 1];

        let mut record = summarize(prev, last, &self.score)
            .map_err(|e| SkipReason::Evaluation(e.to_string()))?;
        record.ticker = symbol.to_string();
        Ok(record)
    }
}

/// Split completed outcomes into buy candidates / others / skips and rank
/// the candidates.
///
/// The sort is stable and descending on `(score, prox_52w or 0.0)`:
/// candidates with identical keys keep their universe order.
fn partition_and_rank(
    outcomes: Vec<(String, Result<SummaryRecord, SkipReason>)>,
) -> PipelineReport {
    let mut report = PipelineReport::default();

    for (symbol, outcome) in outcomes {
        match outcome {
            Ok(record) => {
                if record.buy_cross && record.trend == Trend::Up {
                    report.buy_candidates.push(record);
                } else {
                    report.others.push(record);
                }
            }
            Err(reason) => {
                debug!(symbol = %symbol, reason = %reason, "ticker skipped");
                report.skipped.push(SkippedTicker { symbol, reason });
            }
        }
    }

    report.buy_candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(b.prox_52w.unwrap_or(0.0).total_cmp(&a.prox_52w.unwrap_or(0.0)))
    });

    report
}
