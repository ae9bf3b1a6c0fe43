// =============================================================================
// Yahoo Chart API Client — daily OHLCV history over REST
// =============================================================================
//
// Public, unauthenticated endpoint:
//   GET /v8/finance/chart/{symbol}?period1=..&period2=..&interval=1d
//
// The response nests parallel arrays under chart.result[0]: a `timestamp`
// array plus one `indicators.quote[0]` object holding open/high/low/close/
// volume arrays of the same length. Entries can be null on halted days;
// rows missing any required field are dropped rather than surfaced as
// sentinel values.
// =============================================================================

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::America::New_York;
use tracing::{debug, instrument, warn};

use crate::errors::FetchError;
use crate::market_data::BarProvider;
use crate::types::Bar;

/// Months of daily history requested per ticker — enough for the 252-day
/// high window plus the 60-row warm-up requirement.
const DEFAULT_HISTORY_MONTHS: i64 = 14;

/// REST client for Yahoo's chart endpoint.
#[derive(Debug, Clone)]
pub struct YahooClient {
    base_url: String,
    history_months: i64,
    client: reqwest::Client,
}

impl YahooClient {
    pub fn new() -> Self {
        Self::with_history_months(DEFAULT_HISTORY_MONTHS)
    }

    /// Create a client requesting `history_months` of daily bars.
    pub fn with_history_months(history_months: i64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .user_agent("Mozilla/5.0 (compatible; daybreak-bot/1.0)")
            .build()
            .expect("failed to build reqwest client");

        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            history_months,
            client,
        }
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BarProvider for YahooClient {
    #[instrument(skip(self), name = "yahoo::fetch_daily")]
    async fn fetch_daily(&self, ticker: &str) -> Result<Vec<Bar>, FetchError> {
        let now = Utc::now();
        let period2 = now.timestamp();
        let period1 = (now - Duration::days(self.history_months * 31)).timestamp();

        let url = format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d",
            self.base_url, ticker, period1, period2
        );

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        let body: serde_json::Value = resp.json().await?;

        if !status.is_success() {
            return Err(FetchError::Malformed(format!(
                "chart endpoint returned {status}: {body}"
            )));
        }

        let bars = parse_chart_response(&body)?;
        debug!(ticker, count = bars.len(), "daily bars fetched");
        Ok(bars)
    }
}

/// Parse a chart response body into bars, dropping rows with any missing
/// required field (close/high/low/volume).
///
/// Visible for tests; pure function of the payload.
pub fn parse_chart_response(body: &serde_json::Value) -> Result<Vec<Bar>, FetchError> {
    let result = body["chart"]["result"]
        .as_array()
        .and_then(|arr| arr.first())
        .ok_or(FetchError::NoData)?;

    let timestamps = result["timestamp"]
        .as_array()
        .ok_or(FetchError::MissingField("timestamp"))?;

    let quote = result["indicators"]["quote"]
        .as_array()
        .and_then(|arr| arr.first())
        .ok_or(FetchError::MissingField("indicators.quote"))?;

    let opens = column(quote, "open")?;
    let highs = column(quote, "high")?;
    let lows = column(quote, "low")?;
    let closes = column(quote, "close")?;
    let volumes = column(quote, "volume")?;

    let len = timestamps.len();
    if [opens.len(), highs.len(), lows.len(), closes.len(), volumes.len()]
        .iter()
        .any(|&l| l != len)
    {
        return Err(FetchError::Malformed(
            "quote columns not aligned with timestamps".to_string(),
        ));
    }

    let mut bars: Vec<Bar> = Vec::with_capacity(len);
    let mut dropped = 0usize;

    for i in 0..len {
        let ts = match timestamps[i].as_i64() {
            Some(ts) => ts,
            None => {
                dropped += 1;
                continue;
            }
        };
        // Required fields: a null anywhere drops the whole row.
        let (high, low, close, volume) = match (
            highs[i].as_f64(),
            lows[i].as_f64(),
            closes[i].as_f64(),
            volumes[i].as_f64(),
        ) {
            (Some(h), Some(l), Some(c), Some(v)) => (h, l, c, v),
            _ => {
                dropped += 1;
                continue;
            }
        };
        let open = opens[i].as_f64().unwrap_or(close);

        let date = trading_date(ts);
        // The endpoint occasionally repeats the live session's bar; keep the
        // first occurrence of each date so the series stays strictly
        // ascending.
        if bars.last().is_some_and(|b: &Bar| b.date >= date) {
            dropped += 1;
            continue;
        }

        bars.push(Bar {
            date,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    if dropped > 0 {
        warn!(dropped, "dropped rows with missing fields");
    }

    if bars.is_empty() {
        return Err(FetchError::NoData);
    }

    Ok(bars)
}

/// Extract one named column array from the quote object.
fn column<'a>(
    quote: &'a serde_json::Value,
    name: &'static str,
) -> Result<&'a Vec<serde_json::Value>, FetchError> {
    quote[name].as_array().ok_or(FetchError::MissingField(name))
}

/// Convert an epoch-seconds session timestamp into its New York trading date.
fn trading_date(ts: i64) -> NaiveDate {
    Utc.timestamp_opt(ts, 0)
        .single()
        .map(|dt| dt.with_timezone(&New_York).date_naive())
        .unwrap_or_default()
}
