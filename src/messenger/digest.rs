// =============================================================================
// Morning Digest — renders the daily summary message
// =============================================================================
//
// Markdown text for the chat delivery: a dated header, a market snapshot,
// the top-N ranked buy candidates, a short indicator legend and a
// not-financial-advice footer. Written for readers who are new to trend
// analysis, so every number carries a label.

use chrono::DateTime;
use chrono_tz::Tz;

use crate::types::{SummaryRecord, Trend};

/// Build the full digest for one run.
///
/// `picks` are the ranked buy candidates (best first); `others` is the rest
/// of the evaluated universe, scanned here for bearish crossovers.
pub fn build_message(
    now_ny: DateTime<Tz>,
    picks: &[SummaryRecord],
    others: &[SummaryRecord],
    top_n: usize,
) -> String {
    let header = format!(
        "📊 *Daily Stock Insights* — {} (09:00 New York)\n\n",
        now_ny.format("%a, %b %d, %Y")
    );

    let total_up = picks.iter().filter(|p| p.trend == Trend::Up).count();
    let total_down = picks.iter().filter(|p| p.trend == Trend::Down).count();
    let sell_crosses = others.iter().filter(|o| o.sell_cross).count();

    let rsi_values: Vec<f64> = picks.iter().filter_map(|p| p.rsi).collect();
    let avg_rsi = if rsi_values.is_empty() {
        0.0
    } else {
        let mean = rsi_values.iter().sum::<f64>() / rsi_values.len() as f64;
        (mean * 10.0).round() / 10.0
    };

    let summary = format!(
        "*Today's Market Snapshot:*\n\
         • {total_up} stocks show strong upward trends.\n\
         • {total_down} stocks are trending down or consolidating.\n\
         • {sell_crosses} stocks printed a bearish crossover.\n\
         • Average RSI of top movers: {avg_rsi} (neutral to bullish)\n\n"
    );

    let mut body = String::from("*Top Trending Stocks Today:*\n");
    if picks.is_empty() {
        body.push_str("_No strong trend signals detected today._\n");
    } else {
        for (i, p) in picks.iter().take(top_n).enumerate() {
            body.push_str(&format!(
                "{}. *{}* — {} trend (RSI: {}, Δ: {:+.2}%, 52w: {}%, Vol×: {})\n",
                i + 1,
                p.ticker,
                p.trend,
                fmt_opt(p.rsi),
                p.pct_chg,
                fmt_opt(p.prox_52w),
                fmt_opt(p.vol_spike),
            ));
        }
    }

    let explain = "\n📈 *Indicators Explained:*\n\
        • *SMA20/50*: Short-term (20-day) vs long-term (50-day) price averages.\n\
        • *RSI(14)*: Momentum indicator (below 40 = oversold, above 70 = overbought).\n\
        • *52w High*: How close price is to its yearly peak (in %).\n\
        • *Vol×*: Current volume compared to 30-day average.\n";

    let footer = "\n—\n_Educational use only — trend analysis practice, not financial advice._";

    format!("{header}{summary}{body}{explain}{footer}")
}

/// Render an optional rounded value; undefined indicators show as "n/a".
fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}"),
        None => "n/a".to_string(),
    }
}
