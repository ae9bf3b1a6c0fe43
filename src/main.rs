// =============================================================================
// Daybreak — Main Entry Point
// =============================================================================
//
// Daily trend/momentum digest for a large-cap US equity universe, delivered
// over Telegram at 09:00 New York on NYSE trading days. The process is
// expected to be woken by an external scheduler (cron or similar); the gates
// below decide whether this wake-up sends.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod config;
mod errors;
mod indicators;
mod market_data;
mod messenger;
mod pipeline;
mod schedule;
mod signals;
mod types;
mod universe;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::BotConfig;
use crate::market_data::yahoo::YahooClient;
use crate::messenger::{build_message, TelegramMessenger};
use crate::pipeline::RankedPipeline;
use crate::universe::UniverseBuilder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = BotConfig::load("bot_config.json").unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        BotConfig::default()
    });

    // ── 2. Schedule gates ────────────────────────────────────────────────
    let override_send = std::env::var("OVERRIDE_SEND")
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let now_ny = schedule::now_new_york();

    if !override_send {
        if !schedule::is_nine_am(&now_ny) {
            info!(time = %now_ny.format("%H:%M"), "Not 09:00 New York; exiting");
            return Ok(());
        }
        if !schedule::is_trading_day(now_ny.date_naive()) {
            info!(date = %now_ny.date_naive(), "Not a NYSE trading day; exiting");
            return Ok(());
        }
    }

    // ── 3. Assemble the universe (fatal on failure) ──────────────────────
    let universe = UniverseBuilder::new(config.universe_min)
        .get_universe()
        .await?;
    info!(size = universe.len(), "universe ready");

    // ── 4. Evaluate and rank ─────────────────────────────────────────────
    let provider = YahooClient::with_history_months(config.history_months);
    let report = RankedPipeline::new(&config).run(&universe, &provider).await;

    info!(
        candidates = report.buy_candidates.len(),
        others = report.others.len(),
        skipped = report.skipped.len(),
        "evaluation complete"
    );

    // ── 5. Render & deliver ──────────────────────────────────────────────
    let body = build_message(
        now_ny,
        &report.buy_candidates,
        &report.others,
        config.top_n,
    );

    let messenger = TelegramMessenger::from_env()?;
    messenger.send(&body).await?;

    info!("Daily digest sent.");
    Ok(())
}
