// =============================================================================
// Bot Configuration — tunable settings with atomic save
// =============================================================================
//
// Every tunable lives here: universe floor, warm-up requirement, fetch
// concurrency, digest size, indicator windows and score weights.
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash. All fields carry serde defaults so that adding new fields never
// breaks loading an older config file.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::indicators::IndicatorParams;
use crate::signals::ScoreParams;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_universe_min() -> usize {
    300
}

fn default_min_warm_rows() -> usize {
    60
}

fn default_fetch_concurrency() -> usize {
    8
}

fn default_history_months() -> i64 {
    14
}

fn default_top_n() -> usize {
    15
}

/// Top-level configuration for the Daybreak bot.
///
/// Every field has a serde default so that older JSON files missing new
/// fields will still deserialise correctly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    // --- Universe & history --------------------------------------------------

    /// Minimum number of symbols the assembled universe must contain; a
    /// smaller universe aborts the run.
    #[serde(default = "default_universe_min")]
    pub universe_min: usize,

    /// Minimum fully-warmed indicator rows a ticker needs to be evaluated.
    #[serde(default = "default_min_warm_rows")]
    pub min_warm_rows: usize,

    /// Months of daily history requested per ticker.
    #[serde(default = "default_history_months")]
    pub history_months: i64,

    // --- Pipeline ------------------------------------------------------------

    /// Concurrent in-flight fetches, bounded by the data provider's
    /// tolerance for request bursts.
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,

    // --- Digest --------------------------------------------------------------

    /// Maximum ranked candidates listed in the digest.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    // --- Engine parameters ---------------------------------------------------

    /// Indicator windows and smoothing period.
    #[serde(default)]
    pub indicators: IndicatorParams,

    /// Score weights and thresholds.
    #[serde(default)]
    pub score: ScoreParams,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            universe_min: default_universe_min(),
            min_warm_rows: default_min_warm_rows(),
            history_months: default_history_months(),
            fetch_concurrency: default_fetch_concurrency(),
            top_n: default_top_n(),
            indicators: IndicatorParams::default(),
            score: ScoreParams::default(),
        }
    }
}

impl BotConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config from {}", path.display()))?;

        info!(
            path = %path.display(),
            universe_min = config.universe_min,
            top_n = config.top_n,
            "config loaded"
        );

        Ok(config)
    }

    /// Persist the current configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content =
            serde_json::to_string_pretty(self).context("failed to serialise config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "config saved (atomic)");
        Ok(())
    }
}
