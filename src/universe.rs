// =============================================================================
// Universe Builder — large-cap US ticker list from public index tables
// =============================================================================
//
// The universe is the union of the S&P 500 constituents and the Nasdaq-100,
// scraped from their Wikipedia tables. Each page is scanned for the first
// table whose header row contains "symbol" / "ticker"; that column's cells
// are cleaned and validated. The result is deduplicated and sorted, and a
// run aborts when fewer than the configured floor survive — a thin universe
// means the scrape broke, not that the market shrank.

use std::collections::BTreeSet;

use scraper::{Html, Selector};
use tracing::{info, instrument, warn};

use crate::errors::UniverseError;

const WIKI_SP500: &str = "https://en.wikipedia.org/wiki/List_of_S%26P_500_companies";
const WIKI_NDQ100: &str = "https://en.wikipedia.org/wiki/Nasdaq-100";

/// Fetches and assembles the ticker universe.
#[derive(Debug, Clone)]
pub struct UniverseBuilder {
    min_size: usize,
    client: reqwest::Client,
}

impl UniverseBuilder {
    /// Create a builder that requires at least `min_size` symbols.
    pub fn new(min_size: usize) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(20))
            .user_agent("Mozilla/5.0 (compatible; daybreak-bot/1.0)")
            .build()
            .expect("failed to build reqwest client");

        Self { min_size, client }
    }

    /// Return the deduplicated, sorted universe of large-cap US tickers.
    ///
    /// The S&P 500 list is required; the Nasdaq-100 page failing only
    /// narrows the union (with a warning).
    #[instrument(skip(self), name = "universe::get_universe")]
    pub async fn get_universe(&self) -> Result<Vec<String>, UniverseError> {
        let mut universe: BTreeSet<String> = BTreeSet::new();

        let sp500 = self.scrape_symbols(WIKI_SP500, "symbol").await?;
        universe.extend(sp500);

        match self.scrape_symbols(WIKI_NDQ100, "ticker").await {
            Ok(ndq) => universe.extend(ndq),
            Err(e) => warn!(error = %e, "Nasdaq-100 scrape failed — continuing with S&P 500 only"),
        }

        let out: Vec<String> = universe.into_iter().collect();
        if out.len() < self.min_size {
            return Err(UniverseError::TooSmall {
                size: out.len(),
                min: self.min_size,
            });
        }

        info!(size = out.len(), "universe assembled");
        Ok(out)
    }

    /// Fetch one page and extract tickers from the column whose header
    /// contains `column_like`.
    async fn scrape_symbols(
        &self,
        url: &str,
        column_like: &str,
    ) -> Result<Vec<String>, UniverseError> {
        let html = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(extract_symbols(&html, column_like))
    }
}

/// Extract ticker symbols from the first wikitable whose header row has a
/// column containing `column_like` (case-insensitive).
///
/// Pure function of the page text; visible for tests.
pub fn extract_symbols(html: &str, column_like: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let table_sel = Selector::parse("table.wikitable").expect("valid selector");
    let row_sel = Selector::parse("tr").expect("valid selector");
    let header_sel = Selector::parse("th").expect("valid selector");
    let cell_sel = Selector::parse("td").expect("valid selector");

    let needle = column_like.to_lowercase();

    for table in document.select(&table_sel) {
        let mut rows = table.select(&row_sel);
        let Some(header_row) = rows.next() else {
            continue;
        };

        let headers: Vec<String> = header_row
            .select(&header_sel)
            .map(|th| th.text().collect::<String>().trim().to_lowercase())
            .collect();
        let Some(col_idx) = headers.iter().position(|h| h.contains(&needle)) else {
            continue;
        };

        let mut symbols = Vec::new();
        for row in rows {
            let Some(cell) = row.select(&cell_sel).nth(col_idx) else {
                continue;
            };
            let raw = cell.text().collect::<String>();
            if let Some(symbol) = clean_ticker(&raw) {
                symbols.push(symbol);
            }
        }
        return symbols;
    }

    Vec::new()
}

/// Normalize a raw ticker cell: trim, uppercase, `.` becomes `-` (share
/// classes are quoted as e.g. BRK-B by the chart endpoint). Returns `None`
/// unless the result is non-empty `[A-Z0-9-]+`.
fn clean_ticker(raw: &str) -> Option<String> {
    let cleaned = raw.trim().to_uppercase().replace('.', "-");
    if cleaned.is_empty() {
        return None;
    }
    cleaned
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
        .then_some(cleaned)
}
