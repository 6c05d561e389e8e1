use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;

use crate::config::ScrapeConfig;
use crate::dataset::{persist, PersistSummary};
use crate::fetch::{HttpFetcher, PageSource};
use crate::sweep::{sweep_with_delay, Sweep};

/// Result of one scheduled run.
#[derive(Debug)]
pub struct RunReport {
    pub scrape_date: String,
    pub sweep: Sweep,
    pub persisted: PersistSummary,
}

/// Date stamp written on every row of today's batch.
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// One full run against the live site: sweep every page, then merge the batch
/// into the dataset.
pub fn run_once(config: &ScrapeConfig) -> Result<RunReport> {
    let fetcher =
        HttpFetcher::new(config.request_timeout).context("Failed to build HTTP client")?;
    run_with(&fetcher, config, &today(), std::thread::sleep)
}

/// A run with the page source, date and pacing supplied by the caller.
pub fn run_with<S, D>(
    source: &S,
    config: &ScrapeConfig,
    scrape_date: &str,
    delay: D,
) -> Result<RunReport>
where
    S: PageSource + ?Sized,
    D: FnMut(Duration),
{
    let sweep = sweep_with_delay(source, config, delay);
    log::info!("Sweep stopped: {:?} after {} pages", sweep.stop, sweep.pages);

    let persisted = persist(
        &config.dataset_path,
        &sweep.records,
        scrape_date,
        config.age_policy,
    )
    .with_context(|| format!("Failed to write dataset {}", config.dataset_path.display()))?;

    Ok(RunReport {
        scrape_date: scrape_date.to_string(),
        sweep,
        persisted,
    })
}
