use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveTime;
use clap::Parser;
use shelter_scraper::config::{self, parse_run_at};
use shelter_scraper::{logging, run_once, AgePolicy, DailySchedule, ScrapeConfig, Scheduler};

/// Scrape a shelter's adoptable animal listing into a dated CSV dataset, once a day
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Run a single scrape now and exit instead of waiting for the daily time
    #[arg(long)]
    once: bool,

    /// With --once, also print the scraped batch as JSON
    #[arg(long, requires = "once")]
    json: bool,

    /// Listing page to paginate
    #[arg(long, default_value = config::BASE_URL)]
    base_url: String,

    /// Animal type filter passed as the `at` query parameter
    #[arg(long, default_value = config::ANIMAL_TYPE)]
    animal_type: String,

    /// CSV dataset the runs are appended to
    #[arg(long, default_value = config::DATASET_PATH)]
    dataset: PathBuf,

    /// How the Age column is written: text or numeric
    #[arg(long, value_enum, default_value_t = AgePolicy::Numeric)]
    age_policy: AgePolicy,

    /// Local time of day for the daily run (HH:MM)
    #[arg(long, default_value = config::RUN_AT, value_parser = parse_run_at)]
    run_at: NaiveTime,

    /// Request timeout in seconds
    #[arg(long, default_value_t = config::REQUEST_TIMEOUT.as_secs())]
    timeout: u64,

    /// Pause between page fetches in milliseconds
    #[arg(long, default_value_t = config::PAGE_DELAY.as_millis() as u64)]
    page_delay_ms: u64,

    /// Give up paginating after this many pages
    #[arg(long, default_value_t = config::MAX_PAGES)]
    max_pages: usize,
}

impl Cli {
    fn scrape_config(&self) -> ScrapeConfig {
        ScrapeConfig::new(self.base_url.clone())
            .with_animal_type(self.animal_type.clone())
            .with_dataset_path(self.dataset.clone())
            .with_age_policy(self.age_policy)
            .with_run_at(self.run_at)
            .with_request_timeout(Duration::from_secs(self.timeout))
            .with_page_delay(Duration::from_millis(self.page_delay_ms))
            .with_max_pages(self.max_pages)
    }
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let config = cli.scrape_config();

    if cli.once {
        let report = run_once(&config)?;
        if cli.json {
            let json = serde_json::to_string_pretty(&report.sweep.records)
                .context("Failed to serialize scraped records")?;
            println!("{}", json);
        }
        return Ok(());
    }

    let mut scheduler = Scheduler::new(DailySchedule::new(config.run_at));
    scheduler.run_forever(|| match run_once(&config) {
        Ok(report) => log::info!(
            "Run for {} finished: {} animals appended to {} existing rows",
            report.scrape_date,
            report.persisted.appended,
            report.persisted.existing_rows
        ),
        Err(e) => log::error!("Run failed: {:#}", e),
    })
}
