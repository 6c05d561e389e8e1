use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveTime;
use clap::ValueEnum;

pub const BASE_URL: &str = "https://24petconnect.com/CLTAdopt";
pub const ANIMAL_TYPE: &str = "DOG";
pub const PAGE_SIZE: usize = 30;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const PAGE_DELAY: Duration = Duration::from_secs(1);
pub const MAX_PAGES: usize = 300;
pub const DATASET_PATH: &str = "dogs_at_shelter.csv";
pub const RUN_AT: &str = "13:00";

/// How the Age column is written to the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[clap(rename_all = "lowercase")]
pub enum AgePolicy {
    /// Keep the listing text as scraped
    Text,
    /// Write numbers only; anything else becomes an empty cell
    Numeric,
}

impl Default for AgePolicy {
    fn default() -> Self {
        AgePolicy::Numeric
    }
}

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub animal_type: String,
    pub page_size: usize,
    pub request_timeout: Duration,
    pub page_delay: Duration,
    pub max_pages: usize,
    pub dataset_path: PathBuf,
    pub age_policy: AgePolicy,
    pub run_at: NaiveTime,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            animal_type: ANIMAL_TYPE.to_string(),
            page_size: PAGE_SIZE,
            request_timeout: REQUEST_TIMEOUT,
            page_delay: PAGE_DELAY,
            max_pages: MAX_PAGES,
            dataset_path: PathBuf::from(DATASET_PATH),
            age_policy: AgePolicy::default(),
            run_at: NaiveTime::from_hms_opt(13, 0, 0).unwrap_or_default(),
        }
    }
}

impl ScrapeConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_animal_type(mut self, animal_type: impl Into<String>) -> Self {
        self.animal_type = animal_type.into();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset_path = path.into();
        self
    }

    pub fn with_age_policy(mut self, policy: AgePolicy) -> Self {
        self.age_policy = policy;
        self
    }

    pub fn with_run_at(mut self, run_at: NaiveTime) -> Self {
        self.run_at = run_at;
        self
    }

    /// Listing URL for the page starting at `offset`.
    pub fn page_url(&self, offset: usize) -> String {
        format!("{}?index={}&at={}", self.base_url, offset, self.animal_type)
    }
}

/// Parse a wall-clock time of day such as `13:00` or `13:00:30`.
pub fn parse_run_at(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|e| format!("invalid time of day '{}': {}", value, e))
}
