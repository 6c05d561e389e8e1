pub mod config;
pub mod dataset;
pub mod extract;
pub mod fetch;
pub mod logging;
pub mod record;
pub mod run;
pub mod schedule;
pub mod sweep;

#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::config::{AgePolicy, ScrapeConfig};
pub use crate::dataset::{persist, DatasetError, PersistSummary};
pub use crate::extract::{extract, extract_html, ExtractError};
pub use crate::fetch::{fetch_page, FetchError, HttpFetcher, PageSource};
pub use crate::record::{AnimalRecord, Field, ABSENT};
pub use crate::run::{run_once, run_with, RunReport};
pub use crate::schedule::{DailySchedule, Scheduler};
pub use crate::sweep::{sweep, StopReason, Sweep};
