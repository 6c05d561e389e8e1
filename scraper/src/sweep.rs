use std::thread;
use std::time::Duration;

use crate::config::ScrapeConfig;
use crate::extract::extract;
use crate::fetch::{fetch_page, PageSource};
use crate::record::AnimalRecord;

/// Why a sweep stopped paginating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The page at `offset` could not be fetched.
    FetchFailed { offset: usize },
    /// The page at `offset` had no animals on it.
    EmptyPage { offset: usize },
    /// `offset` is the first page past the configured page cap.
    PageCap { offset: usize },
}

/// The records gathered by one full pass over the listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Sweep {
    pub records: Vec<AnimalRecord>,
    pub pages: usize,
    pub stop: StopReason,
}

/// Walk the listing from offset 0, sleeping the configured delay between pages.
pub fn sweep<S: PageSource + ?Sized>(source: &S, config: &ScrapeConfig) -> Sweep {
    sweep_with_delay(source, config, thread::sleep)
}

/// Same as [`sweep`] with the pause between pages supplied by the caller.
pub fn sweep_with_delay<S, D>(source: &S, config: &ScrapeConfig, mut delay: D) -> Sweep
where
    S: PageSource + ?Sized,
    D: FnMut(Duration),
{
    let mut records = Vec::new();
    let mut pages = 0;
    let mut offset = 0;

    let stop = loop {
        if pages >= config.max_pages {
            log::warn!(
                "Reached the limit of {} pages at index {}. Exiting loop.",
                config.max_pages,
                offset
            );
            break StopReason::PageCap { offset };
        }

        let url = config.page_url(offset);
        log::info!("Fetching data from index: {}", offset);

        let Some(document) = fetch_page(source, &url) else {
            log::info!("Error fetching page. Exiting loop.");
            break StopReason::FetchFailed { offset };
        };

        let page_records = extract(Some(&document));
        if page_records.is_empty() {
            log::info!("No more animals found. Exiting loop.");
            break StopReason::EmptyPage { offset };
        }

        records.extend(page_records);
        pages += 1;
        offset += config.page_size;
        delay(config.page_delay);
    };

    log::info!("Total animals fetched: {}", records.len());

    Sweep {
        records,
        pages,
        stop,
    }
}
