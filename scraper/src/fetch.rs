use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use scraper::Html;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} timed out: {source}")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{status} returned by {url}")]
    Status { status: StatusCode, url: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl FetchError {
    /// Short name of the failure kind, used as the prefix of the diagnostic.
    pub fn class(&self) -> &'static str {
        match self {
            FetchError::Timeout { .. } => "Timeout",
            FetchError::Status { .. } => "HTTP error",
            FetchError::Transport(_) => "Request error",
        }
    }
}

/// Anything that can hand back a parsed listing page for a URL.
pub trait PageSource {
    fn fetch(&self, url: &str) -> Result<Html, FetchError>;
}

/// Fetches listing pages over HTTP with a per-request timeout.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Use an already configured client, e.g. one with proxies disabled.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    pub fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        self.client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|e| classify(e, url))
    }
}

impl PageSource for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Html, FetchError> {
        let html = self.fetch_html(url)?;
        Ok(Html::parse_document(&html))
    }
}

/// Sort a reqwest failure into timeout, bad status, or anything else.
pub fn classify(err: reqwest::Error, url: &str) -> FetchError {
    if err.is_timeout() {
        return FetchError::Timeout {
            url: url.to_string(),
            source: err,
        };
    }
    match err.status() {
        Some(status) => FetchError::Status {
            status,
            url: url.to_string(),
        },
        None => FetchError::Transport(err),
    }
}

/// Fetch one page, reporting any failure and collapsing it to `None`.
pub fn fetch_page<S: PageSource + ?Sized>(source: &S, url: &str) -> Option<Html> {
    match source.fetch(url) {
        Ok(document) => Some(document),
        Err(e) => {
            log::error!("{} occurred: {}", e.class(), e);
            None
        }
    }
}
