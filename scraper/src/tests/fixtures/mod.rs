use reqwest::StatusCode;
use scraper::Html;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::fetch::{FetchError, PageSource};

/// Load test HTML fixture by name
pub fn load_html_fixture(fixture_name: &str) -> String {
    let path = Path::new("src/tests/fixtures").join(format!("{}.html", fixture_name));
    fs::read_to_string(path)
        .unwrap_or_else(|_| panic!("Failed to load test fixture: {}", fixture_name))
}

/// Load a captured listing page that once extracted badly
pub fn load_failure_html(failure_name: &str) -> Option<String> {
    let path = Path::new("src/tests/fixtures/failures").join(format!("{}.html", failure_name));
    fs::read_to_string(path).ok()
}

/// A listing page built from cards, each a list of (label, value) pairs
pub fn listing_page(cards: &[&[(&str, &str)]]) -> String {
    let mut body = String::new();
    for card in cards {
        body.push_str("<div class=\"gridResult\">\n");
        for (label, value) in card.iter() {
            body.push_str(&format!(
                "  <span class=\"{} results\">{}</span>\n",
                label, value
            ));
        }
        body.push_str("</div>\n");
    }
    format!(
        "<html><head><title>Adopt</title></head><body><div id=\"results\">\n{}</div></body></html>",
        body
    )
}

/// In-memory listing site: serves canned pages by URL and remembers every request
#[derive(Default)]
pub struct FakeSite {
    pages: HashMap<String, Result<String, StatusCode>>,
    pub requests: RefCell<Vec<String>>,
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: String, html: String) -> Self {
        self.pages.insert(url, Ok(html));
        self
    }

    pub fn failing(mut self, url: String, status: StatusCode) -> Self {
        self.pages.insert(url, Err(status));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl PageSource for FakeSite {
    fn fetch(&self, url: &str) -> Result<Html, FetchError> {
        self.requests.borrow_mut().push(url.to_string());
        match self.pages.get(url) {
            Some(Ok(html)) => Ok(Html::parse_document(html)),
            Some(Err(status)) => Err(FetchError::Status {
                status: *status,
                url: url.to_string(),
            }),
            None => Err(FetchError::Status {
                status: StatusCode::NOT_FOUND,
                url: url.to_string(),
            }),
        }
    }
}
