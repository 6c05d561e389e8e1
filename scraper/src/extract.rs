use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use crate::record::{AnimalRecord, Field};

/// Class marking one animal's block on a listing page.
pub const CARD_SELECTOR: &str = "div.gridResult";

/// Problems that make a single result card unreadable.
#[derive(Error, Debug, PartialEq)]
pub enum ExtractError {
    #[error("result card contains another result card")]
    NestedCard,
}

/// Compiled selectors for a listing page.
pub struct CardReader {
    card: Selector,
    fields: Vec<(Field, Selector)>,
}

impl Default for CardReader {
    fn default() -> Self {
        Self::new()
    }
}

impl CardReader {
    pub fn new() -> Self {
        let card = Selector::parse(CARD_SELECTOR).unwrap();
        let fields = Field::ALL
            .iter()
            .map(|field| {
                let selector = Selector::parse(&format!("span.{}.results", field.label())).unwrap();
                (*field, selector)
            })
            .collect();

        Self { card, fields }
    }

    pub fn cards<'a>(&'a self, document: &'a Html) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        document.select(&self.card)
    }

    /// Read every field of one card. Missing fields become the absent-marker;
    /// a field given more than once takes its first value.
    pub fn read_card(&self, card: ElementRef) -> Result<AnimalRecord, ExtractError> {
        let nested = card
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .any(|el| self.card.matches(&el));
        if nested {
            return Err(ExtractError::NestedCard);
        }

        let mut record = AnimalRecord::default();
        for (field, selector) in &self.fields {
            let mut values = card
                .select(selector)
                .map(|el| el.text().collect::<String>().trim().to_string());

            let Some(value) = values.next() else {
                continue;
            };
            if let Some(other) = values.find(|other| *other != value) {
                log::warn!(
                    "Card has more than one {}: keeping '{}', ignoring '{}'",
                    field.label(),
                    value,
                    other
                );
            }
            record.set(*field, value);
        }

        Ok(record)
    }
}

/// Pull every animal off a listing page, in document order.
///
/// An absent document (the fetch failed) yields no records. A card that
/// cannot be read is skipped and the rest of the page is still returned.
pub fn extract(document: Option<&Html>) -> Vec<AnimalRecord> {
    let Some(document) = document else {
        return Vec::new();
    };

    let reader = CardReader::new();
    let mut records = Vec::new();

    for (position, card) in reader.cards(document).enumerate() {
        match reader.read_card(card) {
            Ok(record) => records.push(record),
            Err(e) => log::warn!("Error extracting data for card {}: {}", position, e),
        }
    }

    if !records.is_empty() && records.iter().all(|r| r.matched_fields() == 0) {
        log::warn!(
            "{} result cards found but none had a recognised field; the listing markup may have changed",
            records.len()
        );
    }

    records
}

/// Convenience wrapper for raw HTML.
pub fn extract_html(html: &str) -> Vec<AnimalRecord> {
    let document = Html::parse_document(html);
    extract(Some(&document))
}
