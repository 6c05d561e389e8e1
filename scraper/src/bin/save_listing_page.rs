use anyhow::{Context, Result};
use scraper::Html;
use std::env;
use std::fs;
use std::path::Path;

use shelter_scraper::extract::CardReader;
use shelter_scraper::{logging, HttpFetcher, ScrapeConfig};

fn main() -> Result<()> {
    logging::init();

    // Get page offset and fixture name from command line arguments
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Please provide a page offset and a test name");
        eprintln!("Usage: cargo run --bin save_listing_page <OFFSET> <test_name>");
        std::process::exit(1);
    }

    let offset: usize = args[1]
        .parse()
        .with_context(|| format!("Invalid page offset: {}", args[1]))?;
    let test_name = &args[2];

    let config = ScrapeConfig::default();
    let url = config.page_url(offset);
    println!("Fetching HTML from {}...", url);

    let fetcher =
        HttpFetcher::new(config.request_timeout).context("Failed to build HTTP client")?;
    let html = fetcher.fetch_html(&url).context("Failed to fetch listing page")?;

    // Create failures directory if it doesn't exist
    let failures_dir = Path::new("src/tests/fixtures/failures");
    fs::create_dir_all(failures_dir).context("Failed to create failures directory")?;

    // Save the HTML for testing
    let file_path = failures_dir.join(format!("{}.html", test_name));
    fs::write(&file_path, &html).context("Failed to write HTML file")?;

    println!(
        "Saved HTML to {} for regression testing",
        file_path.display()
    );

    // Report what the extractor makes of the page
    let document = Html::parse_document(&html);
    let reader = CardReader::new();

    let mut cards = 0;
    let mut unreadable = 0;
    let mut blank = 0;
    for card in reader.cards(&document) {
        cards += 1;
        match reader.read_card(card) {
            Ok(record) => {
                if record.matched_fields() == 0 {
                    blank += 1;
                }
                println!(
                    "{}. {} ({} of 10 fields)",
                    cards,
                    record.name,
                    record.matched_fields()
                );
            }
            Err(e) => {
                unreadable += 1;
                println!("{}. unreadable card: {}", cards, e);
            }
        }
    }

    println!("Page analysis results:");
    println!("  - Result cards: {}", cards);
    println!("  - Unreadable cards: {}", unreadable);
    println!("  - Cards with no recognised field: {}", blank);

    if cards == 0 {
        println!("No result cards on this page; either past the end of the listing or the card markup changed");
    } else if blank == cards - unreadable && blank > 0 {
        println!("Every readable card came back empty; the field markup has likely changed");
    }

    Ok(())
}
