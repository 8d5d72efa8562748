use ns_core::{Error, Result};
use scraper::{Html, Selector};
use url::Url;

pub fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| Error::Scraping(format!("Failed to parse URL: {}", e)))
}

pub fn extract_texts(document: &Html, selector: &str) -> Result<Vec<String>> {
    let selector = Selector::parse(selector)
        .map_err(|e| Error::Scraping(format!("Invalid selector: {}", e)))?;

    Ok(document
        .select(&selector)
        .map(|el| el.text().collect::<String>())
        .collect())
}

/// Picks the body text of a listing entry: the description when present,
/// then the content, then nothing.
pub fn listing_content(description: Option<String>, content: Option<String>) -> String {
    description
        .filter(|d| !d.is_empty())
        .or_else(|| content.filter(|c| !c.is_empty()))
        .unwrap_or_default()
}
