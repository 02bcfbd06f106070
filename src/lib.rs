//! Extraction of car.gr vehicle listings.
//!
//! [`parse_car_page`] turns one listing identifier into a [`ListingRecord`],
//! [`parse_search_results`] streams one record per listing on a search results page, and
//! [`to_dict`] projects a record into an ordered key/value map for callers that serve or
//! export it.

pub mod models;
pub mod scrapers;

use anyhow::Result;
use futures::stream::{self, BoxStream, StreamExt};

pub use models::{to_dict, ListingRecord, Seller, Specifications};
pub use scrapers::{CarGrScraper, ScraperConfig, SearchResultPage};

/// Fetch and parse one listing with default settings.
pub async fn parse_car_page(id: &str) -> Result<ListingRecord> {
    CarGrScraper::new()?.fetch_one(id).await
}

/// Stream the listings of one search results page with default settings.
pub fn parse_search_results(search_url: &str) -> BoxStream<'static, Result<ListingRecord>> {
    match CarGrScraper::new() {
        Ok(scraper) => scraper.fetch_from_search(search_url),
        Err(e) => stream::once(async move { Err::<ListingRecord, _>(e) }).boxed(),
    }
}
