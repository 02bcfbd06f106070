use crate::models::ListingRecord;
use crate::scrapers::fetcher::HttpFetcher;
use crate::scrapers::listing::parse_listing;
use crate::scrapers::search::SearchResultPage;
use crate::scrapers::traits::PageFetcher;
use crate::scrapers::types::ScraperConfig;
use anyhow::{Context, Result};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::{debug, info};

/// car.gr scraper: search pages to identifiers, identifiers to listing records
pub struct CarGrScraper<F = HttpFetcher> {
    fetcher: Arc<F>,
    config: Arc<ScraperConfig>,
}

impl<F> Clone for CarGrScraper<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            config: Arc::clone(&self.config),
        }
    }
}

impl CarGrScraper<HttpFetcher> {
    /// Create a scraper over HTTP with default settings
    pub fn new() -> Result<Self> {
        Self::with_config(ScraperConfig::default())
    }

    /// Create a scraper over HTTP with custom settings
    pub fn with_config(config: ScraperConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::with_fetcher(fetcher, config))
    }
}

impl<F: PageFetcher + 'static> CarGrScraper<F> {
    pub fn with_fetcher(fetcher: F, config: ScraperConfig) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Fetch and parse a single listing page.
    ///
    /// Only a failed fetch is an error; missing page content leaves fields empty.
    pub async fn fetch_one(&self, id: &str) -> Result<ListingRecord> {
        let url = self.config.listing_url(id);
        debug!(id = id, url = %url, "Fetching listing");

        let html = self
            .fetcher
            .fetch(&url)
            .await
            .with_context(|| format!("Failed to fetch listing {}", id))?;

        let record = parse_listing(id, &url, html);
        info!(id = id, title = ?record.title, "Parsed listing");
        Ok(record)
    }

    /// Fetch one search results page without following its listings.
    pub async fn fetch_search_page(&self, search_url: &str) -> Result<SearchResultPage> {
        let html = self
            .fetcher
            .fetch(search_url)
            .await
            .context("Failed to fetch search results")?;

        Ok(SearchResultPage::parse(search_url, html))
    }

    /// Stream one record per listing found on the search page, in document order.
    ///
    /// Nothing is fetched until the stream is polled, and each listing is fetched only when
    /// the consumer asks for it. With `concurrency > 1` up to that many listings are in
    /// flight; `ordered = false` then yields them as they complete.
    pub fn fetch_from_search(&self, search_url: &str) -> BoxStream<'static, Result<ListingRecord>> {
        let scraper = self.clone();
        let search_url = search_url.to_string();

        let ids = stream::once(async move { scraper.search_ids(&search_url).await })
            .map_ok(|ids| stream::iter(ids.into_iter().map(Ok::<String, anyhow::Error>)))
            .try_flatten();

        let scraper = self.clone();
        let fetches = ids.map_ok(move |id| {
            let scraper = scraper.clone();
            async move { scraper.fetch_one(&id).await }
        });

        let concurrency = self.config.concurrency.max(1);
        if self.config.ordered {
            fetches.try_buffered(concurrency).boxed()
        } else {
            fetches.try_buffer_unordered(concurrency).boxed()
        }
    }

    async fn search_ids(&self, search_url: &str) -> Result<Vec<String>> {
        let page = self.fetch_search_page(search_url).await?;
        let ids: Vec<String> = page.listing_ids().collect();

        info!(
            url = search_url,
            total = ?page.total(),
            on_page = ids.len(),
            "Parsed search results"
        );
        Ok(ids)
    }
}
