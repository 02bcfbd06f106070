use crate::scrapers::traits::PageFetcher;
use crate::scrapers::types::ScraperConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use tracing::{debug, warn};

/// Desktop browser identities rotated across requests
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36",
];

pub fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// Plain HTTP GET fetcher, one attempt per page
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url = %url, "Fetching page");

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, random_user_agent())
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "Non-success status");
            anyhow::bail!("Failed to fetch {}: {}", url, status);
        }

        let html = response
            .text()
            .await
            .context("Failed to read response body")?;

        debug!(url = %url, bytes = html.len(), "Downloaded page");
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_user_agent() {
        let agent = random_user_agent();
        assert!(USER_AGENTS.contains(&agent));
        assert!(agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_http_fetcher_builds() {
        assert!(HttpFetcher::new(&ScraperConfig::default()).is_ok());
    }
}
