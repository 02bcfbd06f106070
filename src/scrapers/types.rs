use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Settings for fetching and traversing car.gr pages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Listing page URL, `{id}` is replaced verbatim with the identifier
    pub listing_url_template: String,
    /// Search results page, queries are appended after `?`
    pub search_base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Listing pages fetched at once during a search traversal
    pub concurrency: usize,
    /// Keep document order when `concurrency > 1`
    pub ordered: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            listing_url_template: "https://www.car.gr/{id}#bigger-photos".to_string(),
            search_base_url: "https://www.car.gr/classifieds/cars/".to_string(),
            timeout_secs: 30,
            concurrency: 1,
            ordered: true,
        }
    }
}

impl ScraperConfig {
    /// Load settings from a TOML file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn listing_url(&self, id: &str) -> String {
        self.listing_url_template.replace("{id}", id)
    }

    pub fn search_url(&self, query: &str) -> String {
        format!("{}?{}", self.search_base_url, query)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
