use anyhow::Result;
use async_trait::async_trait;

/// Source of raw page markup
///
/// The HTTP implementation lives in [`super::fetcher`]; anything that can hand back the
/// markup for a URL can drive the extractors.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return its body as text. Transport failures are the only errors.
    async fn fetch(&self, url: &str) -> Result<String>;
}
