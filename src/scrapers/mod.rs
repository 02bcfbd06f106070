pub mod cargr;
pub mod dom;
pub mod fetcher;
pub mod listing;
pub mod search;
pub mod traits;
pub mod types;

pub use cargr::CarGrScraper;
pub use fetcher::HttpFetcher;
pub use search::SearchResultPage;
pub use traits::PageFetcher;
pub use types::ScraperConfig;
