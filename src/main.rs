use anyhow::Result;
use car_scout::{to_dict, CarGrScraper, ListingRecord, ScraperConfig};
use clap::{Parser, Subcommand};
use futures::StreamExt;
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Scrape vehicle listings from car.gr")]
struct Args {
    /// TOML settings file
    #[arg(long, default_value = "car-scout.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one listing as JSON
    Car {
        /// car.gr listing identifier
        id: String,
    },
    /// Print every listing of a search results page, one JSON object per line
    Search {
        /// Query string appended to the search URL, e.g. `make=13&fuel_type=1`
        query: String,

        /// Stop after this many listings
        #[arg(long)]
        limit: Option<usize>,
    },
}

/// Record as served to clients: everything but the raw markup.
fn display_map(record: &ListingRecord) -> Map<String, Value> {
    let mut map = to_dict(record);
    map.remove("html");
    map
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = ScraperConfig::load(&args.config)?;
    let scraper = CarGrScraper::with_config(config)?;

    match args.command {
        Command::Car { id } => {
            let record = scraper.fetch_one(&id).await?;
            println!("{}", serde_json::to_string_pretty(&display_map(&record))?);
        }
        Command::Search { query, limit } => {
            let search_url = scraper.config().search_url(&query);
            info!(url = %search_url, "Starting search traversal");

            let mut records = scraper
                .fetch_from_search(&search_url)
                .take(limit.unwrap_or(usize::MAX));
            let mut count = 0;
            while let Some(record) = records.next().await {
                let record = record?;
                println!("{}", serde_json::to_string(&display_map(&record))?);
                count += 1;
            }

            info!("Scraped {} listings", count);
        }
    }

    Ok(())
}
