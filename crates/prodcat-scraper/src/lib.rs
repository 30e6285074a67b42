pub mod client;
pub mod crawl;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod run;
pub mod sample;
pub mod urls;

pub use client::PageClient;
pub use error::ScraperError;
pub use run::{run_scrape, ScrapeOutcome, ScrapeRequest, MIN_VIABLE_CORPUS};
pub use sample::generate_sample_products;
