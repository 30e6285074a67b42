use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("page not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("a custom URL is required when scraping the 'custom' site")]
    MissingCustomUrl,

    #[error("site '{key}' is not configured")]
    UnknownSite { key: String },
}
