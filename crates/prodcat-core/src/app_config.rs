use std::net::SocketAddr;
use std::path::PathBuf;

/// Process-wide configuration resolved from environment variables.
///
/// Every field has a default; see `config.rs` for variable names.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub sites_path: PathBuf,
    pub brands_path: PathBuf,
    pub data_dir: PathBuf,
    pub default_site: String,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    pub scraper_inter_request_delay_ms: u64,
}
