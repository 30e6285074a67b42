use crate::app_config::AppConfig;
use crate::ConfigError;

/// Default browser-like User-Agent sent with every page fetch.
///
/// Listing sites routinely reject obviously non-browser agents, so the
/// default mimics a desktop browser rather than identifying the tool.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing logic, decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var`
/// needed. No variable is required; everything defaults.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let bind_addr = parse_addr("PRODCAT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("PRODCAT_LOG_LEVEL", "info");
    let sites_path = PathBuf::from(or_default("PRODCAT_SITES_PATH", "./config/sites.yaml"));
    let brands_path = PathBuf::from(or_default("PRODCAT_BRANDS_PATH", "./config/brands.yaml"));
    let data_dir = PathBuf::from(or_default("PRODCAT_DATA_DIR", "./data"));
    let default_site = or_default("PRODCAT_DEFAULT_SITE", "wegetanystock");

    let scraper_request_timeout_secs = parse_u64("PRODCAT_SCRAPER_REQUEST_TIMEOUT_SECS", "10")?;
    let scraper_user_agent = or_default("PRODCAT_SCRAPER_USER_AGENT", DEFAULT_USER_AGENT);
    let scraper_inter_request_delay_ms =
        parse_u64("PRODCAT_SCRAPER_INTER_REQUEST_DELAY_MS", "1000")?;

    Ok(AppConfig {
        bind_addr,
        log_level,
        sites_path,
        brands_path,
        data_dir,
        default_site,
        scraper_request_timeout_secs,
        scraper_user_agent,
        scraper_inter_request_delay_ms,
    })
}
