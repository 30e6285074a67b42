mod app_config;
mod brands;
mod config;
mod products;
mod sites;

use thiserror::Error;

pub use app_config::AppConfig;
pub use brands::{load_brand_vocabulary, BrandVocabulary};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{CanonicalProduct, RawProduct, UNKNOWN_BRAND};
pub use sites::{load_sites, ContainerSelector, SiteProfile, SitesFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read sites file {path}: {source}")]
    SitesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sites file: {0}")]
    SitesFileParse(#[source] serde_yaml::Error),

    #[error("failed to read brands file {path}: {source}")]
    BrandsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse brands file: {0}")]
    BrandsFileParse(#[source] serde_yaml::Error),

    #[error("config validation failed: {0}")]
    Validation(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
