use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One candidate product-container shape: elements of `tag` whose `class`
/// attribute matches `class_pattern` (a case-insensitive regex).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSelector {
    pub tag: String,
    pub class_pattern: String,
}

/// Declarative scraping configuration for one target site.
///
/// `category_paths` and `product_selectors` are ordered: the first selector
/// that matches at least one container wins, so declared order is part of
/// the contract, not incidental.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteProfile {
    pub key: String,
    pub name: String,
    pub base_url: String,
    #[serde(default)]
    pub category_paths: Vec<String>,
    #[serde(default)]
    pub product_selectors: Vec<ContainerSelector>,
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitesFile {
    pub sites: Vec<SiteProfile>,
}

impl SitesFile {
    /// Looks up a profile by key, preserving declared order semantics.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&SiteProfile> {
        self.sites.iter().find(|s| s.key == key)
    }

    /// Profiles available for scraping, in declared order.
    pub fn enabled(&self) -> impl Iterator<Item = &SiteProfile> {
        self.sites.iter().filter(|s| s.enabled)
    }

    /// The built-in site catalog, used when no sites file is configured.
    ///
    /// Mirrors `config/sites.yaml`; tests rely on this so they never touch
    /// the filesystem.
    #[must_use]
    pub fn builtin() -> Self {
        fn selector(tag: &str, class_pattern: &str) -> ContainerSelector {
            ContainerSelector {
                tag: tag.to_string(),
                class_pattern: class_pattern.to_string(),
            }
        }

        Self {
            sites: vec![
                SiteProfile {
                    key: "wegetanystock".to_string(),
                    name: "We Get Any Stock".to_string(),
                    base_url: "https://www.wegetanystock.com/".to_string(),
                    category_paths: vec![
                        "/category/drinks".to_string(),
                        "/category/beverages".to_string(),
                        "/category/food".to_string(),
                        "/products".to_string(),
                        "/shop".to_string(),
                    ],
                    product_selectors: vec![
                        selector("div", "product"),
                        selector("div", "product-item"),
                        selector("div", "product-card"),
                    ],
                    enabled: true,
                },
                SiteProfile {
                    key: "books_toscrape".to_string(),
                    name: "Books to Scrape".to_string(),
                    base_url: "http://books.toscrape.com/".to_string(),
                    category_paths: vec!["/catalogue/category/books_1/index.html".to_string()],
                    product_selectors: vec![
                        selector("article", "product_pod"),
                        selector("article", "product"),
                    ],
                    enabled: true,
                },
                SiteProfile {
                    key: "quotes_toscrape".to_string(),
                    name: "Quotes to Scrape".to_string(),
                    base_url: "http://quotes.toscrape.com/".to_string(),
                    category_paths: vec![],
                    product_selectors: vec![selector("div", "quote")],
                    enabled: true,
                },
                SiteProfile {
                    key: "scrapethissite".to_string(),
                    name: "Scrape This Site".to_string(),
                    base_url: "https://www.scrapethissite.com/".to_string(),
                    category_paths: vec!["/pages/".to_string()],
                    product_selectors: vec![selector("div", "page")],
                    enabled: true,
                },
                SiteProfile {
                    key: "amazon".to_string(),
                    name: "Amazon (Example)".to_string(),
                    base_url: "https://www.amazon.co.uk/".to_string(),
                    category_paths: vec!["/s?k=beverages".to_string(), "/s?k=drinks".to_string()],
                    product_selectors: vec![selector("div", "s-result-item")],
                    // Requires JavaScript; kept as configuration reference only.
                    enabled: false,
                },
                SiteProfile {
                    key: "custom".to_string(),
                    name: "Custom URL".to_string(),
                    // Supplied per request by the caller.
                    base_url: String::new(),
                    category_paths: vec![],
                    product_selectors: vec![
                        selector("div", "product"),
                        selector("div", "product-item"),
                        selector("article", "product"),
                    ],
                    enabled: true,
                },
            ],
        }
    }
}

/// Load and validate the site catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_sites(path: &Path) -> Result<SitesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SitesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let sites_file: SitesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::SitesFileParse)?;

    validate_sites(&sites_file)?;

    Ok(sites_file)
}

fn validate_sites(sites_file: &SitesFile) -> Result<(), ConfigError> {
    let mut seen_keys = HashSet::new();

    for site in &sites_file.sites {
        if site.key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site key must be non-empty".to_string(),
            ));
        }

        if !seen_keys.insert(site.key.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate site key: '{}'",
                site.key
            )));
        }

        // The custom profile's base URL is supplied per request; every other
        // enabled profile needs one up front.
        if site.enabled && site.key != "custom" && site.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "site '{}' is enabled but has no base_url",
                site.key
            )));
        }

        for sel in &site.product_selectors {
            if sel.tag.trim().is_empty() || sel.class_pattern.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "site '{}' has a selector with an empty tag or class pattern",
                    site.key
                )));
            }
        }
    }

    Ok(())
}
