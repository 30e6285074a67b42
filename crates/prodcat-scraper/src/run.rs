//! Scrape orchestration: site resolution, discovery, crawl, and the
//! sample-data degradation path.

use prodcat_core::{RawProduct, SitesFile};

use crate::client::PageClient;
use crate::crawl::crawl_listings;
use crate::discovery::discover_category_urls;
use crate::error::ScraperError;
use crate::sample::generate_sample_products;

/// A corpus smaller than this after live extraction is topped up with
/// sample records. Falling below the floor is a degradation path, not an
/// error.
pub const MIN_VIABLE_CORPUS: usize = 50;

/// Caller's scrape parameters.
#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    /// Site profile key; `None` or an unknown key resolves to the default
    /// site.
    pub site_key: Option<String>,
    /// Required when the resolved site is `custom`; ignored otherwise.
    pub custom_url: Option<String>,
    pub max_products: usize,
}

/// Result of a scrape run: the raw records plus where they came from.
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    pub products: Vec<RawProduct>,
    pub site_key: String,
    pub source_url: String,
}

/// Runs discovery and crawling for one request.
///
/// An unknown site key degrades to the configured default (logged, not an
/// error); a missing custom URL when the `custom` site is selected is a hard
/// rejection. A disabled profile, or a live yield below
/// [`MIN_VIABLE_CORPUS`], is topped up with deterministic sample records,
/// never replacing anything that was actually extracted.
///
/// # Errors
///
/// - [`ScraperError::MissingCustomUrl`] — `custom` site without a URL.
/// - [`ScraperError::UnknownSite`] — the default site itself is not
///   configured.
pub async fn run_scrape(
    client: &PageClient,
    sites: &SitesFile,
    default_site: &str,
    delay_ms: u64,
    request: &ScrapeRequest,
) -> Result<ScrapeOutcome, ScraperError> {
    let requested = request.site_key.as_deref().unwrap_or(default_site);
    let site_key = if sites.find(requested).is_some() {
        requested
    } else {
        tracing::warn!(site = %requested, default = %default_site, "unknown site key, using default");
        default_site
    };
    let profile = sites
        .find(site_key)
        .ok_or_else(|| ScraperError::UnknownSite {
            key: site_key.to_owned(),
        })?;

    let is_custom = site_key == "custom";
    let base_url = if is_custom {
        let custom = request
            .custom_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or(ScraperError::MissingCustomUrl)?;
        if custom.ends_with('/') {
            custom.to_string()
        } else {
            format!("{custom}/")
        }
    } else {
        profile.base_url.clone()
    };

    if !profile.enabled {
        tracing::warn!(site = %site_key, "site is disabled, using sample data");
        return Ok(ScrapeOutcome {
            products: generate_sample_products(request.max_products),
            site_key: site_key.to_owned(),
            source_url: base_url,
        });
    }

    tracing::info!(site = %profile.name, url = %base_url, "scraping site");

    let custom_override = if is_custom {
        request.custom_url.as_deref()
    } else {
        None
    };
    let category_urls =
        discover_category_urls(client, profile, &base_url, custom_override).await;
    tracing::info!(count = category_urls.len(), "categories discovered");

    let mut products = crawl_listings(
        client,
        &category_urls,
        profile,
        &base_url,
        request.max_products,
        delay_ms,
    )
    .await;

    if products.len() < MIN_VIABLE_CORPUS {
        let shortfall = MIN_VIABLE_CORPUS - products.len();
        tracing::info!(
            live = products.len(),
            shortfall,
            "live extraction below corpus floor, topping up with samples"
        );
        products.extend(generate_sample_products(shortfall));
    }

    products.truncate(request.max_products);

    tracing::info!(total = products.len(), "scrape complete");

    Ok(ScrapeOutcome {
        products,
        site_key: site_key.to_owned(),
        source_url: base_url,
    })
}
