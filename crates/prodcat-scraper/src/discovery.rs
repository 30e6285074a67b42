//! Category discovery: turning a site's entry page into a short, ordered
//! list of listing locations worth crawling.

use scraper::{Html, Selector};

use prodcat_core::SiteProfile;

use crate::client::PageClient;
use crate::urls::{resolve_url, same_origin};

/// Link text fragments that mark an anchor as category-like.
const CATEGORY_KEYWORDS: [&str; 18] = [
    "drinks",
    "beverages",
    "food",
    "snacks",
    "confectionery",
    "category",
    "products",
    "shop",
    "catalog",
    "men",
    "women",
    "tshirts",
    "shirts",
    "clothing",
    "fashion",
    "apparel",
    "items",
    "collection",
];

/// At most this many candidate locations are handed to the crawler.
const MAX_CATEGORY_URLS: usize = 3;

/// Discovers candidate listing locations for a site.
///
/// A supplied `custom_url` differing from the base location short-circuits
/// every heuristic: explicit caller intent wins. Otherwise the entry page
/// is scanned for category-keyword links sharing the base location's origin,
/// the profile's configured path hints are appended, and the deduplicated
/// list is truncated to three. Discovery never fails: an unreachable entry
/// page degrades to a single-element fallback.
pub async fn discover_category_urls(
    client: &PageClient,
    profile: &SiteProfile,
    base_url: &str,
    custom_url: Option<&str>,
) -> Vec<String> {
    if let Some(custom) = custom_url {
        if custom != base_url {
            tracing::info!(url = %custom, "using provided URL directly");
            return vec![custom.to_string()];
        }
    }

    let html = match client.fetch_page(base_url).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(url = %base_url, error = %e, "entry page fetch failed, falling back");
            return vec![custom_url.unwrap_or(base_url).to_string()];
        }
    };

    let mut candidates = scan_category_links(&html, base_url);

    for path in &profile.category_paths {
        if let Some(resolved) = resolve_url(base_url, path) {
            if !candidates.contains(&resolved) {
                candidates.push(resolved);
            }
        }
    }

    if candidates.is_empty() {
        tracing::info!(url = %base_url, "no categories found, scraping base location");
        return vec![base_url.to_string()];
    }

    candidates.truncate(MAX_CATEGORY_URLS);
    candidates
}

/// Same-origin links whose visible text contains a category keyword,
/// deduplicated in first-seen order.
fn scan_category_links(html: &str, base_url: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let anchor_selector = Selector::parse("a[href]").expect("valid anchor selector");

    let mut links = Vec::new();
    for anchor in doc.select(&anchor_selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        let text = anchor
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        if !CATEGORY_KEYWORDS.iter().any(|k| text.contains(k)) {
            continue;
        }

        let Some(resolved) = resolve_url(base_url, href) else {
            continue;
        };

        if same_origin(base_url, &resolved) && !links.contains(&resolved) {
            links.push(resolved);
        }
    }

    links
}
