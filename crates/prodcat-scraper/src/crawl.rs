//! Bounded listing crawl over discovered category locations.
//!
//! Strictly sequential: each fetch completes before the next begins, with a
//! politeness delay between successive page fetches. The crawl is greedy and
//! never backtracks: once a location plateaus (a page adds zero new
//! records) it is abandoned, even if later pages might have content.

use std::time::Duration;

use prodcat_core::{RawProduct, SiteProfile};

use crate::client::PageClient;
use crate::extract::extract_products_from_page;

/// The location itself plus `?page=2`..`?page=10`.
const MAX_PAGES_PER_LOCATION: usize = 10;

/// Crawls the candidate locations in order, stopping at `limit` records.
///
/// Failed page fetches are absorbed as empty pages (which also plateaus the
/// location), so one bad page never aborts the crawl. If every location is
/// exhausted below `limit`, one final extraction pass runs against the base
/// location itself.
pub async fn crawl_listings(
    client: &PageClient,
    category_urls: &[String],
    profile: &SiteProfile,
    base_url: &str,
    limit: usize,
    delay_ms: u64,
) -> Vec<RawProduct> {
    let mut products: Vec<RawProduct> = Vec::new();
    if limit == 0 {
        return products;
    }

    let mut fetched_any = false;

    for location in category_urls {
        if products.len() >= limit {
            break;
        }
        tracing::info!(url = %location, "crawling category");

        for page in 1..=MAX_PAGES_PER_LOCATION {
            if products.len() >= limit {
                break;
            }

            let page_url = if page == 1 {
                location.clone()
            } else {
                paginated_url(location, page)
            };

            let before = products.len();
            let extracted =
                fetch_and_extract(client, &page_url, profile, base_url, limit, &mut fetched_any, delay_ms)
                    .await;
            append_new(&mut products, extracted);

            // Plateau: a page with nothing new means this location is done.
            if products.len() == before {
                break;
            }
        }
    }

    if products.len() < limit {
        tracing::info!(url = %base_url, "below limit after categories, scraping base location");
        let extracted =
            fetch_and_extract(client, base_url, profile, base_url, limit, &mut fetched_any, delay_ms)
                .await;
        append_new(&mut products, extracted);
    }

    products.truncate(limit);
    products
}

/// One politeness-delayed fetch plus extraction; a failed fetch yields an
/// empty page.
async fn fetch_and_extract(
    client: &PageClient,
    page_url: &str,
    profile: &SiteProfile,
    base_url: &str,
    limit: usize,
    fetched_any: &mut bool,
    delay_ms: u64,
) -> Vec<RawProduct> {
    if *fetched_any && delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
    *fetched_any = true;

    let html = match client.fetch_page(page_url).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(url = %page_url, error = %e, "page fetch failed, treating as empty");
            return Vec::new();
        }
    };

    extract_products_from_page(
        client,
        &html,
        page_url,
        base_url,
        &profile.product_selectors,
        limit,
    )
    .await
}

/// Records already collected are not re-counted; only genuinely new entries
/// extend the sequence, which is what the plateau check observes.
fn append_new(products: &mut Vec<RawProduct>, extracted: Vec<RawProduct>) {
    for product in extracted {
        if !products.contains(&product) {
            products.push(product);
        }
    }
}

/// Appends the page parameter, honoring an existing query string.
fn paginated_url(location: &str, page: usize) -> String {
    if location.contains('?') {
        format!("{location}&page={page}")
    } else {
        format!("{location}?page={page}")
    }
}
