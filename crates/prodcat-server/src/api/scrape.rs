use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use prodcat_core::CanonicalProduct;
use prodcat_normalize::{apply_brands, clean_products};
use prodcat_scraper::{run_scrape, ScraperError, ScrapeRequest};

use crate::middleware::RequestId;

use super::{normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ScrapeBody {
    pub site: Option<String>,
    pub url: Option<String>,
    pub max_products: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(super) struct ScrapeData {
    products: Vec<CanonicalProduct>,
    count: usize,
    site: String,
    source_url: String,
}

/// Runs the full pipeline (discovery, crawl, normalization, brand
/// detection) for one site.
pub(super) async fn scrape_site(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ScrapeBody>,
) -> Result<Json<ApiResponse<ScrapeData>>, ApiError> {
    let request = ScrapeRequest {
        site_key: body.site,
        custom_url: body.url,
        max_products: normalize_limit(body.max_products),
    };

    let outcome = run_scrape(
        &state.client,
        &state.sites,
        &state.config.default_site,
        state.config.scraper_inter_request_delay_ms,
        &request,
    )
    .await
    .map_err(|e| map_scrape_error(req_id.0.clone(), &e))?;

    let cleaned = clean_products(&outcome.products);
    let products = apply_brands(&state.brands, cleaned);
    let count = products.len();

    Ok(Json(ApiResponse {
        data: ScrapeData {
            products,
            count,
            site: outcome.site_key,
            source_url: outcome.source_url,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn map_scrape_error(request_id: String, error: &ScraperError) -> ApiError {
    match error {
        ScraperError::MissingCustomUrl => ApiError::new(
            request_id,
            "validation_error",
            "url is required when site is \"custom\"",
        ),
        other => {
            tracing::error!(error = %other, "scrape failed");
            ApiError::new(request_id, "internal_error", "scrape failed")
        }
    }
}
