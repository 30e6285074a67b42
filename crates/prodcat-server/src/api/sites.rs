use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct SiteItem {
    key: String,
    name: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
pub(super) struct SitesData {
    sites: Vec<SiteItem>,
}

/// Lists the configured, enabled site profiles in declared order.
pub(super) async fn list_sites(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<SitesData>> {
    let sites = state
        .sites
        .enabled()
        .map(|site| SiteItem {
            key: site.key.clone(),
            name: site.name.clone(),
            base_url: site.base_url.clone(),
        })
        .collect();

    Json(ApiResponse {
        data: SitesData { sites },
        meta: ResponseMeta::new(req_id.0),
    })
}
