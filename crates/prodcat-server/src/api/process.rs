use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use prodcat_core::RawProduct;
use prodcat_normalize::{apply_brands, clean_products};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ProcessBody {
    #[serde(default)]
    pub product_names: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct ProcessedItem {
    original_name: String,
    cleaned_name: String,
    detected_brand: String,
    price: String,
    volume_weight: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ProcessData {
    products: Vec<ProcessedItem>,
    count: usize,
}

/// Runs only the normalization and brand stages over caller-supplied names,
/// bypassing discovery and extraction entirely.
pub(super) async fn process_names(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ProcessBody>,
) -> Result<Json<ApiResponse<ProcessData>>, ApiError> {
    if body.product_names.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "product_names array is required",
        ));
    }

    let raw: Vec<RawProduct> = body
        .product_names
        .into_iter()
        .map(|name| RawProduct {
            name,
            price: String::new(),
            volume_weight: String::new(),
            image_url: String::new(),
        })
        .collect();

    let cleaned = clean_products(&raw);
    let branded = apply_brands(&state.brands, cleaned);

    let products: Vec<ProcessedItem> = branded
        .into_iter()
        .map(|p| ProcessedItem {
            original_name: p.original_name,
            cleaned_name: p.name,
            detected_brand: p.brand,
            price: p.price,
            volume_weight: p.volume_weight,
        })
        .collect();
    let count = products.len();

    Ok(Json(ApiResponse {
        data: ProcessData { products, count },
        meta: ResponseMeta::new(req_id.0),
    }))
}
