//! Per-record validation and corpus-level quality reporting.
//!
//! Validation never fails: missing required fields become issues, soft
//! quality problems become warnings, and both travel alongside the records
//! as plain data.

use std::collections::HashMap;

use regex::Regex;
use serde::Serialize;

use prodcat_core::{CanonicalProduct, UNKNOWN_BRAND};

/// Fields that count toward the completeness score.
const TRACKED_FIELDS: usize = 6;

/// Validation outcome for a single product.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// True when every required field (name, price, volume_weight) is
    /// non-empty.
    pub valid: bool,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    /// Fraction in [0, 1] of the six tracked fields that are present.
    pub completeness_score: f64,
}

/// Aggregate quality metrics over a corpus, recomputed wholesale per run.
#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    pub total_products: usize,
    pub valid_products: usize,
    pub invalid_products: usize,
    pub validity_percentage: f64,
    /// Mean completeness as a percentage, rounded to two decimal places.
    pub average_completeness: f64,
    pub total_issues: usize,
    pub total_warnings: usize,
    pub brand_distribution: HashMap<String, usize>,
    pub known_brand_percentage: f64,
    pub unknown_brand_count: usize,
    pub validation_results: Vec<ValidationResult>,
}

/// Validates a single canonical product.
#[must_use]
pub fn validate_product(product: &CanonicalProduct) -> ValidationResult {
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    let required: [(&str, &str); 3] = [
        ("name", &product.name),
        ("price", &product.price),
        ("volume_weight", &product.volume_weight),
    ];
    for (field, value) in required {
        if value.is_empty() {
            issues.push(format!("Missing required field: {field}"));
        }
    }

    if !product.name.is_empty() {
        let len = product.name.chars().count();
        if len < 3 {
            warnings.push("Product name is very short".to_string());
        }
        if len > 200 {
            warnings.push("Product name is very long".to_string());
        }
    }

    if !product.price.is_empty() {
        let price_shape = Regex::new(r"[£$€]\s*\d+").expect("valid price shape regex");
        if !price_shape.is_match(&product.price) {
            warnings.push("Price format may be incorrect".to_string());
        }
    }

    if !product.volume_weight.is_empty() {
        let volume_shape =
            Regex::new(r"(?i)\d+\s*(ml|g|l|kg)").expect("valid volume shape regex");
        if !volume_shape.is_match(&product.volume_weight) {
            warnings.push("Volume/weight format may be incorrect".to_string());
        }
    }

    if product.brand == UNKNOWN_BRAND {
        warnings.push("Brand not detected".to_string());
    }

    ValidationResult {
        valid: issues.is_empty(),
        issues,
        warnings,
        completeness_score: completeness(product),
    }
}

/// Fraction of tracked fields present on the record.
///
/// The `Unknown` brand sentinel counts as present: completeness measures
/// populated fields, not detection quality (that is the brand warning's job).
fn completeness(product: &CanonicalProduct) -> f64 {
    let fields = [
        &product.name,
        &product.price,
        &product.volume_weight,
        &product.image_url,
        &product.brand,
        &product.slug,
    ];
    #[allow(clippy::cast_precision_loss)]
    let present = fields.iter().filter(|f| !f.is_empty()).count() as f64;
    present / TRACKED_FIELDS as f64
}

/// Validates a corpus and derives the aggregate quality report.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn validate_products(products: &[CanonicalProduct]) -> QualityReport {
    let validation_results: Vec<ValidationResult> =
        products.iter().map(validate_product).collect();

    let total = products.len();
    let valid_count = validation_results.iter().filter(|r| r.valid).count();
    let invalid_count = total - valid_count;

    let avg_completeness = if total > 0 {
        validation_results
            .iter()
            .map(|r| r.completeness_score)
            .sum::<f64>()
            / total as f64
    } else {
        0.0
    };

    let total_issues = validation_results.iter().map(|r| r.issues.len()).sum();
    let total_warnings = validation_results.iter().map(|r| r.warnings.len()).sum();

    let mut brand_distribution: HashMap<String, usize> = HashMap::new();
    for product in products {
        *brand_distribution.entry(product.brand.clone()).or_insert(0) += 1;
    }

    let unknown_brand_count = brand_distribution
        .get(UNKNOWN_BRAND)
        .copied()
        .unwrap_or(0);
    let known_brand_percentage = if total > 0 {
        (total - unknown_brand_count) as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    QualityReport {
        total_products: total,
        valid_products: valid_count,
        invalid_products: invalid_count,
        validity_percentage: if total > 0 {
            valid_count as f64 / total as f64 * 100.0
        } else {
            0.0
        },
        average_completeness: round2(avg_completeness * 100.0),
        total_issues,
        total_warnings,
        brand_distribution,
        known_brand_percentage: round2(known_brand_percentage),
        unknown_brand_count,
        validation_results,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
