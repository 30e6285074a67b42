use serde::{Deserialize, Serialize};

/// Sentinel brand value for products whose name matches no vocabulary entry.
pub const UNKNOWN_BRAND: &str = "Unknown";

/// A product as lifted straight off a listing page (or synthesized by the
/// sample generator), before any cleaning.
///
/// Every field is a raw string; extraction tolerates missing fields by
/// leaving them empty, except `name`: records without a name are discarded
/// at extraction time because they carry no identifying value downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProduct {
    pub name: String,
    /// Price text exactly as displayed, e.g. `"PMP £1.25"`. May be empty.
    pub price: String,
    /// Size text exactly as displayed, e.g. `"330 ml"`. May be empty.
    pub volume_weight: String,
    /// Absolute image URL, or empty when no image was found.
    pub image_url: String,
}

/// A product after normalization, brand detection, and slug derivation;
/// the durable unit handed to validation and serialization.
///
/// Each pipeline stage produces a new value rather than mutating in place:
/// normalization constructs this with `brand` set to [`UNKNOWN_BRAND`], and
/// the brand stage returns a copy with `brand` resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalProduct {
    /// Verbatim input name, preserved for audit. Never mutated after capture.
    pub original_name: String,
    /// Cleaned name: title-cased, packaging descriptors stripped, whitespace
    /// collapsed.
    pub name: String,
    /// Isolated price value with currency symbol, e.g. `"£1.25"`, or empty.
    pub price: String,
    /// Size with standardized unit suffix, e.g. `"330ml"`.
    pub volume_weight: String,
    /// Detected pack descriptor, e.g. `"6x250ml"`, or empty.
    pub multipack: String,
    /// URL-safe identifier derived from the cleaned name.
    pub slug: String,
    pub image_url: String,
    /// A brand vocabulary spelling, or [`UNKNOWN_BRAND`].
    pub brand: String,
}
