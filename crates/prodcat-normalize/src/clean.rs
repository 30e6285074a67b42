//! Field-level normalization: name casing and descriptor stripping, price
//! isolation, unit standardization, multipack detection, and slug
//! derivation.
//!
//! Every function here is pure; [`clean_products`] folds raw records into
//! canonical ones without touching its input. Steps are order-sensitive
//! where noted: descriptor stripping runs after casing, and multipack
//! detection runs on the original name because stripping could remove the
//! `Pack` token it needs.

use regex::Regex;

use prodcat_core::{CanonicalProduct, RawProduct, UNKNOWN_BRAND};

/// Packaging descriptor words removed from product names as whole words,
/// case-insensitively.
const DESCRIPTORS: [&str; 7] = ["Can", "Bottle", "Bar", "Pack", "Pk", "Pkt", "Packet"];

/// Cleans a product name: title-case, strip packaging descriptors, collapse
/// whitespace.
///
/// Descriptor stripping happens after casing so the mixed-case descriptor
/// list matches consistently regardless of input casing.
#[must_use]
pub fn clean_product_name(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    let mut cleaned = title_case(name);

    for descriptor in DESCRIPTORS {
        let pattern = format!(r"(?i)\b{descriptor}\b");
        let re = Regex::new(&pattern).expect("valid descriptor regex");
        cleaned = re.replace_all(&cleaned, "").into_owned();
    }

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Word-wise title casing: the first alphabetic character after a
/// non-alphabetic one is uppercased, every other alphabetic character is
/// lowercased (`"red BULL 250ml"` → `"Red Bull 250Ml"`).
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alphabetic = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alphabetic {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            out.push(c);
            prev_alphabetic = false;
        }
    }

    out
}

/// Isolates the price value from promotional price text.
///
/// Strips the `PMP`, `PM`, and `RRP` prefixes (case-insensitive, in that
/// priority order), then extracts the first currency-symbol-optional numeric
/// substring. A non-empty input with no numeric substring is returned
/// trimmed rather than silently dropped to empty.
#[must_use]
pub fn clean_price(price: &str) -> String {
    if price.is_empty() {
        return String::new();
    }

    let mut text = price.to_string();
    for prefix in ["PMP", "PM", "RRP"] {
        let re = Regex::new(&format!(r"(?i){prefix}\s*")).expect("valid price prefix regex");
        text = re.replace_all(&text, "").into_owned();
    }

    let re = Regex::new(r"[£$€]?\s*\d+\.?\d*").expect("valid price value regex");
    match re.find(&text) {
        Some(m) => m.as_str().trim().to_string(),
        None => text.trim().to_string(),
    }
}

/// Rewrites number+unit occurrences to a compact canonical suffix:
/// `"500 Grams"` → `"500g"`, `"1.5 Liters"` → `"1.5l"`.
///
/// Substitutions are applied over the whole string in a fixed order, so a
/// string can contain multiple standardized quantities. Standardizing an
/// already-standardized string returns it unchanged.
#[must_use]
pub fn standardize_units(volume_weight: &str) -> String {
    if volume_weight.is_empty() {
        return String::new();
    }

    let substitutions = [
        (r"(?i)(\d+(?:\.\d+)?)\s*(?:grams?|g)\b", "${1}g"),
        (r"(?i)(\d+(?:\.\d+)?)\s*(?:milliliters?|ml)\b", "${1}ml"),
        (r"(?i)(\d+(?:\.\d+)?)\s*(?:liters?|litres?|l)\b", "${1}l"),
        (r"(?i)(\d+(?:\.\d+)?)\s*(?:kilograms?|kg)\b", "${1}kg"),
    ];

    let mut text = volume_weight.trim().to_string();
    for (pattern, replacement) in substitutions {
        let re = Regex::new(pattern).expect("valid unit regex");
        text = re.replace_all(&text, replacement).into_owned();
    }

    text.trim().to_string()
}

/// Detects a multipack descriptor in the original (pre-cleaning) name.
///
/// Patterns are tried in order; the first match wins and is rendered
/// canonically: `"6 x 250 ml"` → `"6x250ml"`, `"4pk"` → `"4pk"`,
/// `"12 pack"` → `"12 Pack"`. Returns an empty string when nothing matches.
#[must_use]
pub fn detect_multipack(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    let with_size = Regex::new(r"(?i)(\d+)\s*x\s*(\d+\s*(?:ml|g|l|kg))")
        .expect("valid multipack size regex");
    if let Some(caps) = with_size.captures(name) {
        let size: String = caps[2].chars().filter(|c| !c.is_whitespace()).collect();
        return format!("{}x{}", &caps[1], size);
    }

    let bare = Regex::new(r"(?i)(\d+)\s*x").expect("valid bare multiplier regex");
    if let Some(caps) = bare.captures(name) {
        return format!("{}x", &caps[1]);
    }

    let pk = Regex::new(r"(?i)(\d+)\s*pk\b").expect("valid pk regex");
    if let Some(caps) = pk.captures(name) {
        return format!("{}pk", &caps[1]);
    }

    let pack = Regex::new(r"(?i)(\d+)\s*pack\b").expect("valid pack regex");
    if let Some(caps) = pack.captures(name) {
        return format!("{} Pack", &caps[1]);
    }

    String::new()
}

/// Derives a URL-safe slug from a cleaned name.
///
/// ASCII lowercase, hyphen-joined, non-alphanumeric characters stripped, no
/// leading, trailing, or duplicate hyphens. Applying the function to its own
/// output is a no-op.
#[must_use]
pub fn generate_slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else if c == ' ' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Folds one raw record into a canonical record.
///
/// The brand is left at the [`UNKNOWN_BRAND`] sentinel; brand detection is a
/// separate stage (see [`crate::brand::apply_brands`]).
#[must_use]
pub fn clean_product(raw: &RawProduct) -> CanonicalProduct {
    let name = clean_product_name(&raw.name);
    let slug = generate_slug(&name);

    CanonicalProduct {
        original_name: raw.name.clone(),
        multipack: detect_multipack(&raw.name),
        name,
        price: clean_price(&raw.price),
        volume_weight: standardize_units(&raw.volume_weight),
        slug,
        image_url: raw.image_url.clone(),
        brand: UNKNOWN_BRAND.to_string(),
    }
}

/// Cleans a sequence of raw records, preserving input order.
#[must_use]
pub fn clean_products(products: &[RawProduct]) -> Vec<CanonicalProduct> {
    products.iter().map(clean_product).collect()
}
