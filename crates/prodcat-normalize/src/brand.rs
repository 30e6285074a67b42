//! Brand detection over an ordered vocabulary.
//!
//! Detection is case-insensitive substring containment: the first vocabulary
//! entry whose lowercase form appears in the lowercase name wins, so the
//! vocabulary's declared order is the tie-break for overlapping aliases.

use prodcat_core::{BrandVocabulary, CanonicalProduct, UNKNOWN_BRAND};

/// Detects the brand for a product name.
///
/// Total over all inputs: an empty name, or one matching no vocabulary
/// entry, yields [`UNKNOWN_BRAND`]. The returned spelling is the vocabulary
/// entry's own casing, not the name's.
#[must_use]
pub fn detect_brand(vocabulary: &BrandVocabulary, name: &str) -> String {
    if name.is_empty() {
        return UNKNOWN_BRAND.to_string();
    }

    let name_lower = name.to_lowercase();
    for brand in &vocabulary.brands {
        if name_lower.contains(&brand.to_lowercase()) {
            return brand.clone();
        }
    }

    UNKNOWN_BRAND.to_string()
}

/// Resolves brands across a corpus, returning new records.
///
/// Detection runs on the cleaned name, falling back to the original name
/// when cleaning emptied it. Input order is preserved.
#[must_use]
pub fn apply_brands(
    vocabulary: &BrandVocabulary,
    products: Vec<CanonicalProduct>,
) -> Vec<CanonicalProduct> {
    products
        .into_iter()
        .map(|product| {
            let lookup_name = if product.name.is_empty() {
                &product.original_name
            } else {
                &product.name
            };
            let brand = detect_brand(vocabulary, lookup_name);
            CanonicalProduct { brand, ..product }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> BrandVocabulary {
        BrandVocabulary::builtin()
    }

    #[test]
    fn detects_brand_case_insensitively() {
        assert_eq!(detect_brand(&vocab(), "COCA COLA original taste"), "Coca Cola");
        assert_eq!(detect_brand(&vocab(), "red bull energy"), "Red Bull");
    }

    #[test]
    fn empty_name_is_unknown() {
        assert_eq!(detect_brand(&vocab(), ""), UNKNOWN_BRAND);
    }

    #[test]
    fn unmatched_name_is_unknown() {
        assert_eq!(detect_brand(&vocab(), "Own Brand Cola 330ml"), UNKNOWN_BRAND);
    }

    #[test]
    fn first_vocabulary_entry_wins_for_overlapping_aliases() {
        // "Coca-Cola" precedes "Coca Cola" and "Coke"; a name containing the
        // hyphenated spelling must resolve to it.
        assert_eq!(detect_brand(&vocab(), "Coca-Cola Classic"), "Coca-Cola");
        // A name with only the spaced spelling skips the hyphenated entry.
        assert_eq!(detect_brand(&vocab(), "Coca Cola Classic"), "Coca Cola");
        assert_eq!(detect_brand(&vocab(), "Diet Coke 330ml"), "Coke");
    }

    #[test]
    fn returns_vocabulary_spelling_not_input_spelling() {
        assert_eq!(detect_brand(&vocab(), "LUCOZADE sport"), "Lucozade");
    }

    #[test]
    fn custom_vocabulary_order_is_honored() {
        let custom = BrandVocabulary {
            brands: vec!["Monster Energy".to_string(), "Monster".to_string()],
        };
        assert_eq!(
            detect_brand(&custom, "monster energy ultra"),
            "Monster Energy"
        );
        assert_eq!(detect_brand(&custom, "monster ripper"), "Monster");
    }

    #[test]
    fn apply_brands_fills_brand_and_preserves_order() {
        let products = vec![
            canonical("Pepsi Max", "Pepsi Max 500ml"),
            canonical("Mystery Drink", "Mystery Drink"),
        ];
        let branded = apply_brands(&vocab(), products);
        assert_eq!(branded.len(), 2);
        assert_eq!(branded[0].brand, "Pepsi");
        assert_eq!(branded[1].brand, UNKNOWN_BRAND);
    }

    #[test]
    fn apply_brands_falls_back_to_original_name() {
        let mut product = canonical("", "Fanta Orange Can");
        product.name = String::new();
        let branded = apply_brands(&vocab(), vec![product]);
        assert_eq!(branded[0].brand, "Fanta");
    }

    fn canonical(name: &str, original: &str) -> CanonicalProduct {
        CanonicalProduct {
            original_name: original.to_string(),
            name: name.to_string(),
            price: String::new(),
            volume_weight: String::new(),
            multipack: String::new(),
            slug: String::new(),
            image_url: String::new(),
            brand: UNKNOWN_BRAND.to_string(),
        }
    }
}
