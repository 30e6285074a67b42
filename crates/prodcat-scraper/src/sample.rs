//! Deterministic sample records for topping up a short corpus.

use prodcat_core::RawProduct;

/// Fixed catalog the generator cycles through. All names carry a known
/// brand so generated corpora always brand-detect cleanly.
const SAMPLE_CATALOG: [(&str, &str, &str); 10] = [
    ("Coca Cola Original Taste 330ml Can", "£0.75", "330ml"),
    ("Pepsi Max 500ml Bottle", "£1.00", "500ml"),
    ("Red Bull Energy Drink 250ml Can", "£1.25", "250ml"),
    ("Lucozade Energy Original 500ml", "£1.10", "500ml"),
    ("Fanta Orange 330ml Can", "£0.70", "330ml"),
    ("Sprite Lemon Lime 330ml Can", "£0.70", "330ml"),
    ("7UP Lemon Lime 330ml Can", "£0.70", "330ml"),
    ("Tango Orange 330ml Can", "£0.65", "330ml"),
    ("Dr Pepper 330ml Can", "£0.75", "330ml"),
    ("Monster Energy 500ml Can", "£1.50", "500ml"),
];

/// Generates exactly `count` schema-correct sample records.
///
/// Deterministic: cycles the catalog and suffixes a 1-based positional
/// counter (`#1`, `#2`, …) so repeated entries stay distinguishable.
#[must_use]
pub fn generate_sample_products(count: usize) -> Vec<RawProduct> {
    (0..count)
        .map(|i| {
            let (name, price, volume_weight) = SAMPLE_CATALOG[i % SAMPLE_CATALOG.len()];
            RawProduct {
                name: format!("{name} #{}", i + 1),
                price: price.to_string(),
                volume_weight: volume_weight.to_string(),
                image_url: String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_exact_count() {
        assert_eq!(generate_sample_products(0).len(), 0);
        assert_eq!(generate_sample_products(7).len(), 7);
        assert_eq!(generate_sample_products(50).len(), 50);
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(generate_sample_products(25), generate_sample_products(25));
    }

    #[test]
    fn cycles_catalog_with_positional_suffix() {
        let products = generate_sample_products(12);
        assert_eq!(products[0].name, "Coca Cola Original Taste 330ml Can #1");
        assert_eq!(products[10].name, "Coca Cola Original Taste 330ml Can #11");
        assert_eq!(products[11].name, "Pepsi Max 500ml Bottle #12");
    }

    #[test]
    fn suffix_keeps_entries_distinguishable() {
        let products = generate_sample_products(30);
        let mut names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 30);
    }

    #[test]
    fn every_record_is_schema_complete_except_image() {
        for product in generate_sample_products(20) {
            assert!(!product.name.is_empty());
            assert!(!product.price.is_empty());
            assert!(!product.volume_weight.is_empty());
            assert!(product.image_url.is_empty());
        }
    }
}
