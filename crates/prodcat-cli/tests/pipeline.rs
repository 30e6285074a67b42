//! End-to-end pipeline tests over deterministic sample data. No network,
//! no filesystem.

use prodcat_core::{BrandVocabulary, UNKNOWN_BRAND};
use prodcat_normalize::{apply_brands, clean_products, validate_products};
use prodcat_scraper::generate_sample_products;

#[test]
fn sample_corpus_normalizes_into_complete_branded_records() {
    let raw = generate_sample_products(10);
    let vocabulary = BrandVocabulary::builtin();

    let cleaned = clean_products(&raw);
    let products = apply_brands(&vocabulary, cleaned);

    assert_eq!(products.len(), 10);
    for product in &products {
        assert!(!product.name.is_empty(), "cleaned name must survive");
        assert!(!product.price.is_empty(), "sample prices must survive");
        assert!(
            !product.volume_weight.is_empty(),
            "sample sizes must survive"
        );
        // The sample catalog only contains known-brand names.
        assert_ne!(product.brand, UNKNOWN_BRAND, "brand for {}", product.name);
        assert!(
            vocabulary.brands.contains(&product.brand),
            "brand {} must come from the vocabulary",
            product.brand
        );
        assert!(!product.slug.is_empty());
    }
}

#[test]
fn sample_corpus_quality_report_is_fully_valid() {
    let raw = generate_sample_products(25);
    let vocabulary = BrandVocabulary::builtin();
    let products = apply_brands(&vocabulary, clean_products(&raw));

    let report = validate_products(&products);
    assert_eq!(report.total_products, 25);
    assert_eq!(report.valid_products, 25);
    assert_eq!(report.invalid_products, 0);
    assert_eq!(report.total_issues, 0);
    assert_eq!(report.unknown_brand_count, 0);
    assert!((report.known_brand_percentage - 100.0).abs() < f64::EPSILON);
    // Sample records carry no image URL, so completeness sits below 100%.
    assert!(report.average_completeness < 100.0);
    assert!(report.average_completeness > 80.0);
}

#[test]
fn slug_and_original_name_invariants_hold_across_the_corpus() {
    let raw = generate_sample_products(30);
    let vocabulary = BrandVocabulary::builtin();
    let products = apply_brands(&vocabulary, clean_products(&raw));

    for (raw, product) in raw.iter().zip(&products) {
        assert_eq!(product.original_name, raw.name);
        assert_eq!(product.slug, prodcat_normalize::generate_slug(&product.name));
    }
}
