//! The `scrape` command: run the full pipeline and persist staged
//! artifacts.
//!
//! Three JSON files are written per run (`products_raw.json`,
//! `products_cleaned.json`, `products_final.json`), each stage a field
//! superset of the previous one, pretty-printed UTF-8 arrays.

use std::fs;
use std::path::Path;

use anyhow::Context;

use prodcat_core::{AppConfig, BrandVocabulary, SitesFile};
use prodcat_normalize::{apply_brands, clean_products, validate_products, QualityReport};
use prodcat_scraper::{run_scrape, PageClient, ScrapeRequest};

pub async fn run(
    config: &AppConfig,
    site: Option<String>,
    url: Option<String>,
    max_products: usize,
) -> anyhow::Result<()> {
    let sites = if config.sites_path.exists() {
        prodcat_core::load_sites(&config.sites_path)?
    } else {
        tracing::info!(path = %config.sites_path.display(), "sites file not found, using built-in catalog");
        SitesFile::builtin()
    };

    let brands = if config.brands_path.exists() {
        prodcat_core::load_brand_vocabulary(&config.brands_path)?
    } else {
        tracing::info!(path = %config.brands_path.display(), "brands file not found, using built-in vocabulary");
        BrandVocabulary::builtin()
    };

    let client = PageClient::new(
        config.scraper_request_timeout_secs,
        &config.scraper_user_agent,
    )?;

    let outcome = run_scrape(
        &client,
        &sites,
        &config.default_site,
        config.scraper_inter_request_delay_ms,
        &ScrapeRequest {
            site_key: site,
            custom_url: url,
            max_products,
        },
    )
    .await
    .context("scrape failed")?;

    let cleaned = clean_products(&outcome.products);
    let final_products = apply_brands(&brands, cleaned.clone());
    let report = validate_products(&final_products);

    fs::create_dir_all(&config.data_dir).with_context(|| {
        format!("failed to create data dir {}", config.data_dir.display())
    })?;
    write_pretty_json(&config.data_dir.join("products_raw.json"), &outcome.products)?;
    write_pretty_json(&config.data_dir.join("products_cleaned.json"), &cleaned)?;
    write_pretty_json(&config.data_dir.join("products_final.json"), &final_products)?;

    tracing::info!(
        site = %outcome.site_key,
        source_url = %outcome.source_url,
        count = final_products.len(),
        "pipeline complete, artifacts written"
    );

    print_quality_report(&report);

    Ok(())
}

fn write_pretty_json<T: serde::Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn print_quality_report(report: &QualityReport) {
    println!();
    println!("{:=<60}", "");
    println!("Data Quality Report");
    println!("{:=<60}", "");
    println!("Total Products: {}", report.total_products);
    println!(
        "Valid Products: {} ({:.1}%)",
        report.valid_products, report.validity_percentage
    );
    println!("Invalid Products: {}", report.invalid_products);
    println!("Average Completeness: {}%", report.average_completeness);
    println!("Total Issues: {}", report.total_issues);
    println!("Total Warnings: {}", report.total_warnings);
    println!();
    println!("Brand Detection:");
    println!("  Known Brands: {:.1}%", report.known_brand_percentage);
    println!("  Unknown Brands: {}", report.unknown_brand_count);
    println!();
    println!("Top Brands:");
    let mut brands: Vec<_> = report.brand_distribution.iter().collect();
    brands.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (brand, count) in brands.into_iter().take(10) {
        println!("  {brand}: {count}");
    }
    println!("{:=<60}", "");
}
