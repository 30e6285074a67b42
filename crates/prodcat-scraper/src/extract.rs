//! Product extraction from listing-page markup.
//!
//! Container selectors from the site profile are tried in declared order;
//! the first one matching at least one element wins, and fields are pulled
//! from each container independently. A field that cannot be extracted
//! becomes an empty string rather than dropping the record, except the
//! name, which is the record's identity.
//!
//! When no selector matches anything, a generic fallback scans same-origin
//! links that look like product pages and runs a reduced single-product
//! heuristic against each linked page.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use prodcat_core::{ContainerSelector, RawProduct};

use crate::client::PageClient;
use crate::urls::{resolve_url, same_origin};

/// Name candidates tried in order inside a container.
const NAME_SELECTORS: [&str; 8] = [
    "h1",
    "h2",
    "h3",
    "h4",
    ".product-name",
    ".title",
    r#"[class*="name"]"#,
    r#"[class*="title"]"#,
];

/// Price candidates tried in order inside a container.
const PRICE_SELECTORS: [&str; 4] = [
    ".price",
    r#"[class*="price"]"#,
    r#"[class*="cost"]"#,
    r#"span[class*="price"]"#,
];

/// Href fragments that mark a link as product-like for the fallback scan.
const PRODUCT_HREF_KEYWORDS: [&str; 3] = ["product", "item", "p-"];

/// Container text longer than this is treated as more than a name and
/// truncated to its first line.
const MAX_NAME_LEN: usize = 100;

/// Extracts products from one page's markup using the profile's container
/// selectors, falling back to the product-link heuristic when no selector
/// matches. The fallback fetches linked pages through `client` and is capped
/// at `cap` records to bound the extra fetches.
pub async fn extract_products_from_page(
    client: &PageClient,
    html: &str,
    page_url: &str,
    base_url: &str,
    selectors: &[ContainerSelector],
    cap: usize,
) -> Vec<RawProduct> {
    let products = extract_from_containers(html, selectors, page_url);
    if !products.is_empty() {
        return products;
    }

    // No container matched anything; chase product-looking links instead.
    let links = product_link_candidates(html, base_url);
    let mut out = Vec::new();
    for link in links {
        if out.len() >= cap {
            break;
        }
        let page = match client.fetch_page(&link).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(url = %link, error = %e, "failed to fetch product link, skipping");
                continue;
            }
        };
        if let Some(product) = extract_single_product(&page, &link) {
            out.push(product);
        }
    }
    out
}

/// Runs the container-selector pass alone (no network).
///
/// Selectors are tried in declared priority order; the first one matching at
/// least one container wins, and later selectors are never merged in.
/// With overlapping selectors, merging would extract the same product twice.
#[must_use]
pub fn extract_from_containers(
    html: &str,
    selectors: &[ContainerSelector],
    page_url: &str,
) -> Vec<RawProduct> {
    let doc = Html::parse_document(html);

    for selector in selectors {
        let containers = find_containers(&doc, selector);
        if containers.is_empty() {
            continue;
        }
        return containers
            .into_iter()
            .filter_map(|el| extract_container(el, page_url))
            .collect();
    }

    Vec::new()
}

/// Elements of the selector's tag whose `class` attribute matches its
/// pattern, case-insensitively. An unparseable tag or pattern yields no
/// containers (the next candidate is tried) rather than an error.
fn find_containers<'a>(doc: &'a Html, selector: &ContainerSelector) -> Vec<ElementRef<'a>> {
    let Ok(tag_selector) = Selector::parse(&selector.tag) else {
        tracing::warn!(tag = %selector.tag, "unparseable selector tag, skipping");
        return Vec::new();
    };
    let Ok(class_re) = Regex::new(&format!("(?i){}", selector.class_pattern)) else {
        tracing::warn!(pattern = %selector.class_pattern, "unparseable class pattern, skipping");
        return Vec::new();
    };

    doc.select(&tag_selector)
        .filter(|el| {
            el.value()
                .attr("class")
                .is_some_and(|class| class_re.is_match(class))
        })
        .collect()
}

/// Extracts one record from a container element. Returns `None` when no name
/// could be found, since a record without a name carries no identifying value.
fn extract_container(el: ElementRef<'_>, page_url: &str) -> Option<RawProduct> {
    let name = extract_name(el);
    if name.is_empty() {
        return None;
    }

    Some(RawProduct {
        name,
        price: extract_price(el),
        volume_weight: extract_volume(&element_text(el)),
        image_url: extract_image(el, page_url),
    })
}

fn extract_name(el: ElementRef<'_>) -> String {
    for candidate in NAME_SELECTORS {
        let Ok(selector) = Selector::parse(candidate) else {
            continue;
        };
        if let Some(found) = el.select(&selector).next() {
            let text = element_text(found);
            if !text.is_empty() {
                return text;
            }
        }
    }

    // Nothing name-shaped inside; fall back to the container's own text.
    let mut text = element_text(el);
    if text.chars().count() > MAX_NAME_LEN {
        text = text
            .split('\n')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
    }
    text
}

/// A candidate price is accepted only when its text contains a
/// currency-symbol-optional numeric pattern; otherwise the next selector is
/// tried. The full element text is kept (promo prefixes and all); isolating
/// the value is the normalization engine's job.
fn extract_price(el: ElementRef<'_>) -> String {
    let price_re = Regex::new(r"[£$€]?\s*\d+\.?\d*").expect("valid price regex");

    for candidate in PRICE_SELECTORS {
        let Ok(selector) = Selector::parse(candidate) else {
            continue;
        };
        if let Some(found) = el.select(&selector).next() {
            let text = element_text(found);
            if price_re.is_match(&text) {
                return text;
            }
        }
    }

    String::new()
}

/// First unit-pattern match in the container's raw text: compact units
/// first, spelled-out units as a looser second pass.
fn extract_volume(text: &str) -> String {
    let patterns = [
        r"(?i)\d+\s*(?:ml|g|kg|l|litre|liter)\b",
        r"(?i)\d+\s*(?:milliliters?|grams?|kilograms?|liters?|litres?)\b",
    ];

    for pattern in patterns {
        let re = Regex::new(pattern).expect("valid volume regex");
        if let Some(m) = re.find(text) {
            return m.as_str().to_string();
        }
    }

    String::new()
}

/// First `img` in the container; `src` is preferred, then the lazy-load
/// attributes. Resolved to an absolute URL against the page.
fn extract_image(el: ElementRef<'_>, page_url: &str) -> String {
    let img_selector = Selector::parse("img").expect("valid img selector");
    let Some(img) = el.select(&img_selector).next() else {
        return String::new();
    };

    let src = ["src", "data-src", "data-lazy-src"]
        .iter()
        .find_map(|attr| img.value().attr(attr))
        .unwrap_or_default();

    if src.is_empty() {
        return String::new();
    }

    resolve_url(page_url, src).unwrap_or_default()
}

/// Reduced single-product heuristic for a standalone product page: first
/// heading, first price-like element, first size match in the full page
/// text, first product image. Returns `None` when no name is found.
#[must_use]
pub fn extract_single_product(html: &str, page_url: &str) -> Option<RawProduct> {
    let doc = Html::parse_document(html);

    let h1_selector = Selector::parse("h1").expect("valid h1 selector");
    let name = doc
        .select(&h1_selector)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
        .or_else(|| first_text_by_class(&doc, r"(?i)product.*name|title"))
        .unwrap_or_default();

    if name.is_empty() {
        return None;
    }

    let price = first_text_by_class(&doc, r"(?i)price").unwrap_or_default();

    let body_selector = Selector::parse("body").expect("valid body selector");
    let page_text = doc
        .select(&body_selector)
        .next()
        .map(element_text)
        .unwrap_or_default();
    let volume_re = Regex::new(r"(?i)\d+\s*(?:ml|g|kg|l)\b").expect("valid volume regex");
    let volume_weight = volume_re
        .find(&page_text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    let image_url = single_product_image(&doc, page_url);

    Some(RawProduct {
        name,
        price,
        volume_weight,
        image_url,
    })
}

/// Text of the first element whose `class` attribute matches `pattern`.
fn first_text_by_class(doc: &Html, pattern: &str) -> Option<String> {
    let any = Selector::parse("*").expect("valid universal selector");
    let re = Regex::new(pattern).expect("valid class regex");

    doc.select(&any)
        .find(|el| {
            el.value()
                .attr("class")
                .is_some_and(|class| re.is_match(class))
        })
        .map(element_text)
        .filter(|t| !t.is_empty())
}

/// Product-looking image preferred over the page's first image.
fn single_product_image(doc: &Html, page_url: &str) -> String {
    let img_selector = Selector::parse("img").expect("valid img selector");
    let class_re = Regex::new(r"(?i)product|main").expect("valid image class regex");

    let img = doc
        .select(&img_selector)
        .find(|el| {
            el.value()
                .attr("class")
                .is_some_and(|class| class_re.is_match(class))
        })
        .or_else(|| doc.select(&img_selector).next());

    let Some(img) = img else {
        return String::new();
    };

    let src = ["src", "data-src"]
        .iter()
        .find_map(|attr| img.value().attr(attr))
        .unwrap_or_default();

    if src.is_empty() {
        return String::new();
    }

    resolve_url(page_url, src).unwrap_or_default()
}

/// Same-origin links whose href contains a product-like keyword, resolved to
/// absolute URLs in document order.
#[must_use]
pub fn product_link_candidates(html: &str, base_url: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let anchor_selector = Selector::parse("a[href]").expect("valid anchor selector");

    let mut candidates = Vec::new();
    for anchor in doc.select(&anchor_selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let href_lower = href.to_lowercase();
        if !PRODUCT_HREF_KEYWORDS.iter().any(|k| href_lower.contains(k)) {
            continue;
        }
        let Some(resolved) = resolve_url(base_url, href) else {
            continue;
        };
        if same_origin(base_url, &resolved) && !candidates.contains(&resolved) {
            candidates.push(resolved);
        }
    }
    candidates
}

/// Visible text of an element: text nodes trimmed and joined with single
/// spaces.
fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selectors(pairs: &[(&str, &str)]) -> Vec<ContainerSelector> {
        pairs
            .iter()
            .map(|(tag, class_pattern)| ContainerSelector {
                tag: (*tag).to_string(),
                class_pattern: (*class_pattern).to_string(),
            })
            .collect()
    }

    const PAGE_URL: &str = "https://shop.example.com/category/drinks";

    #[test]
    fn extracts_fields_from_matching_container() {
        let html = r#"
            <div class="product-card">
                <h2>Coca Cola Original 330ml Can</h2>
                <span class="price">PMP £0.75</span>
                <img src="/img/coke.jpg">
            </div>
        "#;
        let products =
            extract_from_containers(html, &selectors(&[("div", "product-card")]), PAGE_URL);
        assert_eq!(products.len(), 1);
        let p = &products[0];
        assert_eq!(p.name, "Coca Cola Original 330ml Can");
        assert_eq!(p.price, "PMP £0.75");
        assert_eq!(p.volume_weight, "330ml");
        assert_eq!(p.image_url, "https://shop.example.com/img/coke.jpg");
    }

    #[test]
    fn first_matching_selector_wins_without_merging() {
        let html = r#"
            <div class="product"><h3>From First Selector</h3></div>
            <div class="product-item"><h3>From Second Selector</h3></div>
        "#;
        let products = extract_from_containers(
            html,
            &selectors(&[("div", "product"), ("div", "product-item")]),
            PAGE_URL,
        );
        // "product" also matches class="product-item" (regex containment),
        // so the first selector claims both containers and the second is
        // never consulted.
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "From First Selector");
    }

    #[test]
    fn later_selector_used_when_earlier_matches_nothing() {
        let html = r#"<article class="listing-entry"><h2>Tea 80 Bags</h2></article>"#;
        let products = extract_from_containers(
            html,
            &selectors(&[("div", "product"), ("article", "listing")]),
            PAGE_URL,
        );
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Tea 80 Bags");
    }

    #[test]
    fn class_pattern_is_case_insensitive() {
        let html = r#"<div class="Product-Card"><h2>Fanta Orange</h2></div>"#;
        let products =
            extract_from_containers(html, &selectors(&[("div", "product-card")]), PAGE_URL);
        assert_eq!(products.len(), 1);
    }

    #[test]
    fn record_without_name_is_discarded() {
        let html = r#"
            <div class="product"><h2>Named Product</h2></div>
            <div class="product"><span class="price">£1.00</span></div>
        "#;
        let products = extract_from_containers(html, &selectors(&[("div", "product")]), PAGE_URL);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Named Product");
    }

    #[test]
    fn missing_fields_are_empty_not_dropped() {
        let html = r#"<div class="product"><h2>Bare Product</h2></div>"#;
        let products = extract_from_containers(html, &selectors(&[("div", "product")]), PAGE_URL);
        assert_eq!(products.len(), 1);
        let p = &products[0];
        assert!(p.price.is_empty());
        assert!(p.volume_weight.is_empty());
        assert!(p.image_url.is_empty());
    }

    #[test]
    fn name_falls_back_to_container_text() {
        let html = r#"<div class="product">Tango Orange 330ml</div>"#;
        let products = extract_from_containers(html, &selectors(&[("div", "product")]), PAGE_URL);
        assert_eq!(products[0].name, "Tango Orange 330ml");
    }

    #[test]
    fn long_container_text_truncates_to_first_line() {
        let filler = "x".repeat(120);
        let html = format!(
            "<div class=\"product\"><p>Monster Energy 500ml\n{filler}</p></div>"
        );
        let products =
            extract_from_containers(&html, &selectors(&[("div", "product")]), PAGE_URL);
        assert_eq!(products[0].name, "Monster Energy 500ml");
    }

    #[test]
    fn price_candidate_without_digits_is_skipped() {
        let html = r#"
            <div class="product">
                <h2>Sprite 330ml</h2>
                <span class="price">see below</span>
                <span class="cost-label">£0.70</span>
            </div>
        "#;
        let products = extract_from_containers(html, &selectors(&[("div", "product")]), PAGE_URL);
        // ".price" text has no numeric pattern; the "[class*=cost]" candidate
        // supplies the value.
        assert_eq!(products[0].price, "£0.70");
    }

    #[test]
    fn volume_spelled_out_units_second_pass() {
        let html = r#"<div class="product"><h2>Flour</h2><p>Net weight 500 Grams</p></div>"#;
        let products = extract_from_containers(html, &selectors(&[("div", "product")]), PAGE_URL);
        assert_eq!(products[0].volume_weight, "500 Grams");
    }

    #[test]
    fn image_prefers_src_then_lazy_attributes() {
        let html = r#"
            <div class="product"><h2>A</h2><img data-lazy-src="/lazy.jpg" data-src="/ds.jpg"></div>
        "#;
        let products = extract_from_containers(html, &selectors(&[("div", "product")]), PAGE_URL);
        assert_eq!(products[0].image_url, "https://shop.example.com/ds.jpg");
    }

    #[test]
    fn no_selector_match_yields_empty() {
        let html = r"<main><p>Nothing here</p></main>";
        let products = extract_from_containers(html, &selectors(&[("div", "product")]), PAGE_URL);
        assert!(products.is_empty());
    }

    // -----------------------------------------------------------------------
    // extract_single_product
    // -----------------------------------------------------------------------

    #[test]
    fn single_product_from_detail_page() {
        let html = r#"
            <html><body>
                <h1>Lucozade Energy Original 500ml</h1>
                <div class="product-price">£1.10</div>
                <img class="product-image" src="/img/lucozade.jpg">
            </body></html>
        "#;
        let product =
            extract_single_product(html, "https://shop.example.com/p/lucozade").unwrap();
        assert_eq!(product.name, "Lucozade Energy Original 500ml");
        assert_eq!(product.price, "£1.10");
        assert_eq!(product.volume_weight, "500ml");
        assert_eq!(
            product.image_url,
            "https://shop.example.com/img/lucozade.jpg"
        );
    }

    #[test]
    fn single_product_name_falls_back_to_title_class() {
        let html = r#"<div class="product-title">Ribena Blackcurrant</div>"#;
        let product = extract_single_product(html, PAGE_URL).unwrap();
        assert_eq!(product.name, "Ribena Blackcurrant");
    }

    #[test]
    fn single_product_without_name_is_none() {
        let html = r"<p>no headings or product classes</p>";
        assert!(extract_single_product(html, PAGE_URL).is_none());
    }

    // -----------------------------------------------------------------------
    // product_link_candidates
    // -----------------------------------------------------------------------

    #[test]
    fn link_candidates_filter_by_keyword_and_origin() {
        let html = r#"
            <a href="/product/cola">Cola</a>
            <a href="/about">About us</a>
            <a href="/item/42">Item 42</a>
            <a href="https://elsewhere.example.net/product/other">External</a>
            <a href="/p-123">Short form</a>
        "#;
        let links = product_link_candidates(html, "https://shop.example.com/");
        assert_eq!(
            links,
            vec![
                "https://shop.example.com/product/cola",
                "https://shop.example.com/item/42",
                "https://shop.example.com/p-123",
            ]
        );
    }

    #[test]
    fn link_candidates_deduplicate() {
        let html = r#"
            <a href="/product/cola">Cola</a>
            <a href="/product/cola">Cola again</a>
        "#;
        let links = product_link_candidates(html, "https://shop.example.com/");
        assert_eq!(links.len(), 1);
    }
}
