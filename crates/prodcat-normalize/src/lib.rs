pub mod brand;
pub mod clean;
pub mod validate;

pub use brand::{apply_brands, detect_brand};
pub use clean::{
    clean_price, clean_product, clean_product_name, clean_products, detect_multipack,
    generate_slug, standardize_units,
};
pub use validate::{validate_product, validate_products, QualityReport, ValidationResult};
