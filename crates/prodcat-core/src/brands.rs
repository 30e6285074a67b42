use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Ordered brand vocabulary for substring-based detection.
///
/// Order is a deliberate tie-break: longer or more specific aliases are
/// listed before shorter ones that overlap (`"Coca-Cola"`, `"Coca Cola"`,
/// `"Coke"` are separate entries in that order), and detection returns the
/// first entry contained in the product name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandVocabulary {
    pub brands: Vec<String>,
}

impl BrandVocabulary {
    /// The built-in vocabulary, used when no brands file is configured.
    ///
    /// Mirrors `config/brands.yaml`.
    #[must_use]
    pub fn builtin() -> Self {
        let brands = [
            "Coca-Cola",
            "Coca Cola",
            "Coke",
            "Lucozade",
            "Red Bull",
            "Pepsi",
            "Fanta",
            "Sprite",
            "7UP",
            "7-Up",
            "Tango",
            "Dr Pepper",
            "Dr. Pepper",
            "Monster",
            "Rockstar",
            "Relentless",
            "Powerade",
            "Gatorade",
            "Ribena",
            "Robinsons",
            "Innocent",
            "Tropicana",
            "Ocean Spray",
            "Volvic",
            "Evian",
            "Highland Spring",
        ];
        Self {
            brands: brands.iter().map(|b| (*b).to_string()).collect(),
        }
    }
}

/// Load and validate the brand vocabulary from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or contains an
/// empty entry.
pub fn load_brand_vocabulary(path: &Path) -> Result<BrandVocabulary, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::BrandsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let vocabulary: BrandVocabulary =
        serde_yaml::from_str(&content).map_err(ConfigError::BrandsFileParse)?;

    validate_vocabulary(&vocabulary)?;

    Ok(vocabulary)
}

fn validate_vocabulary(vocabulary: &BrandVocabulary) -> Result<(), ConfigError> {
    if vocabulary.brands.is_empty() {
        return Err(ConfigError::Validation(
            "brand vocabulary must not be empty".to_string(),
        ));
    }

    for brand in &vocabulary.brands {
        if brand.trim().is_empty() {
            return Err(ConfigError::Validation(
                "brand vocabulary entries must be non-empty".to_string(),
            ));
        }
    }

    Ok(())
}
