//! Product catalog consulted by the keyword recommender.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::HeuristicsError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub category: String,
    pub products: Vec<String>,
}

/// Secondary trigger word pointing at one or more categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keyword: String,
    pub categories: Vec<String>,
}

/// Ordered categories plus the keyword map used when no category is named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<CatalogEntry>,
    #[serde(default)]
    pub keywords: Vec<KeywordRule>,
}

const BUILTIN_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "téléphone",
        &[
            "iPhone 15 Pro",
            "Samsung Galaxy S24",
            "Google Pixel 8",
            "OnePlus 12",
            "Xiaomi 14",
        ],
    ),
    (
        "ordinateur",
        &[
            "MacBook Air M3",
            "Dell XPS 13",
            "Lenovo ThinkPad X1 Carbon",
            "HP Spectre x360",
            "ASUS ZenBook 14",
        ],
    ),
    (
        "musique",
        &[
            "Sony WH-1000XM5",
            "AirPods Pro",
            "Bose QuietComfort Ultra",
            "JBL Charge 5",
            "Sonos Era 100",
        ],
    ),
    (
        "photo",
        &[
            "Canon EOS R6",
            "Sony Alpha 7 IV",
            "Nikon Z6 II",
            "Fujifilm X-T5",
            "GoPro Hero 12",
        ],
    ),
    (
        "tablette",
        &[
            "iPad Air",
            "Samsung Galaxy Tab S9",
            "Microsoft Surface Pro 9",
            "Amazon Fire HD 10",
            "Lenovo Tab P12",
        ],
    ),
    (
        "gaming",
        &[
            "PlayStation 5",
            "Xbox Series X",
            "Nintendo Switch OLED",
            "Steam Deck",
            "Logitech G Pro X",
        ],
    ),
    (
        "maison",
        &[
            "Dyson V15",
            "Philips Hue Starter Kit",
            "Nest Thermostat",
            "Roomba j7+",
            "Amazon Echo Dot",
        ],
    ),
    (
        "sport",
        &[
            "Garmin Forerunner 265",
            "Apple Watch Ultra 2",
            "Fitbit Charge 6",
            "Polar Vantage V3",
            "Whoop 4.0",
        ],
    ),
];

const BUILTIN_KEYWORDS: &[(&str, &[&str])] = &[
    ("qualité", &["téléphone", "photo"]),
    ("performance", &["ordinateur", "gaming"]),
    ("portable", &["ordinateur", "téléphone"]),
    ("travail", &["ordinateur", "tablette"]),
    ("écouter", &["musique"]),
    ("audio", &["musique"]),
    ("casque", &["musique", "gaming"]),
    ("souvenir", &["photo"]),
    ("voyage", &["photo", "tablette"]),
    ("lecture", &["tablette"]),
    ("jeu", &["gaming"]),
    ("cuisine", &["maison"]),
    ("domotique", &["maison"]),
    ("fitness", &["sport"]),
    ("course", &["sport"]),
    ("santé", &["sport"]),
];

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| Catalog {
    categories: BUILTIN_CATEGORIES
        .iter()
        .map(|(category, products)| CatalogEntry {
            category: (*category).to_string(),
            products: products.iter().map(|p| (*p).to_string()).collect(),
        })
        .collect(),
    keywords: BUILTIN_KEYWORDS
        .iter()
        .map(|(keyword, categories)| KeywordRule {
            keyword: (*keyword).to_string(),
            categories: categories.iter().map(|c| (*c).to_string()).collect(),
        })
        .collect(),
});

impl Catalog {
    /// The compiled-in catalog: eight categories with five products each.
    #[must_use]
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Catalog with no categories; recommendations fall back to fixed defaults.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            categories: Vec::new(),
            keywords: Vec::new(),
        }
    }

    /// Look up a category by name, ignoring case.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&CatalogEntry> {
        let name = name.to_lowercase();
        self.categories
            .iter()
            .find(|entry| entry.category.to_lowercase() == name)
    }

    /// Whether `product` appears in any category.
    #[must_use]
    pub fn contains_product(&self, product: &str) -> bool {
        self.categories
            .iter()
            .any(|entry| entry.products.iter().any(|p| p == product))
    }

    /// Parse and validate a YAML catalog.
    ///
    /// # Errors
    ///
    /// Returns [`HeuristicsError::CatalogParse`] for malformed YAML and
    /// [`HeuristicsError::CatalogValidation`] when the content is inconsistent.
    pub fn from_yaml_str(content: &str) -> Result<Self, HeuristicsError> {
        let catalog: Catalog = serde_yaml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load and validate a YAML catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`HeuristicsError::CatalogIo`] if the file cannot be read, or
    /// any error from [`Catalog::from_yaml_str`].
    pub fn load(path: &Path) -> Result<Self, HeuristicsError> {
        let content = std::fs::read_to_string(path).map_err(|e| HeuristicsError::CatalogIo {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml_str(&content)
    }

    fn validate(&self) -> Result<(), HeuristicsError> {
        let mut seen = HashSet::new();

        for entry in &self.categories {
            let name = entry.category.trim().to_lowercase();
            if name.is_empty() {
                return Err(HeuristicsError::CatalogValidation(
                    "category name must be non-empty".to_string(),
                ));
            }
            if !seen.insert(name) {
                return Err(HeuristicsError::CatalogValidation(format!(
                    "duplicate category: '{}'",
                    entry.category
                )));
            }
            if entry.products.is_empty() {
                return Err(HeuristicsError::CatalogValidation(format!(
                    "category '{}' has no products",
                    entry.category
                )));
            }
            if entry.products.iter().any(|p| p.trim().is_empty()) {
                return Err(HeuristicsError::CatalogValidation(format!(
                    "category '{}' has an empty product name",
                    entry.category
                )));
            }
        }

        for rule in &self.keywords {
            if rule.keyword.trim().is_empty() {
                return Err(HeuristicsError::CatalogValidation(
                    "keyword must be non-empty".to_string(),
                ));
            }
            if let Some(unknown) = rule.categories.iter().find(|c| self.category(c).is_none()) {
                return Err(HeuristicsError::CatalogValidation(format!(
                    "keyword '{}' points at unknown category '{unknown}'",
                    rule.keyword
                )));
            }
        }

        Ok(())
    }
}
