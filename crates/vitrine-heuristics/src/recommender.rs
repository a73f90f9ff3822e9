//! Keyword-driven product recommender.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::catalog::{Catalog, CatalogEntry};

/// Maximum number of recommendations returned.
pub const MAX_RECOMMENDATIONS: usize = 5;

const PER_NAMED_CATEGORY: usize = 3;
const MAX_KEYWORD_CATEGORIES: usize = 2;
const PER_KEYWORD_CATEGORY: usize = 2;
const RANDOM_CATEGORIES: usize = 3;

/// Returned when the catalog cannot supply a single product.
pub const FALLBACK_RECOMMENDATIONS: [&str; 5] = [
    "iPhone 15 Pro",
    "MacBook Air M3",
    "Sony WH-1000XM5",
    "iPad Air",
    "PlayStation 5",
];

/// Recommend products from the built-in catalog using thread-local entropy.
#[must_use]
pub fn recommend(description: &str) -> Vec<String> {
    recommend_with(Catalog::builtin(), description, &mut rand::rng())
}

/// Recommend up to [`MAX_RECOMMENDATIONS`] products for `description`.
///
/// Tried in order until one yields products:
/// 1. every category named in the description (case-insensitive substring)
///    contributes up to three products;
/// 2. the first two distinct categories reached through the keyword map
///    contribute up to two products each;
/// 3. three random categories contribute one product each;
/// 4. [`FALLBACK_RECOMMENDATIONS`].
///
/// Sampling uses `rng`, so a seeded generator gives reproducible output.
#[must_use]
pub fn recommend_with<R: Rng + ?Sized>(
    catalog: &Catalog,
    description: &str,
    rng: &mut R,
) -> Vec<String> {
    let description = description.to_lowercase();

    let mut picks: Vec<String> = Vec::new();

    for entry in named_categories(catalog, &description) {
        picks.extend(sample(entry, PER_NAMED_CATEGORY, rng));
    }

    if picks.is_empty() {
        for entry in keyword_categories(catalog, &description) {
            picks.extend(sample(entry, PER_KEYWORD_CATEGORY, rng));
        }
    }

    if picks.is_empty() {
        let stocked: Vec<&CatalogEntry> = catalog
            .categories
            .iter()
            .filter(|entry| !entry.products.is_empty())
            .collect();
        let chosen: Vec<&CatalogEntry> = stocked
            .choose_multiple(rng, RANDOM_CATEGORIES)
            .copied()
            .collect();
        for entry in chosen {
            picks.extend(sample(entry, 1, rng));
        }
    }

    if picks.is_empty() {
        tracing::debug!("catalog yielded no products; using fallback recommendations");
        return FALLBACK_RECOMMENDATIONS
            .iter()
            .map(|p| (*p).to_string())
            .collect();
    }

    picks.truncate(MAX_RECOMMENDATIONS);
    picks
}

fn named_categories<'c>(
    catalog: &'c Catalog,
    description: &'c str,
) -> impl Iterator<Item = &'c CatalogEntry> + 'c {
    catalog
        .categories
        .iter()
        .filter(move |entry| description.contains(&entry.category.to_lowercase()))
}

fn keyword_categories<'c>(catalog: &'c Catalog, description: &str) -> Vec<&'c CatalogEntry> {
    let mut found: Vec<&CatalogEntry> = Vec::new();

    'rules: for rule in &catalog.keywords {
        if !description.contains(&rule.keyword.to_lowercase()) {
            continue;
        }
        for name in &rule.categories {
            let Some(entry) = catalog.category(name) else {
                continue;
            };
            if !found.iter().any(|f| std::ptr::eq(*f, entry)) {
                found.push(entry);
            }
            if found.len() == MAX_KEYWORD_CATEGORIES {
                break 'rules;
            }
        }
    }

    found
}

fn sample<R: Rng + ?Sized>(entry: &CatalogEntry, amount: usize, rng: &mut R) -> Vec<String> {
    entry
        .products
        .choose_multiple(rng, amount)
        .cloned()
        .collect()
}
