//! Distinct-category lists for the category chips above a product grid.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::products::{Category, Product};

/// Category id meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Returns `true` when `category_id` is the [`ALL_CATEGORIES`] sentinel.
#[must_use]
pub fn is_all(category_id: &str) -> bool {
    category_id == ALL_CATEGORIES
}

/// Builds the category chip list for `products`.
///
/// Each category id appears once (first occurrence wins). Products whose
/// category lacks an id or a name are skipped. The result is sorted by
/// display name and starts with a synthetic `all` entry labelled
/// `all_label`.
#[must_use]
pub fn aggregate_categories<'a, I>(products: I, all_label: &str) -> Vec<Category>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    let mut distinct: Vec<Category> = Vec::new();

    for product in products {
        let Some(category) = product.category.as_ref() else {
            continue;
        };
        if category.id.is_empty() || category.name.is_empty() || is_all(&category.id) {
            continue;
        }
        if seen.insert(category.id.as_str()) {
            distinct.push(category.clone());
        }
    }

    distinct.sort_by(|a, b| compare_names(&a.name, &b.name).then_with(|| a.id.cmp(&b.id)));

    let mut out = Vec::with_capacity(distinct.len() + 1);
    out.push(Category::new(ALL_CATEGORIES, all_label));
    out.extend(distinct);
    out
}

/// Case-insensitive Unicode ordering of display names, falling back to the
/// raw strings so the order is total.
fn compare_names(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}
