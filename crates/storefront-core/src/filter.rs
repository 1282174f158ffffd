//! Grid filter state and its `/api/products` query-string form.
//!
//! Only criteria that deviate from their neutral default are sent, so an
//! untouched filter panel produces a bare `/api/products` request.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category::is_all;
use crate::CoreError;

/// Upper bound of the price slider; `max < DEFAULT_MAX_PRICE` narrows the range.
pub const DEFAULT_MAX_PRICE: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: Decimal::ZERO,
            max: DEFAULT_MAX_PRICE,
        }
    }
}

impl PriceRange {
    /// `true` when the range excludes some of the default span.
    #[must_use]
    pub fn is_narrowed(&self) -> bool {
        self.min > Decimal::ZERO || self.max < DEFAULT_MAX_PRICE
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    Rating,
    Popular,
}

impl SortKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::PriceAsc => "price_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::Rating => "rating",
            SortKey::Popular => "popular",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortKey::Newest),
            "price_asc" => Ok(SortKey::PriceAsc),
            "price_desc" => Ok(SortKey::PriceDesc),
            "rating" => Ok(SortKey::Rating),
            "popular" => Ok(SortKey::Popular),
            other => Err(CoreError::InvalidSortKey(other.to_string())),
        }
    }
}

/// Conjunctive product filter. `Default` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    /// Category scope. The `all` sentinel is the same as `None`.
    pub category_id: Option<String>,
    /// Also match products in subcategories of `category_id`.
    pub include_subcategories: bool,
    /// Additional category ids from the filter panel.
    pub categories: Vec<String>,
    pub price_range: PriceRange,
    pub sort_by: SortKey,
    /// Minimum average rating, 0 for none.
    pub min_rating: u8,
    pub seller: Option<String>,
    pub search: Option<String>,
    pub limit: Option<u32>,
}

impl ProductQuery {
    /// Query scoped to one category.
    #[must_use]
    pub fn in_category(category_id: impl Into<String>) -> Self {
        Self {
            category_id: Some(category_id.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query-string pairs in the order the API documents them.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(category_id) = self
            .category_id
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !is_all(c))
        {
            pairs.push(("categoryId", category_id.to_string()));
            if self.include_subcategories {
                pairs.push(("includeSubcategories", "true".to_string()));
            }
        }

        for category in self.categories.iter().filter(|c| !c.is_empty()) {
            pairs.push(("categories", category.clone()));
        }

        if self.price_range.is_narrowed() {
            pairs.push(("minPrice", self.price_range.min.normalize().to_string()));
            pairs.push(("maxPrice", self.price_range.max.normalize().to_string()));
        }

        if self.sort_by != SortKey::Newest {
            pairs.push(("sortBy", self.sort_by.as_str().to_string()));
        }

        if self.min_rating > 0 {
            pairs.push(("minRating", self.min_rating.to_string()));
        }

        if let Some(seller) = trimmed(self.seller.as_deref()) {
            pairs.push(("seller", seller.to_string()));
        }

        if let Some(search) = trimmed(self.search.as_deref()) {
            pairs.push(("search", search.to_string()));
        }

        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }

        pairs
    }
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
