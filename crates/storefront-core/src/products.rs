//! Catalog records as returned by `/api/products`.
//!
//! The API is loose about optional collections: `imageUrl` may be `null`,
//! and `sizes`, `colors` or `reviews` may be missing on list endpoints. All
//! of these deserialize to empty vectors so downstream code never has to
//! distinguish "absent" from "empty".

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::rating::Rating;

/// A sellable catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Accepted from JSON as either a number or a decimal string.
    pub price: Decimal,
    /// Ordered image URLs; the first one is the card image.
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: Vec<String>,
    /// `None` when the API sent no usable category. Such products are not
    /// rendered and cannot be favorited.
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub seller: Seller,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sizes: Vec<Size>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub colors: Vec<Color>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reviews: Vec<Review>,
    #[serde(rename = "_count", default, deserialize_with = "null_as_default")]
    pub counts: ProductCounts,
    /// Average as computed server-side. Only some endpoints send it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Category id, if the product carries a non-empty one.
    #[must_use]
    pub fn category_id(&self) -> Option<&str> {
        self.category
            .as_ref()
            .map(|c| c.id.as_str())
            .filter(|id| !id.is_empty())
    }

    /// Category display name, empty when the category is missing.
    #[must_use]
    pub fn category_name(&self) -> &str {
        self.category.as_ref().map_or("", |c| c.name.as_str())
    }

    /// First image URL, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.image_url
            .iter()
            .map(String::as_str)
            .find(|url| !url.is_empty())
    }

    /// Number of reviews as reported by the API.
    #[must_use]
    pub fn review_count(&self) -> u32 {
        self.counts.reviews
    }

    /// Presentation rating, see [`Rating::for_product`].
    #[must_use]
    pub fn rating(&self) -> Rating {
        Rating::for_product(self)
    }

    /// Whether the product has the fields the grid needs to draw a card.
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        !self.id.is_empty() && self.category_id().is_some()
    }

    #[must_use]
    pub fn size(&self, size_id: &str) -> Option<&Size> {
        self.sizes.iter().find(|s| s.id == size_id)
    }

    #[must_use]
    pub fn color(&self, color_id: &str) -> Option<&Color> {
        self.colors.iter().find(|c| c.id == color_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    /// Some list endpoints send the id alone.
    #[serde(default)]
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub fullname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub id: String,
    pub name: String,
    /// CSS color, e.g. `"#000000"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub rating: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCounts {
    #[serde(default)]
    pub reviews: u32,
}

/// Deserializes `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn deserializes_full_detail_payload() {
        let product: Product = serde_json::from_value(json!({
            "id": "p1",
            "name": "Linen shirt",
            "description": "Light summer shirt",
            "price": "2490.00",
            "imageUrl": ["/uploads/a.jpg", "/uploads/b.jpg"],
            "category": {"id": "c1", "name": "Shirts"},
            "seller": {"id": "s1", "fullname": "Aida Store"},
            "sizes": [{"id": "m", "name": "M"}, {"id": "l", "name": "L"}],
            "colors": [{"id": "w", "name": "White", "colorCode": "#ffffff"}],
            "reviews": [{"id": "r1", "clientName": "Bek", "text": "ok", "rating": 4}],
            "averageRating": 4.0,
            "_count": {"reviews": 1},
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-02T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(product.price, Decimal::new(249_000, 2));
        assert_eq!(product.primary_image(), Some("/uploads/a.jpg"));
        assert_eq!(product.category_id(), Some("c1"));
        assert_eq!(product.seller.fullname, "Aida Store");
        assert_eq!(product.colors[0].color_code.as_deref(), Some("#ffffff"));
        assert_eq!(product.review_count(), 1);
        assert!(product.created_at.is_some());
    }

    #[test]
    fn null_and_missing_collections_become_empty() {
        let product: Product = serde_json::from_value(json!({
            "id": "p2",
            "name": "Cap",
            "price": 500,
            "imageUrl": null,
            "sizes": null,
            "category": {"id": "c2", "name": "Hats"}
        }))
        .unwrap();

        assert!(product.image_url.is_empty());
        assert!(product.sizes.is_empty());
        assert!(product.colors.is_empty());
        assert!(product.reviews.is_empty());
        assert_eq!(product.review_count(), 0);
        assert_eq!(product.primary_image(), None);
        assert!(product.description.is_none());
    }

    #[test]
    fn product_without_category_is_not_renderable() {
        let product: Product = serde_json::from_value(json!({
            "id": "p3",
            "name": "Orphan",
            "price": 1
        }))
        .unwrap();
        assert!(!product.is_renderable());
        assert_eq!(product.category_name(), "");
    }

    #[test]
    fn empty_category_id_is_treated_as_missing() {
        let product: Product = serde_json::from_value(json!({
            "id": "p4",
            "name": "Blank",
            "price": 1,
            "category": {"id": "", "name": "Nothing"}
        }))
        .unwrap();
        assert_eq!(product.category_id(), None);
    }

    #[test]
    fn category_without_name_still_decodes() {
        let product: Product = serde_json::from_value(json!({
            "id": "p6",
            "name": "Belt",
            "price": 300,
            "category": {"id": "c3"}
        }))
        .unwrap();
        assert_eq!(product.category_id(), Some("c3"));
        assert_eq!(product.category_name(), "");
        assert!(product.is_renderable());
    }

    #[test]
    fn serialization_does_not_add_a_rating_field() {
        let product: Product = serde_json::from_value(json!({
            "id": "p5",
            "name": "Scarf",
            "price": 100,
            "category": {"id": "c1", "name": "Accessories"}
        }))
        .unwrap();
        let value = serde_json::to_value(&product).unwrap();
        assert!(value.get("averageRating").is_none());
        assert_eq!(value["_count"]["reviews"], 0);
    }
}
