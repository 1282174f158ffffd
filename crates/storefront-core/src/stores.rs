//! Contracts for the cart, favorites and toast collaborators the grid talks
//! to, plus in-memory implementations.
//!
//! The storefront never owns these stores; it reads them on every render
//! and tolerates them changing between renders.

use std::sync::Mutex;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::{Category, Color, Product, ProductCounts, Seller, Size};

/// A line to add to the cart, carrying the chosen variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub image_url: Vec<String>,
    /// Display name of the chosen size, empty when none.
    pub selected_size: String,
    /// Display name of the chosen color, empty when none.
    pub selected_color: String,
    pub selected_size_id: Option<String>,
    pub selected_color_id: Option<String>,
    pub category: Option<Category>,
    pub seller: Seller,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub item: CartItem,
    pub quantity: u32,
}

impl CartLine {
    fn matches(&self, id: &str, size_id: Option<&str>, color_id: Option<&str>) -> bool {
        self.item.id == id
            && self.item.selected_size_id.as_deref() == size_id
            && self.item.selected_color_id.as_deref() == color_id
    }
}

pub trait CartStore {
    /// Adds `quantity` of `item`; returns `false` when the store rejected it.
    fn add_to_cart(&mut self, item: CartItem, quantity: u32) -> bool;

    fn remove_from_cart(&mut self, id: &str, size_id: Option<&str>, color_id: Option<&str>);

    fn update_quantity(
        &mut self,
        id: &str,
        quantity: u32,
        size_id: Option<&str>,
        color_id: Option<&str>,
    );

    fn items(&self) -> &[CartLine];

    /// Quantity of the first cart line for product `id`, 0 when absent.
    fn quantity_of(&self, id: &str) -> u32 {
        self.items()
            .iter()
            .find(|line| line.item.id == id)
            .map_or(0, |line| line.quantity)
    }
}

/// A favorited product snapshot. Reviews are not kept, only their count
/// and the average shown at the time of favoriting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image_url: Vec<String>,
    pub category: Category,
    pub seller: Seller,
    pub sizes: Vec<Size>,
    pub colors: Vec<Color>,
    #[serde(rename = "_count")]
    pub counts: ProductCounts,
    pub average_rating: f64,
}

impl FavoriteItem {
    /// Snapshot of `product`, or `None` when it lacks an id or a full category.
    #[must_use]
    pub fn from_product(product: &Product) -> Option<Self> {
        let category = product.category.as_ref()?;
        if product.id.is_empty() || category.id.is_empty() || category.name.is_empty() {
            return None;
        }
        Some(Self {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            category: category.clone(),
            seller: product.seller.clone(),
            sizes: product.sizes.clone(),
            colors: product.colors.clone(),
            counts: product.counts,
            average_rating: product.rating().display_value(),
        })
    }

    /// Turns the snapshot back into a [`Product`] so favorites can go
    /// through the same grid projection as fetched products.
    #[must_use]
    pub fn to_product(&self) -> Product {
        Product {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            image_url: self.image_url.clone(),
            category: Some(self.category.clone()),
            seller: self.seller.clone(),
            sizes: self.sizes.clone(),
            colors: self.colors.clone(),
            reviews: Vec::new(),
            counts: self.counts,
            average_rating: Some(self.average_rating),
            attributes: None,
            created_at: None,
            updated_at: None,
        }
    }
}

pub trait FavoritesStore {
    /// Adds the item when absent, removes it when present.
    fn toggle_favorite(&mut self, item: FavoriteItem);

    fn remove_from_favorites(&mut self, id: &str);

    fn is_favorite(&self, id: &str) -> bool;

    fn favorites(&self) -> &[FavoriteItem];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Cart,
    Favorites,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub duration_ms: u64,
}

/// Fire-and-forget toast sink.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

#[derive(Debug, Default, Clone)]
pub struct MemoryCart {
    lines: Vec<CartLine>,
}

impl MemoryCart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStore for MemoryCart {
    fn add_to_cart(&mut self, item: CartItem, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }
        let size = item.selected_size_id.clone();
        let color = item.selected_color_id.clone();
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.matches(&item.id, size.as_deref(), color.as_deref()))
        {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine { item, quantity });
        }
        true
    }

    fn remove_from_cart(&mut self, id: &str, size_id: Option<&str>, color_id: Option<&str>) {
        self.lines.retain(|l| !l.matches(id, size_id, color_id));
    }

    fn update_quantity(
        &mut self,
        id: &str,
        quantity: u32,
        size_id: Option<&str>,
        color_id: Option<&str>,
    ) {
        if quantity == 0 {
            self.remove_from_cart(id, size_id, color_id);
            return;
        }
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.matches(id, size_id, color_id))
        {
            line.quantity = quantity;
        }
    }

    fn items(&self) -> &[CartLine] {
        &self.lines
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryFavorites {
    items: Vec<FavoriteItem>,
}

impl MemoryFavorites {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FavoritesStore for MemoryFavorites {
    fn toggle_favorite(&mut self, item: FavoriteItem) {
        if self.is_favorite(&item.id) {
            self.remove_from_favorites(&item.id);
        } else {
            self.items.push(item);
        }
    }

    fn remove_from_favorites(&mut self, id: &str) {
        self.items.retain(|f| f.id != id);
    }

    fn is_favorite(&self, id: &str) -> bool {
        self.items.iter().any(|f| f.id == id)
    }

    fn favorites(&self) -> &[FavoriteItem] {
        &self.items
    }
}

/// Logs each notification as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Error => tracing::warn!(
                duration_ms = notification.duration_ms,
                "{}",
                notification.message
            ),
            kind => tracing::info!(
                ?kind,
                duration_ms = notification.duration_ms,
                "{}",
                notification.message
            ),
        }
    }
}

/// Keeps every notification, for assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything sent so far.
    #[must_use]
    pub fn sent(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, size: Option<&str>) -> CartItem {
        CartItem {
            id: id.to_string(),
            name: "Shirt".to_string(),
            price: Decimal::new(100, 0),
            image_url: Vec::new(),
            selected_size: String::new(),
            selected_color: String::new(),
            selected_size_id: size.map(str::to_string),
            selected_color_id: None,
            category: None,
            seller: Seller::default(),
        }
    }

    #[test]
    fn adding_same_variant_accumulates() {
        let mut cart = MemoryCart::new();
        assert!(cart.add_to_cart(item("p1", Some("m")), 1));
        assert!(cart.add_to_cart(item("p1", Some("m")), 2));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.quantity_of("p1"), 3);
    }

    #[test]
    fn different_sizes_are_separate_lines() {
        let mut cart = MemoryCart::new();
        cart.add_to_cart(item("p1", Some("m")), 1);
        cart.add_to_cart(item("p1", Some("l")), 1);
        assert_eq!(cart.items().len(), 2);
        cart.remove_from_cart("p1", Some("m"), None);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].item.selected_size_id.as_deref(), Some("l"));
    }

    #[test]
    fn zero_quantity_add_is_rejected() {
        let mut cart = MemoryCart::new();
        assert!(!cart.add_to_cart(item("p1", None), 0));
        assert_eq!(cart.quantity_of("p1"), 0);
    }

    #[test]
    fn update_to_zero_removes_line() {
        let mut cart = MemoryCart::new();
        cart.add_to_cart(item("p1", None), 2);
        cart.update_quantity("p1", 5, None, None);
        assert_eq!(cart.quantity_of("p1"), 5);
        cart.update_quantity("p1", 0, None, None);
        assert!(cart.items().is_empty());
    }

    #[test]
    fn favorite_round_trip_keeps_rating() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "name": "Shirt",
            "price": 100,
            "category": {"id": "c1", "name": "Shirts"},
            "reviews": [{"rating": 4}, {"rating": 3}],
            "_count": {"reviews": 2}
        }))
        .unwrap();

        let favorite = FavoriteItem::from_product(&product).unwrap();
        assert!((favorite.average_rating - 3.5).abs() < f64::EPSILON);

        let restored = favorite.to_product();
        assert_eq!(restored.rating().measured(), Some(3.5));
        assert_eq!(restored.category_id(), Some("c1"));
    }

    #[test]
    fn toggle_adds_then_removes() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "name": "Shirt",
            "price": 100,
            "category": {"id": "c1", "name": "Shirts"}
        }))
        .unwrap();
        let mut favorites = MemoryFavorites::new();
        let favorite = FavoriteItem::from_product(&product).unwrap();

        favorites.toggle_favorite(favorite.clone());
        assert!(favorites.is_favorite("p1"));
        favorites.toggle_favorite(favorite);
        assert!(!favorites.is_favorite("p1"));
    }
}
